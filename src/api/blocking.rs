//! A blocking version of [`crate::api::rest::Gateway`] and [`crate::api::auth::OAuth`].
//!
//! Every call drives the async implementation on a private single threaded tokio runtime, so
//! the types in here must not be used from within an async context.
use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};
use url::Url;

use super::auth::{self, AuthResult};
use super::paginator::ResultsPaginator;
use super::rest::{
    self, Collaborator, Comment, CommentFilter, CommentID, CompletedByCompletionDate,
    CompletedByDueDate, CreateComment, CreateFolder, CreateLabel, CreateProject, CreateSection,
    CreateTask, Folder, FolderID, Label, LabelID, MoveTask, Project, ProjectID, QuickAdd, Section,
    SectionID, Task, TaskFilter, TaskID, TaskQuery, UpdateComment, UpdateFolder, UpdateLabel,
    UpdateProject, UpdateSection, UpdateTask,
};
use crate::error::{Error, Result};

fn runtime() -> Result<Arc<Runtime>> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(Error::Runtime)?;
    Ok(Arc::new(runtime))
}

/// Iterates over the pages of a listing, fetching one page per call to `next`.
///
/// Stops after the last page or after the first error.
#[derive(Debug)]
pub struct Pages<T> {
    runtime: Arc<Runtime>,
    inner: ResultsPaginator<T>,
}

impl<T> Pages<T> {
    /// Fetches every remaining page and concatenates the results.
    pub fn collect_all(self) -> Result<Vec<T>> {
        let Pages { runtime, inner } = self;
        runtime.block_on(inner.collect_all())
    }
}

impl<T> Iterator for Pages<T> {
    type Item = Result<Vec<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.inner.is_exhausted() {
            return None;
        }
        self.runtime.block_on(self.inner.next_page())
    }
}

/// Blocking counterpart of [`rest::Gateway`], with the same methods and semantics.
#[derive(Debug)]
pub struct Gateway {
    runtime: Arc<Runtime>,
    inner: rest::Gateway,
}

impl Gateway {
    /// Create a new [`Gateway`].
    ///
    /// * `token` - the API token used for network calls.
    /// * `url` - the base URL to call. See [`struct@super::endpoints::TODOIST_API_URL`]
    pub fn new(token: &str, url: &Url) -> Result<Gateway> {
        Ok(Gateway {
            runtime: runtime()?,
            inner: rest::Gateway::new(token, url)?,
        })
    }

    /// Releases the connection pool. Closing twice is a no-op.
    pub fn close(&mut self) {
        self.inner.close()
    }

    /// True once [`Gateway::close`] was called.
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    fn pages<T>(&self, inner: ResultsPaginator<T>) -> Pages<T> {
        Pages {
            runtime: self.runtime.clone(),
            inner,
        }
    }

    /// See [`rest::Gateway::task`].
    pub fn task(&self, id: &TaskID) -> Result<Task> {
        self.runtime.block_on(self.inner.task(id))
    }

    /// See [`rest::Gateway::tasks`].
    pub fn tasks(&self, filter: &TaskFilter) -> Result<Pages<Task>> {
        Ok(self.pages(self.inner.tasks(filter)?))
    }

    /// See [`rest::Gateway::filter_tasks`].
    pub fn filter_tasks(&self, query: &TaskQuery) -> Result<Pages<Task>> {
        Ok(self.pages(self.inner.filter_tasks(query)?))
    }

    /// See [`rest::Gateway::completed_tasks_by_due_date`].
    pub fn completed_tasks_by_due_date(&self, query: &CompletedByDueDate) -> Result<Pages<Task>> {
        Ok(self.pages(self.inner.completed_tasks_by_due_date(query)?))
    }

    /// See [`rest::Gateway::completed_tasks_by_completion_date`].
    pub fn completed_tasks_by_completion_date(
        &self,
        query: &CompletedByCompletionDate,
    ) -> Result<Pages<Task>> {
        Ok(self.pages(self.inner.completed_tasks_by_completion_date(query)?))
    }

    /// See [`rest::Gateway::create_task`].
    pub fn create_task(&self, task: &CreateTask) -> Result<Task> {
        self.runtime.block_on(self.inner.create_task(task))
    }

    /// See [`rest::Gateway::quick_add`].
    pub fn quick_add(&self, quick: &QuickAdd) -> Result<Task> {
        self.runtime.block_on(self.inner.quick_add(quick))
    }

    /// See [`rest::Gateway::update_task`].
    pub fn update_task(&self, id: &TaskID, task: &UpdateTask) -> Result<Task> {
        self.runtime.block_on(self.inner.update_task(id, task))
    }

    /// See [`rest::Gateway::close_task`].
    pub fn close_task(&self, id: &TaskID) -> Result<bool> {
        self.runtime.block_on(self.inner.close_task(id))
    }

    /// See [`rest::Gateway::reopen_task`].
    pub fn reopen_task(&self, id: &TaskID) -> Result<bool> {
        self.runtime.block_on(self.inner.reopen_task(id))
    }

    /// See [`rest::Gateway::move_task`].
    pub fn move_task(&self, id: &TaskID, to: &MoveTask) -> Result<bool> {
        self.runtime.block_on(self.inner.move_task(id, to))
    }

    /// See [`rest::Gateway::delete_task`].
    pub fn delete_task(&self, id: &TaskID) -> Result<bool> {
        self.runtime.block_on(self.inner.delete_task(id))
    }

    /// See [`rest::Gateway::project`].
    pub fn project(&self, id: &ProjectID) -> Result<Project> {
        self.runtime.block_on(self.inner.project(id))
    }

    /// See [`rest::Gateway::projects`].
    pub fn projects(&self, limit: Option<u32>) -> Result<Pages<Project>> {
        Ok(self.pages(self.inner.projects(limit)?))
    }

    /// See [`rest::Gateway::create_project`].
    pub fn create_project(&self, project: &CreateProject) -> Result<Project> {
        self.runtime.block_on(self.inner.create_project(project))
    }

    /// See [`rest::Gateway::update_project`].
    pub fn update_project(&self, id: &ProjectID, project: &UpdateProject) -> Result<Project> {
        self.runtime.block_on(self.inner.update_project(id, project))
    }

    /// See [`rest::Gateway::archive_project`].
    pub fn archive_project(&self, id: &ProjectID) -> Result<Project> {
        self.runtime.block_on(self.inner.archive_project(id))
    }

    /// See [`rest::Gateway::unarchive_project`].
    pub fn unarchive_project(&self, id: &ProjectID) -> Result<Project> {
        self.runtime.block_on(self.inner.unarchive_project(id))
    }

    /// See [`rest::Gateway::delete_project`].
    pub fn delete_project(&self, id: &ProjectID) -> Result<bool> {
        self.runtime.block_on(self.inner.delete_project(id))
    }

    /// See [`rest::Gateway::collaborators`].
    pub fn collaborators(
        &self,
        project_id: &ProjectID,
        limit: Option<u32>,
    ) -> Result<Pages<Collaborator>> {
        Ok(self.pages(self.inner.collaborators(project_id, limit)?))
    }

    /// See [`rest::Gateway::section`].
    pub fn section(&self, id: &SectionID) -> Result<Section> {
        self.runtime.block_on(self.inner.section(id))
    }

    /// See [`rest::Gateway::sections`].
    pub fn sections(&self, project_id: Option<&str>, limit: Option<u32>) -> Result<Pages<Section>> {
        Ok(self.pages(self.inner.sections(project_id, limit)?))
    }

    /// See [`rest::Gateway::create_section`].
    pub fn create_section(&self, section: &CreateSection) -> Result<Section> {
        self.runtime.block_on(self.inner.create_section(section))
    }

    /// See [`rest::Gateway::update_section`].
    pub fn update_section(&self, id: &SectionID, section: &UpdateSection) -> Result<Section> {
        self.runtime.block_on(self.inner.update_section(id, section))
    }

    /// See [`rest::Gateway::delete_section`].
    pub fn delete_section(&self, id: &SectionID) -> Result<bool> {
        self.runtime.block_on(self.inner.delete_section(id))
    }

    /// See [`rest::Gateway::comment`].
    pub fn comment(&self, id: &CommentID) -> Result<Comment> {
        self.runtime.block_on(self.inner.comment(id))
    }

    /// See [`rest::Gateway::comments`].
    pub fn comments(&self, filter: &CommentFilter) -> Result<Pages<Comment>> {
        Ok(self.pages(self.inner.comments(filter)?))
    }

    /// See [`rest::Gateway::create_comment`].
    pub fn create_comment(&self, comment: &CreateComment) -> Result<Comment> {
        self.runtime.block_on(self.inner.create_comment(comment))
    }

    /// See [`rest::Gateway::update_comment`].
    pub fn update_comment(&self, id: &CommentID, comment: &UpdateComment) -> Result<Comment> {
        self.runtime.block_on(self.inner.update_comment(id, comment))
    }

    /// See [`rest::Gateway::delete_comment`].
    pub fn delete_comment(&self, id: &CommentID) -> Result<bool> {
        self.runtime.block_on(self.inner.delete_comment(id))
    }

    /// See [`rest::Gateway::label`].
    pub fn label(&self, id: &LabelID) -> Result<Label> {
        self.runtime.block_on(self.inner.label(id))
    }

    /// See [`rest::Gateway::labels`].
    pub fn labels(&self, limit: Option<u32>) -> Result<Pages<Label>> {
        Ok(self.pages(self.inner.labels(limit)?))
    }

    /// See [`rest::Gateway::create_label`].
    pub fn create_label(&self, label: &CreateLabel) -> Result<Label> {
        self.runtime.block_on(self.inner.create_label(label))
    }

    /// See [`rest::Gateway::update_label`].
    pub fn update_label(&self, id: &LabelID, label: &UpdateLabel) -> Result<Label> {
        self.runtime.block_on(self.inner.update_label(id, label))
    }

    /// See [`rest::Gateway::delete_label`].
    pub fn delete_label(&self, id: &LabelID) -> Result<bool> {
        self.runtime.block_on(self.inner.delete_label(id))
    }

    /// See [`rest::Gateway::shared_labels`].
    pub fn shared_labels(&self, omit_personal: bool, limit: Option<u32>) -> Result<Pages<String>> {
        Ok(self.pages(self.inner.shared_labels(omit_personal, limit)?))
    }

    /// See [`rest::Gateway::rename_shared_label`].
    pub fn rename_shared_label(&self, name: &str, new_name: &str) -> Result<bool> {
        self.runtime
            .block_on(self.inner.rename_shared_label(name, new_name))
    }

    /// See [`rest::Gateway::remove_shared_label`].
    pub fn remove_shared_label(&self, name: &str) -> Result<bool> {
        self.runtime.block_on(self.inner.remove_shared_label(name))
    }

    /// See [`rest::Gateway::folder`].
    pub fn folder(&self, id: &FolderID) -> Result<Folder> {
        self.runtime.block_on(self.inner.folder(id))
    }

    /// See [`rest::Gateway::folders`].
    pub fn folders(&self, workspace_id: Option<&str>, limit: Option<u32>) -> Result<Pages<Folder>> {
        Ok(self.pages(self.inner.folders(workspace_id, limit)?))
    }

    /// See [`rest::Gateway::create_folder`].
    pub fn create_folder(&self, folder: &CreateFolder) -> Result<Folder> {
        self.runtime.block_on(self.inner.create_folder(folder))
    }

    /// See [`rest::Gateway::update_folder`].
    pub fn update_folder(&self, id: &FolderID, folder: &UpdateFolder) -> Result<Folder> {
        self.runtime.block_on(self.inner.update_folder(id, folder))
    }

    /// See [`rest::Gateway::delete_folder`].
    pub fn delete_folder(&self, id: &FolderID) -> Result<bool> {
        self.runtime.block_on(self.inner.delete_folder(id))
    }
}

/// Blocking counterpart of [`auth::OAuth`].
#[derive(Debug)]
pub struct OAuth {
    runtime: Arc<Runtime>,
    inner: auth::OAuth,
}

impl OAuth {
    /// See [`auth::OAuth::new`].
    pub fn new(oauth_url: &Url, api_url: &Url) -> Result<OAuth> {
        Ok(OAuth {
            runtime: runtime()?,
            inner: auth::OAuth::new(oauth_url, api_url)?,
        })
    }

    /// See [`auth::OAuth::authorization_url`].
    pub fn authorization_url(&self, client_id: &str, scopes: &[&str], state: &str) -> Result<Url> {
        self.inner.authorization_url(client_id, scopes, state)
    }

    /// See [`auth::OAuth::access_token`].
    pub fn access_token(
        &self,
        client_id: &str,
        client_secret: &str,
        code: &str,
    ) -> Result<AuthResult> {
        self.runtime
            .block_on(self.inner.access_token(client_id, client_secret, code))
    }

    /// See [`auth::OAuth::revoke_access_token`].
    pub fn revoke_access_token(
        &self,
        client_id: &str,
        client_secret: &str,
        token: &str,
    ) -> Result<bool> {
        self.runtime
            .block_on(self.inner.revoke_access_token(client_id, client_secret, token))
    }
}
