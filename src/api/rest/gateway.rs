use reqwest_middleware::ClientWithMiddleware;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use url::Url;
use uuid::Uuid;

use super::{
    Collaborator, Comment, CommentFilter, CommentID, CompletedByCompletionDate,
    CompletedByDueDate, CreateComment, CreateFolder, CreateLabel, CreateProject, CreateSection,
    CreateTask, Folder, FolderID, Label, LabelID, MoveTask, Project, ProjectID, QuickAdd, Section,
    SectionID, Task, TaskFilter, TaskID, TaskQuery, UpdateComment, UpdateFolder, UpdateLabel,
    UpdateProject, UpdateSection, UpdateTask,
};
use crate::api::endpoints::*;
use crate::api::http;
use crate::api::paginator::{ResultsPaginator, query_pairs};
use crate::api::validate::{self, Validate};
use crate::error::{Error, Result};

const RESULTS: &str = "results";
const ITEMS: &str = "items";

/// Makes network calls to the Todoist API and returns structs that can then be worked with.
///
/// The gateway owns the pooled HTTP connections. Call [`Gateway::close`] once done with it,
/// afterwards every call fails with [`Error::Closed`]. Listings return a [`ResultsPaginator`]
/// which keeps its own handle to the connection pool.
#[derive(Debug)]
pub struct Gateway {
    client: Option<ClientWithMiddleware>,
    token: String,
    url: Url,
}

impl Gateway {
    /// Create a new [`Gateway`].
    ///
    /// * `token` - the API token used for network calls.
    /// * `url` - the base URL to call. See [`struct@TODOIST_API_URL`]
    pub fn new(token: &str, url: &Url) -> Result<Gateway> {
        Ok(Gateway::with_client(token, url, http::default_client()?))
    }

    /// Same as [`Gateway::new`], but uses the given client, e.g. one with extra middleware.
    pub fn with_client(token: &str, url: &Url, client: ClientWithMiddleware) -> Gateway {
        Gateway {
            client: Some(client),
            token: token.to_string(),
            url: url.clone(),
        }
    }

    /// Releases the connection pool. Closing twice is a no-op.
    pub fn close(&mut self) {
        if self.client.take().is_some() {
            tracing::debug!(url = %self.url, "closed gateway");
        }
    }

    /// True once [`Gateway::close`] was called.
    pub fn is_closed(&self) -> bool {
        self.client.is_none()
    }

    /// Retuns a [`Task`].
    ///
    /// * `id` - the ID as used by the Todoist API.
    pub async fn task(&self, id: &TaskID) -> Result<Task> {
        self.get(&[TASKS_PATH, id]).await
    }

    /// Lists active tasks, optionally narrowed down by `filter`.
    pub fn tasks(&self, filter: &TaskFilter) -> Result<ResultsPaginator<Task>> {
        filter.validate()?;
        self.paginate(&[TASKS_PATH], RESULTS, filter)
    }

    /// Lists the active tasks matching a filter query as described in the
    /// [documentation](https://todoist.com/help/articles/205248842).
    pub fn filter_tasks(&self, query: &TaskQuery) -> Result<ResultsPaginator<Task>> {
        query.validate()?;
        self.paginate(&[TASKS_FILTER_PATH], RESULTS, query)
    }

    /// Lists completed tasks by due date range (up to 6 weeks).
    pub fn completed_tasks_by_due_date(
        &self,
        query: &CompletedByDueDate,
    ) -> Result<ResultsPaginator<Task>> {
        query.validate()?;
        self.paginate(&[TASKS_COMPLETED_BY_DUE_DATE_PATH], ITEMS, query)
    }

    /// Lists completed tasks by completion date range (up to 3 months).
    pub fn completed_tasks_by_completion_date(
        &self,
        query: &CompletedByCompletionDate,
    ) -> Result<ResultsPaginator<Task>> {
        query.validate()?;
        self.paginate(&[TASKS_COMPLETED_BY_COMPLETION_DATE_PATH], ITEMS, query)
    }

    /// Creates a task by calling the Todoist API.
    pub async fn create_task(&self, task: &CreateTask) -> Result<Task> {
        task.validate()?;
        self.post(&[TASKS_PATH], task).await
    }

    /// Creates a task from a line of text in quick add syntax. The returned task carries the
    /// parser results in [`Task::meta`].
    pub async fn quick_add(&self, quick: &QuickAdd) -> Result<Task> {
        #[derive(Serialize)]
        struct Request<'a> {
            meta: bool,
            #[serde(flatten)]
            quick: &'a QuickAdd,
        }
        self.post(
            &[TASKS_QUICK_ADD_PATH],
            &Request { meta: true, quick },
        )
        .await
    }

    /// Updates a task with the data as specified in UpdateTask.
    pub async fn update_task(&self, id: &TaskID, task: &UpdateTask) -> Result<Task> {
        task.validate()?;
        self.post(&[TASKS_PATH, id], task).await
    }

    /// Closes a task.
    ///
    /// Equivalent to pushing the circle in the UI. Recurring tasks move to their next date.
    pub async fn close_task(&self, id: &TaskID) -> Result<bool> {
        self.action(&[TASKS_PATH, id, CLOSE_SUFFIX], None::<&()>, None::<&()>)
            .await
    }

    /// Reopens a closed task.
    pub async fn reopen_task(&self, id: &TaskID) -> Result<bool> {
        self.action(&[TASKS_PATH, id, REOPEN_SUFFIX], None::<&()>, None::<&()>)
            .await
    }

    /// Moves a task to another project, section or parent task.
    pub async fn move_task(&self, id: &TaskID, to: &MoveTask) -> Result<bool> {
        to.validate()?;
        self.action(&[TASKS_PATH, id, MOVE_SUFFIX], None::<&()>, Some(to))
            .await
    }

    /// Deletes a task and all its subtasks.
    pub async fn delete_task(&self, id: &TaskID) -> Result<bool> {
        self.delete(&[TASKS_PATH, id]).await
    }

    /// Returns details about a single project.
    ///
    /// * `id` - the ID as used by the Todoist API.
    pub async fn project(&self, id: &ProjectID) -> Result<Project> {
        self.get(&[PROJECTS_PATH, id]).await
    }

    /// Lists all projects.
    pub fn projects(&self, limit: Option<u32>) -> Result<ResultsPaginator<Project>> {
        validate::limit(limit)?;
        self.paginate(&[PROJECTS_PATH], RESULTS, &json!({ "limit": limit }))
    }

    /// Creates a project by calling the Todoist API.
    pub async fn create_project(&self, project: &CreateProject) -> Result<Project> {
        project.validate()?;
        self.post(&[PROJECTS_PATH], project).await
    }

    /// Updates the set fields of a project.
    pub async fn update_project(&self, id: &ProjectID, project: &UpdateProject) -> Result<Project> {
        project.validate()?;
        self.post(&[PROJECTS_PATH, id], project).await
    }

    /// Archives a project with all its sections and tasks.
    pub async fn archive_project(&self, id: &ProjectID) -> Result<Project> {
        self.post(&[PROJECTS_PATH, id, ARCHIVE_SUFFIX], &()).await
    }

    /// Restores an archived project.
    pub async fn unarchive_project(&self, id: &ProjectID) -> Result<Project> {
        self.post(&[PROJECTS_PATH, id, UNARCHIVE_SUFFIX], &()).await
    }

    /// Deletes a project by calling the Todoist API.
    pub async fn delete_project(&self, id: &ProjectID) -> Result<bool> {
        self.delete(&[PROJECTS_PATH, id]).await
    }

    /// Lists the users a project is shared with.
    pub fn collaborators(
        &self,
        project_id: &ProjectID,
        limit: Option<u32>,
    ) -> Result<ResultsPaginator<Collaborator>> {
        validate::limit(limit)?;
        self.paginate(
            &[PROJECTS_PATH, project_id, COLLABORATORS_PATH],
            RESULTS,
            &json!({ "limit": limit }),
        )
    }

    /// Returns details about a single section.
    ///
    /// * `id` - the ID as used by the Todoist API.
    pub async fn section(&self, id: &SectionID) -> Result<Section> {
        self.get(&[SECTIONS_PATH, id]).await
    }

    /// Lists all sections, or only those of one project.
    pub fn sections(
        &self,
        project_id: Option<&str>,
        limit: Option<u32>,
    ) -> Result<ResultsPaginator<Section>> {
        validate::limit(limit)?;
        self.paginate(
            &[SECTIONS_PATH],
            RESULTS,
            &json!({ "project_id": project_id, "limit": limit }),
        )
    }

    /// Creates a section by calling the Todoist API.
    pub async fn create_section(&self, section: &CreateSection) -> Result<Section> {
        section.validate()?;
        self.post(&[SECTIONS_PATH], section).await
    }

    /// Renames a section.
    pub async fn update_section(&self, id: &SectionID, section: &UpdateSection) -> Result<Section> {
        section.validate()?;
        self.post(&[SECTIONS_PATH, id], section).await
    }

    /// Deletes a section by calling the Todoist API.
    pub async fn delete_section(&self, id: &SectionID) -> Result<bool> {
        self.delete(&[SECTIONS_PATH, id]).await
    }

    /// Returns a single comment.
    pub async fn comment(&self, id: &CommentID) -> Result<Comment> {
        self.get(&[COMMENTS_PATH, id]).await
    }

    /// Lists the comments of a task or project.
    pub fn comments(&self, filter: &CommentFilter) -> Result<ResultsPaginator<Comment>> {
        filter.validate()?;
        self.paginate(&[COMMENTS_PATH], RESULTS, filter)
    }

    /// Creates a comment by calling the API.
    pub async fn create_comment(&self, comment: &CreateComment) -> Result<Comment> {
        comment.validate()?;
        self.post(&[COMMENTS_PATH], comment).await
    }

    /// Replaces the content of a comment.
    pub async fn update_comment(&self, id: &CommentID, comment: &UpdateComment) -> Result<Comment> {
        comment.validate()?;
        self.post(&[COMMENTS_PATH, id], comment).await
    }

    /// Deletes a comment.
    pub async fn delete_comment(&self, id: &CommentID) -> Result<bool> {
        self.delete(&[COMMENTS_PATH, id]).await
    }

    /// Returns details about a single label.
    ///
    /// * `id` - the ID as used by the Todoist API.
    pub async fn label(&self, id: &LabelID) -> Result<Label> {
        self.get(&[LABELS_PATH, id]).await
    }

    /// Lists all personal labels.
    pub fn labels(&self, limit: Option<u32>) -> Result<ResultsPaginator<Label>> {
        validate::limit(limit)?;
        self.paginate(&[LABELS_PATH], RESULTS, &json!({ "limit": limit }))
    }

    /// Creates a label by calling the Todoist API.
    pub async fn create_label(&self, label: &CreateLabel) -> Result<Label> {
        label.validate()?;
        self.post(&[LABELS_PATH], label).await
    }

    /// Updates the set fields of a label.
    pub async fn update_label(&self, id: &LabelID, label: &UpdateLabel) -> Result<Label> {
        label.validate()?;
        self.post(&[LABELS_PATH, id], label).await
    }

    /// Deletes a label by calling the Todoist API.
    pub async fn delete_label(&self, id: &LabelID) -> Result<bool> {
        self.delete(&[LABELS_PATH, id]).await
    }

    /// Lists the names of labels used on shared tasks.
    ///
    /// * `omit_personal` - leaves out names that also exist as personal labels.
    pub fn shared_labels(
        &self,
        omit_personal: bool,
        limit: Option<u32>,
    ) -> Result<ResultsPaginator<String>> {
        validate::limit(limit)?;
        self.paginate(
            &[SHARED_LABELS_PATH],
            RESULTS,
            &json!({ "omit_personal": omit_personal, "limit": limit }),
        )
    }

    /// Renames a shared label on every task it is attached to.
    pub async fn rename_shared_label(&self, name: &str, new_name: &str) -> Result<bool> {
        validate::length("name", name, 0, 60)?;
        validate::length("new_name", new_name, 1, 60)?;
        self.action(
            &[SHARED_LABELS_RENAME_PATH],
            Some(&json!({ "name": name })),
            Some(&json!({ "new_name": new_name })),
        )
        .await
    }

    /// Removes a shared label from every task it is attached to.
    pub async fn remove_shared_label(&self, name: &str) -> Result<bool> {
        validate::length("name", name, 0, 60)?;
        self.action(
            &[SHARED_LABELS_REMOVE_PATH],
            None::<&()>,
            Some(&json!({ "name": name })),
        )
        .await
    }

    /// Returns a single workspace folder.
    pub async fn folder(&self, id: &FolderID) -> Result<Folder> {
        self.get(&[FOLDERS_PATH, id]).await
    }

    /// Lists folders, optionally only those of one workspace.
    pub fn folders(
        &self,
        workspace_id: Option<&str>,
        limit: Option<u32>,
    ) -> Result<ResultsPaginator<Folder>> {
        validate::limit(limit)?;
        self.paginate(
            &[FOLDERS_PATH],
            RESULTS,
            &json!({ "workspace_id": workspace_id, "limit": limit }),
        )
    }

    /// Creates a folder in a workspace.
    pub async fn create_folder(&self, folder: &CreateFolder) -> Result<Folder> {
        self.post(&[FOLDERS_PATH], folder).await
    }

    /// Updates the set fields of a folder.
    pub async fn update_folder(&self, id: &FolderID, folder: &UpdateFolder) -> Result<Folder> {
        self.post(&[FOLDERS_PATH, id], folder).await
    }

    /// Deletes a folder.
    pub async fn delete_folder(&self, id: &FolderID) -> Result<bool> {
        self.delete(&[FOLDERS_PATH, id]).await
    }

    fn client(&self) -> Result<&ClientWithMiddleware> {
        self.client.as_ref().ok_or(Error::Closed)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        Ok(self.url.join(&api_path(segments))?)
    }

    /// Makes a GET request for a single record.
    async fn get<R: DeserializeOwned>(&self, segments: &[&str]) -> Result<R> {
        http::get::<(), R>(
            self.client()?,
            self.endpoint(segments)?,
            Some(self.token.as_str()),
            None,
            None,
        )
        .await?
        .ok_or_else(|| Error::unexpected_response("empty response"))
    }

    /// Sends a POST request that answers with the created or updated record.
    async fn post<D: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        segments: &[&str],
        data: &D,
    ) -> Result<R> {
        let request_id = Uuid::new_v4().to_string();
        http::post::<(), D, R>(
            self.client()?,
            self.endpoint(segments)?,
            Some(self.token.as_str()),
            Some(request_id.as_str()),
            None,
            Some(data),
        )
        .await?
        .ok_or_else(|| Error::unexpected_response("empty response"))
    }

    /// Sends a POST request whose response body is of no interest.
    async fn action<P, D>(&self, segments: &[&str], params: Option<&P>, data: Option<&D>) -> Result<bool>
    where
        P: Serialize + ?Sized,
        D: Serialize + ?Sized,
    {
        let request_id = Uuid::new_v4().to_string();
        http::post::<P, D, Value>(
            self.client()?,
            self.endpoint(segments)?,
            Some(self.token.as_str()),
            Some(request_id.as_str()),
            params,
            data,
        )
        .await?;
        Ok(true)
    }

    /// Sends a DELETE request to the Todoist API.
    async fn delete(&self, segments: &[&str]) -> Result<bool> {
        let request_id = Uuid::new_v4().to_string();
        http::delete::<()>(
            self.client()?,
            self.endpoint(segments)?,
            Some(self.token.as_str()),
            Some(request_id.as_str()),
            None,
        )
        .await
    }

    /// Prepares a listing. Nothing is requested until the first page is asked for.
    fn paginate<T, Q>(
        &self,
        segments: &[&str],
        results_field: &'static str,
        query: &Q,
    ) -> Result<ResultsPaginator<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        Ok(ResultsPaginator::new(
            self.client()?.clone(),
            self.endpoint(segments)?,
            &self.token,
            results_field,
            query_pairs(query)?,
        ))
    }
}

impl Drop for Gateway {
    fn drop(&mut self) {
        if self.client.is_some() {
            tracing::warn!(url = %self.url, "gateway dropped without calling close()");
        }
    }
}
