//! Base URLs and path segments of the Todoist API, plus the links into the web app.
use lazy_static::lazy_static;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    /// The default URL that specifies the endpont to use for the Todoist API.
    pub static ref TODOIST_API_URL: url::Url = {
        url::Url::parse("https://api.todoist.com/").unwrap()
    };
    /// The default URL of the host that runs the OAuth flow.
    pub static ref TODOIST_OAUTH_URL: url::Url = {
        url::Url::parse("https://todoist.com/").unwrap()
    };
}

/// Versioned prefix every REST resource lives under.
pub const API_PREFIX: &str = "api/v1";

pub(crate) const TASKS_PATH: &str = "tasks";
pub(crate) const TASKS_FILTER_PATH: &str = "tasks/filter";
pub(crate) const TASKS_QUICK_ADD_PATH: &str = "tasks/quick";
pub(crate) const TASKS_COMPLETED_BY_DUE_DATE_PATH: &str = "tasks/completed/by_due_date";
pub(crate) const TASKS_COMPLETED_BY_COMPLETION_DATE_PATH: &str =
    "tasks/completed/by_completion_date";
pub(crate) const PROJECTS_PATH: &str = "projects";
pub(crate) const COLLABORATORS_PATH: &str = "collaborators";
pub(crate) const SECTIONS_PATH: &str = "sections";
pub(crate) const COMMENTS_PATH: &str = "comments";
pub(crate) const LABELS_PATH: &str = "labels";
pub(crate) const SHARED_LABELS_PATH: &str = "labels/shared";
pub(crate) const SHARED_LABELS_RENAME_PATH: &str = "labels/shared/rename";
pub(crate) const SHARED_LABELS_REMOVE_PATH: &str = "labels/shared/remove";
pub(crate) const FOLDERS_PATH: &str = "folders";
pub(crate) const ACCESS_TOKENS_PATH: &str = "access_tokens";

pub(crate) const CLOSE_SUFFIX: &str = "close";
pub(crate) const REOPEN_SUFFIX: &str = "reopen";
pub(crate) const MOVE_SUFFIX: &str = "move";
pub(crate) const ARCHIVE_SUFFIX: &str = "archive";
pub(crate) const UNARCHIVE_SUFFIX: &str = "unarchive";

pub(crate) const AUTHORIZE_PATH: &str = "oauth/authorize";
pub(crate) const ACCESS_TOKEN_PATH: &str = "oauth/access_token";

/// Web app page listing a single project.
pub const PROJECT_URL: &str = "https://app.todoist.com/app/project";
/// Web app page of the inbox.
pub const INBOX_URL: &str = "https://app.todoist.com/app/inbox";
/// Web app page showing a single task.
pub const TASK_URL: &str = "https://app.todoist.com/app/task";

/// Relative path of a REST resource, e.g. `api/v1/tasks/123/close`.
pub(crate) fn api_path(segments: &[&str]) -> String {
    let mut path = API_PREFIX.to_string();
    for segment in segments {
        path.push('/');
        path.push_str(segment);
    }
    path
}

/// Link to a task in the web app, e.g. `.../task/buy-milk-6X7rM8997g3RQmvh`.
pub fn task_url(task_id: &str, content: &str) -> String {
    format!("{TASK_URL}/{}", slugged_path(task_id, content))
}

/// Link to a project in the web app.
pub fn project_url(project_id: &str, name: &str) -> String {
    format!("{PROJECT_URL}/{}", slugged_path(project_id, name))
}

fn slugged_path(id: &str, text: &str) -> String {
    if text.is_empty() {
        return id.to_string();
    }
    format!("{}-{id}", slugify(text))
}

/// Turns arbitrary text into a URL slug.
///
/// Non-ASCII characters are decomposed and dropped, anything that is not a word character,
/// whitespace or dash is removed, runs of whitespace and dashes collapse into a single dash and
/// leading/trailing dashes and underscores are stripped.
pub fn slugify(value: &str) -> String {
    let ascii: String = value.nfkd().filter(char::is_ascii).collect();
    let cleaned: String = ascii
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    let mut slug = String::with_capacity(cleaned.len());
    let mut pending_dash = false;
    for c in cleaned.chars() {
        if c == '-' || c.is_whitespace() {
            pending_dash = true;
            continue;
        }
        if pending_dash {
            slug.push('-');
            pending_dash = false;
        }
        slug.push(c);
    }
    if pending_dash {
        slug.push('-');
    }
    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}
