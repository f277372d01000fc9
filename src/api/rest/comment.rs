use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::{ProjectID, TaskID, UserID};
use crate::api::serialize::todoist_rfc3339;
use crate::api::validate::{self, Validate};
use crate::error::Result;

/// CommentID describes the unique ID of a [`Comment`].
pub type CommentID = String;

/// Comment describes a Comment from the Todoist API.
///
/// A comment is always attached to either a task or a project, decoding fails if the API
/// returns neither.
///
/// Taken from the [Developer Documentation](https://developer.todoist.com/api/v1/#tag/Comments)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(try_from = "CommentRecord")]
pub struct Comment {
    /// The unique ID of a comment.
    pub id: CommentID,
    /// Contains the comment text with markdown.
    pub content: String,
    /// User who posted the comment.
    pub poster_id: UserID,
    /// The date when the comment was posted.
    #[serde(serialize_with = "todoist_rfc3339")]
    pub posted_at: DateTime<Utc>,
    /// Task the comment is attached to.
    pub task_id: Option<TaskID>,
    /// Project the comment is attached to.
    pub project_id: Option<ProjectID>,
    /// Optional attachment file description.
    pub attachment: Option<Attachment>,
}

#[derive(Deserialize)]
struct CommentRecord {
    id: CommentID,
    content: String,
    #[serde(alias = "posted_uid")]
    poster_id: UserID,
    posted_at: DateTime<Utc>,
    #[serde(alias = "item_id", default)]
    task_id: Option<TaskID>,
    #[serde(default)]
    project_id: Option<ProjectID>,
    #[serde(alias = "file_attachment", default)]
    attachment: Option<Attachment>,
}

impl TryFrom<CommentRecord> for Comment {
    type Error = String;

    fn try_from(record: CommentRecord) -> std::result::Result<Self, Self::Error> {
        if record.task_id.is_none() && record.project_id.is_none() {
            return Err(format!(
                "comment {} has neither `task_id` nor `project_id`",
                record.id
            ));
        }
        Ok(Comment {
            id: record.id,
            content: record.content,
            poster_id: record.poster_id,
            posted_at: record.posted_at,
            task_id: record.task_id,
            project_id: record.project_id,
            attachment: record.attachment,
        })
    }
}

/// A file, image or link attached to a [`Comment`].
#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Attachment {
    /// Kind of attachment, e.g. `file`, `image` or `url`.
    pub resource_type: Option<String>,
    pub file_name: Option<String>,
    pub file_size: Option<u64>,
    /// MIME type of the file.
    pub file_type: Option<String>,
    pub file_url: Option<String>,
    /// Length of audio or video attachments, in seconds.
    pub file_duration: Option<u64>,
    /// One of `pending`, `completed` or `failed`.
    pub upload_state: Option<String>,
    /// Preview image.
    pub image: Option<String>,
    pub image_width: Option<u32>,
    pub image_height: Option<u32>,
    /// Target of a link attachment.
    pub url: Option<String>,
    pub title: Option<String>,
}

/// CreateComment allows to create a new comment through the API.
///
/// Either `task_id` or `project_id` must be set.
#[skip_serializing_none]
#[derive(Debug, Serialize, Default, Clone)]
pub struct CreateComment {
    /// The text of the comment. Supports markdown.
    pub content: String,
    /// Comments on this project.
    pub project_id: Option<ProjectID>,
    /// Comments on this task.
    pub task_id: Option<TaskID>,
    /// File or link to attach.
    pub attachment: Option<Attachment>,
    /// Users that get notified about the comment.
    pub uids_to_notify: Option<Vec<UserID>>,
}

impl Validate for CreateComment {
    fn validate(&self) -> Result<()> {
        validate::length("content", &self.content, 0, 15000)?;
        validate::one_of(&[
            ("project_id", self.project_id.is_some()),
            ("task_id", self.task_id.is_some()),
        ])
    }
}

/// Command used with [`super::Gateway::update_comment`]. Only the content can be changed.
#[derive(Debug, Serialize, Default, Clone)]
pub struct UpdateComment {
    /// New text of the comment.
    pub content: String,
}

impl Validate for UpdateComment {
    fn validate(&self) -> Result<()> {
        validate::length("content", &self.content, 0, 15000)
    }
}

/// Selects the comments listed by [`super::Gateway::comments`].
///
/// Either `task_id` or `project_id` must be set.
#[skip_serializing_none]
#[derive(Debug, Serialize, Default, Clone)]
pub struct CommentFilter {
    pub project_id: Option<ProjectID>,
    pub task_id: Option<TaskID>,
    /// Page size.
    pub limit: Option<u32>,
}

impl CommentFilter {
    /// All comments on a task.
    pub fn task(id: &str) -> CommentFilter {
        CommentFilter {
            task_id: Some(id.to_string()),
            ..Default::default()
        }
    }

    /// All comments on a project.
    pub fn project(id: &str) -> CommentFilter {
        CommentFilter {
            project_id: Some(id.to_string()),
            ..Default::default()
        }
    }
}

impl Validate for CommentFilter {
    fn validate(&self) -> Result<()> {
        validate::one_of(&[
            ("project_id", self.project_id.is_some()),
            ("task_id", self.task_id.is_some()),
        ])?;
        validate::limit(self.limit)
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    fn comment_json() -> serde_json::Value {
        json!({
            "id": "2992679862",
            "content": "Need one bottle of milk",
            "poster_id": "2671355",
            "posted_at": "2016-09-22T07:00:00Z",
            "task_id": "2995104339",
            "project_id": null,
            "attachment": {
                "resource_type": "file",
                "file_name": "File.pdf",
                "file_type": "application/pdf",
                "file_size": 4321,
                "file_url": "https://cdn-domain.tld/path/to/file.pdf",
                "upload_state": "completed"
            }
        })
    }

    #[test]
    fn round_trip() {
        let comment: Comment = serde_json::from_value(comment_json()).unwrap();
        assert_eq!(
            comment.attachment.as_ref().unwrap().file_size,
            Some(4321)
        );
        assert_eq!(serde_json::to_value(&comment).unwrap(), comment_json());
    }

    #[test]
    fn accepts_sync_field_names() {
        let comment: Comment = serde_json::from_value(json!({
            "id": "1234",
            "content": "A comment",
            "posted_uid": "2671355",
            "posted_at": "2016-09-22T07:00:00.00000Z",
            "item_id": "2345",
            "file_attachment": {"resource_type": "url", "url": "https://todoist.com"},
            "is_deleted": false,
            "reactions": null
        }))
        .unwrap();
        assert_eq!(comment.poster_id, "2671355");
        assert_eq!(comment.task_id.as_deref(), Some("2345"));
        assert!(comment.project_id.is_none());
        assert_eq!(
            comment.attachment.unwrap().url.as_deref(),
            Some("https://todoist.com")
        );
    }

    #[test]
    fn requires_a_thread() {
        let err = serde_json::from_value::<Comment>(json!({
            "id": "1234",
            "content": "A comment",
            "poster_id": "2671355",
            "posted_at": "2016-09-22T07:00:00Z"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("neither `task_id` nor `project_id`"));
    }

    #[test]
    fn comment_payloads() {
        assert!(CreateComment::default().validate().is_err());
        let create = CreateComment {
            content: "Need one bottle of milk".to_string(),
            project_id: Some("2203306141".to_string()),
            uids_to_notify: Some(vec!["21180723".to_string()]),
            ..Default::default()
        };
        create.validate().unwrap();
        assert_eq!(
            serde_json::to_value(&create).unwrap(),
            json!({
                "content": "Need one bottle of milk",
                "project_id": "2203306141",
                "uids_to_notify": ["21180723"]
            })
        );
        let too_long = UpdateComment {
            content: "c".repeat(15001),
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn comment_filters() {
        assert!(CommentFilter::default().validate().is_err());
        CommentFilter::task("2995104339").validate().unwrap();
        let filter = CommentFilter {
            limit: Some(500),
            ..CommentFilter::project("2203306141")
        };
        assert!(filter.validate().is_err());
    }
}
