use core::fmt;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::Display;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_bool_from_anything;
use serde_repr::{Deserialize_repr, Serialize_repr};
use serde_with::skip_serializing_none;
use strum::{Display as StrumDisplay, EnumString};

use super::{ProjectID, SectionID};
use crate::api::endpoints::task_url;
use crate::api::serialize::{
    deserialize_null_as_empty_vec, todoist_rfc3339, todoist_rfc3339_opt,
};
use crate::api::validate::{self, Validate};
use crate::error::Result;

/// TaskID describes the unique ID of a [`Task`].
pub type TaskID = String;
/// UserID is the unique ID of a User.
pub type UserID = String;

/// Task describes a Task from the Todoist API.
///
/// Taken from the [Developer Documentation](https://developer.todoist.com/api/v1/#tag/Tasks).
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone)]
pub struct Task {
    /// Unique ID of a Task.
    pub id: TaskID,
    /// The main content of the Task, also known as Task name.
    pub content: String,
    /// Description is the description found under the content.
    #[serde(default)]
    pub description: String,
    /// Shows which [`super::Project`] the Task belongs to.
    pub project_id: ProjectID,
    /// Set if the Task is also in a subsection of a Project.
    #[serde(default)]
    pub section_id: Option<SectionID>,
    /// If set, this Task is a subtask of another.
    #[serde(default)]
    pub parent_id: Option<TaskID>,
    /// All associated [`super::Label`]s to this Task. Just label names are used here.
    #[serde(default, deserialize_with = "deserialize_null_as_empty_vec")]
    pub labels: Vec<String>,
    /// Priority is how urgent the task is.
    #[serde(default)]
    pub priority: Priority,
    /// The due date of the Task.
    #[serde(default)]
    pub due: Option<Due>,
    /// Deadline for the Task.
    #[serde(default)]
    pub deadline: Option<Deadline>,
    /// Duration for the Task.
    #[serde(default)]
    pub duration: Option<Duration>,
    /// Whether subtasks are collapsed.
    #[serde(
        alias = "collapsed",
        default,
        deserialize_with = "deserialize_bool_from_anything"
    )]
    pub is_collapsed: bool,
    /// Order the order within the subtasks of a Task.
    #[serde(alias = "child_order", default)]
    pub order: i64,
    /// Who this task is assigned to.
    #[serde(alias = "responsible_uid", default)]
    pub assignee_id: Option<UserID>,
    /// Who assigned this task.
    #[serde(alias = "assigned_by_uid", default)]
    pub assigner_id: Option<UserID>,
    /// When the task was completed.
    #[serde(default, serialize_with = "todoist_rfc3339_opt")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Who created this task.
    #[serde(alias = "added_by_uid")]
    pub creator_id: UserID,
    /// Exact date when the task was created.
    #[serde(alias = "added_at", serialize_with = "todoist_rfc3339")]
    pub created_at: DateTime<Utc>,
    /// When the task was last updated.
    #[serde(default, serialize_with = "todoist_rfc3339_opt")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Completed is set if this task was completed.
    #[serde(
        alias = "checked",
        default,
        deserialize_with = "deserialize_bool_from_anything"
    )]
    pub is_completed: bool,
    /// What the quick add parser made of the text, only set on tasks created through
    /// [`super::Gateway::quick_add`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<QuickAddMeta>,
}

impl Task {
    /// Link to this task in the Todoist web app.
    pub fn url(&self) -> String {
        task_url(&self.id, &self.content)
    }

    /// Compares two tasks the way the Todoist UI lists them: tasks with an exact due time
    /// first, then by priority, then by their order.
    ///
    /// Use with `sort_by`. Distinct tasks may compare equal.
    pub fn ui_cmp(&self, other: &Task) -> Ordering {
        // Exact times ignore even priority in the UI
        match (
            self.due.as_ref().and_then(|d| d.exact_datetime()),
            other.due.as_ref().and_then(|d| d.exact_datetime()),
        ) {
            (Some(left), Some(right)) => match left.cmp(&right) {
                Ordering::Equal => {}
                ord => return ord,
            },
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (None, None) => {}
        }

        // Lower priority in API is lower in list
        self.priority
            .cmp(&other.priority)
            .reverse()
            .then_with(|| self.order.cmp(&other.order))
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Priority as is given from the Todoist API.
///
/// 1 for Normal up to 4 for Urgent.
#[derive(
    Default, Debug, Copy, Clone, Serialize_repr, Deserialize_repr, PartialEq, Eq, PartialOrd, Ord,
)]
#[repr(u8)]
pub enum Priority {
    /// p4 in the Todoist UI.
    #[default]
    Normal = 1,
    /// p3 in the Todoist UI.
    High = 2,
    /// p2 in the Todoist UI.
    VeryHigh = 3,
    /// p1 in the Todoist UI.
    Urgent = 4,
}

impl Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The priority display is reversed as in the actual desktop client compared to the API.
        match self {
            Priority::Normal => write!(f, "p4"),
            Priority::High => write!(f, "p3"),
            Priority::VeryHigh => write!(f, "p2"),
            Priority::Urgent => write!(f, "p1"),
        }
    }
}

/// Due is the Due object from the Todoist API.
///
/// Mostly contains human-readable content for easier display.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Due {
    /// The date on which the Task is due.
    /// Can be in format: YYYY-MM-DD, YYYY-MM-DDTHH:MM:SS, or YYYY-MM-DDTHH:MM:SSZ
    pub date: String,
    /// Human-redable form of the due date.
    pub string: String,
    /// Language code for parsing the string.
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Lets us know if it is recurring (reopens after close).
    #[serde(default)]
    pub is_recurring: bool,
    /// Timezone (null for full-day or floating dates, timezone name for fixed dates).
    #[serde(default)]
    pub timezone: Option<String>,
}

fn default_lang() -> String {
    "en".to_string()
}

impl Due {
    /// Get the date part as NaiveDate.
    pub fn date_naive(&self) -> Option<NaiveDate> {
        if let Ok(date) = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d") {
            return Some(date);
        }
        if let Some(dt) = self.floating_datetime() {
            return Some(dt.date());
        }
        self.exact_datetime().map(|dt| dt.date_naive())
    }

    /// Get the exact datetime if available.
    pub fn exact_datetime(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.date).ok()
    }

    /// Resolves the due time in the timezone of the due date.
    ///
    /// Floating times ("every day at 9") are interpreted as local times of [`Due::timezone`].
    /// Returns `None` for full-day dates or if the timezone is unknown.
    pub fn localized(&self) -> Option<DateTime<chrono_tz::Tz>> {
        let tz: chrono_tz::Tz = self.timezone.as_deref()?.parse().ok()?;
        if let Some(exact) = self.exact_datetime() {
            return Some(exact.with_timezone(&tz));
        }
        tz.from_local_datetime(&self.floating_datetime()?).single()
    }

    fn floating_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.date, "%Y-%m-%dT%H:%M:%S%.f").ok()
    }
}

/// Deadline object from the Todoist API.
#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Deadline {
    /// Date in format YYYY-MM-DD corrected to user's timezone.
    pub date: NaiveDate,
    /// Language to use for parsing the deadline string.
    #[serde(default)]
    pub lang: Option<String>,
}

/// Duration object from the Todoist API.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Duration {
    /// Amount of time the task will take (positive integer).
    pub amount: u32,
    /// Unit of time - either "minute" or "day".
    pub unit: DurationUnit,
}

/// Duration unit enum.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, StrumDisplay, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DurationUnit {
    /// Time unit in minutes.
    Minute,
    /// Time unit in days.
    Day,
}

/// Metadata the quick add parser returns along with the created [`Task`].
///
/// The tuples are `(id, name)` pairs that are both null if nothing matched.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct QuickAddMeta {
    /// Project the text referred to.
    pub project: (Option<ProjectID>, Option<String>),
    /// Section the text referred to.
    pub section: (Option<SectionID>, Option<String>),
    /// Collaborator the task was assigned to.
    pub assignee: (Option<UserID>, Option<String>),
    /// Labels found in the text, keyed by label ID.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    /// The parsed due date.
    #[serde(default)]
    pub due: Option<QuickAddDue>,
    /// Priority found in the text.
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Remaining text after everything else was parsed out.
    #[serde(default)]
    pub text: Option<String>,
}

/// Due date as parsed by quick add. Every field is null if the text contained no date.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
pub struct QuickAddDue {
    pub date_local: Option<String>,
    pub datetime_local: Option<String>,
    pub datetime_utc: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    pub lang: Option<String>,
    /// Kind of date, e.g. `null`, `date` or `fixed_datetime`.
    pub object_type: Option<String>,
    pub string: Option<String>,
    pub timezone: Option<QuickAddTimezone>,
    pub timezone_name: Option<String>,
}

/// Timezone wrapper used by [`QuickAddDue`].
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct QuickAddTimezone {
    /// IANA name of the zone.
    pub zone: String,
}

/// Human representation of the due date.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub enum TaskDue {
    /// Human readable representation of the date.
    #[serde(rename = "due_string")]
    String(String),
    /// Loose target date with no exact time.
    #[serde(rename = "due_date")]
    Date(NaiveDate),
    /// Exact DateTime in UTC for the due date.
    #[serde(rename = "due_datetime", serialize_with = "todoist_rfc3339")]
    DateTime(DateTime<Utc>),
}

fn validate_due(due: Option<&TaskDue>, due_lang: Option<&str>) -> Result<()> {
    if let Some(TaskDue::String(due_string)) = due {
        validate::length("due_string", due_string, 0, 150)?;
    }
    validate::language_code("due_lang", due_lang)
}

/// Command used with [`super::Gateway::create_task`] to create a new Task.
#[skip_serializing_none]
#[derive(Debug, Serialize, Default, Clone)]
pub struct CreateTask {
    /// Sets the [`Task::content`] on the new [`Task`]. (Required)
    pub content: String,
    /// Sets the [`Task::description`] on the new [`Task`].
    pub description: Option<String>,
    /// Sets the [`Task::project_id`] on the new [`Task`].
    pub project_id: Option<ProjectID>,
    /// Sets the [`Task::section_id`] on the new [`Task`].
    pub section_id: Option<SectionID>,
    /// Sets the [`Task::parent_id`] on the new [`Task`].
    pub parent_id: Option<TaskID>,
    /// Sets the [`Task::order`] on the new [`Task`].
    pub order: Option<i64>,
    /// Sets the [`Task::labels`] on the new [`Task`].
    pub labels: Option<Vec<String>>,
    /// Sets the [`Task::priority`] on the new [`Task`].
    pub priority: Option<Priority>,
    /// Sets the [`Task::due`] on the new [`Task`].
    #[serde(flatten)]
    pub due: Option<TaskDue>,
    /// If due is [TaskDue::String], this two-letter code optionally specifies the language if it's not english.
    pub due_lang: Option<String>,
    /// Sets the [`Task::assignee_id`] on the new [`Task`].
    pub assignee_id: Option<UserID>,
    /// Adds the default reminder if the due date has a time.
    pub auto_reminder: Option<bool>,
    /// Turns `@label` occurrences in the content into labels.
    pub auto_parse_labels: Option<bool>,
    /// Sets the [`Task::duration`] on the new [`Task`].
    pub duration: Option<u32>,
    /// Unit of time for duration.
    pub duration_unit: Option<DurationUnit>,
    /// Sets the [`Task::deadline`] on the new [`Task`].
    pub deadline_date: Option<NaiveDate>,
    /// Language of the deadline.
    pub deadline_lang: Option<String>,
}

impl Validate for CreateTask {
    fn validate(&self) -> Result<()> {
        validate::length("content", &self.content, 1, 500)?;
        validate::optional_length("description", self.description.as_deref(), 0, 16383)?;
        validate::each_length("labels", self.labels.as_deref(), 100)?;
        validate_due(self.due.as_ref(), self.due_lang.as_deref())?;
        validate::at_least("duration", self.duration, 1)?;
        validate::language_code("deadline_lang", self.deadline_lang.as_deref())
    }
}

/// Command used with [`super::Gateway::update_task`] to update a [`Task`].
///
/// Each field is optional, so if something exists, that part of the [`Task`] will get overwritten.
#[skip_serializing_none]
#[derive(Debug, Serialize, Default, Clone)]
pub struct UpdateTask {
    /// Overwrites [`Task::content`] if set.
    pub content: Option<String>,
    /// Overwrites [`Task::description`] if set.
    pub description: Option<String>,
    /// Overwrites [`Task::labels`] if set.
    pub labels: Option<Vec<String>>,
    /// Overwrites [`Task::priority`] if set.
    pub priority: Option<Priority>,
    /// Overwrites [`Task::due`] if set.
    #[serde(flatten)]
    pub due: Option<TaskDue>,
    /// If due is [TaskDue::String], this two-letter code optionally specifies the language if it's not english.
    pub due_lang: Option<String>,
    /// Overwrites [`Task::assignee_id`] if set.
    pub assignee_id: Option<UserID>,
    /// Position of the task in the "Today" and "Next 7 days" views.
    pub day_order: Option<i64>,
    /// Overwrites [`Task::is_collapsed`] if set.
    pub collapsed: Option<bool>,
    /// Sets the duration on the task.
    pub duration: Option<u32>,
    /// Unit of time for duration.
    pub duration_unit: Option<DurationUnit>,
    /// Sets the deadline on the task.
    pub deadline_date: Option<NaiveDate>,
    /// Language for deadline.
    pub deadline_lang: Option<String>,
}

impl Validate for UpdateTask {
    fn validate(&self) -> Result<()> {
        validate::optional_length("content", self.content.as_deref(), 1, 500)?;
        validate::optional_length("description", self.description.as_deref(), 0, 16383)?;
        validate::each_length("labels", self.labels.as_deref(), 60)?;
        validate_due(self.due.as_ref(), self.due_lang.as_deref())?;
        validate::at_least("duration", self.duration, 1)?;
        validate::language_code("deadline_lang", self.deadline_lang.as_deref())
    }
}

/// Command used with [`super::Gateway::quick_add`], parsing dates, projects, labels and
/// priorities out of a single line of text.
#[skip_serializing_none]
#[derive(Debug, Serialize, Clone)]
pub struct QuickAdd {
    /// Text in quick add syntax, e.g. `Buy milk #Shopping @groceries tomorrow p1`.
    pub text: String,
    /// Comment added to the new task.
    pub note: Option<String>,
    /// Reminder date in free form text.
    pub reminder: Option<String>,
    /// Adds the default reminder if the parsed date has a time.
    pub auto_reminder: bool,
}

impl QuickAdd {
    /// Quick add with the default reminder enabled.
    pub fn new(text: &str) -> QuickAdd {
        QuickAdd {
            text: text.to_string(),
            note: None,
            reminder: None,
            auto_reminder: true,
        }
    }
}

/// Command used with [`super::Gateway::move_task`]. At least one destination must be set.
#[skip_serializing_none]
#[derive(Debug, Serialize, Default, Clone)]
pub struct MoveTask {
    /// Moves the task to the root of this project.
    pub project_id: Option<ProjectID>,
    /// Moves the task into this section.
    pub section_id: Option<SectionID>,
    /// Makes the task a subtask of this task.
    pub parent_id: Option<TaskID>,
}

impl Validate for MoveTask {
    fn validate(&self) -> Result<()> {
        validate::one_of(&[
            ("project_id", self.project_id.is_some()),
            ("section_id", self.section_id.is_some()),
            ("parent_id", self.parent_id.is_some()),
        ])
    }
}

/// Narrows down [`super::Gateway::tasks`]. An empty filter lists all active tasks.
#[skip_serializing_none]
#[derive(Debug, Serialize, Default, Clone)]
pub struct TaskFilter {
    pub project_id: Option<ProjectID>,
    pub section_id: Option<SectionID>,
    pub parent_id: Option<TaskID>,
    /// Name of a label the tasks must have.
    pub label: Option<String>,
    /// Only these tasks.
    pub ids: Option<Vec<TaskID>>,
    /// Page size.
    pub limit: Option<u32>,
}

impl Validate for TaskFilter {
    fn validate(&self) -> Result<()> {
        validate::limit(self.limit)
    }
}

/// Filter query for [`super::Gateway::filter_tasks`], e.g. `today | overdue`.
///
/// See the [documentation](https://todoist.com/help/articles/205248842) for the syntax.
#[skip_serializing_none]
#[derive(Debug, Serialize, Default, Clone)]
pub struct TaskQuery {
    pub query: Option<String>,
    /// Language of the query.
    pub lang: Option<String>,
    /// Page size.
    pub limit: Option<u32>,
}

impl Validate for TaskQuery {
    fn validate(&self) -> Result<()> {
        validate::optional_length("query", self.query.as_deref(), 0, 1024)?;
        validate::language_code("lang", self.lang.as_deref())?;
        validate::limit(self.limit)
    }
}

/// Completed tasks whose due date lies in a range of up to 6 weeks.
#[skip_serializing_none]
#[derive(Debug, Serialize, Clone)]
pub struct CompletedByDueDate {
    /// Start of the range (inclusive).
    #[serde(serialize_with = "todoist_rfc3339")]
    pub since: DateTime<Utc>,
    /// End of the range (inclusive).
    #[serde(serialize_with = "todoist_rfc3339")]
    pub until: DateTime<Utc>,
    pub workspace_id: Option<String>,
    pub project_id: Option<ProjectID>,
    pub section_id: Option<SectionID>,
    pub parent_id: Option<TaskID>,
    pub filter_query: Option<String>,
    pub filter_lang: Option<String>,
    /// Page size.
    pub limit: Option<u32>,
}

impl CompletedByDueDate {
    /// Every completed task due between `since` and `until`.
    pub fn new(since: DateTime<Utc>, until: DateTime<Utc>) -> CompletedByDueDate {
        CompletedByDueDate {
            since,
            until,
            workspace_id: None,
            project_id: None,
            section_id: None,
            parent_id: None,
            filter_query: None,
            filter_lang: None,
            limit: None,
        }
    }
}

impl Validate for CompletedByDueDate {
    fn validate(&self) -> Result<()> {
        validate::language_code("filter_lang", self.filter_lang.as_deref())?;
        validate::limit(self.limit)
    }
}

/// Tasks completed in a range of up to 3 months.
#[skip_serializing_none]
#[derive(Debug, Serialize, Clone)]
pub struct CompletedByCompletionDate {
    /// Start of the range (inclusive).
    #[serde(serialize_with = "todoist_rfc3339")]
    pub since: DateTime<Utc>,
    /// End of the range (inclusive).
    #[serde(serialize_with = "todoist_rfc3339")]
    pub until: DateTime<Utc>,
    pub workspace_id: Option<String>,
    pub filter_query: Option<String>,
    pub filter_lang: Option<String>,
    /// Page size.
    pub limit: Option<u32>,
}

impl CompletedByCompletionDate {
    /// Every task completed between `since` and `until`.
    pub fn new(since: DateTime<Utc>, until: DateTime<Utc>) -> CompletedByCompletionDate {
        CompletedByCompletionDate {
            since,
            until,
            workspace_id: None,
            filter_query: None,
            filter_lang: None,
            limit: None,
        }
    }
}

impl Validate for CompletedByCompletionDate {
    fn validate(&self) -> Result<()> {
        validate::language_code("filter_lang", self.filter_lang.as_deref())?;
        validate::limit(self.limit)
    }
}

#[cfg(test)]
impl Task {
    /// This is initializer is used for tests, as in general the client relies on the API and not
    /// local state.
    pub fn new(id: &str, content: &str) -> Task {
        Task {
            id: id.to_string(),
            content: content.to_string(),
            description: String::new(),
            project_id: "".to_string(),
            section_id: None,
            parent_id: None,
            labels: Vec::new(),
            priority: Priority::default(),
            due: None,
            deadline: None,
            duration: None,
            is_collapsed: false,
            order: 0,
            assignee_id: None,
            assigner_id: None,
            completed_at: None,
            creator_id: "0".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
            updated_at: None,
            is_completed: false,
            meta: None,
        }
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::error::Error;

    fn task_json() -> serde_json::Value {
        json!({
            "id": "6X7rM8997g3RQmvh",
            "content": "Some Task Content",
            "description": "A description",
            "project_id": "6X7rfFVPjhvv84XG",
            "section_id": "6X7rfEVP8hvv25ZQ",
            "parent_id": null,
            "labels": ["Label1"],
            "priority": 4,
            "due": {
                "date": "2016-09-01T09:00:00Z",
                "string": "tomorrow at 12",
                "lang": "en",
                "is_recurring": true,
                "timezone": "Europe/Moscow"
            },
            "deadline": {"date": "2016-09-04", "lang": "en"},
            "duration": {"amount": 60, "unit": "minute"},
            "is_collapsed": false,
            "order": 3,
            "assignee_id": "2423523",
            "assigner_id": "2971358",
            "completed_at": null,
            "creator_id": "2671355",
            "created_at": "2019-01-02T21:00:30Z",
            "updated_at": "2019-01-03T21:00:30Z",
            "is_completed": false
        })
    }

    #[test]
    fn round_trip() {
        let task: Task = serde_json::from_value(task_json()).unwrap();
        assert_eq!(task.priority, Priority::Urgent);
        assert_eq!(task.duration.as_ref().unwrap().unit, DurationUnit::Minute);
        assert_eq!(
            task.deadline.as_ref().unwrap().date,
            NaiveDate::from_ymd_opt(2016, 9, 4).unwrap()
        );
        assert_eq!(serde_json::to_value(&task).unwrap(), task_json());
    }

    #[test]
    fn accepts_sync_field_names() {
        let task: Task = serde_json::from_value(json!({
            "id": "4554989047",
            "content": "some task",
            "project_id": "2203108698",
            "labels": null,
            "priority": 1,
            "collapsed": 1,
            "child_order": 6,
            "responsible_uid": "29172386",
            "assigned_by_uid": null,
            "added_by_uid": "21180723",
            "added_at": "2021-02-05T11:02:56.00000Z",
            "checked": 0,
            "is_deleted": 0,
            "sync_id": null
        }))
        .unwrap();
        assert!(task.is_collapsed);
        assert!(!task.is_completed);
        assert_eq!(task.order, 6);
        assert_eq!(task.assignee_id.as_deref(), Some("29172386"));
        assert_eq!(task.creator_id, "21180723");
        assert!(task.labels.is_empty());
        assert!(task.meta.is_none());
    }

    #[test]
    fn quick_add_meta() {
        let meta: QuickAddMeta = serde_json::from_value(json!({
            "assignee": ["29172386", "Some Guy"],
            "due": {
                "date_local": "2021-02-06T00:00:00.00000Z",
                "datetime_local": "2021-02-06T11:00:00.00000Z",
                "datetime_utc": "2021-02-06T11:00:00.00000Z",
                "is_recurring": false,
                "lang": "en",
                "object_type": "fixed_datetime",
                "string": "Feb 6 11:00 AM",
                "timezone": {"zone": "Europe/London"},
                "timezone_name": "Europe/London"
            },
            "labels": {"2156154810": "Label1", "2156154812": "Label2"},
            "priority": 1,
            "project": ["2257514220", "test"],
            "section": [null, null],
            "text": "some task"
        }))
        .unwrap();
        assert_eq!(meta.assignee.1.as_deref(), Some("Some Guy"));
        assert_eq!(meta.section, (None, None));
        assert_eq!(meta.labels["2156154812"], "Label2");
        let due = meta.due.unwrap();
        assert_eq!(due.timezone.unwrap().zone, "Europe/London");
        assert_eq!(due.object_type.as_deref(), Some("fixed_datetime"));
    }

    #[test]
    fn url() {
        let task = Task::new("6X7rM8997g3RQmvh", "Some Task Content");
        assert_eq!(
            task.url(),
            "https://app.todoist.com/app/task/some-task-content-6X7rM8997g3RQmvh"
        );
    }

    #[test]
    fn due_dates() {
        let mut due = Due {
            date: "2016-09-01".to_string(),
            string: "tomorrow".to_string(),
            lang: "en".to_string(),
            is_recurring: false,
            timezone: None,
        };
        assert_eq!(due.date_naive(), NaiveDate::from_ymd_opt(2016, 9, 1));
        assert!(due.exact_datetime().is_none());
        assert!(due.localized().is_none());

        due.date = "2016-09-01T09:00:00".to_string();
        due.timezone = Some("Europe/Moscow".to_string());
        let local = due.localized().unwrap();
        assert_eq!(local.to_rfc3339(), "2016-09-01T09:00:00+03:00");

        due.date = "2016-09-01T09:00:00Z".to_string();
        assert_eq!(due.localized().unwrap().to_rfc3339(), "2016-09-01T12:00:00+03:00");
        assert_eq!(due.date_naive(), NaiveDate::from_ymd_opt(2016, 9, 1));
    }

    #[test]
    fn due_defaults() {
        let due: Due =
            serde_json::from_value(json!({"date": "2016-09-01", "string": "tomorrow"})).unwrap();
        assert_eq!(due.lang, "en");
        assert!(!due.is_recurring);
        assert!(due.timezone.is_none());
    }

    #[test]
    fn create_task_payload() {
        let create = CreateTask {
            content: "Buy milk".to_string(),
            labels: Some(vec!["errands".to_string()]),
            priority: Some(Priority::VeryHigh),
            due: Some(TaskDue::Date(NaiveDate::from_ymd_opt(2025, 10, 6).unwrap())),
            deadline_date: Some(NaiveDate::from_ymd_opt(2025, 10, 8).unwrap()),
            duration: Some(30),
            duration_unit: Some(DurationUnit::Minute),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&create).unwrap(),
            json!({
                "content": "Buy milk",
                "labels": ["errands"],
                "priority": 3,
                "due_date": "2025-10-06",
                "deadline_date": "2025-10-08",
                "duration": 30,
                "duration_unit": "minute"
            })
        );
        create.validate().unwrap();
    }

    #[test]
    fn update_task_due_datetime() {
        let update = UpdateTask {
            due: Some(TaskDue::DateTime(
                Utc.with_ymd_and_hms(2025, 10, 6, 8, 30, 0).unwrap(),
            )),
            collapsed: Some(true),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"due_datetime": "2025-10-06T08:30:00Z", "collapsed": true})
        );
    }

    #[test]
    fn task_limits() {
        let too_long = CreateTask {
            content: "x".repeat(501),
            ..Default::default()
        };
        assert!(matches!(too_long.validate(), Err(Error::Validation(_))));
        assert!(CreateTask::default().validate().is_err());

        let label = CreateTask {
            content: "ok".to_string(),
            labels: Some(vec!["l".repeat(61)]),
            ..Default::default()
        };
        assert!(label.validate().is_ok());
        let update = UpdateTask {
            labels: Some(vec!["l".repeat(61)]),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let due = UpdateTask {
            due: Some(TaskDue::String("d".repeat(151))),
            ..Default::default()
        };
        assert!(due.validate().is_err());
        let lang = UpdateTask {
            due_lang: Some("english".to_string()),
            ..Default::default()
        };
        assert!(lang.validate().is_err());
        let duration = UpdateTask {
            duration: Some(0),
            ..Default::default()
        };
        assert!(duration.validate().is_err());
    }

    #[test]
    fn move_needs_destination() {
        assert!(MoveTask::default().validate().is_err());
        let to_section = MoveTask {
            section_id: Some("7025".to_string()),
            ..Default::default()
        };
        to_section.validate().unwrap();
        assert_eq!(
            serde_json::to_value(&to_section).unwrap(),
            json!({"section_id": "7025"})
        );
    }

    #[test]
    fn quick_add_defaults() {
        assert_eq!(
            serde_json::to_value(QuickAdd::new("Buy milk tomorrow")).unwrap(),
            json!({"text": "Buy milk tomorrow", "auto_reminder": true})
        );
    }

    #[test]
    fn orders_like_the_ui() {
        let mut urgent = Task::new("2", "urgent");
        urgent.priority = Priority::Urgent;
        let mut first = Task::new("3", "first");
        first.order = -1;
        let plain = Task::new("1", "plain");
        let mut tasks = vec![plain.clone(), first.clone(), urgent.clone()];
        tasks.sort_by(Task::ui_cmp);
        assert_eq!(tasks, vec![urgent, first, plain]);
    }

    #[test]
    fn same_sort_key_is_not_equality() {
        let milk = Task::new("1", "buy milk");
        let bread = Task::new("1", "buy bread");
        assert_eq!(milk.ui_cmp(&bread), Ordering::Equal);
        assert_ne!(milk, bread);
        let mut tasks = vec![bread.clone(), milk.clone()];
        tasks.sort_by(Task::ui_cmp);
        assert_eq!(tasks, vec![bread, milk]);
    }

    #[test]
    fn duration_units() {
        assert_eq!(DurationUnit::Day.to_string(), "day");
        assert_eq!("minute".parse::<DurationUnit>().unwrap(), DurationUnit::Minute);
    }
}
