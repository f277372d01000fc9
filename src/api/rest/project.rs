use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_bool_from_anything;
use serde_with::skip_serializing_none;
use strum::{Display, EnumString};

use crate::api::endpoints::{INBOX_URL, project_url};
use crate::api::validate::{self, Validate};
use crate::error::Result;

/// ProjectID is the unique ID of a [`Project`]
pub type ProjectID = String;

/// Project as described by the Todoist API.
///
/// Taken from the [Developer Documentation](https://developer.todoist.com/api/v1/#tag/Projects).
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone)]
pub struct Project {
    /// ID of the Project.
    pub id: ProjectID,
    /// The name of the Project. Displayed in the project list in the UI.
    pub name: String,
    /// Project description.
    #[serde(default)]
    pub description: String,
    /// Project order under the same parent.
    #[serde(alias = "child_order", default)]
    pub order: i64,
    /// Color as used by the Todoist UI, see [`Color`].
    pub color: String,
    /// Whether the project is collapsed.
    #[serde(
        alias = "collapsed",
        default,
        deserialize_with = "deserialize_bool_from_anything"
    )]
    pub is_collapsed: bool,
    /// Whether the project is shared with someone else.
    #[serde(
        alias = "shared",
        default,
        deserialize_with = "deserialize_bool_from_anything"
    )]
    pub is_shared: bool,
    /// Toggle to mark this project as a favorite.
    #[serde(default)]
    pub is_favorite: bool,
    /// Whether tasks can be assigned in this project.
    #[serde(default)]
    pub can_assign_tasks: Option<bool>,
    /// View style to show in todoist clients.
    #[serde(default)]
    pub view_style: ViewStyle,
    /// When the project was created.
    #[serde(default)]
    pub created_at: Option<String>,
    /// When the project was last updated.
    #[serde(default)]
    pub updated_at: Option<String>,
    /// The direct parent of the project if it exists.
    #[serde(default)]
    pub parent_id: Option<ProjectID>,
    /// This marks the project as the initial Inbox project if it exists.
    #[serde(alias = "inbox_project", default)]
    pub is_inbox_project: bool,
    /// Workspace the project belongs to, for team accounts.
    #[serde(default)]
    pub workspace_id: Option<String>,
    /// Folder of the workspace the project is filed under.
    #[serde(default)]
    pub folder_id: Option<super::FolderID>,
}

impl Project {
    /// Link to this project in the Todoist web app. The inbox has a fixed link.
    pub fn url(&self) -> String {
        if self.is_inbox_project {
            return INBOX_URL.to_string();
        }
        project_url(&self.id, &self.name)
    }
}

/// ViewStyle for viewing of the project in different clients.
#[derive(
    Debug, Serialize, Deserialize, Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Default, Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ViewStyle {
    /// Project as list view (default).
    #[default]
    List,
    /// Project as board view.
    Board,
    /// Project as calendar view.
    Calendar,
}

/// Colors accepted for projects and labels.
///
/// Taken from the [color list](https://developer.todoist.com/guides/#colors).
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone, Copy, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Color {
    BerryRed,
    Red,
    Orange,
    Yellow,
    OliveGreen,
    LimeGreen,
    Green,
    MintGreen,
    Teal,
    SkyBlue,
    LightBlue,
    Blue,
    Grape,
    Violet,
    Lavender,
    Magenta,
    Salmon,
    Charcoal,
    Grey,
    Taupe,
}

/// A user with access to a shared [`Project`].
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone)]
pub struct Collaborator {
    /// ID of the user.
    pub id: super::UserID,
    /// Email address of the user.
    pub email: String,
    /// Full name of the user.
    pub name: String,
}

/// Command used with [`super::Gateway::create_project`] to create a new [`Project`].
#[skip_serializing_none]
#[derive(Debug, Serialize, Default, Clone)]
pub struct CreateProject {
    /// Name of the project to create.
    pub name: String,
    /// Description of the project.
    pub description: Option<String>,
    /// Makes the newly created project a child of this parent project.
    pub parent_id: Option<ProjectID>,
    /// Color of the project icon.
    pub color: Option<Color>,
    /// Mark as favorite or not.
    pub is_favorite: Option<bool>,
    /// Sets the view style of the project.
    pub view_style: Option<ViewStyle>,
}

impl Validate for CreateProject {
    fn validate(&self) -> Result<()> {
        validate::length("name", &self.name, 1, 120)?;
        validate::optional_length("description", self.description.as_deref(), 0, 16383)
    }
}

/// Command used with [`super::Gateway::update_project`]. Only set fields are changed.
#[skip_serializing_none]
#[derive(Debug, Serialize, Default, Clone)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<Color>,
    pub is_favorite: Option<bool>,
    pub view_style: Option<ViewStyle>,
}

impl Validate for UpdateProject {
    fn validate(&self) -> Result<()> {
        validate::optional_length("name", self.name.as_deref(), 1, 120)?;
        validate::optional_length("description", self.description.as_deref(), 0, 16383)
    }
}

#[cfg(test)]
impl Project {
    /// This is initializer is used for tests, as in general the client relies on the API and not
    /// local state.
    pub fn new(id: &str, name: &str) -> Project {
        Project {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            order: 0,
            color: "charcoal".to_string(),
            is_collapsed: false,
            is_shared: false,
            is_favorite: false,
            can_assign_tasks: None,
            view_style: ViewStyle::default(),
            created_at: None,
            updated_at: None,
            parent_id: None,
            is_inbox_project: false,
            workspace_id: None,
            folder_id: None,
        }
    }
}
