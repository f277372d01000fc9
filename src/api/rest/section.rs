use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_bool_from_anything;
use serde_with::skip_serializing_none;

use super::ProjectID;
use crate::api::validate::{self, Validate};
use crate::error::Result;

/// SectionID is the unique ID of a [`Section`].
pub type SectionID = String;

/// Section describes a subsection of a [`super::Project`].
///
/// Taken from the [Developer Documentation](https://developer.todoist.com/api/v1/#tag/Sections).
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone)]
pub struct Section {
    /// The unique ID of this section.
    pub id: SectionID,
    /// The actual name of the section.
    pub name: String,
    /// Project ID that this section belongs to.
    pub project_id: ProjectID,
    /// Whether the section is collapsed.
    #[serde(
        alias = "collapsed",
        default,
        deserialize_with = "deserialize_bool_from_anything"
    )]
    pub is_collapsed: bool,
    /// Position of the section amonst sections from the same project.
    #[serde(alias = "section_order", default)]
    pub order: i64,
}

/// Command used with [`super::Gateway::create_section`] to create a new [`Section`].
#[skip_serializing_none]
#[derive(Debug, Serialize, Default, Clone)]
pub struct CreateSection {
    /// Name of the section to create.
    pub name: String,
    /// The project of which this section is part of
    pub project_id: ProjectID,
    /// Order of the section in lists.
    pub order: Option<i64>,
}

impl Validate for CreateSection {
    fn validate(&self) -> Result<()> {
        validate::length("name", &self.name, 1, 2048)
    }
}

/// Command used with [`super::Gateway::update_section`]. Only the name can be changed.
#[derive(Debug, Serialize, Default, Clone)]
pub struct UpdateSection {
    /// New name of the section.
    pub name: String,
}

impl Validate for UpdateSection {
    fn validate(&self) -> Result<()> {
        validate::length("name", &self.name, 1, 2048)
    }
}

#[cfg(test)]
impl Section {
    /// This is initializer is used for tests, as in general the client relies on the API and not
    /// local state.
    pub fn new(id: &str, project_id: &str, name: &str) -> Section {
        Section {
            id: id.to_string(),
            name: name.to_string(),
            project_id: project_id.to_string(),
            is_collapsed: false,
            order: 0,
        }
    }
}
