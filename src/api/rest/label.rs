use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::Color;
use crate::api::validate::{self, Validate};
use crate::error::Result;

/// LabelID is the unique ID of a [`Label`].
pub type LabelID = String;

/// A personal label, attached to tasks by name.
///
/// Taken from the [Developer Documentation](https://developer.todoist.com/api/v1/#tag/Labels).
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone)]
pub struct Label {
    /// Unique ID of the label.
    pub id: LabelID,
    /// Name that is referenced by [`super::Task::labels`].
    pub name: String,
    /// Color as used by the Todoist UI, see [`Color`].
    pub color: String,
    /// Position in the label list.
    #[serde(alias = "item_order", default)]
    pub order: i64,
    /// Shown among the favorites.
    #[serde(default)]
    pub is_favorite: bool,
}

/// Command used with [`super::Gateway::create_label`].
#[skip_serializing_none]
#[derive(Debug, Serialize, Default, Clone)]
pub struct CreateLabel {
    /// Name of the new label.
    pub name: String,
    pub color: Option<Color>,
    /// Position in the label list.
    pub item_order: Option<i64>,
    pub is_favorite: Option<bool>,
}

impl Validate for CreateLabel {
    fn validate(&self) -> Result<()> {
        validate::length("name", &self.name, 1, 60)
    }
}

/// Command used with [`super::Gateway::update_label`]. Only set fields are changed.
#[skip_serializing_none]
#[derive(Debug, Serialize, Default, Clone)]
pub struct UpdateLabel {
    pub name: Option<String>,
    pub color: Option<Color>,
    /// Position in the label list.
    pub item_order: Option<i64>,
    pub is_favorite: Option<bool>,
}

impl Validate for UpdateLabel {
    fn validate(&self) -> Result<()> {
        validate::optional_length("name", self.name.as_deref(), 1, 60)
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn round_trip() {
        let body = json!({
            "id": "2156154810",
            "name": "Food",
            "color": "charcoal",
            "order": 1,
            "is_favorite": false
        });
        let label: Label = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(label.name, "Food");
        assert_eq!(serde_json::to_value(&label).unwrap(), body);
    }

    #[test]
    fn accepts_item_order() {
        let label: Label = serde_json::from_value(
            json!({"id": "1", "name": "Food", "color": "red", "item_order": 3}),
        )
        .unwrap();
        assert_eq!(label.order, 3);
        assert!(!label.is_favorite);
    }

    #[test]
    fn label_payloads() {
        let create = CreateLabel {
            name: "Food".to_string(),
            color: Some(Color::Taupe),
            item_order: Some(2),
            ..Default::default()
        };
        create.validate().unwrap();
        assert_eq!(
            serde_json::to_value(&create).unwrap(),
            json!({"name": "Food", "color": "taupe", "item_order": 2})
        );
        assert!(CreateLabel::default().validate().is_err());
        let update = UpdateLabel {
            name: Some("l".repeat(61)),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
