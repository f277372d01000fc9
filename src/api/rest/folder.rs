use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// FolderID is the unique ID of a [`Folder`].
pub type FolderID = String;

/// A folder groups projects inside a workspace.
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone)]
pub struct Folder {
    /// Unique ID of the folder.
    pub id: FolderID,
    /// Name shown in the sidebar.
    pub name: String,
    /// Workspace the folder belongs to.
    pub workspace_id: String,
    /// Order in which projects inside the folder are listed.
    #[serde(default)]
    pub default_order: i64,
    /// Position of the folder within the workspace.
    #[serde(default)]
    pub child_order: i64,
    #[serde(default)]
    pub is_deleted: bool,
}

/// Command used with [`super::Gateway::create_folder`].
#[skip_serializing_none]
#[derive(Debug, Serialize, Default, Clone)]
pub struct CreateFolder {
    pub name: String,
    /// Workspace to create the folder in.
    pub workspace_id: String,
    pub default_order: Option<i64>,
    pub child_order: Option<i64>,
}

/// Command used with [`super::Gateway::update_folder`]. Only set fields are changed.
#[skip_serializing_none]
#[derive(Debug, Serialize, Default, Clone)]
pub struct UpdateFolder {
    pub name: Option<String>,
    pub default_order: Option<i64>,
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn round_trip() {
        let body = json!({
            "id": "6X7rM8997g3RQmvh",
            "name": "Clients",
            "workspace_id": "ws_001",
            "default_order": 0,
            "child_order": 2,
            "is_deleted": false
        });
        let folder: Folder = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(folder.workspace_id, "ws_001");
        assert_eq!(serde_json::to_value(&folder).unwrap(), body);
    }

    #[test]
    fn folder_payloads() {
        let create = CreateFolder {
            name: "Clients".to_string(),
            workspace_id: "ws_001".to_string(),
            child_order: Some(1),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&create).unwrap(),
            json!({"name": "Clients", "workspace_id": "ws_001", "child_order": 1})
        );
        assert_eq!(
            serde_json::to_value(UpdateFolder::default()).unwrap(),
            json!({})
        );
    }
}
