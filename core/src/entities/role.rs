//! Employee roles (`/api/admin/roles`). Deleting a role only flags it.

use serde::{Deserialize, Serialize};

use crate::entities::required;
use crate::error::ValidationError;
use crate::resource::{Entity, EntityId, ResourceClient, Routes};

pub const ROUTES: Routes = Routes::rest("/api/admin/roles");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "auth0RoleId", default, skip_serializing_if = "Option::is_none")]
    pub auth0_role_id: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRole {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "auth0RoleId", skip_serializing_if = "Option::is_none")]
    pub auth0_role_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<NewRole> for RolePatch {
    fn from(draft: NewRole) -> Self {
        Self {
            name: Some(draft.name),
            description: draft.description,
        }
    }
}

impl Entity for Role {
    type Draft = NewRole;
    type Patch = RolePatch;
    const KIND: &'static str = "role";

    fn id(&self) -> EntityId {
        self.id
    }

    fn is_visible(&self) -> bool {
        !self.deleted
    }
}

impl NewRole {
    pub fn new(name: &str, description: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required(name, "name")?,
            description: description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            auth0_role_id: None,
        })
    }
}

pub fn client(base_url: &str) -> ResourceClient<Role> {
    ResourceClient::new(base_url, ROUTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deleted_roles_are_not_visible() {
        let live: Role = serde_json::from_str(r#"{"id":1,"name":"admin"}"#).unwrap();
        let gone: Role = serde_json::from_str(r#"{"id":2,"name":"cajero","deleted":true}"#).unwrap();
        assert!(live.is_visible());
        assert!(!gone.is_visible());
    }

    #[test]
    fn auth0_id_uses_backend_name() {
        let role: Role =
            serde_json::from_str(r#"{"id":1,"name":"admin","auth0RoleId":"rol_abc"}"#).unwrap();
        assert_eq!(role.auth0_role_id.as_deref(), Some("rol_abc"));
        let json = serde_json::to_value(&role).unwrap();
        assert_eq!(json["auth0RoleId"], "rol_abc");
    }

    #[test]
    fn new_role_requires_name_and_drops_blank_description() {
        assert_eq!(
            NewRole::new("  ", None).unwrap_err(),
            ValidationError::MissingField("name")
        );
        let role = NewRole::new("cocinero", Some(" ")).unwrap();
        assert_eq!(role.name, "cocinero");
        assert!(role.description.is_none());
    }
}
