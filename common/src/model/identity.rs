use serde::{Deserialize, Serialize};

/// Role attached to a signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Employee,
}

/// The signed-in user as handed over by the login flow.
///
/// The engine never looks this up on its own; callers pass it explicitly
/// into the check-in path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: None,
            role: Role::Employee,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stored_session_user() {
        let identity: Identity =
            serde_json::from_str(r#"{"id":"u-17","username":"amina","role":"admin"}"#).unwrap();
        assert_eq!(identity.id, "u-17");
        assert!(identity.is_admin());
    }

    #[test]
    fn legacy_id_field_and_missing_role() {
        let identity: Identity = serde_json::from_str(r#"{"_id":"abc"}"#).unwrap();
        assert_eq!(identity, Identity::new("abc"));
    }
}
