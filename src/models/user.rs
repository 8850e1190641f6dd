use std::fmt;

use serde::{Deserialize, Serialize};

/// Permission class of a user. Wire values are matched exactly and
/// case-sensitively; anything else is kept verbatim as `Unknown`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Landlord,
    Admin,
    Caretaker,
    Tenant,
    Unknown(String),
}

impl Role {
    /// Every role the backend can assign.
    pub const ALL: [Role; 4] = [Role::Landlord, Role::Admin, Role::Caretaker, Role::Tenant];

    pub fn as_str(&self) -> &str {
        match self {
            Role::Landlord => "LANDLORD",
            Role::Admin => "ADMIN",
            Role::Caretaker => "CARETAKER",
            Role::Tenant => "TENANT",
            Role::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Role::Unknown(_))
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "LANDLORD" => Role::Landlord,
            "ADMIN" => Role::Admin,
            "CARETAKER" => Role::Caretaker,
            "TENANT" => Role::Tenant,
            _ => Role::Unknown(raw),
        }
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        Role::from(raw.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The profile of the signed-in user as returned by `users/profile/`.
/// The backend owns it; the client keeps a read-only copy per session.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl User {
    /// "First Last", falling back to the username when both are blank.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Body for `users/register/`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegistrationRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: Role,
}

impl RegistrationRequest {
    /// The two password fields must agree before anything is sent.
    pub fn passwords_match(&self) -> bool {
        self.password == self.password2
    }
}
