use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
    Parent,
    Unknown,
}

impl Role {
    /// Role claims arrive as free-form strings from the identity
    /// provider. Anything unrecognized maps to `Unknown`, which can only
    /// narrow visibility, never widen it.
    pub fn from_claim(claim: &str) -> Self {
        match claim {
            "admin" => Role::Admin,
            "teacher" => Role::Teacher,
            "student" => Role::Student,
            "parent" => Role::Parent,
            _ => Role::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
            Role::Parent => "parent",
            Role::Unknown => "unknown",
        }
    }
}

/// The acting identity on a request: an opaque identity string plus the
/// role resolved from the session's claim snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Viewer {
    pub id: String,
    pub role: Role,
}

impl Viewer {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    /// Unauthenticated requests act as an anonymous viewer. The empty
    /// identity is inert: `Unknown` is denied before any identity
    /// comparison happens.
    pub fn anonymous() -> Self {
        Self {
            id: String::new(),
            role: Role::Unknown,
        }
    }
}
