use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account category chosen at registration.
///
/// The role never changes after the account is created and it is the only
/// input to authorization decisions: teachers author videos and exercises,
/// students consume what teachers have published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Teacher,
    Student,
}

impl Role {
    /// The value stored in the `Role` column of the `users` table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Teacher => "Teacher",
            Role::Student => "Student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role '{}'", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Teacher" => Ok(Role::Teacher),
            "Student" => Ok(Role::Student),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// A registered account, as stored in the `users` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub role: Role,
}
