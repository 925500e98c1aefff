use serde::{Deserialize, Serialize};

/// Closed set of actor roles.
///
/// Replaces ad hoc role-string comparison at the boundary: parsing happens
/// once, checks are exhaustive matches on the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Moderator,
    Admin,
}

impl Role {
    /// Whether this role may approve or hide content.
    pub fn can_moderate(&self) -> bool {
        match self {
            Role::Admin | Role::Moderator => true,
            Role::User => false,
        }
    }

    /// Whether this role may edit the banned-word list.
    pub fn can_manage_filter(&self) -> bool {
        match self {
            Role::Admin => true,
            Role::Moderator | Role::User => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "moderator" => Ok(Role::Moderator),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moderation_rights_are_exhaustive() {
        assert!(Role::Admin.can_moderate());
        assert!(Role::Moderator.can_moderate());
        assert!(!Role::User.can_moderate());
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("Moderator".parse::<Role>().unwrap(), Role::Moderator);
        assert!("superuser".parse::<Role>().is_err());
    }
}
