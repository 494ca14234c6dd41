use std::fmt;

use thiserror::Error;

/// The three record collections the console manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    App,
    AiLog,
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::App => "App",
            Self::AiLog => "AI Log",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConsoleError {
    /// No record matched an identifier-keyed lookup. `key` is the identifier
    /// as the caller supplied it, kept for logs; the message stays generic.
    #[error("{kind} not found")]
    NotFound { kind: EntityKind, key: String },

    #[error("Fixture error: {0}")]
    Fixture(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Column '{0}' is not declared by this table")]
    UnknownColumn(String),

    #[error("Column '{0}' is declared more than once")]
    DuplicateColumn(String),
}

impl ConsoleError {
    pub fn not_found(kind: EntityKind, key: impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, ConsoleError>;

impl From<serde_json::Error> for ConsoleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Fixture(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_messages() {
        assert_eq!(
            ConsoleError::not_found(EntityKind::User, 7).to_string(),
            "User not found"
        );
        assert_eq!(
            ConsoleError::not_found(EntityKind::App, 7).to_string(),
            "App not found"
        );
        assert_eq!(
            ConsoleError::not_found(EntityKind::AiLog, "abc").to_string(),
            "AI Log not found"
        );
    }

    #[test]
    fn test_fixture_error_from_json() {
        let err: ConsoleError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(err, ConsoleError::Fixture(_)));
        assert!(!err.is_not_found());
    }
}
