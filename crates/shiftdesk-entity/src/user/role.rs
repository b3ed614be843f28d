//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Authorization level of the root role. Administrative operations require it.
pub const ROOT_LEVEL: i32 = 3;

/// Roles of the back office, ordered by authorization level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular assistant.
    Assistant,
    /// Senior assistant; may edit schedules of others.
    SeniorAssistant,
    /// Root role: user and template management.
    BlackCore,
}

impl UserRole {
    /// Return the authorization level (higher = more privileged).
    pub fn level(&self) -> i32 {
        match self {
            Self::Assistant => 1,
            Self::SeniorAssistant => 2,
            Self::BlackCore => ROOT_LEVEL,
        }
    }

    /// Check if this is the root role.
    pub fn is_root(&self) -> bool {
        self.level() >= ROOT_LEVEL
    }

    /// Return the role as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assistant => "assistant",
            Self::SeniorAssistant => "senior_assistant",
            Self::BlackCore => "black_core",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = shiftdesk_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "assistant" => Ok(Self::Assistant),
            "senior_assistant" => Ok(Self::SeniorAssistant),
            "black_core" => Ok(Self::BlackCore),
            _ => Err(shiftdesk_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: assistant, senior_assistant, black_core"
            ))),
        }
    }
}
