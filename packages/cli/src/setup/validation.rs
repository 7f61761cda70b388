// ABOUTME: Length rules applied to every value collected during setup
// ABOUTME: Rejects empty or undersized input before it can reach the config document

use thiserror::Error;

pub const NAME_MIN_LEN: usize = 1;
pub const NAME_MAX_LEN: usize = 64;
pub const CREDENTIAL_MIN_LEN: usize = 8;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Must be between {min} and {max} characters in length.")]
    LengthOutOfRange { min: usize, max: usize },

    #[error("Must be at least {min} characters in length.")]
    TooShort { min: usize },
}

/// Constraint attached to a prompt field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    LengthBetween { min: usize, max: usize },
    MinLength(usize),
}

impl FieldRule {
    /// Display names: 1 to 64 characters
    pub fn display_name() -> Self {
        Self::LengthBetween {
            min: NAME_MIN_LEN,
            max: NAME_MAX_LEN,
        }
    }

    /// Client ids, secrets, document ids, and authorization codes
    pub fn credential() -> Self {
        Self::MinLength(CREDENTIAL_MIN_LEN)
    }

    /// Lengths count characters, not bytes
    pub fn validate(&self, value: &str) -> Result<(), ValidationError> {
        let len = value.chars().count();
        match *self {
            Self::LengthBetween { min, max } if len < min || len > max => {
                Err(ValidationError::LengthOutOfRange { min, max })
            }
            Self::MinLength(min) if len < min => Err(ValidationError::TooShort { min }),
            _ => Ok(()),
        }
    }
}
