//! Error types for the deserialize operation.
//!
//! Only deserialization reports failure to the caller. Reset, visit, and
//! serialize degrade to logged no-ops when the host cannot supply a
//! settings struct, and never fail otherwise.

use crate::store::ReadError;

/// Why a deserialize call failed.
///
/// A failed call may leave the settings struct partially mutated: fields
/// before the failing key hold their new values, fields at and after it are
/// untouched. Callers should re-reset or discard the struct rather than
/// assume atomicity.
#[derive(Debug, Clone, PartialEq)]
pub enum SetError {
    /// The host could not supply a settings struct.
    MissingSettings,
    /// One field's serialized value was rejected; processing stopped there.
    Validation { key: String, reason: ReadError },
    /// Every field validated, but the post-set hook rejected the result.
    HookRejected,
}

impl std::fmt::Display for SetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetError::MissingSettings => write!(f, "host has no settings structure"),
            SetError::Validation { key, reason } => {
                write!(f, "parameter '{}': {}", key, reason)
            }
            SetError::HookRejected => write!(f, "post-set hook rejected the new settings"),
        }
    }
}

impl std::error::Error for SetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SetError::Validation { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_key_and_reason() {
        let err = SetError::Validation {
            key: "Gain".to_string(),
            reason: ReadError::OutOfRange,
        };
        let text = err.to_string();
        assert!(text.contains("Gain"));
        assert!(text.contains("bounds"));
    }
}
