//! Controller error types.

use thiserror::Error;

use crate::store::StoreError;

/// Errors returned by [`ThemeController`](crate::ThemeController) operations.
///
/// Neither variant leaves the controller in a changed state: an invalid
/// preference is rejected before anything is touched, and a failed store
/// write aborts the update before the in-memory preference moves.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// The caller supplied a value outside `light`, `dark` and `system`.
    #[error("invalid theme preference '{0}' (expected light, dark or system)")]
    InvalidPreference(String),

    /// The preference could not be persisted.
    #[error("failed to persist theme preference: {0}")]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_preference_display() {
        let err = ThemeError::InvalidPreference("sepia".to_string());
        let msg = err.to_string();
        assert!(msg.contains("sepia"));
        assert!(msg.contains("light, dark or system"));
    }

    #[test]
    fn test_store_error_converts() {
        let err: ThemeError = StoreError::Serialize(
            serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        )
        .into();
        assert!(matches!(err, ThemeError::Store(_)));
        assert!(err.to_string().starts_with("failed to persist"));
    }
}
