//! Comment widget errors.

use thiserror::Error;

use super::giscus::Mapping;

/// Error returned when embed markup cannot be produced or a control message
/// cannot be delivered.
///
/// Delivery failures stop at the widget: [`WidgetHost::set_theme`] logs them
/// and returns normally.
///
/// [`WidgetHost::set_theme`]: super::WidgetHost::set_theme
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("comment widget option '{0}' is required")]
    MissingField(&'static str),

    #[error("comment widget mapping '{0}' requires a term")]
    MissingTerm(Mapping),

    #[error("failed to render comment widget markup: {0}")]
    Template(#[from] minijinja::Error),

    #[error("failed to encode control message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("control channel unavailable: {0}")]
    Channel(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_term_display() {
        let err = WidgetError::MissingTerm(Mapping::Specific);
        assert_eq!(err.to_string(), "comment widget mapping 'specific' requires a term");
    }

    #[test]
    fn test_missing_field_display() {
        let err = WidgetError::MissingField("repo");
        assert!(err.to_string().contains("'repo'"));
    }
}
