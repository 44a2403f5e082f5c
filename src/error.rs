use thiserror::Error;

/// All errors that can occur in Madobe
#[derive(Error, Debug)]
pub enum MadobeError {
    /// The profile's widget pattern has no `%(widgets)s` placeholder to
    /// receive the widget-name alternation. Configuration bug, raised at
    /// construction time.
    #[error("widgets pattern is missing the %(widgets)s placeholder")]
    MissingWidgetsPlaceholder,

    #[error("invalid widget pattern: {0}")]
    PatternError(#[from] regex::Error),

    #[error("Type error: {message}")]
    TypeError { message: String },

    /// A widget was invoked without a parameter it requires, e.g. a
    /// selection widget without `choices`. Template-author bug.
    #[error("widget '{widget}' requires a '{param}' parameter")]
    MissingParameter { widget: String, param: String },
}

/// Result type alias for Madobe operations
pub type Result<T> = std::result::Result<T, MadobeError>;
