//! Madobe - HTML form widget preprocessors for host template engines
//!
//! Madobe rewrites widget-call expressions like
//! `model.username.textbox(autocomplete='off')` embedded in template source
//! into the host engine's native syntax, before the engine compiles the
//! template. It never executes templates itself:
//! - Deterministic text-to-text rewriting with no side effects
//! - One immutable [`EngineProfile`] per host syntax; ready-made profiles
//!   under [`engines`]
//! - Companion whitespace and inline-file preprocessors
//!
//! # Example
//!
//! ```rust
//! let preprocessor = madobe::engines::jinja::preprocessor().unwrap();
//!
//! let rewritten = preprocessor
//!     .preprocess("{{model.username.textbox(autocomplete='off')}}")
//!     .unwrap();
//!
//! assert!(rewritten.starts_with(
//!     "<input id=\"username\" name=\"username\" type=\"text\""
//! ));
//! ```

// Public modules - part of the API
pub mod engines;
pub mod error;
pub mod escape;
pub mod inline;
pub mod params;
pub mod preprocessor;
pub mod profile;
pub mod value;
pub mod whitespace;

pub use error::{MadobeError, Result};
pub use escape::{escape, escape_value, html_id};
pub use inline::InlinePreprocessor;
pub use params::{parse_literal, parse_params, ParamParser, ParsedParams};
pub use preprocessor::{WidgetKind, WidgetPreprocessor, GENERAL_ERROR_KEY, WIDGET_NAMES};
pub use profile::EngineProfile;
pub use value::{format_value, format_values, FormValue};
pub use whitespace::{WhitespacePreprocessor, WhitespaceRule};

/// Convenience function: build a preprocessor for `profile` and rewrite
/// `text` in one call.
///
/// Reuse a [`WidgetPreprocessor`] instead when processing many templates;
/// construction compiles the widget pattern.
///
/// # Example
///
/// ```rust
/// let rewritten = madobe::preprocess(
///     "${model.pref.hidden()}",
///     madobe::engines::mako::profile(),
/// ).unwrap();
///
/// assert_eq!(
///     rewritten,
///     "<input type=\"hidden\" name=\"pref\" value=\"${model.pref}\" />",
/// );
/// ```
pub fn preprocess(text: &str, profile: EngineProfile) -> Result<String> {
    WidgetPreprocessor::new(profile)?.preprocess(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess_convenience() {
        let out = preprocess("${model.pref.hidden()}", engines::mako::profile()).unwrap();
        assert_eq!(
            out,
            "<input type=\"hidden\" name=\"pref\" value=\"${model.pref}\" />"
        );
    }

    #[test]
    fn test_preprocess_passthrough() {
        let text = "no widgets in sight";
        let out = preprocess(text, engines::jinja::profile()).unwrap();
        assert_eq!(out, text);
    }

    #[test]
    fn test_escape_order() {
        // & first, so pre-escaped text never collapses.
        assert_eq!(escape("&lt;"), "&amp;lt;");
    }
}
