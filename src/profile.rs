/// Placeholder token a profile's `widgets_pattern` must carry; the driver
/// substitutes the widget-name alternation for it at construction time.
pub const WIDGETS_PLACEHOLDER: &str = "%(widgets)s";

/// The string templates and delimiters specific to one host template
/// engine.
///
/// A profile is pure data: one snippet template per widget kind, the two
/// conditional error-class templates, the expression interpolation
/// template, and the matching pattern built around the engine's own
/// variable delimiters. Templates use `%(name)s`-style placeholders;
/// unknown placeholders are left verbatim, extra substitution variables are
/// ignored. Immutable once constructed: build one per engine and share it.
///
/// See [`crate::engines`] for ready-made profiles.
#[derive(Debug, Clone)]
pub struct EngineProfile {
    /// Regex locating widget expressions; must contain [`WIDGETS_PLACEHOLDER`]
    /// and the named groups `expr`, `widget`, `params`, `expr_filter`.
    pub widgets_pattern: String,
    /// Delimiter pair the pattern was built from, e.g. `{{` / `}}`.
    pub variable_start: String,
    pub variable_end: String,
    /// Snippet inserted once at the start of the output when at least one
    /// widget was rewritten, e.g. an import the generated code needs.
    pub prepend: Option<String>,
    /// Engine-native interpolation of a live expression;
    /// keys: `expr`, `expr_filter`.
    pub expression: String,
    /// Conditional error-class markup without a custom class; key: `name`.
    pub error_class_plain: String,
    /// Conditional error-class markup merging a custom class;
    /// keys: `name`, `class`.
    pub error_class_custom: String,
    /// Emptiness guard appended to the value condition of textbox/password
    /// rendering, in the engine's expression syntax. The emptybox widget
    /// renders its value unconditionally and ignores this.
    pub input_condition: String,
    /// Per-widget snippet templates.
    pub hidden: String,
    pub multiple_hidden: String,
    pub label: String,
    pub input: String,
    pub textarea: String,
    pub checkbox: String,
    pub multiple_checkbox: String,
    pub radio: String,
    pub select: String,
    pub error: String,
    pub message: String,
}
