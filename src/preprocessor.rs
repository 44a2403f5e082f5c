use crate::error::{MadobeError, Result};
use crate::escape::html_id;
use crate::params::{parse_literal, parse_params, ParamParser};
use crate::profile::{EngineProfile, WIDGETS_PLACEHOLDER};
use regex::Regex;
use std::collections::BTreeMap;

/// Sentinel key representing a page-level (non-field-scoped) error message.
pub const GENERAL_ERROR_KEY: &str = "__ERROR__";

/// The form-control rendering recipes a widget expression can name.
///
/// `select` and `dropdown` are aliases, as are `multiple_select` and
/// `listbox`; both spellings render identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Hidden,
    MultipleHidden,
    Label,
    Emptybox,
    Textbox,
    Password,
    Textarea,
    Checkbox,
    MultipleCheckbox,
    Radio,
    Dropdown,
    Listbox,
    Error,
    Info,
    Warning,
}

/// Every widget name recognized in template source, sorted.
pub const WIDGET_NAMES: [&str; 17] = [
    "checkbox",
    "dropdown",
    "emptybox",
    "error",
    "hidden",
    "info",
    "label",
    "listbox",
    "multiple_checkbox",
    "multiple_hidden",
    "multiple_select",
    "password",
    "radio",
    "select",
    "textarea",
    "textbox",
    "warning",
];

impl WidgetKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "checkbox" => Some(WidgetKind::Checkbox),
            "dropdown" | "select" => Some(WidgetKind::Dropdown),
            "emptybox" => Some(WidgetKind::Emptybox),
            "error" => Some(WidgetKind::Error),
            "hidden" => Some(WidgetKind::Hidden),
            "info" => Some(WidgetKind::Info),
            "label" => Some(WidgetKind::Label),
            "listbox" | "multiple_select" => Some(WidgetKind::Listbox),
            "multiple_checkbox" => Some(WidgetKind::MultipleCheckbox),
            "multiple_hidden" => Some(WidgetKind::MultipleHidden),
            "password" => Some(WidgetKind::Password),
            "radio" => Some(WidgetKind::Radio),
            "textarea" => Some(WidgetKind::Textarea),
            "textbox" => Some(WidgetKind::Textbox),
            "warning" => Some(WidgetKind::Warning),
            _ => None,
        }
    }
}

/// Generic widget preprocessor: locates `expr.widget(params)[filter]`
/// occurrences in template source and rewrites each into the profile's
/// engine-native snippet. Stateless per call; all non-matched characters
/// pass through byte-for-byte.
pub struct WidgetPreprocessor {
    profile: EngineProfile,
    parser: ParamParser,
    re_widgets: Regex,
}

impl WidgetPreprocessor {
    /// Build a preprocessor for a profile, recognizing the default known
    /// functions.
    ///
    /// Fails when the profile's `widgets_pattern` lacks the `%(widgets)s`
    /// placeholder or does not compile.
    pub fn new(profile: EngineProfile) -> Result<Self> {
        Self::with_parser(profile, ParamParser::default())
    }

    /// Build a preprocessor with an explicitly configured parameter parser.
    pub fn with_parser(profile: EngineProfile, parser: ParamParser) -> Result<Self> {
        if !profile.widgets_pattern.contains(WIDGETS_PLACEHOLDER) {
            return Err(MadobeError::MissingWidgetsPlaceholder);
        }
        let pattern = profile
            .widgets_pattern
            .replace(WIDGETS_PLACEHOLDER, &WIDGET_NAMES.join("|"));
        let re_widgets = Regex::new(&pattern)?;
        Ok(Self {
            profile,
            parser,
            re_widgets,
        })
    }

    pub fn profile(&self) -> &EngineProfile {
        &self.profile
    }

    /// Rewrite every widget expression in `text` into the engine-native
    /// snippet. The profile's prepend snippet is inserted once at the very
    /// start when at least one widget matched; with zero matches the input
    /// comes back unchanged.
    pub fn preprocess(&self, text: &str) -> Result<String> {
        let mut result = String::with_capacity(text.len());
        let mut start = 0;
        for caps in self.re_widgets.captures_iter(text) {
            let m = caps.get(0).expect("whole match");
            result.push_str(&text[start..m.start()]);
            start = m.end();
            let widget = caps.name("widget").map(|m| m.as_str()).unwrap_or("");
            let kind = WidgetKind::from_name(widget).expect("widget name from alternation");
            let expr = caps.name("expr").map(|m| m.as_str()).unwrap_or("");
            let params = caps.name("params").map(|m| m.as_str()).unwrap_or("");
            let filter = caps.name("expr_filter").map(|m| m.as_str()).unwrap_or("");
            result.push_str(&self.render(kind, expr, params, filter)?);
        }
        if start == 0 {
            return Ok(text.to_string());
        }
        if let Some(prepend) = &self.profile.prepend {
            result.insert_str(0, prepend);
        }
        result.push_str(&text[start..]);
        Ok(result)
    }

    fn render(&self, kind: WidgetKind, expr: &str, params: &str, filter: &str) -> Result<String> {
        match kind {
            WidgetKind::Hidden => Ok(self.hidden(expr, filter)),
            WidgetKind::MultipleHidden => Ok(self.multiple_hidden(expr, filter)),
            WidgetKind::Label => self.label(expr, params, filter),
            WidgetKind::Emptybox => Ok(self.input_helper(expr, params, filter, "text", false)),
            WidgetKind::Textbox => Ok(self.input_helper(expr, params, filter, "text", true)),
            WidgetKind::Password => Ok(self.input_helper(expr, params, filter, "password", true)),
            WidgetKind::Textarea => Ok(self.textarea(expr, params, filter)),
            WidgetKind::Checkbox => Ok(self.checkbox(expr, params)),
            WidgetKind::MultipleCheckbox => {
                self.choices_helper(expr, params, filter, "multiple_checkbox")
            }
            WidgetKind::Radio => self.choices_helper(expr, params, filter, "radio"),
            WidgetKind::Dropdown => self.select_helper(expr, params, filter, "", "dropdown"),
            WidgetKind::Listbox => {
                self.select_helper(expr, params, filter, " multiple=\"multiple\"", "listbox")
            }
            WidgetKind::Error => Ok(self.error(expr, params, filter)),
            WidgetKind::Info => Ok(self.message_helper(expr, params, filter, "info")),
            WidgetKind::Warning => Ok(self.message_helper(expr, params, filter, "warning")),
        }
    }

    /// Interpret `text` as a literal (folded to its value) or a live
    /// expression interpolated through the profile.
    fn expression(&self, text: &str, expr_filter: &str) -> String {
        match parse_literal(text) {
            Some(value) => value.to_string(),
            None => fill(
                &self.profile.expression,
                &[("expr", text), ("expr_filter", expr_filter)],
            ),
        }
    }

    /// Join keyword arguments as HTML attribute text, with a leading space.
    fn join_attrs(&self, kwargs: &BTreeMap<String, String>) -> String {
        if kwargs.is_empty() {
            return String::new();
        }
        let attrs: Vec<String> = kwargs
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, self.expression(v, "")))
            .collect();
        format!(" {}", attrs.join(" "))
    }

    /// Conditional error-class markup for a field, honoring a custom class.
    fn error_class(&self, name: &str, class: Option<&str>) -> String {
        match class {
            Some(class) => fill(
                &self.profile.error_class_custom,
                &[("name", name), ("class", &self.expression(class, ""))],
            ),
            None => fill(&self.profile.error_class_plain, &[("name", name)]),
        }
    }

    fn hidden(&self, expr: &str, filter: &str) -> String {
        let name = self.parser.parse_name(expr);
        fill(
            &self.profile.hidden,
            &[("name", name), ("value", &self.expression(expr, filter))],
        )
    }

    fn multiple_hidden(&self, expr: &str, filter: &str) -> String {
        let name = self.parser.parse_name(expr);
        fill(
            &self.profile.multiple_hidden,
            &[("name", name), ("value", expr), ("expr_filter", filter)],
        )
    }

    fn label(&self, expr: &str, params: &str, filter: &str) -> Result<String> {
        let name = self.parser.parse_name(expr);
        let mut parsed = parse_params(params);
        let class = parsed.keyword.remove("class");
        let text = parsed
            .positional
            .first()
            .ok_or_else(|| MadobeError::MissingParameter {
                widget: "label".to_string(),
                param: "text".to_string(),
            })?;
        Ok(fill(
            &self.profile.label,
            &[
                ("id", &html_id(name)),
                ("name", name),
                ("value", &self.expression(text, filter)),
                ("attrs", &self.join_attrs(&parsed.keyword)),
                ("class", &self.error_class(name, class.as_deref())),
            ],
        ))
    }

    fn input_helper(
        &self,
        expr: &str,
        params: &str,
        filter: &str,
        input_type: &str,
        conditional: bool,
    ) -> String {
        let name = self.parser.parse_name(expr);
        let mut parsed = parse_params(params);
        let class = parsed.keyword.remove("class");
        let condition = if conditional {
            self.profile.input_condition.as_str()
        } else {
            ""
        };
        let (value, func) = self.parser.parse_known_function(expr);
        fill(
            &self.profile.input,
            &[
                ("id", &html_id(name)),
                ("name", name),
                ("type", input_type),
                ("value", &value),
                ("condition", condition),
                ("func", &func),
                ("expr_filter", filter),
                ("attrs", &self.join_attrs(&parsed.keyword)),
                ("class", &self.error_class(name, class.as_deref())),
            ],
        )
    }

    fn textarea(&self, expr: &str, params: &str, filter: &str) -> String {
        let name = self.parser.parse_name(expr);
        let mut parsed = parse_params(params);
        let class = parsed.keyword.remove("class");
        parsed
            .keyword
            .entry("rows".to_string())
            .or_insert_with(|| "\"9\"".to_string());
        parsed
            .keyword
            .entry("cols".to_string())
            .or_insert_with(|| "\"40\"".to_string());
        fill(
            &self.profile.textarea,
            &[
                ("id", &html_id(name)),
                ("name", name),
                ("value", &self.expression(expr, filter)),
                ("attrs", &self.join_attrs(&parsed.keyword)),
                ("class", &self.error_class(name, class.as_deref())),
            ],
        )
    }

    fn checkbox(&self, expr: &str, params: &str) -> String {
        let name = self.parser.parse_name(expr);
        let mut parsed = parse_params(params);
        let class = parsed.keyword.remove("class");
        fill(
            &self.profile.checkbox,
            &[
                ("id", &html_id(name)),
                ("name", name),
                ("value", expr),
                ("attrs", &self.join_attrs(&parsed.keyword)),
                ("class", &self.error_class(name, class.as_deref())),
            ],
        )
    }

    /// multiple_checkbox and radio: iterate `choices` as key/text pairs.
    fn choices_helper(
        &self,
        expr: &str,
        params: &str,
        filter: &str,
        widget: &str,
    ) -> Result<String> {
        let name = self.parser.parse_name(expr);
        let mut parsed = parse_params(params);
        let class = parsed.keyword.remove("class");
        let choices = self.required_choices(&mut parsed.keyword, widget)?;
        let template = match widget {
            "radio" => &self.profile.radio,
            _ => &self.profile.multiple_checkbox,
        };
        Ok(fill(
            template,
            &[
                ("id", &html_id(name)),
                ("name", name),
                ("choices", &choices),
                ("value", expr),
                ("expr_filter", filter),
                ("attrs", &self.join_attrs(&parsed.keyword)),
                ("class", &self.error_class(name, class.as_deref())),
            ],
        ))
    }

    fn select_helper(
        &self,
        expr: &str,
        params: &str,
        filter: &str,
        select_type: &str,
        widget: &str,
    ) -> Result<String> {
        let name = self.parser.parse_name(expr);
        let mut parsed = parse_params(params);
        let class = parsed.keyword.remove("class");
        let choices = self.required_choices(&mut parsed.keyword, widget)?;
        Ok(fill(
            &self.profile.select,
            &[
                ("id", &html_id(name)),
                ("name", name),
                ("select_type", select_type),
                ("choices", &choices),
                ("value", expr),
                ("expr_filter", filter),
                ("attrs", &self.join_attrs(&parsed.keyword)),
                ("class", &self.error_class(name, class.as_deref())),
            ],
        ))
    }

    fn required_choices(
        &self,
        kwargs: &mut BTreeMap<String, String>,
        widget: &str,
    ) -> Result<String> {
        kwargs
            .remove("choices")
            .ok_or_else(|| MadobeError::MissingParameter {
                widget: widget.to_string(),
                param: "choices".to_string(),
            })
    }

    /// General error message or field error. The expression starting with
    /// its own parsed name marks the page-scoped form: the sentinel key
    /// replaces the field name and the CSS class gets a `-message` suffix.
    fn error(&self, expr: &str, params: &str, filter: &str) -> String {
        let name = self.parser.parse_name(expr);
        let mut parsed = parse_params(params);
        let class = parsed.keyword.remove("class");
        let (key, base) = if expr.starts_with(name) {
            (GENERAL_ERROR_KEY, "error-message")
        } else {
            (name, "error")
        };
        let css = self.merge_class(base, class.as_deref());
        let attrs = format!("{} class=\"{}\"", self.join_attrs(&parsed.keyword), css);
        fill(
            &self.profile.error,
            &[("name", key), ("attrs", &attrs), ("expr_filter", filter)],
        )
    }

    fn message_helper(&self, expr: &str, params: &str, filter: &str, kind: &str) -> String {
        let name = self.parser.parse_name(expr);
        let mut parsed = parse_params(params);
        let class = parsed.keyword.remove("class");
        let base = if expr.starts_with(name) {
            format!("{}-message", kind)
        } else {
            kind.to_string()
        };
        let css = self.merge_class(&base, class.as_deref());
        let attrs = format!("{} class=\"{}\"", self.join_attrs(&parsed.keyword), css);
        fill(
            &self.profile.message,
            &[
                ("value", expr),
                ("info", &self.expression(expr, filter)),
                ("attrs", &attrs),
            ],
        )
    }

    fn merge_class(&self, base: &str, class: Option<&str>) -> String {
        match class {
            Some(class) => format!("{} {}", base, self.expression(class, "")),
            None => base.to_string(),
        }
    }
}

/// Substitute `%(key)s` placeholders in a snippet template.
///
/// Unknown placeholders stay verbatim and extra variables are ignored, so
/// one driver serves templates that use different key subsets.
pub(crate) fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(i) = rest.find("%(") {
        out.push_str(&rest[..i]);
        let after = &rest[i + 2..];
        match after.find(")s") {
            Some(j)
                if after[..j]
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_') =>
            {
                let key = &after[..j];
                match vars.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => out.push_str(&rest[i..i + 2 + j + 2]),
                }
                rest = &after[j + 2..];
            }
            _ => {
                out.push_str("%(");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Bare-bones profile whose templates expose the substitution slots,
    /// mirroring how widget rendering is exercised in isolation.
    fn probe_profile() -> EngineProfile {
        EngineProfile {
            widgets_pattern: "%(widgets)s".to_string(),
            variable_start: "${".to_string(),
            variable_end: "}".to_string(),
            prepend: None,
            expression: "%(expr)s%(expr_filter)s".to_string(),
            error_class_plain: "[%(name)s]".to_string(),
            error_class_custom: "[%(name)s %(class)s]".to_string(),
            input_condition: " is set".to_string(),
            hidden: "%(name)s %(value)s".to_string(),
            multiple_hidden: "%(name)s %(value)s%(expr_filter)s".to_string(),
            label: "%(id)s|%(name)s|%(value)s|%(attrs)s|%(class)s".to_string(),
            input: "%(id)s|%(name)s|%(type)s|%(value)s|%(condition)s|%(func)s|%(expr_filter)s|%(attrs)s|%(class)s"
                .to_string(),
            textarea: "%(id)s|%(name)s|%(value)s|%(attrs)s|%(class)s".to_string(),
            checkbox: "%(id)s|%(name)s|%(value)s|%(attrs)s|%(class)s".to_string(),
            multiple_checkbox: "mc:%(id)s|%(name)s|%(choices)s|%(value)s|%(expr_filter)s|%(attrs)s|%(class)s"
                .to_string(),
            radio: "radio:%(id)s|%(name)s|%(choices)s|%(value)s|%(expr_filter)s|%(attrs)s|%(class)s"
                .to_string(),
            select: "%(id)s|%(name)s|%(select_type)s|%(choices)s|%(value)s|%(expr_filter)s|%(attrs)s|%(class)s"
                .to_string(),
            error: "%(name)s|%(attrs)s|%(expr_filter)s".to_string(),
            message: "%(value)s|%(info)s|%(attrs)s".to_string(),
        }
    }

    fn probe() -> WidgetPreprocessor {
        WidgetPreprocessor::new(probe_profile()).unwrap()
    }

    #[test]
    fn test_missing_widgets_placeholder() {
        let mut profile = probe_profile();
        profile.widgets_pattern = String::new();
        assert!(matches!(
            WidgetPreprocessor::new(profile),
            Err(MadobeError::MissingWidgetsPlaceholder)
        ));
    }

    #[test]
    fn test_fill() {
        assert_eq!(fill("a %(x)s b", &[("x", "1")]), "a 1 b");
        assert_eq!(fill("%(x)s%(y)s", &[("x", "1"), ("y", "2")]), "12");
        // Unknown placeholders stay verbatim; stray %( passes through.
        assert_eq!(fill("%(zzz)s", &[("x", "1")]), "%(zzz)s");
        assert_eq!(fill("50%(half)", &[]), "50%(half)");
    }

    #[test]
    fn test_expression() {
        let p = probe();
        assert_eq!(p.expression("\"text\"", ""), "text");
        assert_eq!(p.expression("100", ""), "100");
        assert_eq!(p.expression("user.name", "|f"), "user.name|f");
    }

    #[test]
    fn test_join_attrs() {
        let p = probe();
        assert_eq!(p.join_attrs(&BTreeMap::new()), "");
        let kwargs = BTreeMap::from([
            ("autocomplete".to_string(), "\"off\"".to_string()),
            ("maxlength".to_string(), "100".to_string()),
            ("disabled".to_string(), "${disabled}".to_string()),
        ]);
        assert_eq!(
            p.join_attrs(&kwargs),
            " autocomplete=\"off\" disabled=\"${disabled}\" maxlength=\"100\""
        );
    }

    #[test]
    fn test_error_class() {
        let p = probe();
        assert_eq!(p.error_class("x", None), "[x]");
        assert_eq!(p.error_class("x", Some("\"c\"")), "[x c]");
    }

    #[test]
    fn test_hidden() {
        let p = probe();
        assert_eq!(p.hidden("model.pref", "|f"), "pref model.pref|f");
    }

    #[test]
    fn test_multiple_hidden() {
        let p = probe();
        assert_eq!(p.multiple_hidden("model.prefs", "|f"), "prefs model.prefs|f");
    }

    #[test]
    fn test_label() {
        let p = probe();
        let out = p
            .label("model.user_name", "\"User:\", class=\"x\", autocomplete=\"off\"", "|f")
            .unwrap();
        assert_eq!(out, "user-name|user_name|User:| autocomplete=\"off\"|[user_name x]");
    }

    #[test]
    fn test_label_requires_text() {
        let p = probe();
        assert!(matches!(
            p.label("model.user_name", "", "|f"),
            Err(MadobeError::MissingParameter { .. })
        ));
    }

    #[test]
    fn test_textbox() {
        let p = probe();
        let out = p.input_helper(
            "model.user_name",
            "class=\"x\", autocomplete=\"off\"",
            "|f",
            "text",
            true,
        );
        assert_eq!(
            out,
            "user-name|user_name|text|model.user_name| is set|model.user_name|\
             |f| autocomplete=\"off\"|[user_name x]"
        );
    }

    #[test]
    fn test_emptybox_has_no_condition() {
        let p = probe();
        let out = p.input_helper("model.amount", "", "", "text", false);
        assert_eq!(out, "amount|amount|text|model.amount||model.amount|||[amount]");
    }

    #[test]
    fn test_input_known_function() {
        let p = probe();
        let out = p.input_helper("model.dob.format()", "", "", "text", true);
        assert_eq!(
            out,
            "dob|dob|text|model.dob| is set|format_value(model.dob, None)|||[dob]"
        );
    }

    #[test]
    fn test_textarea_defaults() {
        let p = probe();
        let out = p.textarea("model.comment", "class=\"x\"", "|f");
        assert_eq!(
            out,
            "comment|comment|model.comment|f| cols=\"40\" rows=\"9\"|[comment x]"
        );
    }

    #[test]
    fn test_checkbox() {
        let p = probe();
        let out = p.checkbox("model.accepts", "autocomplete=\"off\"");
        assert_eq!(out, "accepts|accepts|model.accepts| autocomplete=\"off\"|[accepts]");
    }

    #[test]
    fn test_multiple_checkbox_requires_choices() {
        let p = probe();
        assert!(matches!(
            p.choices_helper("model.scm", "", "", "multiple_checkbox"),
            Err(MadobeError::MissingParameter { .. })
        ));
    }

    #[test]
    fn test_radio() {
        let p = probe();
        let out = p
            .choices_helper("model.yes_no", "choices=${lst}, class=\"x\"", "|f", "radio")
            .unwrap();
        assert_eq!(out, "radio:yes-no|yes_no|${lst}|model.yes_no||f||[yes_no x]");
    }

    #[test]
    fn test_dropdown() {
        let p = probe();
        let out = p
            .select_helper("model.scm", "choices=scm", "|f", "", "dropdown")
            .unwrap();
        assert_eq!(out, "scm|scm||scm|model.scm||f||[scm]");
    }

    #[test]
    fn test_listbox_select_type() {
        let p = probe();
        let out = p
            .select_helper("model.scm", "choices=scm", "", " multiple=\"multiple\"", "listbox")
            .unwrap();
        assert_eq!(out, "scm|scm| multiple=\"multiple\"|scm|model.scm|||[scm]");
    }

    #[test]
    fn test_field_error() {
        let p = probe();
        let out = p.error("model.user_name", "cursor=\"auto\"", "|f");
        assert_eq!(out, "user_name| cursor=\"auto\" class=\"error\"||f");

        let out = p.error("model.user_name", "class=\"x\", cursor=\"auto\"", "|f");
        assert_eq!(out, "user_name| cursor=\"auto\" class=\"error x\"||f");
    }

    #[test]
    fn test_general_error() {
        let p = probe();
        let out = p.error("model", "cursor=\"auto\"", "|f");
        assert_eq!(out, "__ERROR__| cursor=\"auto\" class=\"error-message\"||f");

        let out = p.error("model", "class=\"x\", cursor=\"auto\"", "|f");
        assert_eq!(out, "__ERROR__| cursor=\"auto\" class=\"error-message x\"||f");
    }

    #[test]
    fn test_info_and_warning() {
        let p = probe();
        let out = p.message_helper("model.username", "cursor=\"auto\"", "|f", "info");
        assert_eq!(
            out,
            "model.username|model.username|f| cursor=\"auto\" class=\"info\""
        );

        let out = p.message_helper("message", "", "|f", "warning");
        assert_eq!(out, "message|message|f| class=\"warning-message\"");
    }

    #[test]
    fn test_widget_kind_aliases() {
        assert_eq!(WidgetKind::from_name("select"), Some(WidgetKind::Dropdown));
        assert_eq!(WidgetKind::from_name("dropdown"), Some(WidgetKind::Dropdown));
        assert_eq!(WidgetKind::from_name("listbox"), Some(WidgetKind::Listbox));
        assert_eq!(
            WidgetKind::from_name("multiple_select"),
            Some(WidgetKind::Listbox)
        );
        assert_eq!(WidgetKind::from_name("marquee"), None);
    }

    #[test]
    fn test_every_widget_name_resolves() {
        for name in WIDGET_NAMES {
            assert!(WidgetKind::from_name(name).is_some(), "unmapped: {}", name);
        }
    }

    fn driver_profile() -> EngineProfile {
        let mut profile = probe_profile();
        profile.widgets_pattern = r"\$\{((?P<expr>.+?)\.(?P<widget>%(widgets)s)\((?P<params>.*?)\)(?P<expr_filter>(\|[\w,]+|)))\}"
            .to_string();
        profile
    }

    #[test]
    fn test_preprocess_passthrough() {
        let p = WidgetPreprocessor::new(driver_profile()).unwrap();
        let text = "<b>${model.username}</b>";
        assert_eq!(p.preprocess(text).unwrap(), text);
    }

    #[test]
    fn test_preprocess_no_prepend_without_match() {
        let mut profile = driver_profile();
        profile.prepend = Some("IMPORT;".to_string());
        let p = WidgetPreprocessor::new(profile).unwrap();
        assert_eq!(p.preprocess("plain text").unwrap(), "plain text");
    }

    #[test]
    fn test_preprocess_rewrites_in_order() {
        let p = WidgetPreprocessor::new(driver_profile()).unwrap();
        let out = p
            .preprocess("a ${model.pref.hidden()} b ${model.user_name.error()} c")
            .unwrap();
        assert_eq!(
            out,
            "a pref model.pref b user_name| class=\"error\"| c"
        );
    }

    #[test]
    fn test_preprocess_prepend_once() {
        let mut profile = driver_profile();
        profile.prepend = Some("IMPORT;".to_string());
        let p = WidgetPreprocessor::new(profile).unwrap();
        let out = p
            .preprocess("${model.a.hidden()} x ${model.b.hidden()}")
            .unwrap();
        assert_eq!(out, "IMPORT;a model.a x b model.b");
    }

    #[test]
    fn test_preprocess_alias_equivalence() {
        let p = WidgetPreprocessor::new(driver_profile()).unwrap();
        let select = p.preprocess("${model.scm.select(choices=scm)}").unwrap();
        let dropdown = p.preprocess("${model.scm.dropdown(choices=scm)}").unwrap();
        assert_eq!(select, dropdown);

        let listbox = p.preprocess("${model.scm.listbox(choices=scm)}").unwrap();
        let multiple = p
            .preprocess("${model.scm.multiple_select(choices=scm)}")
            .unwrap();
        assert_eq!(listbox, multiple);
    }

    #[test]
    fn test_preprocess_missing_choices_is_fatal() {
        let p = WidgetPreprocessor::new(driver_profile()).unwrap();
        assert!(matches!(
            p.preprocess("${model.scm.dropdown()}"),
            Err(MadobeError::MissingParameter { .. })
        ));
    }

    #[test]
    fn test_preprocess_filter_suffix() {
        let p = WidgetPreprocessor::new(driver_profile()).unwrap();
        let out = p.preprocess("${model.pref.hidden()|h}").unwrap();
        assert_eq!(out, "pref model.pref|h");
    }
}
