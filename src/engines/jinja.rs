//! Profile for Jinja-style host engines: `{{ }}` variables, `{% %}` blocks.
//!
//! Engines with customized variable delimiters are supported by
//! [`profile_with_delimiters`]; the delimiters are substituted both into
//! the matching pattern and into the snippet templates that embed them.

use crate::profile::EngineProfile;
use crate::whitespace::{WhitespacePreprocessor, WhitespaceRule};
use crate::{Result, WidgetPreprocessor};
use regex::Regex;

const EXPRESSION: &str = "{{ %(expr)s%(expr_filter)s }}";

const ERROR_CLASS_PLAIN: &str = "{% if '%(name)s' in errors %} class=\"error\"{% endif %}";

const ERROR_CLASS_CUSTOM: &str = "{% if '%(name)s' in errors %} class=\"error %(class)s\"\
{% else %} class=\"%(class)s\"{% endif %}";

const HIDDEN: &str = "<input type=\"hidden\" name=\"%(name)s\" value=\"%(value)s\" />";

const MULTIPLE_HIDDEN: &str = "{% for item in %(value)s %}\
<input type=\"hidden\" name=\"%(name)s\" value=\"{{ item%(expr_filter)s }}\" />\
{% endfor %}";

const LABEL: &str = "<label for=\"%(id)s\"%(attrs)s%(class)s>%(value)s</label>";

const INPUT: &str = "<input id=\"%(id)s\" name=\"%(name)s\" type=\"%(type)s\"%(attrs)s%(class)s\
{% if %(value)s%(condition)s %} value=\"{{ %(func)s%(expr_filter)s }}\" />\
{% else %} />{% endif %}";

const TEXTAREA: &str =
    "<textarea id=\"%(id)s\" name=\"%(name)s\"%(attrs)s%(class)s>%(value)s</textarea>";

const CHECKBOX: &str = "<input id=\"%(id)s\" name=\"%(name)s\" type=\"checkbox\" \
value=\"1\"%(attrs)s%(class)s{% if %(value)s %} checked=\"checked\"{% endif %} />";

const MULTIPLE_CHECKBOX: &str = "{% for key, text in %(choices)s %}\
<label%(attrs)s%(class)s><input id=\"%(id)s\" name=\"%(name)s\" type=\"checkbox\" \
value=\"1\"%(attrs)s%(class)s{% if key in %(value)s %} checked=\"checked\"{% endif %} />\
{{ text%(expr_filter)s }}</label>{% endfor %}";

const RADIO: &str = "{% for key, text in %(choices)s %}<label%(attrs)s%(class)s>\
<input type=\"radio\" name=\"%(name)s\"%(attrs)s value=\"{{ key%(expr_filter)s }}\"%(class)s\
{% if key == %(value)s %} checked=\"checked\"{% endif %} />\
{{ text%(expr_filter)s }}</label>{% endfor %}";

const SELECT: &str = "<select id=\"%(id)s\" name=\"%(name)s\"%(select_type)s%(attrs)s%(class)s>\
{% for key, text in %(choices)s %}<option value=\"{{ key%(expr_filter)s }}\"\
{% if key == %(value)s %} selected=\"selected\"{% endif %}>{{ text%(expr_filter)s }}</option>\
{% endfor %}</select>";

const ERROR: &str = "{% if '%(name)s' in errors %}\
<span%(attrs)s>{{ errors['%(name)s'][-1]%(expr_filter)s }}</span>{% endif %}";

const MESSAGE: &str = "{% if %(value)s %}<span%(attrs)s>%(info)s</span>{% endif %}";

/// Profile for the default `{{` / `}}` variable delimiters.
pub fn profile() -> EngineProfile {
    profile_with_delimiters("{{", "}}")
}

/// Profile for an environment with customized variable delimiters.
pub fn profile_with_delimiters(variable_start: &str, variable_end: &str) -> EngineProfile {
    let widgets_pattern = format!(
        "\\s*{}((?P<expr>.+?)\\.(?P<widget>%(widgets)s)\\((?P<params>.*?)\\)\\s*\
         (?P<expr_filter>(\\|\\s*[\\w,\\s]+?|\\s*))){}\\s*",
        regex::escape(variable_start),
        regex::escape(variable_end),
    );
    let vary = |template: &str| {
        template
            .replace("{{", variable_start)
            .replace("}}", variable_end)
    };
    EngineProfile {
        widgets_pattern,
        variable_start: variable_start.to_string(),
        variable_end: variable_end.to_string(),
        prepend: None,
        expression: vary(EXPRESSION),
        error_class_plain: ERROR_CLASS_PLAIN.to_string(),
        error_class_custom: ERROR_CLASS_CUSTOM.to_string(),
        input_condition: " not in (None, '')".to_string(),
        hidden: HIDDEN.to_string(),
        multiple_hidden: vary(MULTIPLE_HIDDEN),
        label: LABEL.to_string(),
        input: vary(INPUT),
        textarea: TEXTAREA.to_string(),
        checkbox: CHECKBOX.to_string(),
        multiple_checkbox: vary(MULTIPLE_CHECKBOX),
        radio: vary(RADIO),
        select: vary(SELECT),
        error: vary(ERROR),
        message: MESSAGE.to_string(),
    }
}

/// Widget preprocessor for the default delimiters.
pub fn preprocessor() -> Result<WidgetPreprocessor> {
    WidgetPreprocessor::new(profile())
}

/// Whitespace preset for the default `{%` / `%}` block delimiters.
pub fn whitespace_preprocessor() -> WhitespacePreprocessor {
    whitespace_preprocessor_with_delimiters("{%", "%}")
}

/// Whitespace preset: trims line edges, collapses runs between tags and
/// around block delimiters. `<pre>` and `<code>` spans are left verbatim.
pub fn whitespace_preprocessor_with_delimiters(
    block_start: &str,
    block_end: &str,
) -> WhitespacePreprocessor {
    // Fixed patterns around escaped delimiters always compile.
    let rule = |pattern: String, replacement: String| -> WhitespaceRule {
        (Regex::new(&pattern).unwrap(), replacement)
    };
    WhitespacePreprocessor::with_ignore_rules(
        vec![
            rule(r"(?m)^ \s+|\s+$".to_string(), String::new()),
            rule(r">\s+<".to_string(), "><".to_string()),
            rule(
                format!(">\\s+{}", regex::escape(block_start)),
                format!(">{}", block_start),
            ),
            rule(
                format!("{}\\s+<", regex::escape(block_end)),
                format!("{}<", block_end),
            ),
        ],
        vec![Regex::new(r"(?s)<pre.*?>.*?</pre>|<code.*?>.*?</code>").unwrap()],
    )
}
