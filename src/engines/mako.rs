//! Profile for Mako-style host engines: `${ }` variables, `% if` control
//! lines. Snippet templates end control lines with `\` so the host engine
//! swallows the layout newlines.

use crate::inline::InlinePreprocessor;
use crate::profile::EngineProfile;
use crate::whitespace::WhitespacePreprocessor;
use crate::{Result, WidgetPreprocessor};
use regex::Regex;

const WIDGETS_PATTERN: &str = r"\s*\$\{((?P<expr>.+?)\.(?P<widget>%(widgets)s)\((?P<params>.*?)\)\s*(?P<expr_filter>(\|\s*[\w,\s]+?|\s*)))\}\s*";

const EXPRESSION: &str = "${%(expr)s%(expr_filter)s}";

const ERROR_CLASS_PLAIN: &str = r#"\
% if '%(name)s' in errors:
 class="error"\
% endif
"#;

const ERROR_CLASS_CUSTOM: &str = r#"\
% if '%(name)s' in errors:
 class="error %(class)s"\
% else:
 class="%(class)s"\
% endif
"#;

const HIDDEN: &str = r#"<input type="hidden" name="%(name)s" value="%(value)s" />"#;

const MULTIPLE_HIDDEN: &str = r#"\
% for item in %(value)s:
<input type="hidden" name="%(name)s" value="${item%(expr_filter)s}" />\
% endfor
"#;

const LABEL: &str = r#"<label for="%(id)s"%(attrs)s%(class)s>%(value)s</label>"#;

const INPUT: &str = r#"<input id="%(id)s" name="%(name)s" type="%(type)s"%(attrs)s%(class)s% if %(value)s%(condition)s:
 value="${%(func)s%(expr_filter)s}" />\
% else:
 />\
% endif
"#;

const TEXTAREA: &str =
    r#"<textarea id="%(id)s" name="%(name)s"%(attrs)s%(class)s>%(value)s</textarea>"#;

const CHECKBOX: &str = r#"<input id="%(id)s" name="%(name)s" type="checkbox" value="1"%(attrs)s%(class)s% if %(value)s:
 checked="checked"\
% endif
 />"#;

const MULTIPLE_CHECKBOX: &str = r#"\
% for key, text in %(choices)s:
<label%(attrs)s%(class)s><input id="%(id)s" name="%(name)s" type="checkbox" value="1"%(attrs)s%(class)s% if key in %(value)s:
 checked="checked"\
% endif
 />${text%(expr_filter)s}</label>\
% endfor
"#;

const RADIO: &str = r#"\
% for key, text in %(choices)s:
<label%(attrs)s%(class)s><input type="radio" name="%(name)s"%(attrs)s value="${key%(expr_filter)s}"%(class)s% if key == %(value)s:
 checked="checked"\
% endif
 />${text%(expr_filter)s}</label>\
% endfor
"#;

const SELECT: &str = r#"<select id="%(id)s" name="%(name)s"%(select_type)s%(attrs)s%(class)s>\
% for key, text in %(choices)s:
<option value="${key%(expr_filter)s}"\
% if key == %(value)s:
 selected="selected"\
% endif
>${text%(expr_filter)s}</option>\
% endfor
</select>"#;

const ERROR: &str = r#"\
% if '%(name)s' in errors:
<span%(attrs)s>${errors['%(name)s'][-1]%(expr_filter)s}</span>\
% endif
"#;

const MESSAGE: &str = r#"\
% if %(value)s:
<span%(attrs)s>%(info)s</span>\
% endif
"#;

pub fn profile() -> EngineProfile {
    EngineProfile {
        widgets_pattern: WIDGETS_PATTERN.to_string(),
        variable_start: "${".to_string(),
        variable_end: "}".to_string(),
        prepend: None,
        expression: EXPRESSION.to_string(),
        error_class_plain: ERROR_CLASS_PLAIN.to_string(),
        error_class_custom: ERROR_CLASS_CUSTOM.to_string(),
        input_condition: " not in (None, '')".to_string(),
        hidden: HIDDEN.to_string(),
        multiple_hidden: MULTIPLE_HIDDEN.to_string(),
        label: LABEL.to_string(),
        input: INPUT.to_string(),
        textarea: TEXTAREA.to_string(),
        checkbox: CHECKBOX.to_string(),
        multiple_checkbox: MULTIPLE_CHECKBOX.to_string(),
        radio: RADIO.to_string(),
        select: SELECT.to_string(),
        error: ERROR.to_string(),
        message: MESSAGE.to_string(),
    }
}

pub fn preprocessor() -> Result<WidgetPreprocessor> {
    WidgetPreprocessor::new(profile())
}

/// Whitespace preset: trims line edges and collapses runs between tags.
pub fn whitespace_preprocessor() -> WhitespacePreprocessor {
    WhitespacePreprocessor::new(vec![
        (Regex::new(r"(?m)^ \s+|\s+$").unwrap(), String::new()),
        (Regex::new(r">\s+<").unwrap(), "><".to_string()),
    ])
}

/// Inline preprocessor for `<%inline file="..."/>` tags. With `fallback`
/// the tag is rewritten to the engine's own `<%include file="..."/>`
/// instead of being replaced by file content.
pub fn inline_preprocessor(directories: Vec<std::path::PathBuf>, fallback: bool) -> InlinePreprocessor {
    let pattern = Regex::new(r#"<%inline\s+file=["'](?P<path>.+?)["']\s*/>"#).unwrap();
    if fallback {
        InlinePreprocessor::with_strategy(pattern, directories, |path| {
            format!("<%include file=\"{}\"/>", path)
        })
    } else {
        InlinePreprocessor::new(pattern, directories)
    }
}
