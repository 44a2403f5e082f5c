use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

// A trailing sentinel comma is appended before tokenizing so every argument,
// including the last, is terminated the same way.
static RE_ARGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\s*(?P<expr>('[^']*'|"[^"]*"|.+?))\s*,"#).unwrap());
static RE_KWARGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\s*(?P<name>\w+)\s*=\s*(?P<expr>('[^']*'|"[^"]*"|.+?))\s*,"#).unwrap());
static RE_STR_VALUE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^['"](?P<value>.+)['"]$"#).unwrap());
static RE_INT_VALUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?P<value>\d+)$").unwrap());

/// Parsed widget-call arguments: ordered positional argument expressions and
/// keyword arguments keyed by normalized name.
///
/// Keys are unique; on duplicates the last occurrence wins. Iteration order
/// of the keyword map is sorted, which keeps rendered attribute text
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedParams {
    pub positional: Vec<String>,
    pub keyword: BTreeMap<String, String>,
}

/// Parses widget-call expressions against a configured list of known
/// value-formatting functions.
///
/// The known-function list is construction data, not hidden global state;
/// the default recognizes `format`.
pub struct ParamParser {
    re_functions: Option<Regex>,
    re_function: Option<Regex>,
}

impl ParamParser {
    pub fn new(known_functions: &[&str]) -> Self {
        if known_functions.is_empty() {
            return Self {
                re_functions: None,
                re_function: None,
            };
        }
        let names = known_functions
            .iter()
            .map(|n| regex::escape(n))
            .collect::<Vec<_>>()
            .join("|");
        // Escaped names always produce a valid pattern.
        let re_functions = Regex::new(&format!(r"\.(?:{})\(", names)).unwrap();
        let re_function = Regex::new(&format!(
            r"(?P<context>.+?)\.(?P<name>{})\((?P<args>.*)\)",
            names
        ))
        .unwrap();
        Self {
            re_functions: Some(re_functions),
            re_function: Some(re_function),
        }
    }

    /// Parse the field name out of an expression of the form
    /// `[object.]name[.format(...]`: any known-function call suffix is
    /// stripped, then the final `.`-delimited segment is the name.
    ///
    /// ```rust
    /// let parser = madobe::ParamParser::default();
    /// assert_eq!(parser.parse_name("display_name"), "display_name");
    /// assert_eq!(parser.parse_name("account.display_name"), "display_name");
    /// assert_eq!(parser.parse_name("account.display_name.format("), "display_name");
    /// ```
    pub fn parse_name<'a>(&self, expr: &'a str) -> &'a str {
        let head = match &self.re_functions {
            Some(re) => re.split(expr).next().unwrap_or(expr),
            None => expr,
        };
        head.rsplit('.').next().unwrap_or(head)
    }

    /// Recognize `<context>.<known-function>(<args>)` and rewrite it into
    /// the canonical render-time call `<funcname>_value(<context>, <args>)`,
    /// with `None` standing in for empty args. Returns
    /// `(context, rewritten)`; expressions without a known function come
    /// back unchanged as both.
    ///
    /// ```rust
    /// let parser = madobe::ParamParser::default();
    /// assert_eq!(
    ///     parser.parse_known_function("dob.format()"),
    ///     ("dob".to_string(), "format_value(dob, None)".to_string()),
    /// );
    /// ```
    pub fn parse_known_function(&self, expr: &str) -> (String, String) {
        let caps = match self.re_function.as_ref().and_then(|re| re.captures(expr)) {
            Some(caps) => caps,
            None => return (expr.to_string(), expr.to_string()),
        };
        let context = caps["context"].to_string();
        let name = &caps["name"];
        let args = match caps.name("args") {
            Some(m) if !m.as_str().is_empty() => m.as_str(),
            _ => "None",
        };
        let rewritten = format!("{}_value({}, {})", name, context, args);
        (context, rewritten)
    }
}

impl Default for ParamParser {
    fn default() -> Self {
        Self::new(&["format"])
    }
}

/// Split an argument-list string into positional and keyword parts.
///
/// Commas and `=` inside quoted values never split. The heuristic mirrors
/// call syntax: without any `=` the whole text is positional; otherwise the
/// text before the first top-level `=` is rsplit once on `,` to find the
/// boundary between a trailing positional run and the keyword run.
///
/// ```rust
/// use madobe::params::parse_params;
///
/// let params = parse_params(r#""Account Type:", class_="inline""#);
/// assert_eq!(params.positional, vec![r#""Account Type:""#]);
/// assert_eq!(params.keyword["class"], r#""inline""#);
/// ```
pub fn parse_params(text: &str) -> ParsedParams {
    let eq = match first_outside_quotes(text, '=') {
        Some(eq) => eq,
        None => {
            return ParsedParams {
                positional: parse_args(text),
                keyword: BTreeMap::new(),
            }
        }
    };
    match last_outside_quotes(&text[..eq], ',') {
        Some(comma) => ParsedParams {
            positional: parse_args(&text[..comma]),
            // The keyword tokenizer skips the leading comma on its own.
            keyword: parse_kwargs(&text[comma..]),
        },
        None => ParsedParams {
            positional: Vec::new(),
            keyword: parse_kwargs(text),
        },
    }
}

/// Parse a purely-positional argument list.
pub fn parse_args(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let terminated = format!("{},", text);
    RE_ARGS
        .captures_iter(&terminated)
        .map(|caps| caps["expr"].to_string())
        .collect()
}

/// Parse a `name=value` argument list into a map.
///
/// A name's single trailing underscore is stripped, so reserved-word
/// clashes like `class_` normalize to `class`.
pub fn parse_kwargs(text: &str) -> BTreeMap<String, String> {
    let terminated = format!("{},", text);
    let mut kwargs = BTreeMap::new();
    for caps in RE_KWARGS.captures_iter(&terminated) {
        let name = &caps["name"];
        let name = name.strip_suffix('_').unwrap_or(name);
        kwargs.insert(name.to_string(), caps["expr"].to_string());
    }
    kwargs
}

/// Recognize a quoted-string or bare-integer literal and return its value;
/// anything else is a live expression and returns `None`.
pub fn parse_literal(text: &str) -> Option<&str> {
    if let Some(caps) = RE_STR_VALUE.captures(text) {
        return caps.name("value").map(|m| m.as_str());
    }
    RE_INT_VALUE
        .captures(text)
        .and_then(|caps| caps.name("value"))
        .map(|m| m.as_str())
}

fn first_outside_quotes(text: &str, needle: char) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => quote = Some(c),
            None if c == needle => return Some(i),
            None => {}
        }
    }
    None
}

fn last_outside_quotes(text: &str, needle: char) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut found = None;
    for (i, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => quote = Some(c),
            None if c == needle => found = Some(i),
            None => {}
        }
    }
    found
}
