use regex::Regex;

/// One substitution pass: a pattern and its replacement. The replacement
/// uses the regex crate's expansion syntax (`$name`), so literal `$` must
/// be written `$$`.
pub type WhitespaceRule = (Regex, String);

/// Whitespace preprocessor: an ordered list of substitution rules applied
/// over the whole text, with optional "ignore regions" (preformatted
/// blocks and the like) whose matched content passes through verbatim.
///
/// Cleaning is a pure text transform and is idempotent: applying it twice
/// produces the same result as applying it once.
pub struct WhitespacePreprocessor {
    rules: Vec<WhitespaceRule>,
    ignore_rules: Vec<Regex>,
}

impl WhitespacePreprocessor {
    pub fn new(rules: Vec<WhitespaceRule>) -> Self {
        Self {
            rules,
            ignore_rules: Vec::new(),
        }
    }

    pub fn with_ignore_rules(rules: Vec<WhitespaceRule>, ignore_rules: Vec<Regex>) -> Self {
        Self {
            rules,
            ignore_rules,
        }
    }

    /// Apply every rule in order. Spans matched by an ignore rule are
    /// exempted: the text between ignore regions is cleaned, the regions
    /// themselves are appended untouched.
    pub fn clean(&self, text: &str) -> String {
        if self.ignore_rules.is_empty() {
            return self.apply_rules(text);
        }
        let mut result = String::with_capacity(text.len());
        let mut start = 0;
        for (region_start, region_end) in self.ignore_regions(text) {
            result.push_str(&self.apply_rules(&text[start..region_start]));
            result.push_str(&text[region_start..region_end]);
            start = region_end;
        }
        result.push_str(&self.apply_rules(&text[start..]));
        result
    }

    fn apply_rules(&self, text: &str) -> String {
        let mut text = text.to_string();
        for (pattern, replacement) in &self.rules {
            text = pattern.replace_all(&text, replacement.as_str()).into_owned();
        }
        text
    }

    /// Matches from all ignore patterns, merged left to right; overlaps
    /// resolve to the earlier match.
    fn ignore_regions(&self, text: &str) -> Vec<(usize, usize)> {
        let mut spans: Vec<(usize, usize)> = self
            .ignore_rules
            .iter()
            .flat_map(|re| re.find_iter(text).map(|m| (m.start(), m.end())))
            .collect();
        spans.sort_unstable();
        let mut merged: Vec<(usize, usize)> = Vec::with_capacity(spans.len());
        for (start, end) in spans {
            match merged.last() {
                Some(&(_, last_end)) if start < last_end => {}
                _ => merged.push((start, end)),
            }
        }
        merged
    }
}
