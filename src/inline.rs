use regex::{Captures, Regex};
use std::fs;
use std::path::PathBuf;

/// Strategy deciding what replaces an inline tag, given its path.
pub type InlineStrategy = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Inline-file preprocessor: replaces every match of a tag pattern with the
/// content of the referenced file.
///
/// The pattern must carry a named `path` capture group. Directories are
/// searched in order; the first readable file wins. A path that resolves
/// nowhere logs a warning and substitutes the empty string; processing
/// continues, the template build does not fail.
pub struct InlinePreprocessor {
    pattern: Regex,
    directories: Vec<PathBuf>,
    strategy: Option<InlineStrategy>,
}

impl InlinePreprocessor {
    pub fn new(pattern: Regex, directories: Vec<PathBuf>) -> Self {
        Self {
            pattern,
            directories,
            strategy: None,
        }
    }

    /// Replace each tag through `strategy` instead of reading files, e.g.
    /// to rewrite an inline tag into the engine's own include tag.
    pub fn with_strategy<F>(pattern: Regex, directories: Vec<PathBuf>, strategy: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            pattern,
            directories,
            strategy: Some(Box::new(strategy)),
        }
    }

    /// Rewrite all inline tags in `text`. Single pass, no recursion.
    pub fn process(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &Captures| {
                let path = caps.name("path").map(|m| m.as_str()).unwrap_or("");
                match &self.strategy {
                    Some(strategy) => strategy(path),
                    None => self.read(path),
                }
            })
            .into_owned()
    }

    fn read(&self, path: &str) -> String {
        for directory in &self.directories {
            let full = directory.join(path);
            if full.exists() {
                match fs::read_to_string(&full) {
                    Ok(content) => return content,
                    Err(e) => {
                        log::warn!("could not read inline file {}: {}", full.display(), e);
                    }
                }
            }
        }
        log::warn!("inline file not found: {}", path);
        String::new()
    }

    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }
}

impl std::fmt::Debug for InlinePreprocessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InlinePreprocessor")
            .field("pattern", &self.pattern.as_str())
            .field("directories", &self.directories)
            .field("strategy", &self.strategy.as_ref().map(|_| "..."))
            .finish()
    }
}
