use regex::Regex;

use crate::error::{ContentError, Result};

/// A path glob over module keys.
///
/// `*` and `?` stay inside one path segment, `**/` spans any number of directories
/// (zero included). Everything else matches literally.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    pattern: String,
    regex: Regex,
}

impl GlobPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&Self::to_regex(pattern)).map_err(|source| ContentError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(GlobPattern {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }

    fn to_regex(pattern: &str) -> String {
        let mut re = String::from("^");
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '*' if chars.peek() == Some(&'*') => {
                    chars.next();
                    if chars.peek() == Some(&'/') {
                        chars.next();
                        re.push_str("(?:[^/]+/)*");
                    } else {
                        re.push_str(".*");
                    }
                }
                '*' => re.push_str("[^/]*"),
                '?' => re.push_str("[^/]"),
                c => re.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
            }
        }

        re.push('$');
        re
    }
}
