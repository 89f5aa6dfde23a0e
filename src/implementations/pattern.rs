use regex::Regex;

use crate::errors::{PropertyError, PropertyResult};
use crate::traits::erased_property::ErasedProperty;

/// Marker that switches a pattern from names to groups
pub const GROUP_MARKER: char = '$';

/// What a pattern is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTarget {
    /// The registry key of the property
    Name,
    /// The property's group tag
    Group,
}

/// A compiled subscription pattern.
///
/// `.` is literal and `*` matches any run of characters; the whole candidate
/// must match. Other characters are handed to the regex engine unchanged, so
/// `score|lives` and `level[0-9]` work too. A leading `$` matches groups
/// instead of names.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    target: MatchTarget,
    regex: Regex,
}

impl Pattern {
    pub fn parse(raw: &str) -> PropertyResult<Self> {
        let trimmed = raw.trim();
        let (target, body) = match trimmed.strip_prefix(GROUP_MARKER) {
            Some(body) => (MatchTarget::Group, body),
            None => (MatchTarget::Name, trimmed),
        };

        let invalid = |reason: String| PropertyError::InvalidPattern {
            pattern: raw.to_string(),
            reason,
        };
        check_groups(body).map_err(invalid)?;
        let regex = Regex::new(&glob_to_regex(body)).map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            source: raw.to_string(),
            target,
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> MatchTarget {
        self.target
    }

    pub fn is_match(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }

    /// Match a registered property, by registry key or by group
    pub fn matches(&self, key: &str, property: &dyn ErasedProperty) -> bool {
        match self.target {
            MatchTarget::Name => self.is_match(key),
            MatchTarget::Group => self.is_match(property.group()),
        }
    }
}

/// Reject a `)` that would close the anchoring group early
fn check_groups(body: &str) -> Result<(), String> {
    let mut depth = 0usize;
    let mut in_class = false;
    let mut chars = body.chars().enumerate();
    while let Some((position, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '[' if !in_class => in_class = true,
            ']' if in_class => in_class = false,
            '(' if !in_class => depth += 1,
            ')' if !in_class => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| format!("unbalanced ')' at position {}", position))?;
            }
            _ => {}
        }
    }
    Ok(())
}

fn glob_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() + 8);
    out.push_str("^(?:");
    for c in glob.chars() {
        match c {
            '.' => out.push_str("\\."),
            '*' => out.push_str(".*"),
            _ => out.push(c),
        }
    }
    out.push_str(")$");
    out
}
