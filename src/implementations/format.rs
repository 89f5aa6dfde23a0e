use std::fmt::{self, Write};

/// Render `value` through a display template.
///
/// Placeholders are `{}` (or `{0}`), optionally followed by a colon and
/// `[<|^|>][width][.precision]`, as in `{:>6.2}`. `{{` and `}}` are literal
/// braces. A placeholder that does not parse is copied through unchanged.
pub fn render(template: &str, value: &dyn fmt::Display) -> String {
    let mut out = String::with_capacity(template.len() + 8);
    let mut chars = template.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        match c {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                out.push('{');
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let Some(len) = template[start + 1..].find('}') else {
                    out.push_str(&template[start..]);
                    break;
                };
                let body = &template[start + 1..start + 1 + len];
                match Placeholder::parse(body) {
                    Some(placeholder) => placeholder.write(&mut out, value),
                    None => out.push_str(&template[start..start + len + 2]),
                }
                // Skip the body and the closing brace.
                for _ in 0..body.chars().count() + 1 {
                    chars.next();
                }
            }
            _ => out.push(c),
        }
    }

    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Default)]
struct Placeholder {
    align: Option<Align>,
    width: Option<usize>,
    precision: Option<usize>,
}

impl Placeholder {
    fn parse(body: &str) -> Option<Self> {
        let (index, options) = body.split_once(':').unwrap_or((body, ""));
        if !(index.is_empty() || index == "0") {
            return None;
        }

        let mut placeholder = Placeholder::default();
        let mut rest = options;
        placeholder.align = match rest.chars().next() {
            Some('<') => Some(Align::Left),
            Some('^') => Some(Align::Center),
            Some('>') => Some(Align::Right),
            _ => None,
        };
        if placeholder.align.is_some() {
            rest = &rest[1..];
        }

        let (width, precision) = match rest.split_once('.') {
            Some((width, precision)) => (width, Some(precision)),
            None => (rest, None),
        };
        if !width.is_empty() {
            placeholder.width = Some(width.parse().ok()?);
        }
        if let Some(precision) = precision {
            placeholder.precision = Some(precision.parse().ok()?);
        }
        Some(placeholder)
    }

    fn write(&self, out: &mut String, value: &dyn fmt::Display) {
        let text = match self.precision {
            Some(precision) => format!("{:.*}", precision, value),
            None => value.to_string(),
        };
        let width = self.width.unwrap_or(0);
        // Writing to a String cannot fail.
        let _ = match self.align {
            Some(Align::Left) => write!(out, "{:<1$}", text, width),
            Some(Align::Center) => write!(out, "{:^1$}", text, width),
            // Right-aligned unless stated otherwise.
            Some(Align::Right) | None => write!(out, "{:>1$}", text, width),
        };
    }
}
