//=========================================================================
// Selector
//=========================================================================
//
// Compound simple selectors used by the DOM query layer.
//
// Grammar (no combinators):
//   selector  := tag? part*
//   part      := '#' ident | '.' ident | '[' ident (op value)? ']'
//   op        := '=' | '^='
//   value     := ident | '"' .* '"' | '\'' .* '\''
//
// Page code builds selectors with the infallible constructors; string
// parsing exists for configuration and ad-hoc queries.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::element::Element;

//=== SelectorError =======================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected character {ch:?} at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("expected a name at position {pos}")]
    MissingName { pos: usize },

    #[error("unterminated attribute selector starting at position {pos}")]
    UnterminatedAttribute { pos: usize },
}

//=== Selector ============================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Id(String),
    Class(String),
    Attr { name: String, op: AttrOp },
}

/// A compound selector such as `button.details[data-id]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    tag: Option<String>,
    parts: Vec<Part>,
}

impl Selector {
    //--- Construction -----------------------------------------------------

    /// Matches elements with the given tag.
    pub fn tag(tag: &str) -> Self {
        Self {
            tag: Some(tag.to_ascii_lowercase()),
            parts: Vec::new(),
        }
    }

    /// Matches the element whose `id` attribute equals `id`.
    pub fn id(id: &str) -> Self {
        Self::default().and_id(id)
    }

    /// Matches elements carrying `class`.
    pub fn class(class: &str) -> Self {
        Self::default().and_class(class)
    }

    /// Matches elements carrying attribute `name`.
    pub fn attr(name: &str) -> Self {
        Self::default().and_attr(name)
    }

    pub fn and_id(mut self, id: &str) -> Self {
        self.parts.push(Part::Id(id.to_string()));
        self
    }

    pub fn and_class(mut self, class: &str) -> Self {
        self.parts.push(Part::Class(class.to_string()));
        self
    }

    pub fn and_attr(mut self, name: &str) -> Self {
        self.parts.push(Part::Attr {
            name: name.to_string(),
            op: AttrOp::Exists,
        });
        self
    }

    pub fn and_attr_eq(mut self, name: &str, value: &str) -> Self {
        self.parts.push(Part::Attr {
            name: name.to_string(),
            op: AttrOp::Equals(value.to_string()),
        });
        self
    }

    pub fn and_attr_prefix(mut self, name: &str, prefix: &str) -> Self {
        self.parts.push(Part::Attr {
            name: name.to_string(),
            op: AttrOp::Prefix(prefix.to_string()),
        });
        self
    }

    //--- Matching ---------------------------------------------------------

    pub fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if element.tag() != tag {
                return false;
            }
        }

        self.parts.iter().all(|part| match part {
            Part::Id(id) => element.dom_id() == Some(id.as_str()),
            Part::Class(class) => element.has_class(class),
            Part::Attr { name, op } => match (element.attr(name), op) {
                (None, _) => false,
                (Some(_), AttrOp::Exists) => true,
                (Some(v), AttrOp::Equals(expected)) => v == expected,
                (Some(v), AttrOp::Prefix(prefix)) => v.starts_with(prefix.as_str()),
            },
        })
    }
}

//=== Parsing =============================================================

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = input.trim().chars().collect();
        if chars.is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut selector = Selector::default();
        let mut pos = 0;

        //--- Optional tag -------------------------------------------------
        if chars[0] == '*' {
            pos = 1;
        } else if chars[0].is_ascii_alphabetic() {
            let (name, next) = read_ident(&chars, 0);
            selector.tag = Some(name.to_ascii_lowercase());
            pos = next;
        }

        //--- Parts --------------------------------------------------------
        while pos < chars.len() {
            match chars[pos] {
                '#' => {
                    let (name, next) = read_ident(&chars, pos + 1);
                    if name.is_empty() {
                        return Err(SelectorError::MissingName { pos: pos + 1 });
                    }
                    selector.parts.push(Part::Id(name));
                    pos = next;
                }
                '.' => {
                    let (name, next) = read_ident(&chars, pos + 1);
                    if name.is_empty() {
                        return Err(SelectorError::MissingName { pos: pos + 1 });
                    }
                    selector.parts.push(Part::Class(name));
                    pos = next;
                }
                '[' => {
                    let (part, next) = read_attr(&chars, pos)?;
                    selector.parts.push(part);
                    pos = next;
                }
                ch => return Err(SelectorError::UnexpectedChar { ch, pos }),
            }
        }

        Ok(selector)
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

fn read_ident(chars: &[char], start: usize) -> (String, usize) {
    let mut end = start;
    while end < chars.len() && is_ident_char(chars[end]) {
        end += 1;
    }
    (chars[start..end].iter().collect(), end)
}

/// Parses `[name]`, `[name=value]` or `[name^=value]` starting at `open`.
fn read_attr(chars: &[char], open: usize) -> Result<(Part, usize), SelectorError> {
    let (name, mut pos) = read_ident(chars, open + 1);
    if name.is_empty() {
        return Err(SelectorError::MissingName { pos: open + 1 });
    }

    let unterminated = SelectorError::UnterminatedAttribute { pos: open };

    let op_kind = match chars.get(pos) {
        Some(']') => {
            return Ok((Part::Attr { name, op: AttrOp::Exists }, pos + 1));
        }
        Some('=') => {
            pos += 1;
            '='
        }
        Some('^') if chars.get(pos + 1) == Some(&'=') => {
            pos += 2;
            '^'
        }
        Some(&ch) => return Err(SelectorError::UnexpectedChar { ch, pos }),
        None => return Err(unterminated),
    };

    let value = match chars.get(pos) {
        Some(&quote) if quote == '"' || quote == '\'' => {
            let start = pos + 1;
            let Some(len) = chars[start..].iter().position(|&c| c == quote) else {
                return Err(unterminated);
            };
            pos = start + len + 1;
            chars[start..start + len].iter().collect()
        }
        Some(_) => {
            let start = pos;
            while pos < chars.len() && chars[pos] != ']' {
                pos += 1;
            }
            chars[start..pos].iter().collect::<String>()
        }
        None => return Err(unterminated),
    };

    if chars.get(pos) != Some(&']') {
        return Err(unterminated);
    }

    let op = if op_kind == '^' {
        AttrOp::Prefix(value)
    } else {
        AttrOp::Equals(value)
    };

    Ok((Part::Attr { name, op }, pos + 1))
}

//=== Display =============================================================

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = &self.tag {
            write!(f, "{}", tag)?;
        } else if self.parts.is_empty() {
            write!(f, "*")?;
        }

        for part in &self.parts {
            match part {
                Part::Id(id) => write!(f, "#{}", id)?,
                Part::Class(class) => write!(f, ".{}", class)?,
                Part::Attr { name, op: AttrOp::Exists } => write!(f, "[{}]", name)?,
                Part::Attr { name, op: AttrOp::Equals(v) } => write!(f, "[{}=\"{}\"]", name, v)?,
                Part::Attr { name, op: AttrOp::Prefix(v) } => write!(f, "[{}^=\"{}\"]", name, v)?,
            }
        }
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
