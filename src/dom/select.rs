//! CSS selector subset.
//!
//! Supports comma-separated lists of compound selectors built from a type
//! selector (or `*`), `.class` and `[attr]` / `[attr=value]` conditions.
//! Combinators and pseudo-classes are rejected.
//!
//! ```ignore
//! let sel = Selector::parse(r#"commentstartref, footnote[bid="n1"]"#)?;
//! let hits = doc.select(&sel);
//! ```

use super::{Document, DomError, NodeId};

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrCondition {
    Exists(String),
    Equals(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrCondition>,
}

impl Compound {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some(element) = doc.element(node) else {
            return false;
        };
        if self.tag.as_deref().is_some_and(|t| element.tag() != t) {
            return false;
        }
        if !self.classes.iter().all(|c| element.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|cond| match cond {
            AttrCondition::Exists(name) => element.attr(name).is_some(),
            AttrCondition::Equals(name, value) => element.attr(name) == Some(value.as_str()),
        })
    }
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Compound>,
}

impl Selector {
    /// Match elements by tag name.
    pub fn tag(tag: &str) -> Self {
        Self::single(Compound {
            tag: Some(tag.to_ascii_lowercase()),
            ..Compound::default()
        })
    }

    /// Match any element carrying `attr`.
    pub fn attr(attr: &str) -> Self {
        Self::single(Compound {
            attrs: vec![AttrCondition::Exists(attr.to_ascii_lowercase())],
            ..Compound::default()
        })
    }

    /// Match `tag[attr]`.
    pub fn tag_with_attr(tag: &str, attr: &str) -> Self {
        Self::single(Compound {
            tag: Some(tag.to_ascii_lowercase()),
            attrs: vec![AttrCondition::Exists(attr.to_ascii_lowercase())],
            ..Compound::default()
        })
    }

    /// Match elements whose tag is any of `tags`.
    pub fn any_tag(tags: &[&str]) -> Self {
        Self {
            alternatives: tags
                .iter()
                .map(|t| Compound {
                    tag: Some(t.to_ascii_lowercase()),
                    ..Compound::default()
                })
                .collect(),
        }
    }

    fn single(compound: Compound) -> Self {
        Self {
            alternatives: vec![compound],
        }
    }

    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.alternatives.iter().any(|c| c.matches(doc, node))
    }

    /// Parse a selector list.
    pub fn parse(input: &str) -> Result<Self, DomError> {
        let invalid = |reason: &str| DomError::InvalidSelector {
            selector: input.to_string(),
            reason: reason.to_string(),
        };

        let mut alternatives = Vec::new();
        for part in input.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(invalid("empty selector"));
            }
            alternatives.push(parse_compound(part).map_err(|reason| invalid(&reason))?);
        }
        Ok(Self { alternatives })
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Tag and attribute names are case-insensitive, class names are not.
fn take_name(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, lowercase: bool) -> String {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        if !is_name_char(c) {
            break;
        }
        name.push(if lowercase { c.to_ascii_lowercase() } else { c });
        chars.next();
    }
    name
}

fn parse_compound(part: &str) -> Result<Compound, String> {
    let mut compound = Compound::default();
    let mut chars = part.chars().peekable();

    match chars.peek() {
        Some('*') => {
            chars.next();
        }
        Some(&c) if is_name_char(c) => compound.tag = Some(take_name(&mut chars, true)),
        _ => {}
    }

    while let Some(c) = chars.next() {
        match c {
            '.' => {
                let class = take_name(&mut chars, false);
                if class.is_empty() {
                    return Err("expected class name after `.`".to_string());
                }
                compound.classes.push(class);
            }
            '[' => compound.attrs.push(parse_attr_condition(&mut chars)?),
            c if c.is_whitespace() => return Err("combinators are not supported".to_string()),
            c => return Err(format!("unexpected character `{c}`")),
        }
    }

    Ok(compound)
}

fn parse_attr_condition(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> Result<AttrCondition, String> {
    let name = take_name(chars, true);
    if name.is_empty() {
        return Err("expected attribute name after `[`".to_string());
    }

    match chars.next() {
        Some(']') => Ok(AttrCondition::Exists(name)),
        Some('=') => {
            let value = match chars.peek() {
                Some(&quote @ ('"' | '\'')) => {
                    chars.next();
                    let mut value = String::new();
                    loop {
                        match chars.next() {
                            Some(c) if c == quote => break,
                            Some(c) => value.push(c),
                            None => return Err("unterminated attribute value".to_string()),
                        }
                    }
                    value
                }
                _ => {
                    let mut value = String::new();
                    while let Some(&c) = chars.peek() {
                        if c == ']' {
                            break;
                        }
                        value.push(c);
                        chars.next();
                    }
                    value
                }
            };
            match chars.next() {
                Some(']') => Ok(AttrCondition::Equals(name, value)),
                _ => Err("expected `]`".to_string()),
            }
        }
        _ => Err("unsupported attribute operator".to_string()),
    }
}
