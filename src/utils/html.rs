//! HTML text helpers shared by the parser and the serializer.
//!
//! | Function          | Direction                     |
//! |-------------------|-------------------------------|
//! | `escape`          | text node -> markup           |
//! | `escape_attr`     | attribute value -> markup     |
//! | `unescape`        | markup -> text (entities)     |
//! | `content_model`   | how an element's body is read |

use std::borrow::Cow;

/// Escape a text node (`&`, `<`, `>`). Quotes are left alone.
///
/// Borrows when nothing needs escaping.
pub fn escape(s: &str) -> Cow<'_, str> {
    html_escape::encode_text(s)
}

/// Escape a value written inside a double-quoted attribute.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(s)
}

/// Decode named (the full HTML5 table) and numeric character references.
///
/// A bare `&` or an unknown name stays as written.
pub fn unescape(s: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(s)
}

// =============================================================================
// Content models
// =============================================================================

/// How an element's content is parsed and serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentModel {
    /// No content and no end tag (`br`, `img`, ...).
    Void,
    /// Content is literal text, never escaped (`script`, `style`).
    RawText,
    Normal,
}

/// Content model of a lowercase tag name.
pub fn content_model(tag: &str) -> ContentModel {
    match tag {
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta"
        | "source" | "track" | "wbr" => ContentModel::Void,
        "script" | "style" => ContentModel::RawText,
        _ => ContentModel::Normal,
    }
}
