//! HTML text -> [`Document`], built on `tl`.
//!
//! `tl` hands back raw (still escaped) text and attribute values; they are
//! decoded here so the tree always holds plain strings. Attributes parsed
//! from the source are stored sorted by name, which keeps serialization
//! stable regardless of the parser's internal map ordering.
//!
//! `tl` matches names exactly, so tag and attribute names are lowercased in
//! the source before it is parsed.

use super::{Document, DomError, NodeId};
use crate::utils::html::{ContentModel, content_model, unescape};

/// Parse a full document or a fragment.
pub(super) fn parse_document(html: &str) -> Result<Document, DomError> {
    let mut doc = Document::new();
    let (doctype, body) = split_doctype(html);
    doc.doctype = doctype.map(str::to_string);

    let body = normalize_tags(body);
    let dom = tl::parse(&body, tl::ParserOptions::default())
        .map_err(|err| DomError::Parse(format!("{err:?}")))?;
    let parser = dom.parser();

    let root = doc.root();
    for handle in dom.children() {
        append_tl_node(&mut doc, root, *handle, parser);
    }

    Ok(doc)
}

/// Split a leading `<!DOCTYPE ...>` off the input, returning its inner text.
fn split_doctype(html: &str) -> (Option<&str>, &str) {
    let trimmed = html.trim_start();
    let is_doctype = trimmed
        .get(..9)
        .is_some_and(|head| head.eq_ignore_ascii_case("<!doctype"));
    if !is_doctype {
        return (None, html);
    }
    match trimmed.find('>') {
        Some(end) => (Some(trimmed[2..end].trim()), &trimmed[end + 1..]),
        None => (None, html),
    }
}

/// Lowercase tag and attribute names and drop repeated attributes, leaving
/// text, comments, attribute values and script/style bodies untouched.
fn normalize_tags(html: &str) -> String {
    let bytes = html.as_bytes();
    let mut out = String::with_capacity(html.len());
    let mut pos = 0;

    while let Some(offset) = html[pos..].find('<') {
        let start = pos + offset;
        out.push_str(&html[pos..start]);
        let rest = &html[start..];

        if rest.starts_with("<!--") {
            let end = rest.find("-->").map_or(html.len(), |i| start + i + 3);
            out.push_str(&html[start..end]);
            pos = end;
            continue;
        }

        let closing = rest.as_bytes().get(1) == Some(&b'/');
        let name_start = start + if closing { 2 } else { 1 };
        if !bytes.get(name_start).is_some_and(u8::is_ascii_alphabetic) {
            out.push('<');
            pos = start + 1;
            continue;
        }

        let name_end = html[name_start..]
            .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
            .map_or(html.len(), |i| name_start + i);
        let name = html[name_start..name_end].to_ascii_lowercase();
        out.push_str(&html[start..name_start]);
        out.push_str(&name);

        let end = tag_end(html, name_end);
        if closing {
            out.push_str(&html[name_end..end]);
        } else {
            push_attributes(&mut out, &html[name_end..end]);
        }
        pos = end;

        if !closing && content_model(&name) == ContentModel::RawText {
            let close = format!("</{name}");
            let body_end = html[pos..]
                .to_ascii_lowercase()
                .find(&close)
                .map_or(html.len(), |i| pos + i);
            out.push_str(&html[pos..body_end]);
            pos = body_end;
        }
    }

    out.push_str(&html[pos..]);
    out
}

/// Index just past the `>` closing the tag whose attributes start at `from`.
fn tag_end(html: &str, from: usize) -> usize {
    let mut quote = None;
    for (i, c) in html[from..].char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return from + i + 1,
            (None, _) => {}
        }
    }
    html.len()
}

/// Copy a start tag's attribute section. The first of repeated names wins.
fn push_attributes(out: &mut String, section: &str) {
    let mut seen: Vec<String> = Vec::new();
    let mut rest = section;
    loop {
        let trimmed = rest.trim_start_matches(|c: char| c.is_ascii_whitespace());
        let space = &rest[..rest.len() - trimmed.len()];
        rest = trimmed;
        if rest.is_empty() || rest.starts_with(['>', '/']) {
            out.push_str(space);
            out.push_str(rest);
            return;
        }

        let name_len = rest
            .find(|c: char| c.is_ascii_whitespace() || matches!(c, '=' | '>' | '/'))
            .unwrap_or(rest.len())
            .max(1);
        let attr_len = name_len + value_len(&rest[name_len..]);
        let name = rest[..name_len].to_ascii_lowercase();
        if !seen.contains(&name) {
            out.push_str(space);
            out.push_str(&name);
            out.push_str(&rest[name_len..attr_len]);
            seen.push(name);
        }
        rest = &rest[attr_len..];
    }
}

/// Length of the optional `= value` after an attribute name.
fn value_len(s: &str) -> usize {
    let is_space = |c: char| c.is_ascii_whitespace();
    let Some(value) = s.trim_start_matches(is_space).strip_prefix('=') else {
        return 0;
    };
    let value = value.trim_start_matches(is_space);
    let len = match value.chars().next() {
        Some(q @ ('"' | '\'')) => value[1..].find(q).map_or(value.len(), |i| i + 2),
        _ => value
            .find(|c: char| c.is_ascii_whitespace() || c == '>')
            .unwrap_or(value.len()),
    };
    s.len() - value.len() + len
}

fn append_tl_node(doc: &mut Document, parent: NodeId, handle: tl::NodeHandle, parser: &tl::Parser) {
    let Some(node) = handle.get(parser) else {
        return;
    };

    match node {
        tl::Node::Tag(tag) => {
            let tag_name = tag.name().as_utf8_str().to_ascii_lowercase();
            let element = doc.create_element(&tag_name);

            let mut attrs: Vec<(String, String)> = tag
                .attributes()
                .iter()
                .map(|(key, value)| {
                    let key = key.to_ascii_lowercase();
                    let value = value.map(|v| unescape(&v).into_owned()).unwrap_or_default();
                    (key, value)
                })
                .collect();
            attrs.sort_by(|a, b| a.0.cmp(&b.0));
            for (key, value) in &attrs {
                doc.set_attr(element, key, value);
            }

            let raw_text = content_model(&tag_name) == ContentModel::RawText;
            for child in tag.children().top().iter() {
                if raw_text {
                    append_raw_text(doc, element, *child, parser);
                } else {
                    append_tl_node(doc, element, *child, parser);
                }
            }

            doc.append_child(parent, element);
        }
        tl::Node::Raw(bytes) => {
            let text = bytes.as_utf8_str();
            let text = doc.create_text(&unescape(&text));
            doc.append_child(parent, text);
        }
        tl::Node::Comment(bytes) => {
            let raw = bytes.as_utf8_str();
            let inner = raw
                .strip_prefix("<!--")
                .and_then(|s| s.strip_suffix("-->"))
                .unwrap_or(raw.as_ref());
            let comment = doc.create_comment(inner);
            doc.append_child(parent, comment);
        }
    }
}

/// Script and style bodies are kept verbatim.
fn append_raw_text(doc: &mut Document, parent: NodeId, handle: tl::NodeHandle, parser: &tl::Parser) {
    if let Some(node) = handle.get(parser) {
        let text = doc.create_text(&node.outer_html(parser));
        doc.append_child(parent, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_elements() {
        let doc = Document::parse("<p>Hello <b>world</b></p>").unwrap();
        let elements = doc.elements();
        assert_eq!(elements.len(), 2);
        assert_eq!(doc.tag_name(elements[0]), Some("p"));
        assert_eq!(doc.tag_name(elements[1]), Some("b"));
        assert_eq!(doc.text_content(elements[0]), "Hello world");
    }

    #[test]
    fn test_parse_lowercases_custom_tags_and_attrs() {
        let doc = Document::parse(r#"<commentStartRef bid="c1"></commentStartRef>"#).unwrap();
        let el = doc.elements()[0];
        assert_eq!(doc.tag_name(el), Some("commentstartref"));
        assert_eq!(doc.attr(el, "bid"), Some("c1"));

        let doc = Document::parse(r#"<p listParaNum="3">x</p>"#).unwrap();
        let el = doc.elements()[0];
        assert_eq!(doc.attr(el, "listparanum"), Some("3"));
    }

    #[test]
    fn test_parse_decodes_entities() {
        let doc = Document::parse(r#"<span title="a &amp; b">1 &lt; 2</span>"#).unwrap();
        let el = doc.elements()[0];
        assert_eq!(doc.attr(el, "title"), Some("a & b"));
        assert_eq!(doc.text_content(el), "1 < 2");
    }

    #[test]
    fn test_parse_valueless_attribute() {
        let doc = Document::parse("<suggestedDelete by>x</suggestedDelete>").unwrap();
        let el = doc.elements()[0];
        assert_eq!(doc.attr(el, "by"), Some(""));
    }

    #[test]
    fn test_mixed_case_end_tag_closes_element() {
        let doc = Document::parse(concat!(
            r#"<p>Claim<noteRef bid="n1"></noteref> more text</p>"#,
            r#"<FOOTNOTE bid="n1">Source.</Footnote>"#,
        ))
        .unwrap();

        let root_children: Vec<_> = doc
            .children(doc.root())
            .iter()
            .filter_map(|&n| doc.tag_name(n))
            .collect();
        assert_eq!(root_children, ["p", "footnote"]);

        let p = doc.elements()[0];
        assert_eq!(doc.text_content(p), "Claim more text");
        let noteref = doc.elements()[1];
        assert!(doc.children(noteref).is_empty());
    }

    #[test]
    fn test_normalize_tags_leaves_other_text() {
        assert_eq!(normalize_tags("<p>plain</p>"), "<p>plain</p>");
        assert_eq!(
            normalize_tags(r#"<P Title="A<B" DATA-X='Y'>X <!-- <B> --></P>"#),
            r#"<p title="A<B" data-x='Y'>X <!-- <B> --></p>"#
        );
        assert_eq!(
            normalize_tags("<SCRIPT>if (a<B) {}</Script>"),
            "<script>if (a<B) {}</script>"
        );
        assert_eq!(normalize_tags("A < B <br/>"), "A < B <br/>");
    }

    #[test]
    fn test_duplicate_attribute_keeps_first() {
        let doc = Document::parse(r#"<p bid="a" BID="b" class="x" bid="c">x</p>"#).unwrap();
        let p = doc.elements()[0];
        assert_eq!(doc.attr(p, "bid"), Some("a"));
        assert_eq!(doc.attr(p, "class"), Some("x"));
        assert_eq!(normalize_tags(r#"<p bid="a" BID=b>"#), r#"<p bid="a">"#);
    }

    #[test]
    fn test_split_doctype() {
        assert_eq!(
            split_doctype("<!DOCTYPE html><p>x</p>"),
            (Some("DOCTYPE html"), "<p>x</p>")
        );
        assert_eq!(split_doctype("<p>x</p>"), (None, "<p>x</p>"));
    }
}
