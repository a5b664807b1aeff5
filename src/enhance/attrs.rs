//! Attribute mirrors: list paragraph numbers, `bid` and plain-text fallbacks.

use super::{attr, class};
use crate::dom::{Document, NodeId, Selector};

/// Add `class` to every match and copy `source` into `target`.
fn mirror(doc: &mut Document, selector: &Selector, source: &str, target: &str, class: &str) -> usize {
    let nodes: Vec<NodeId> = doc.select(selector);
    for &node in &nodes {
        if let Some(value) = doc.attr(node, source).map(str::to_string) {
            doc.set_attr(node, target, &value);
        }
        doc.add_class(node, class);
    }
    nodes.len()
}

/// `p[listParaNum]` -> `list-paragraph`, `data-list-num`.
pub(super) fn enhance_list_paragraphs(doc: &mut Document) -> usize {
    mirror(
        doc,
        &Selector::tag_with_attr("p", attr::LIST_PARA_NUM),
        attr::LIST_PARA_NUM,
        attr::DATA_LIST_NUM,
        class::LIST_PARAGRAPH,
    )
}

/// `[bid]` -> `semantic-element`, `data-bid`.
pub(super) fn enhance_bid_elements(doc: &mut Document) -> usize {
    mirror(
        doc,
        &Selector::attr(attr::BID),
        attr::BID,
        attr::DATA_BID,
        class::SEMANTIC_ELEMENT,
    )
}

/// `[plainTextView]` -> `has-plain-text`, `data-plain-text`.
pub(super) fn enhance_plain_text(doc: &mut Document) -> usize {
    mirror(
        doc,
        &Selector::attr(attr::PLAIN_TEXT_VIEW),
        attr::PLAIN_TEXT_VIEW,
        attr::DATA_PLAIN_TEXT,
        class::HAS_PLAIN_TEXT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_paragraphs_only_match_p() {
        let mut doc = Document::parse(concat!(
            r#"<p listParaNum="4">item</p>"#,
            r#"<div listParaNum="5">not a paragraph</div>"#,
        ))
        .unwrap();

        assert_eq!(enhance_list_paragraphs(&mut doc), 1);
        let [p, div] = doc.elements()[..] else {
            panic!("expected two elements");
        };
        assert_eq!(doc.attr(p, "data-list-num"), Some("4"));
        assert!(doc.has_class(p, "list-paragraph"));
        assert_eq!(doc.attr(div, "data-list-num"), None);
    }

    #[test]
    fn test_bid_mirror_on_any_element() {
        let mut doc = Document::parse(concat!(
            r#"<section bid="s1"><span bid="">x</span></section>"#,
            r#"<p>no bid</p>"#,
        ))
        .unwrap();

        assert_eq!(enhance_bid_elements(&mut doc), 2);
        let [section, span, p] = doc.elements()[..] else {
            panic!("expected three elements");
        };
        assert_eq!(doc.attr(section, "data-bid"), Some("s1"));
        assert!(doc.has_class(section, "semantic-element"));
        assert_eq!(doc.attr(span, "data-bid"), Some(""));
        assert!(!doc.has_class(p, "semantic-element"));
    }

    #[test]
    fn test_plain_text_mirror() {
        let mut doc =
            Document::parse(r#"<span plainTextView="E = mc^2">E=mc<sup>2</sup></span>"#).unwrap();

        assert_eq!(enhance_plain_text(&mut doc), 1);
        let span = doc.elements()[0];
        assert_eq!(doc.attr(span, "data-plain-text"), Some("E = mc^2"));
        assert!(doc.has_class(span, "has-plain-text"));
    }
}
