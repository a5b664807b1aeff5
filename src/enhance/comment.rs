//! Comment boundary markers (`commentstartref`, `commentendref`).

use super::{AbsentBid, SemanticTag, attr};
use crate::dom::{Document, Selector};

/// Mirror each marker's `bid` into its data attribute and add its class.
pub(super) fn enhance_comment_refs(doc: &mut Document, absent: AbsentBid) -> usize {
    mark(doc, SemanticTag::CommentStart, attr::DATA_COMMENT_START, absent)
        + mark(doc, SemanticTag::CommentEnd, attr::DATA_COMMENT_END, absent)
}

fn mark(doc: &mut Document, tag: SemanticTag, data_attr: &str, absent: AbsentBid) -> usize {
    let markers = doc.select(&Selector::tag(tag.tag()));
    for &node in &markers {
        match (doc.attr(node, attr::BID).map(str::to_string), absent) {
            (Some(bid), _) => doc.set_attr(node, data_attr, &bid),
            (None, AbsentBid::Null) => doc.set_attr(node, data_attr, "null"),
            (None, AbsentBid::Omit) => {}
        }
        doc.add_class(node, tag.class());
    }
    markers.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bid_is_mirrored() {
        let mut doc = Document::parse(concat!(
            r#"<commentStartRef bid="c7"></commentStartRef>text"#,
            r#"<commentEndRef bid="c7"></commentEndRef>"#,
        ))
        .unwrap();

        assert_eq!(enhance_comment_refs(&mut doc, AbsentBid::Omit), 2);

        let [start, end] = doc.elements()[..] else {
            panic!("expected two markers");
        };
        assert_eq!(doc.attr(start, "data-comment-start"), Some("c7"));
        assert!(doc.has_class(start, "comment-start-ref"));
        assert_eq!(doc.attr(end, "data-comment-end"), Some("c7"));
        assert!(doc.has_class(end, "comment-end-ref"));
    }

    #[test]
    fn test_missing_bid_policy() {
        let html = "<commentstartref></commentstartref>";

        let mut doc = Document::parse(html).unwrap();
        enhance_comment_refs(&mut doc, AbsentBid::Omit);
        let marker = doc.elements()[0];
        assert_eq!(doc.attr(marker, "data-comment-start"), None);
        assert!(doc.has_class(marker, "comment-start-ref"));

        let mut doc = Document::parse(html).unwrap();
        enhance_comment_refs(&mut doc, AbsentBid::Null);
        let marker = doc.elements()[0];
        assert_eq!(doc.attr(marker, "data-comment-start"), Some("null"));
    }
}
