//! Footnote references (`noteref`) and footnote bodies (`footnote`).
//!
//! Both show a bracketed number derived from their `bid`. References get a
//! click listener that scrolls to the matching body; see
//! [`Session::click`](crate::runtime::Session::click).

use super::{SemanticTag, attr};
use crate::dom::{Document, Listener, Selector};

/// Number shown for a footnote marker: the ASCII digits of `bid`, or `1`.
///
/// `note3` -> `3`, `fn-1-2` -> `12`, `abc` -> `1`.
pub fn display_number(bid: Option<&str>) -> String {
    let digits: String = bid
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        "1".to_string()
    } else {
        digits
    }
}

/// Replace each reference's content with `<sup>[n]</sup>` and attach the
/// scroll listener. References that already carry the listener are left alone.
pub(super) fn enhance_note_refs(doc: &mut Document) -> usize {
    let tag = SemanticTag::NoteRef;
    let refs = doc.select(&Selector::tag(tag.tag()));
    for &node in &refs {
        doc.add_class(node, tag.class());
        let wired = doc
            .listeners(node)
            .iter()
            .any(|l| matches!(l, Listener::ScrollToFootnote { .. }));
        if wired {
            continue;
        }

        let bid = doc.attr(node, attr::BID).map(str::to_string);
        let label = format!("[{}]", display_number(bid.as_deref()));
        let sup = doc.create_element_with_text("sup", &label);
        doc.replace_children(node, sup);
        doc.add_listener(node, Listener::ScrollToFootnote { bid });
    }
    refs.len()
}

/// Prefix each footnote body with `<strong>[n]</strong> `.
/// Bodies labelled by an earlier run are left alone.
pub(super) fn enhance_footnotes(doc: &mut Document) -> usize {
    let tag = SemanticTag::Footnote;
    let footnotes = doc.select(&Selector::tag(tag.tag()));
    for &node in &footnotes {
        doc.add_class(node, tag.class());
        if doc.is_labelled(node) {
            continue;
        }
        doc.mark_labelled(node);

        let label = format!("[{}]", display_number(doc.attr(node, attr::BID)));
        let space = doc.create_text(" ");
        doc.prepend_child(node, space);
        let strong = doc.create_element_with_text("strong", &label);
        doc.prepend_child(node, strong);
    }
    footnotes.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_number() {
        assert_eq!(display_number(Some("note3")), "3");
        assert_eq!(display_number(Some("fn-1-2")), "12");
        assert_eq!(display_number(Some("abc")), "1");
        assert_eq!(display_number(Some("")), "1");
        assert_eq!(display_number(None), "1");
        assert_eq!(display_number(Some("n٣")), "1");
    }

    #[test]
    fn test_note_ref_content_replaced() {
        let mut doc = Document::parse(r#"<noteref bid="note3">*</noteref>"#).unwrap();
        assert_eq!(enhance_note_refs(&mut doc), 1);

        let noteref = doc.elements()[0];
        assert_eq!(doc.inner_html(noteref), "<sup>[3]</sup>");
        assert!(doc.has_class(noteref, "note-ref"));
        assert_eq!(
            doc.listeners(noteref),
            [Listener::ScrollToFootnote {
                bid: Some("note3".to_string())
            }]
        );
    }

    #[test]
    fn test_note_ref_without_digits() {
        let mut doc = Document::parse(r#"<noteref bid="abc"></noteref>"#).unwrap();
        enhance_note_refs(&mut doc);
        assert_eq!(doc.text_content(doc.elements()[0]), "[1]");
    }

    #[test]
    fn test_footnote_label_prepended() {
        let mut doc =
            Document::parse(r#"<footnote bid="note12">See <i>chapter</i> 2.</footnote>"#).unwrap();
        assert_eq!(enhance_footnotes(&mut doc), 1);

        let footnote = doc.elements()[0];
        assert_eq!(
            doc.inner_html(footnote),
            "<strong>[12]</strong> See <i>chapter</i> 2."
        );
    }

    #[test]
    fn test_repeat_run_does_not_double_labels() {
        let mut doc = Document::parse(concat!(
            r#"<noteref bid="n1"></noteref>"#,
            r#"<footnote bid="n1">Body</footnote>"#,
        ))
        .unwrap();

        for _ in 0..2 {
            enhance_note_refs(&mut doc);
            enhance_footnotes(&mut doc);
        }

        let noteref = doc.select(&Selector::tag("noteref"))[0];
        let footnote = doc.select(&Selector::tag("footnote"))[0];
        assert_eq!(doc.text_content(noteref), "[1]");
        assert_eq!(doc.listeners(noteref).len(), 1);
        assert_eq!(doc.text_content(footnote), "[1] Body");
    }

    #[test]
    fn test_server_classed_markers_are_still_labelled() {
        let mut doc = Document::parse(concat!(
            r#"<noteref class="note-ref" bid="n3">*</noteref>"#,
            r#"<footnote class="footnote" bid="n3">Body</footnote>"#,
        ))
        .unwrap();
        enhance_note_refs(&mut doc);
        enhance_footnotes(&mut doc);

        let noteref = doc.select(&Selector::tag("noteref"))[0];
        let footnote = doc.select(&Selector::tag("footnote"))[0];
        assert_eq!(doc.inner_html(noteref), "<sup>[3]</sup>");
        assert_eq!(doc.listeners(noteref).len(), 1);
        assert_eq!(doc.attr(noteref, "class"), Some("note-ref"));
        assert_eq!(doc.inner_html(footnote), "<strong>[3]</strong> Body");
    }
}
