//! Suggested edits (`suggesteddelete`, `suggestedinsert`).

use super::{SemanticTag, attr};
use crate::dom::{Document, Selector};
use crate::utils::date::{CalendarDate, DateLocale};

/// Build the tooltip for a suggested edit, or `None` for any other tag.
///
/// `Suggested deletion by Ada on 6/15/2024`; the author part is skipped when
/// `by` is missing or empty, the date part when `dated` is missing or does
/// not parse.
pub fn suggestion_title(
    tag: SemanticTag,
    by: Option<&str>,
    dated: Option<&str>,
    locale: DateLocale,
) -> Option<String> {
    let mut title = String::from(match tag {
        SemanticTag::SuggestedDelete => "Suggested deletion",
        SemanticTag::SuggestedInsert => "Suggested insertion",
        _ => return None,
    });

    if let Some(author) = by.filter(|a| !a.is_empty()) {
        title.push_str(" by ");
        title.push_str(author);
    }
    if let Some(date) = dated.and_then(CalendarDate::parse) {
        title.push_str(" on ");
        title.push_str(&locale.format_short(date));
    }
    Some(title)
}

pub(super) fn enhance_suggestions(doc: &mut Document, locale: DateLocale) -> usize {
    let mut count = 0;
    for tag in [SemanticTag::SuggestedDelete, SemanticTag::SuggestedInsert] {
        for node in doc.select(&Selector::tag(tag.tag())) {
            doc.add_class(node, tag.class());
            let title = suggestion_title(
                tag,
                doc.attr(node, attr::BY),
                doc.attr(node, attr::DATED),
                locale,
            );
            if let Some(title) = title {
                doc.set_attr(node, attr::TITLE, &title);
            }
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_variants() {
        let del = SemanticTag::SuggestedDelete;
        let ins = SemanticTag::SuggestedInsert;
        let us = DateLocale::EnUs;

        assert_eq!(
            suggestion_title(del, None, None, us).as_deref(),
            Some("Suggested deletion")
        );
        assert_eq!(
            suggestion_title(ins, Some("Ada"), None, us).as_deref(),
            Some("Suggested insertion by Ada")
        );
        assert_eq!(
            suggestion_title(ins, Some("Ada"), Some("2024-06-15T09:00:00Z"), us).as_deref(),
            Some("Suggested insertion by Ada on 6/15/2024")
        );
        assert_eq!(
            suggestion_title(del, None, Some("2024-06-15"), DateLocale::DeDe).as_deref(),
            Some("Suggested deletion on 15.6.2024")
        );
    }

    #[test]
    fn test_title_skips_empty_author_and_bad_date() {
        assert_eq!(
            suggestion_title(
                SemanticTag::SuggestedDelete,
                Some(""),
                Some("not a date"),
                DateLocale::EnUs
            )
            .as_deref(),
            Some("Suggested deletion")
        );
    }

    #[test]
    fn test_title_only_for_suggestion_tags() {
        for tag in [SemanticTag::NoteRef, SemanticTag::Footnote, SemanticTag::CommentStart] {
            assert_eq!(suggestion_title(tag, Some("Ada"), None, DateLocale::EnUs), None);
        }
    }

    #[test]
    fn test_enhance_sets_class_and_title() {
        let mut doc = Document::parse(concat!(
            r#"<suggestedDelete by="Bob" dated="2023-01-09">old</suggestedDelete>"#,
            r#"<suggestedInsert>new</suggestedInsert>"#,
        ))
        .unwrap();

        assert_eq!(enhance_suggestions(&mut doc, DateLocale::EnGb), 2);

        let [del, ins] = doc.elements()[..] else {
            panic!("expected two suggestions");
        };
        assert!(doc.has_class(del, "suggested-delete"));
        assert_eq!(
            doc.attr(del, "title"),
            Some("Suggested deletion by Bob on 09/01/2023")
        );
        assert!(doc.has_class(ins, "suggested-insert"));
        assert_eq!(doc.attr(ins, "title"), Some("Suggested insertion"));
    }
}
