//! Query and navigation helpers for code embedding an enhanced document.
//!
//! Every helper takes the document (or session) explicitly. None of them
//! fail: a miss is `None`, an empty list or a no-op.

use serde::Serialize;

use crate::dom::{Document, NodeId, Selector};
use crate::enhance::{SemanticTag, attr, class};
use crate::runtime::{Session, Viewport};

/// Suggested edits split by kind, each in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuggestedChanges {
    pub deletions: Vec<NodeId>,
    pub insertions: Vec<NodeId>,
}

impl SuggestedChanges {
    pub fn len(&self) -> usize {
        self.deletions.len() + self.insertions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deletions.is_empty() && self.insertions.is_empty()
    }
}

fn comment_markers() -> Selector {
    Selector::any_tag(&[SemanticTag::CommentStart.tag(), SemanticTag::CommentEnd.tag()])
}

/// Show or hide comment boundary markers by toggling `comments-visible`.
///
/// Returns the number of markers touched.
pub fn toggle_comments(doc: &mut Document, show: bool) -> usize {
    let markers = doc.select(&comment_markers());
    for &marker in &markers {
        if show {
            doc.add_class(marker, class::COMMENTS_VISIBLE);
        } else {
            doc.remove_class(marker, class::COMMENTS_VISIBLE);
        }
    }
    markers.len()
}

/// Comment boundary markers in document order.
pub fn get_comment_markers(doc: &Document) -> Vec<NodeId> {
    doc.select(&comment_markers())
}

/// First element whose `bid` equals `bid`.
pub fn get_by_bid(doc: &Document, bid: &str) -> Option<NodeId> {
    doc.find_by_attr(None, attr::BID, bid)
}

/// All footnote bodies in document order.
pub fn get_footnotes(doc: &Document) -> Vec<NodeId> {
    doc.select(&Selector::tag(SemanticTag::Footnote.tag()))
}

pub fn get_suggested_changes(doc: &Document) -> SuggestedChanges {
    SuggestedChanges {
        deletions: doc.select(&Selector::tag(SemanticTag::SuggestedDelete.tag())),
        insertions: doc.select(&Selector::tag(SemanticTag::SuggestedInsert.tag())),
    }
}

/// Scroll the element with `bid` into view and flash `navigation-target`.
///
/// Returns the element navigated to; an unknown `bid` changes nothing.
pub fn navigate_to_bid<V: Viewport>(session: &mut Session<V>, bid: &str) -> Option<NodeId> {
    let target = get_by_bid(session.document(), bid)?;
    session.flash(target, class::NAVIGATION_TARGET);
    Some(target)
}
