//! Semantic document enhancement.
//!
//! Decorates an already-parsed document in place: classes, mirrored `data-*`
//! attributes, tooltips, injected footnote labels and click listeners.
//!
//! # Passes
//!
//! | Pass          | Matches                                | Adds                                   |
//! |---------------|----------------------------------------|----------------------------------------|
//! | `comment`     | `commentstartref`, `commentendref`     | class, `data-comment-start`/`-end`     |
//! | `suggestion`  | `suggesteddelete`, `suggestedinsert`   | class, `title` tooltip                 |
//! | `note`        | `noteref`, `footnote`                  | class, `[n]` label, click listener     |
//! | `attrs`       | `p[listparanum]`, `[bid]`, `[plaintextview]` | class, `data-*` mirror           |
//!
//! Passes are independent of each other and run in the order above.

mod attrs;
mod comment;
mod note;
mod suggestion;


pub use note::display_number;
pub use suggestion::suggestion_title;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dom::Document;
use crate::registry::CustomElementRegistry;
use crate::utils::date::DateLocale;
use crate::{debug, log};

/// Classes added by the enhancer and the runtime helpers.
pub mod class {
    pub const COMMENT_START: &str = "comment-start-ref";
    pub const COMMENT_END: &str = "comment-end-ref";
    pub const SUGGESTED_DELETE: &str = "suggested-delete";
    pub const SUGGESTED_INSERT: &str = "suggested-insert";
    pub const NOTE_REF: &str = "note-ref";
    pub const FOOTNOTE: &str = "footnote";
    pub const SEMANTIC_ELEMENT: &str = "semantic-element";
    pub const LIST_PARAGRAPH: &str = "list-paragraph";
    pub const HAS_PLAIN_TEXT: &str = "has-plain-text";
    pub const COMMENTS_VISIBLE: &str = "comments-visible";
    pub const FOOTNOTE_HIGHLIGHTED: &str = "footnote-highlighted";
    pub const NAVIGATION_TARGET: &str = "navigation-target";
}

/// Attribute names read or written by the enhancer.
pub mod attr {
    pub const BID: &str = "bid";
    pub const BY: &str = "by";
    pub const DATED: &str = "dated";
    pub const TITLE: &str = "title";
    pub const LIST_PARA_NUM: &str = "listparanum";
    pub const PLAIN_TEXT_VIEW: &str = "plaintextview";
    pub const DATA_COMMENT_START: &str = "data-comment-start";
    pub const DATA_COMMENT_END: &str = "data-comment-end";
    pub const DATA_BID: &str = "data-bid";
    pub const DATA_LIST_NUM: &str = "data-list-num";
    pub const DATA_PLAIN_TEXT: &str = "data-plain-text";
}

// ============================================================================
// Vocabulary
// ============================================================================

/// The custom tags of a semantic document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticTag {
    CommentStart,
    CommentEnd,
    SuggestedDelete,
    SuggestedInsert,
    NoteRef,
    Footnote,
}

impl SemanticTag {
    pub const ALL: [SemanticTag; 6] = [
        Self::CommentStart,
        Self::CommentEnd,
        Self::SuggestedDelete,
        Self::SuggestedInsert,
        Self::NoteRef,
        Self::Footnote,
    ];

    /// Lowercase tag name as it appears in a parsed document.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::CommentStart => "commentstartref",
            Self::CommentEnd => "commentendref",
            Self::SuggestedDelete => "suggesteddelete",
            Self::SuggestedInsert => "suggestedinsert",
            Self::NoteRef => "noteref",
            Self::Footnote => "footnote",
        }
    }

    /// Class the enhancer adds to elements of this tag.
    pub const fn class(self) -> &'static str {
        match self {
            Self::CommentStart => class::COMMENT_START,
            Self::CommentEnd => class::COMMENT_END,
            Self::SuggestedDelete => class::SUGGESTED_DELETE,
            Self::SuggestedInsert => class::SUGGESTED_INSERT,
            Self::NoteRef => class::NOTE_REF,
            Self::Footnote => class::FOOTNOTE,
        }
    }
}

// ============================================================================
// Options
// ============================================================================

/// What to write into `data-comment-start`/`-end` when `bid` is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbsentBid {
    /// Leave the data attribute off.
    #[default]
    Omit,
    /// Write the literal string `null`.
    Null,
}

impl FromStr for AbsentBid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "omit" => Ok(Self::Omit),
            "null" => Ok(Self::Null),
            other => Err(format!("expected `omit` or `null`, got `{other}`")),
        }
    }
}

impl fmt::Display for AbsentBid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Omit => "omit",
            Self::Null => "null",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnhanceOptions {
    /// Locale for tooltip dates.
    pub locale: DateLocale,
    pub absent_bid: AbsentBid,
}

// ============================================================================
// Report
// ============================================================================

/// Number of elements touched by each pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnhanceReport {
    pub comment_refs: usize,
    pub suggestions: usize,
    pub note_refs: usize,
    pub footnotes: usize,
    pub list_paragraphs: usize,
    pub bid_elements: usize,
    pub plain_text_elements: usize,
    /// Why custom element registration failed, if it did.
    pub registration_error: Option<String>,
}

impl EnhanceReport {
    pub fn total(&self) -> usize {
        self.comment_refs
            + self.suggestions
            + self.note_refs
            + self.footnotes
            + self.list_paragraphs
            + self.bid_elements
            + self.plain_text_elements
    }
}

// ============================================================================
// Enhancer
// ============================================================================

/// Runs every enhancement pass over a document.
#[derive(Debug, Default)]
pub struct Enhancer {
    options: EnhanceOptions,
    registry: CustomElementRegistry,
}

impl Enhancer {
    pub fn new(options: EnhanceOptions) -> Self {
        Self {
            options,
            registry: CustomElementRegistry::new(),
        }
    }

    pub fn options(&self) -> &EnhanceOptions {
        &self.options
    }

    pub fn registry(&self) -> &CustomElementRegistry {
        &self.registry
    }

    /// Enhance `doc` in place.
    ///
    /// Never fails: a registration error is logged and recorded in the
    /// report, and every pass still runs.
    pub fn enhance(&mut self, doc: &mut Document) -> EnhanceReport {
        let registration_error = self.register_semantic_elements();
        let options = &self.options;

        let report = EnhanceReport {
            comment_refs: comment::enhance_comment_refs(doc, options.absent_bid),
            suggestions: suggestion::enhance_suggestions(doc, options.locale),
            note_refs: note::enhance_note_refs(doc),
            footnotes: note::enhance_footnotes(doc),
            list_paragraphs: attrs::enhance_list_paragraphs(doc),
            bid_elements: attrs::enhance_bid_elements(doc),
            plain_text_elements: attrs::enhance_plain_text(doc),
            registration_error,
        };

        debug!("enhance"; "{} elements decorated ({} comment refs, {} suggestions, {} note refs, {} footnotes)",
            report.total(), report.comment_refs, report.suggestions, report.note_refs, report.footnotes);
        report
    }

    fn register_semantic_elements(&mut self) -> Option<String> {
        match self.registry.define_all(&SemanticTag::ALL) {
            Ok(()) => {
                debug!("registry"; "semantic elements registered");
                None
            }
            Err(err) => {
                log!("registry"; "error registering custom elements: {}", err);
                Some(err.to_string())
            }
        }
    }
}

/// Enhance `doc` with a one-off [`Enhancer`].
pub fn enhance(doc: &mut Document, options: EnhanceOptions) -> EnhanceReport {
    Enhancer::new(options).enhance(doc)
}
