//! A document together with its viewport and timers.
//!
//! All interaction goes through `&mut Session`, so click handlers and timer
//! callbacks can never overlap. Every visible side effect is appended to an
//! event journal stamped with the virtual time it happened at.

use std::time::Duration;

use serde::Serialize;

use super::scheduler::{Scheduler, TaskKey};
use super::viewport::{RecordingViewport, ScrollOptions, Viewport};
use crate::api;
use crate::debug;
use crate::dom::{Document, Listener, NodeId};
use crate::enhance::{EnhanceOptions, EnhanceReport, Enhancer, SemanticTag, attr, class};

/// How long a highlight class stays on before it is removed.
pub const DEFAULT_HIGHLIGHT: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SessionEventKind {
    Scrolled { node: NodeId },
    ClassAdded { node: NodeId, class: &'static str },
    ClassRemoved { node: NodeId, class: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionEvent {
    /// Virtual time in milliseconds.
    pub at_ms: u128,
    #[serde(flatten)]
    pub kind: SessionEventKind,
}

pub struct Session<V: Viewport = RecordingViewport> {
    doc: Document,
    viewport: V,
    scheduler: Scheduler,
    highlight: Duration,
    events: Vec<SessionEvent>,
}

impl Session<RecordingViewport> {
    /// Session with a recording viewport.
    pub fn recording(doc: Document) -> Self {
        Self::new(doc, RecordingViewport::new())
    }
}

impl<V: Viewport> Session<V> {
    pub fn new(doc: Document, viewport: V) -> Self {
        Self {
            doc,
            viewport,
            scheduler: Scheduler::new(),
            highlight: DEFAULT_HIGHLIGHT,
            events: Vec::new(),
        }
    }

    pub fn with_highlight_duration(mut self, duration: Duration) -> Self {
        self.highlight = duration;
        self
    }

    /// Run the enhancer over the session's document.
    pub fn enhance(&mut self, options: EnhanceOptions) -> EnhanceReport {
        Enhancer::new(options).enhance(&mut self.doc)
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn into_document(self) -> Document {
        self.doc
    }

    fn record(&mut self, kind: SessionEventKind) {
        self.events.push(SessionEvent {
            at_ms: self.scheduler.now().as_millis(),
            kind,
        });
    }

    /// Dispatch a click on `node`. Returns whether any listener acted.
    pub fn click(&mut self, node: NodeId) -> bool {
        let listeners = self.doc.listeners(node).to_vec();
        let mut acted = false;
        for listener in listeners {
            acted |= self.run_listener(&listener);
        }
        acted
    }

    fn run_listener(&mut self, listener: &Listener) -> bool {
        match listener {
            Listener::ScrollToFootnote { bid: Some(bid) } => {
                let target =
                    self.doc
                        .find_by_attr(Some(SemanticTag::Footnote.tag()), attr::BID, bid);
                match target {
                    Some(footnote) => {
                        self.flash(footnote, class::FOOTNOTE_HIGHLIGHTED);
                        true
                    }
                    None => {
                        debug!("navigate"; "no footnote for bid `{}`", bid);
                        false
                    }
                }
            }
            Listener::ScrollToFootnote { bid: None } => false,
        }
    }

    /// Scroll `node` to the centre of the viewport and add `class` for the
    /// highlight duration. Re-flashing before expiry restarts the timer.
    pub fn flash(&mut self, node: NodeId, class: &'static str) {
        self.viewport
            .scroll_into_view(node, ScrollOptions::default());
        self.record(SessionEventKind::Scrolled { node });

        self.doc.add_class(node, class);
        self.record(SessionEventKind::ClassAdded { node, class });

        self.scheduler
            .schedule(TaskKey::new(node, class), self.highlight);
    }

    /// Advance virtual time, removing every highlight that expires.
    pub fn advance(&mut self, by: Duration) {
        for key in self.scheduler.advance(by) {
            self.expire(key);
        }
    }

    /// Let every pending highlight expire.
    pub fn settle(&mut self) {
        for key in self.scheduler.run_until_idle() {
            self.expire(key);
        }
    }

    fn expire(&mut self, key: TaskKey) {
        self.doc.remove_class(key.node, key.class);
        self.record(SessionEventKind::ClassRemoved {
            node: key.node,
            class: key.class,
        });
    }

    /// See [`api::navigate_to_bid`].
    pub fn navigate_to_bid(&mut self, bid: &str) -> Option<NodeId> {
        api::navigate_to_bid(self, bid)
    }

    /// See [`api::toggle_comments`].
    pub fn toggle_comments(&mut self, show: bool) -> usize {
        api::toggle_comments(&mut self.doc, show)
    }
}
