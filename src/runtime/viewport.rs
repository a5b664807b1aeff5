//! Scrolling collaborator.
//!
//! The session asks a [`Viewport`] to bring elements into view; hosts decide
//! what that means. [`RecordingViewport`] just remembers the requests.

use serde::Serialize;

use crate::dom::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// Vertical alignment of the scrolled element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBlock {
    Start,
    #[default]
    Center,
    End,
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScrollOptions {
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

pub trait Viewport {
    fn scroll_into_view(&mut self, node: NodeId, options: ScrollOptions);
}

/// A viewport that records every scroll request.
#[derive(Debug, Clone, Default)]
pub struct RecordingViewport {
    requests: Vec<(NodeId, ScrollOptions)>,
}

impl RecordingViewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> &[(NodeId, ScrollOptions)] {
        &self.requests
    }

    /// The most recently scrolled-to element.
    pub fn last_target(&self) -> Option<NodeId> {
        self.requests.last().map(|(node, _)| *node)
    }
}

impl Viewport for RecordingViewport {
    fn scroll_into_view(&mut self, node: NodeId, options: ScrollOptions) {
        self.requests.push((node, options));
    }
}

impl<V: Viewport + ?Sized> Viewport for &mut V {
    fn scroll_into_view(&mut self, node: NodeId, options: ScrollOptions) {
        (**self).scroll_into_view(node, options);
    }
}
