//! `semdoc navigate`: run a session, navigate to a bid and report what
//! happened on the virtual clock.

use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use crate::cli::args::InputArgs;
use crate::cli::common::{ElementSummary, load_enhanced, print_json};
use crate::config::SemdocConfig;
use crate::dom::Document;
use crate::log;
use crate::runtime::{Session, SessionEvent};

/// Navigation outcome printed as JSON.
#[derive(Debug, Serialize)]
pub struct Timeline {
    /// `null` when no element carries the bid.
    pub target: Option<ElementSummary>,
    pub highlight_ms: u64,
    pub events: Vec<SessionEvent>,
}

/// Execute navigate command
pub fn run_navigate(input: &InputArgs, bid: &str, config: &SemdocConfig) -> Result<()> {
    let (doc, _) = load_enhanced(input, config)?;
    let timeline = navigate(doc, bid, config.enhance.highlight());

    match &timeline.target {
        Some(target) => log!("navigate"; "navigated to <{}> with bid `{}`", target.tag, bid),
        None => log!("navigate"; "no element with bid `{}`", bid),
    }
    print_json(&timeline, config.output.pretty)
}

/// Navigate to `bid` in a fresh session and let every highlight expire.
pub fn navigate(doc: Document, bid: &str, highlight: Duration) -> Timeline {
    let mut session = Session::recording(doc).with_highlight_duration(highlight);
    let target = session
        .navigate_to_bid(bid)
        .map(|node| ElementSummary::new(session.document(), node));
    session.settle();

    Timeline {
        target,
        highlight_ms: highlight.as_millis() as u64,
        events: session.events().to_vec(),
    }
}
