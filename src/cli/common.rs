//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::args::InputArgs;
use crate::config::SemdocConfig;
use crate::dom::{Document, NodeId};
use crate::enhance::{EnhanceReport, Enhancer, attr};
use crate::{debug, log};

/// Read the input document from a file or stdin.
pub fn read_input(input: &InputArgs) -> Result<String> {
    if input.is_stdin() {
        let mut html = String::new();
        io::stdin()
            .read_to_string(&mut html)
            .context("Failed to read document from stdin")?;
        return Ok(html);
    }
    fs::read_to_string(&input.path)
        .with_context(|| format!("Failed to read `{}`", input.path.display()))
}

/// Read, parse and enhance the input document.
pub fn load_enhanced(input: &InputArgs, config: &SemdocConfig) -> Result<(Document, EnhanceReport)> {
    let html = read_input(input)?;
    let mut doc = Document::parse(&html)
        .with_context(|| format!("Failed to parse `{}`", input.path.display()))?;

    let report = Enhancer::new(config.enhance.options()).enhance(&mut doc);
    debug!("enhance"; "{} decorated with locale {}", input.path.display(), config.enhance.locale);
    Ok((doc, report))
}

/// Write `content` to `path`, or to stdout when there is none.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write `{}`", path.display()))?;
            log!("enhance"; "wrote output to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                writeln!(stdout)?;
            }
        }
    }
    Ok(())
}

/// Serialize `value` as JSON and print it to stdout.
pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let formatted = to_json(value, pretty)?;
    println!("{}", formatted);
    Ok(())
}

pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let formatted = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(formatted)
}

/// What `query` and `navigate` print for an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementSummary {
    pub node: NodeId,
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub text: String,
}

impl ElementSummary {
    pub fn new(doc: &Document, node: NodeId) -> Self {
        let owned = |name: &str| doc.attr(node, name).map(str::to_string);
        Self {
            node,
            tag: doc.tag_name(node).unwrap_or_default().to_string(),
            bid: owned(attr::BID),
            title: owned(attr::TITLE),
            text: doc.text_content(node),
        }
    }

    pub fn collect(doc: &Document, nodes: &[NodeId]) -> Vec<Self> {
        nodes.iter().map(|&node| Self::new(doc, node)).collect()
    }
}
