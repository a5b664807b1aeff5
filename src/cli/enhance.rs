//! `semdoc enhance`: decorate a document and write it back out.

use std::path::Path;

use anyhow::Result;

use crate::cli::args::InputArgs;
use crate::cli::common::{load_enhanced, write_output};
use crate::config::SemdocConfig;
use crate::log;

/// Execute enhance command
pub fn run_enhance(input: &InputArgs, output: Option<&Path>, config: &SemdocConfig) -> Result<()> {
    let (doc, report) = load_enhanced(input, config)?;

    log!(
        "enhance";
        "decorated {} elements ({} comment markers, {} suggestions, {} footnote refs, {} footnotes)",
        report.total(),
        report.comment_refs,
        report.suggestions,
        report.note_refs,
        report.footnotes
    );

    write_output(output, &doc.to_html())
}
