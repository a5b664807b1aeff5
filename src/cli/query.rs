//! `semdoc query`: JSON summaries of elements in an enhanced document.

use anyhow::{Result, bail};
use serde_json::{Value as JsonValue, json};

use crate::api;
use crate::cli::args::{InputArgs, QueryTarget};
use crate::cli::common::{ElementSummary, load_enhanced, print_json};
use crate::config::SemdocConfig;
use crate::dom::{Document, Selector};
use crate::log;

/// Execute query command
pub fn run_query(
    input: &InputArgs,
    target: QueryTarget,
    value: Option<&str>,
    config: &SemdocConfig,
) -> Result<()> {
    let (doc, _) = load_enhanced(input, config)?;
    let result = query(&doc, target, value)?;
    print_json(&result, config.output.pretty)
}

/// Run a lookup against an enhanced document.
///
/// `bid` yields a single summary (or `null`), `changes` an object with
/// `deletions` and `insertions`, everything else an array.
pub fn query(doc: &Document, target: QueryTarget, value: Option<&str>) -> Result<JsonValue> {
    let result = match target {
        QueryTarget::Bid => {
            let Some(bid) = value else {
                bail!("`query bid` needs a bid to look up");
            };
            match api::get_by_bid(doc, bid) {
                Some(node) => serde_json::to_value(ElementSummary::new(doc, node))?,
                None => {
                    log!("query"; "no element with bid `{}`", bid);
                    JsonValue::Null
                }
            }
        }
        QueryTarget::Footnotes => summaries(doc, &api::get_footnotes(doc))?,
        QueryTarget::Comments => summaries(doc, &api::get_comment_markers(doc))?,
        QueryTarget::Changes => {
            let changes = api::get_suggested_changes(doc);
            json!({
                "deletions": summaries(doc, &changes.deletions)?,
                "insertions": summaries(doc, &changes.insertions)?,
            })
        }
        QueryTarget::Select => {
            let Some(selector) = value else {
                bail!("`query select` needs a CSS selector");
            };
            let selector = Selector::parse(selector)?;
            summaries(doc, &doc.select(&selector))?
        }
    };
    Ok(result)
}

fn summaries(doc: &Document, nodes: &[crate::dom::NodeId]) -> Result<JsonValue> {
    Ok(serde_json::to_value(ElementSummary::collect(doc, nodes))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enhance::{EnhanceOptions, enhance};

    fn enhanced(html: &str) -> Document {
        let mut doc = Document::parse(html).unwrap();
        enhance(&mut doc, EnhanceOptions::default());
        doc
    }

    const DOC: &str = concat!(
        r#"<p bid="p1">A<noteref bid="n4"></noteref></p>"#,
        r#"<suggestedDelete by="Kim">x</suggestedDelete>"#,
        r#"<footnote bid="n4">Note</footnote>"#,
    );

    #[test]
    fn test_query_bid() {
        let doc = enhanced(DOC);
        let result = query(&doc, QueryTarget::Bid, Some("n4")).unwrap();
        assert_eq!(result["tag"], "noteref");
        assert_eq!(result["text"], "[4]");

        let missing = query(&doc, QueryTarget::Bid, Some("zz")).unwrap();
        assert!(missing.is_null());
    }

    #[test]
    fn test_query_bid_requires_value() {
        let doc = enhanced(DOC);
        assert!(query(&doc, QueryTarget::Bid, None).is_err());
    }

    #[test]
    fn test_query_changes() {
        let doc = enhanced(DOC);
        let result = query(&doc, QueryTarget::Changes, None).unwrap();
        assert_eq!(result["deletions"][0]["title"], "Suggested deletion by Kim");
        assert_eq!(result["insertions"], json!([]));
    }

    #[test]
    fn test_query_footnotes() {
        let doc = enhanced(DOC);
        let result = query(&doc, QueryTarget::Footnotes, None).unwrap();
        assert_eq!(result[0]["text"], "[4] Note");
    }

    #[test]
    fn test_query_select() {
        let doc = enhanced(DOC);
        let result = query(&doc, QueryTarget::Select, Some(".semantic-element")).unwrap();
        assert_eq!(result.as_array().map(Vec::len), Some(3));
        assert!(query(&doc, QueryTarget::Select, Some("p >")).is_err());
    }
}
