// UserDiag-specific HTML to text extraction.
use crate::model::{NormalizedReport, ParserError};
use scraper::{Html, Selector};

pub trait ReportParser {
    fn parse(&self, html: &str) -> Result<NormalizedReport, ParserError>;
}

pub struct UserdiagParser;

impl UserdiagParser {
    pub fn new() -> Self {
        Self
    }

    fn collect_text(texts: impl Iterator<Item = impl AsRef<str>>) -> String {
        texts
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for UserdiagParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportParser for UserdiagParser {
    /// Flattens the report page to text. When the page carries a curated
    /// hardware summary block, that block goes first in the assembled
    /// report so first-match feature scans prefer it over the body.
    fn parse(&self, html: &str) -> Result<NormalizedReport, ParserError> {
        let document = Html::parse_document(html);

        let summary_selector = Selector::parse("section.summary, div.summary, #summary")
            .map_err(|e| ParserError::HtmlParse(e.to_string()))?;

        let summary = document
            .select(&summary_selector)
            .next()
            .map(|node| Self::collect_text(node.text()));

        let full_text = Self::collect_text(document.root_element().text());
        if full_text.is_empty() {
            return Err(ParserError::EmptyReport);
        }

        Ok(NormalizedReport::assemble(summary.as_deref(), &full_text))
    }
}
