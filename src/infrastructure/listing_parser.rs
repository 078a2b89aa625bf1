//! Extraction of planning application records from the advertised listing page.
//!
//! The page is a sequence of `.edn_article` fragments. Each fragment carries a
//! title line (`PA NO: ...`), an applicant subtitle, a summary that
//! concatenates three labeled segments (`PROPOSAL: ... LOCATION: ...
//! CLOSES: ...`) and a `<time>` element for the received date. Any of these
//! can be missing; extraction degrades to sentinels instead of failing.

use anyhow::{Result, anyhow};
use scraper::{ElementRef, Html, Selector};
use tracing::info;

use crate::domain::constants::{labels, sentinel};
use crate::domain::record::PlanningApplicationRecord;
use crate::infrastructure::date_normalizer::{DateMode, normalize_date};

/// CSS selectors for the listing page structure.
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    /// One self-contained listing item.
    pub item: String,
    /// Title link carrying the council reference and the detail-page URL.
    pub title_link: String,
    /// Subtitle line carrying the applicant.
    pub applicant_subtitle: String,
    /// Summary block with the three labeled segments.
    pub summary: String,
    /// Element carrying the received date.
    pub received_time: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            item: ".edn_article".to_string(),
            title_link: ".edn_articleTitle a".to_string(),
            applicant_subtitle: ".edn_articleTitle.edn_articleSubTitle".to_string(),
            summary: ".edn_articleSummary".to_string(),
            received_time: "time".to_string(),
        }
    }
}

/// Walks listing items and extracts one record per item.
pub struct ListingExtractor {
    item: Selector,
    title_link: Selector,
    applicant_subtitle: Selector,
    summary: Selector,
    received_time: Selector,
}

impl ListingExtractor {
    /// Extractor for the live page structure.
    pub fn new() -> Result<Self> {
        Self::with_selectors(&ListingSelectors::default())
    }

    pub fn with_selectors(selectors: &ListingSelectors) -> Result<Self> {
        Ok(Self {
            item: parse_selector(&selectors.item)?,
            title_link: parse_selector(&selectors.title_link)?,
            applicant_subtitle: parse_selector(&selectors.applicant_subtitle)?,
            summary: parse_selector(&selectors.summary)?,
            received_time: parse_selector(&selectors.received_time)?,
        })
    }

    /// One record per matched listing item, in document order. A page with
    /// zero items is a valid empty result, not an error.
    pub fn extract_records(
        &self,
        html: &Html,
        date_scraped: &str,
    ) -> Vec<PlanningApplicationRecord> {
        let records: Vec<_> = html
            .select(&self.item)
            .map(|item| self.extract_item(item, date_scraped))
            .collect();

        info!("Extracted {} planning application records", records.len());
        records
    }

    /// Field extraction for a single listing item.
    ///
    /// Each step is independently null-safe: a missing sub-node leaves the
    /// affected fields at their sentinels and the remaining steps still run.
    pub fn extract_item(
        &self,
        item: ElementRef<'_>,
        date_scraped: &str,
    ) -> PlanningApplicationRecord {
        let mut record = PlanningApplicationRecord::unextracted(date_scraped);

        let title = item.select(&self.title_link).next();
        if let Some(title) = title {
            record.council_reference = strip_label(&element_text(title), labels::REFERENCE);
        }

        if let Some(subtitle) = item.select(&self.applicant_subtitle).next() {
            record.applicant = strip_label(&element_text(subtitle), labels::APPLICANT);
        }

        if let Some(summary) = item.select(&self.summary).next() {
            let fields = split_summary(&element_text(summary));
            record.description = fields.description;
            record.address = fields.address;
            record.on_notice_to = match fields.closing_raw {
                Some(raw) => normalize_date(&raw, DateMode::Closing),
                None => sentinel::NOT_AVAILABLE.to_string(),
            };
        }

        let received_raw = item
            .select(&self.received_time)
            .next()
            .map(element_text)
            .unwrap_or_else(|| sentinel::DATE_NOT_FOUND.to_string());
        record.date_received = normalize_date(&received_raw, DateMode::Received);

        // Detail-page link, surfaced in the logs only; the store has no
        // column for it yet.
        let application_url = title.and_then(|link| link.value().attr("href"));

        info!("Council reference: {}", record.council_reference);
        info!("Applicant: {}", record.applicant);
        info!("Description: {}", record.description);
        info!("Address: {}", record.address);
        info!("Closing date: {}", record.on_notice_to);
        info!("Date received: {}", record.date_received);
        info!("View details link: {}", application_url.unwrap_or("none"));
        info!("-----------------------------------");

        record
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| anyhow!("Invalid selector '{}': {}", selector, e))
}

/// Concatenated text content of an element, trimmed.
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Strips a leading label like `PA NO:` and trims the remainder. Text
/// without the label passes through trimmed.
fn strip_label(text: &str, label: &str) -> String {
    text.strip_prefix(label).unwrap_or(text).trim().to_string()
}

/// Sub-fields carved out of the summary text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryFields {
    pub description: String,
    pub address: String,
    /// Raw closing-date text, still to be normalized. `None` when the
    /// `CLOSES:` label is missing.
    pub closing_raw: Option<String>,
}

/// Splits the summary over the three ordered labels
/// `PROPOSAL: ... LOCATION: ... CLOSES: ...`.
///
/// The labels form the whole grammar: description runs from after
/// `PROPOSAL:` to the first `LOCATION:`, address from there to the first
/// following `CLOSES:`, and the closing text from after the last `CLOSES:`.
/// Each label is handled independently, so one missing label degrades only
/// its own field.
pub fn split_summary(text: &str) -> SummaryFields {
    let text = text.trim();
    let body = text.strip_prefix(labels::PROPOSAL).unwrap_or(text);

    let location_at = body.find(labels::LOCATION);

    let description = match location_at {
        Some(at) => body[..at].trim().to_string(),
        None => body.trim().to_string(),
    };

    let address = match location_at {
        Some(at) => {
            let after = &body[at + labels::LOCATION.len()..];
            let end = after.find(labels::CLOSES).unwrap_or(after.len());
            after[..end].trim().to_string()
        }
        None => sentinel::NOT_AVAILABLE.to_string(),
    };

    let closing_raw = body
        .rfind(labels::CLOSES)
        .map(|at| body[at + labels::CLOSES.len()..].trim().to_string());

    SummaryFields {
        description,
        address,
        closing_raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATE_SCRAPED: &str = "2024-08-30";

    fn extract_all(html: &str) -> Vec<PlanningApplicationRecord> {
        let document = Html::parse_document(html);
        ListingExtractor::new()
            .unwrap()
            .extract_records(&document, DATE_SCRAPED)
    }

    #[test]
    fn extracts_all_fields_from_a_complete_item() {
        let records = extract_all(
            r#"
            <div class="edn_article">
                <div class="edn_articleTitle"><a href="/planning/pa-2024-0042">PA NO: PA 2024/0042</a></div>
                <div class="edn_articleTitle edn_articleSubTitle">APPLICANT: J. Citizen</div>
                <div class="edn_articleSummary">
                    PROPOSAL: Build a shed LOCATION: 12 Main St CLOSES: 4pm 10th Jan 2025
                </div>
                <time>3 June 2024</time>
            </div>
            "#,
        );

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.council_reference, "PA 2024/0042");
        assert_eq!(record.applicant, "J. Citizen");
        assert_eq!(record.description, "Build a shed");
        assert_eq!(record.address, "12 Main St");
        assert_eq!(record.on_notice_to, "2025-01-10");
        assert_eq!(record.date_received, "2024-06-03");
        assert_eq!(record.date_scraped, DATE_SCRAPED);
    }

    #[test]
    fn missing_title_and_subtitle_fall_back_to_na() {
        let records = extract_all(
            r#"
            <div class="edn_article">
                <div class="edn_articleSummary">PROPOSAL: X LOCATION: Y CLOSES: 1st July 2024</div>
                <time>3 June 2024</time>
            </div>
            "#,
        );

        assert_eq!(records[0].council_reference, "NA");
        assert_eq!(records[0].applicant, "NA");
        assert_eq!(records[0].on_notice_to, "2024-07-01");
    }

    #[test]
    fn missing_summary_leaves_all_derived_fields_na() {
        let records = extract_all(
            r#"
            <div class="edn_article">
                <div class="edn_articleTitle"><a href="/x">PA NO: PA 1</a></div>
                <time>3 June 2024</time>
            </div>
            "#,
        );

        let record = &records[0];
        assert_eq!(record.description, "NA");
        assert_eq!(record.address, "NA");
        // Absent-node sentinel, not the date-parse-failure sentinel.
        assert_eq!(record.on_notice_to, "NA");
    }

    #[test]
    fn missing_time_element_yields_invalid_received_date() {
        let records = extract_all(
            r#"
            <div class="edn_article">
                <div class="edn_articleTitle"><a href="/x">PA NO: PA 2</a></div>
            </div>
            "#,
        );

        assert_eq!(records[0].date_received, "Invalid");
    }

    #[test]
    fn zero_items_yield_zero_records() {
        let records = extract_all("<html><body><p>No applications on exhibition.</p></body></html>");
        assert!(records.is_empty());
    }

    #[test]
    fn records_come_out_in_document_order() {
        let records = extract_all(
            r#"
            <div class="edn_article">
                <div class="edn_articleTitle"><a href="/a">PA NO: PA 1</a></div>
            </div>
            <div class="edn_article">
                <div class="edn_articleTitle"><a href="/b">PA NO: PA 2</a></div>
            </div>
            "#,
        );

        let references: Vec<_> = records.iter().map(|r| r.council_reference.as_str()).collect();
        assert_eq!(references, ["PA 1", "PA 2"]);
    }

    #[test]
    fn splits_summary_into_three_labeled_segments() {
        let fields =
            split_summary("PROPOSAL: Build a shed LOCATION: 12 Main St CLOSES: 4pm 10th Jan 2025");

        assert_eq!(fields.description, "Build a shed");
        assert_eq!(fields.address, "12 Main St");
        assert_eq!(fields.closing_raw.as_deref(), Some("4pm 10th Jan 2025"));
    }

    #[test]
    fn summary_without_location_label_keeps_leading_text_as_description() {
        let fields = split_summary("PROPOSAL: Build a shed CLOSES: 1 July 2024");

        assert_eq!(fields.description, "Build a shed CLOSES: 1 July 2024");
        assert_eq!(fields.address, "NA");
        assert_eq!(fields.closing_raw.as_deref(), Some("1 July 2024"));
    }

    #[test]
    fn summary_without_closes_label_has_no_closing_text() {
        let fields = split_summary("PROPOSAL: Build a shed LOCATION: 12 Main St");

        assert_eq!(fields.description, "Build a shed");
        assert_eq!(fields.address, "12 Main St");
        assert_eq!(fields.closing_raw, None);
    }

    #[test]
    fn summary_without_proposal_label_still_yields_description() {
        let fields = split_summary("New dwelling LOCATION: 7 River Rd CLOSES: 1 July 2024");

        assert_eq!(fields.description, "New dwelling");
        assert_eq!(fields.address, "7 River Rd");
    }

    #[test]
    fn closing_text_comes_from_the_last_closes_label() {
        let fields = split_summary(
            "PROPOSAL: Sign reading CLOSES: soon LOCATION: 1 High St CLOSES: 2 July 2024",
        );

        assert_eq!(fields.closing_raw.as_deref(), Some("2 July 2024"));
    }
}
