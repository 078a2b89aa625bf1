//! Planning application record extracted from one listing item.

use serde::{Deserialize, Serialize};

use crate::domain::constants::sentinel;

/// One planning application entry, one row per unique `council_reference`.
///
/// Every field is always populated: either with extracted text or with an
/// explicit sentinel, never left empty by the extractor. The reserved store
/// columns (`owner` through `title_reference`) stay empty until the source
/// page starts exposing them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningApplicationRecord {
    pub council_reference: String,
    pub applicant: String,
    pub description: String,
    pub address: String,
    pub date_received: String,
    pub on_notice_to: String,
    pub date_scraped: String,
    pub owner: String,
    pub stage_description: String,
    pub stage_status: String,
    pub document_description: String,
    pub title_reference: String,
}

impl PlanningApplicationRecord {
    /// Record with every extracted field at its sentinel and the reserved
    /// columns empty. The extractor overwrites whatever it manages to find,
    /// so an item with no recognizable substructure still yields a complete
    /// row.
    pub fn unextracted(date_scraped: &str) -> Self {
        Self {
            council_reference: sentinel::NOT_AVAILABLE.to_string(),
            applicant: sentinel::NOT_AVAILABLE.to_string(),
            description: sentinel::NOT_AVAILABLE.to_string(),
            address: sentinel::NOT_AVAILABLE.to_string(),
            date_received: sentinel::INVALID_DATE.to_string(),
            on_notice_to: sentinel::NOT_AVAILABLE.to_string(),
            date_scraped: date_scraped.to_string(),
            owner: String::new(),
            stage_description: String::new(),
            stage_status: String::new(),
            document_description: String::new(),
            title_reference: String::new(),
        }
    }
}
