//! Site characteristics and domain constants for the West Tamar listing page.

/// Source site constants.
pub mod site {
    /// Currently advertised planning applications listing page.
    pub const LISTING_URL: &str =
        "https://www.wtc.tas.gov.au/Your-Property/Planning/Currently-Advertised-Planning-Applications";
}

/// Textual labels the listing page prefixes its fields with.
pub mod labels {
    pub const REFERENCE: &str = "PA NO:";
    pub const APPLICANT: &str = "APPLICANT:";
    pub const PROPOSAL: &str = "PROPOSAL:";
    pub const LOCATION: &str = "LOCATION:";
    pub const CLOSES: &str = "CLOSES:";
}

/// Placeholder values for fields that could not be extracted. Distinct from
/// the empty string, which is reserved for columns not yet populated.
pub mod sentinel {
    /// Expected sub-node missing from a listing item.
    pub const NOT_AVAILABLE: &str = "NA";

    /// Date text was present but did not parse as a calendar date.
    pub const INVALID_DATE: &str = "Invalid";

    /// Fed to the date normalizer when the `<time>` element is missing;
    /// it never parses, so the persisted value becomes `INVALID_DATE`.
    pub const DATE_NOT_FOUND: &str = "Date not found";
}

/// Local store defaults.
pub mod store {
    /// SQLite database file in the working directory.
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:data.sqlite";
}
