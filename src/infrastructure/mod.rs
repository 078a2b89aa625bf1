//! Infrastructure module - external collaborators and the extraction core.

pub mod application_repository;
pub mod database_connection;
pub mod date_normalizer;
pub mod http_client;
pub mod listing_parser;
pub mod logging;
