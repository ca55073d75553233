pub mod config;
pub mod entry;
pub mod errors;

pub use config::{EntryDefaults, SitemapConfig};
pub use entry::{ChangeFrequency, Priority, UrlEntry, format_timestamp, parse_timestamp};
pub use errors::ModelError;
