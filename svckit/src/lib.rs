// svckit/src/lib.rs
//
// Shared kit for reel-dash: record types, wire shapes, errors and config sections
//

pub mod config;
pub mod errors;
pub mod types;

pub use errors::StoreError;
pub use types::{NewRecord, Record, RecordId, Timestamp};
