//! Project and user records
//!
//! The shapes handed to the access resolver by the data-access layer. Records are
//! deserialised leniently: absent or `null` optional fields read as empty.

pub mod types;

pub use types::*;
