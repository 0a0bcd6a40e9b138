//! Shared domain enumerations.
//!
//! The wire and domain spellings are identical, so the enums are owned by the
//! API types crate and re-exported here.

pub use rengoring_api_types::{ContactPriority, FeedCategory, FeedSort, Urgency};
