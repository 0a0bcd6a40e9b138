//! Domain layer types and invariants.

pub mod contact;
pub mod entities;
pub mod error;
pub mod feed;
pub mod posts;
pub mod seed;
pub mod types;
