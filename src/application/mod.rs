//! Application services layer.

pub mod auth;
pub mod contact;
pub mod dashboard;
pub mod error;
pub mod feed;
pub mod ids;
pub mod posts;
pub mod repos;
