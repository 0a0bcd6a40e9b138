//! Privat Rengøring marketplace API.
//!
//! Layers follow the usual split: `domain` holds pure rules, `application`
//! orchestrates them behind repository traits, `infra` provides the in-memory
//! store, HTTP surface and telemetry, and `config` resolves runtime settings.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
