//! # Rift Gateway
//!
//! A backend gateway that aggregates the Riot Games REST API and the
//! Data Dragon asset catalog for a web frontend.
//!
//! ## Architecture
//!
//! - **models**: Wire-format data structures (accounts, matches, catalog entries)
//! - **riot**: Upstream API client, platform resolution, batch match fetching
//! - **catalog**: Data Dragon champion/item catalog accessor
//! - **analytics**: Match-window aggregation (performance, runes, spells, simulated meta)
//! - **scoring**: Team-composition classification and outcome prediction
//! - **ai**: AI chat backend abstraction
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod ai;
pub mod analytics;
pub mod api;
pub mod catalog;
pub mod config;
pub mod models;
pub mod riot;
pub mod scoring;

pub use models::*;
