//! TechFest event data layer.
//!
//! Query engine, event sources, the cached service facade, the registration
//! wizard and the JSON API built on them. The `techfest` binary serves the
//! API; everything is exposed here for integration testing.

pub mod cache;
pub mod config;
pub mod data;
pub mod error;
pub mod form;
pub mod gather;
pub mod models;
pub mod routes;
pub mod search;
pub mod services;
pub mod state;
