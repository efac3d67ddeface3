//! Newshelf Core Library
//!
//! Builds a "new books" display for a library catalog: exchanges client
//! credentials for an access token, queries recently added titles, finds a
//! cover image for each title and lays the covers out in a fixed grid.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`auth`] - OAuth2 client-credentials token exchange
//! - [`catalog`] - New-titles query and brief record parsing
//! - [`cover`] - Cover lookup chain, default cover, normalization
//! - [`render`] - Grid layout, display tiles and static HTML output
//! - [`config`] - Run settings and validation
//! - [`app`] - One end-to-end run

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod cover;
pub mod render;

pub(crate) mod http_client;
pub(crate) mod user_agent;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use app::{RunError, RunOutcome, page_for, renderer_for, run};
pub use auth::{AccessToken, AuthError, Credentials, TokenProvider};
pub use catalog::{CatalogClient, CatalogError, CatalogQuery, TitleRecord};
pub use config::{ConfigError, HttpTimeouts, Settings};
pub use cover::{
    CoverChain, CoverError, CoverImage, CoverPipeline, CoverProvider, CoverSettings, TargetSize,
};
pub use render::{DisplayTile, GridLayout, Page, PageRenderer, RenderError, RenderedPage};
