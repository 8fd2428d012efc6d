//! OctoFit - fitness-tracking dashboard client
//!
//! This crate holds everything the terminal front-ends share: configuration,
//! the typed API records, response-envelope decoding, the HTTP client, the
//! per-view loading state machine and the renderer-neutral presentation rules.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod models;
pub mod present;
pub mod resource;
pub mod task;
pub mod view;

pub use client::ApiClient;
pub use config::Config;
pub use error::{OctofitError, Result};
pub use resource::{Record, Resource};
pub use task::{Collected, Collection, FetchOutcome, FetchTask};
pub use view::{Phase, ViewState};
