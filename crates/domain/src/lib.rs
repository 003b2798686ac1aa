//! # wvadmin-domain
//!
//! Pure domain model for the wview administration console.
//!
//! ## Responsibilities
//! - Configuration keys and stored items
//! - Station families and the station form layout
//! - Settings page catalogues and the mapping between forms and stored values
//! - Network, password and daemon-control rules
//! - Archive report dates and URLs
//!
//! ## Dependency rule
//! This crate has **no internal dependencies** and performs no IO.
//! IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod archive;
pub mod auth;
pub mod config;
pub mod daemon;
pub mod form;
pub mod network;
pub mod settings;
pub mod station;
pub mod verbosity;
