//! # wvadmin-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **admin console**: system status, the settings pages and the
//!   archive navigator, rendered server-side with askama templates
//! - Guard every page behind the admin password cookie
//! - Serve a small **JSON API** over the raw configuration table
//!   (`/api/config`, `/api/config/{key}`)
//!
//! ## No-JS pages
//! - Every page is complete HTML. Forms POST back and redirect (PRG pattern).
//! - Station rows that do not apply to the selected station are still
//!   rendered, hidden with `display:none`, so their values round-trip.
//!
//! ## Dependency rule
//! Depends on `wvadmin-app` (for port traits and services) and
//! `wvadmin-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod session;
pub mod state;
