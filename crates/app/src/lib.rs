//! # wvadmin-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `ConfigStore`: the shared key-value configuration table
//!   - `HostSystem`: files and commands on the station host
//!   - `ArchiveStatistics`: read-only summaries of the weather archive
//! - Define **use-case services**:
//!   - `SettingsService`: load and save settings pages
//!   - `AuthService`: admin password and cookie checks
//!   - `SystemService`: status page, daemon control, network settings
//!   - `ArchiveService`: report date pickers and URLs
//!   - `ConfigService`: raw key access for the JSON API
//!
//! ## Dependency rule
//! Depends on `wvadmin-domain` only. Never imports adapter crates.
//! Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
