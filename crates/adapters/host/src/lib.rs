//! # wvadmin-adapter-host
//!
//! Implements the [`HostSystem`](wvadmin_app::ports::HostSystem) port against
//! the local machine: files under the daemon configuration and run
//! directories, the network configuration files, and the service scripts
//! that start and stop the daemons or restart networking.
//!
//! ## Dependency rule
//! Depends on `wvadmin-app` (for port traits) and `wvadmin-domain` (for
//! domain types). Never depended on by domain or app.

mod config;
mod error;
mod system;

pub use config::HostConfig;
pub use error::HostError;
pub use system::LocalHostSystem;
