//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod archive_service;
pub mod auth_service;
pub mod config_service;
pub mod settings_service;
pub mod system_service;

#[cfg(test)]
pub(crate) mod fakes;
