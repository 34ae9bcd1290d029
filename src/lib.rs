//! # barque - distributed backup control plane
//!
//! barque coordinates the shared configuration of a multi-process backup
//! deployment. Every agent and operator CLI talks to the same singleton
//! configuration document in the control database; this library provides
//! the typed schema for that document, the operations that read and
//! change it, and the resolution of the configured backup destination to
//! a concrete storage backend.
//!
//! ## Architecture
//!
//! barque follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`control`] - Operations over the shared configuration document
//! - [`adapters`] - External integrations (control database, storage backends)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration schema, keys, and process settings
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use barque::adapters::database::factory::create_control_store;
//! use barque::config::settings::load_settings;
//! use barque::control::ConfigStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = load_settings("barque.toml")?;
//!     let control = create_control_store(&settings.database).await?;
//!     let store = ConfigStore::new(control);
//!
//!     let yaml = store.get_config_yaml(true).await?;
//!     print!("{}", yaml);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod control;
pub mod domain;
pub mod logging;
