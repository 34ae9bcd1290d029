//! External integrations
//!
//! Adapters isolate the rest of the crate from concrete services:
//!
//! - [`database`] is the shared control database holding the singleton
//!   configuration document
//! - [`storage`] is the set of backup storage destinations selected by the
//!   configuration

pub mod database;
pub mod storage;
