//! Control-plane operations over the shared configuration document.

pub mod store;

pub use store::ConfigStore;
