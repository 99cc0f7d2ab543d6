//! Shared test utilities for the host-vars workspace.
//!
//! This crate provides standardised fixtures for crate test suites. It is a
//! dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`tree`]: [`TestTree`] builder for `group_vars/`/`host_vars/` layouts
//! - [`source`]: [`CountingReader`], a vars source that counts reads

pub mod source;
pub mod tree;

pub use source::CountingReader;
pub use tree::TestTree;
