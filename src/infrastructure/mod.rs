//! Filesystem helpers for the Zellij plugin sandbox.
//!
//! Plugins see the host's home directory mounted at `/host`; every path the
//! user configures has to be translated into that view before use.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
