//! Commands Module
//!
//! All CLI subcommand implementations.

pub mod compose;
pub mod info;
pub mod train;
