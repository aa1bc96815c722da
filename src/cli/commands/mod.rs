//! Subcommand handlers

pub mod baseline;
pub mod compare;
pub mod train;
