//! CLI subcommand implementations for the announce-feed binary.

pub mod categories_cmd;
pub mod doctor;
pub mod fetch_cmd;
pub mod output;
