//! Command-line front end: `analyze`, `merge`, `compare`, and `config`.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod settings;
pub mod summary;
pub mod types;
