//! Library side of the `larder` binary: argument definitions, config,
//! column catalogue, and logging setup.

pub mod cli;
pub mod columns;
pub mod config;
pub mod logging;
