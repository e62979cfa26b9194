//! Command-line front end for tokscope

pub mod cli;
pub mod commands;
pub mod logging;
