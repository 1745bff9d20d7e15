//! CLI library components for the normalization tool.

#![allow(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod exit;
pub mod logging;
pub mod summary;
