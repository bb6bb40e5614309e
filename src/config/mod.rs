//! Configuration module for Sumi-Strand
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so an empty file (or no file
//! at all) yields a usable configuration.
//!
//! # Example
//!
//! ```no_run
//! use sumi_strand::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("strand.toml")).unwrap();
//! println!("Crawler will use up to {} workers", config.crawler.max_workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, FetchErrorPolicy, UserAgentConfig};
pub use validation::{validate, MAX_WORKERS_LIMIT};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
