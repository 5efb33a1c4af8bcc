//! Configuration loading and management for the Fortnightly Payroll Engine.
//!
//! This module provides functionality to load the payroll configuration
//! from YAML files: the engine settings (pool split, caps, allowance
//! coverage, currency) and the worker roster.
//!
//! # Example
//!
//! ```no_run
//! use nomina_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/nomina").unwrap();
//! println!("Loaded configuration: {}", config.settings().metadata.name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AllowanceSettings, EngineSettings, PayrollConfig, PayrollMetadata, RosterConfig, StimulusSplit,
};
