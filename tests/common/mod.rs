//! Common test utilities for terracolor.
//!
//! This module provides shared utilities for the integration tests.

pub mod image_utils;

use std::path::Path;
use terracolor::Config;

/// Default configuration writing into `dir` at one pixel per cell
pub fn test_config(dir: &Path) -> Config {
    let mut config = Config::default();
    config.output.dir = dir.to_path_buf();
    config.output.scale = 1;
    config
}
