//! Test utilities for pipeline tests.
//!
//! This module provides a scripted driver and scene fixtures.

pub mod mock_driver;

#[allow(unused_imports)]
pub use mock_driver::{MockDriver, MockResponse, scene_list_json};
