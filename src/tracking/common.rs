//! Common utilities module
//!
//! This module contains shared utilities used across the tracking pipeline.

pub mod error;

pub use error::{Result, TrackingError};
