//! Transport configuration.
//!
//! This module provides the options a backend honours when creating a transport.

mod options;

pub use options::TransportOptions;
