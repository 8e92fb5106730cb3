use std::sync::OnceLock;

use crate::transport::{AnyBackend, Backend};

/// The registered backend, if any.
pub static BACKEND: OnceLock<Box<dyn AnyBackend>> = OnceLock::new();

/// Registers the process-wide backend.
///
/// # Panics
///
/// Panics if a backend has already been registered.
pub fn register_backend(backend: impl Backend) {
    if BACKEND.set(Box::new(backend)).is_err() {
        panic!("Backend already registered");
    }
}
