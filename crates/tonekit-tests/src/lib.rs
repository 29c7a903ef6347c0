//! Integration test crate for ToneKit.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on every tonekit crate to verify they work together.

/// Install a test-writer subscriber once. Filter with `RUST_LOG`.
#[cfg(test)]
pub(crate) fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod temperature;

#[cfg(test)]
mod contrast;

#[cfg(test)]
mod pipeline;
