//! Shared test utilities.

/// Mock implementations of the hardware model seam.
pub mod mocks;

/// Installs a test-writer tracing subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}
