//! Shared `Layer` test fixtures and hardware mocks for Helm crates.
//!
//! [`helm_hal::mock`] already provides `MockHardwareProxy`/`MockInputDevice`;
//! this crate re-exports it alongside the `Layer` doubles that crate can't
//! own, since it has no dependency on `helm-core`.

pub mod fixtures;
mod mock_logger;

pub use helm_hal::mock;
pub use mock_logger::{Entry, MockLoggerFactory};
