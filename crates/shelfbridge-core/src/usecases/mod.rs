//! Use cases orchestrating domain entities through port interfaces
//!
//! - [`IntakeUseCase`] - classify an inbound event, materialize its content,
//!   notify the embedded runtime
//! - [`RuntimeNotifier`] - readiness-gated, fire-and-forget delivery to the
//!   embedded runtime
//! - [`LaunchDownloadUseCase`] - hand a URL to the platform's default
//!   handler with a chooser fallback
//! - [`RequestDispatcher`] - method-call dispatch for requests arriving
//!   from the embedded runtime

pub mod intake;
pub mod launch;
pub mod notify;
pub mod requests;

pub use intake::IntakeUseCase;
pub use launch::LaunchDownloadUseCase;
pub use notify::RuntimeNotifier;
pub use requests::RequestDispatcher;
