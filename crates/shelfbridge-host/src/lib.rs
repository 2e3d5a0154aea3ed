//! Shelfbridge host adapters
//!
//! Secondary (driven) adapters implementing the core's port traits against
//! the real host platform:
//!
//! - [`FsContentSource`] - external references resolved via the filesystem
//! - [`FsPrivateStorage`] - atomic writes into the private storage root
//! - [`MpscRuntimeChannel`] - message channel into the embedded runtime
//! - [`SystemUrlHandler`] - default URL handler with chooser fallback

pub mod channel;
pub mod content;
pub mod launcher;
pub mod storage;

pub use channel::{MpscRuntimeChannel, RuntimeCall};
pub use content::FsContentSource;
pub use launcher::SystemUrlHandler;
pub use storage::FsPrivateStorage;
