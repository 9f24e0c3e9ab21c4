//! Wiki entries — flat-file markdown documents keyed by title
//!
//! The store owns every entry on disk and keeps no copy in memory.
//! Search operates on the title list the store returns.

pub mod error;
pub mod file_ops;
pub mod markdown;
pub mod search;
pub mod store;

pub use error::{WikiError, WikiResult};
pub use store::EntryStore;
