//! Application layer: services and use cases
//!
//! This layer adapts the search engine to the filesystem and depends on
//! I/O boundary traits.

pub mod criteria;
pub mod display;
pub mod entry;
pub mod error;
pub mod error_ext;
pub mod services;

pub use criteria::{is_dir_search, is_file_search, parse_stage, EntryCriteria};
pub use display::TreeDisplay;
pub use entry::{EntryKind, FsChildrenProducer, FsEntry};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
