//! Single-shot filesystem primitives used to realize fixture entries.
//!
//! Each operation either completes or fails with an [`FsOpError`]
//! naming the path and the step that failed; there is no retry or
//! rollback at this level.

pub mod ensure;
pub mod error;
pub mod remove;
pub mod restrict;
pub mod stat;
pub mod write;

pub use ensure::ensure_dir;
pub use error::{FsOp, FsOpError};
pub use remove::{remove_dir_if_empty, remove_path};
pub use restrict::{is_fully_restricted, restrict_file};
pub use stat::PathKind;
pub use write::write_file;
