pub mod cli;
pub mod fs_op;
pub mod manifest;
pub mod provision;

pub use crate::manifest::{FixtureEntry, FixtureSpec, Manifest, ManifestError};
pub use crate::provision::{clean, provision, verify, Mismatch, ProvisionError, VerifyReport};
