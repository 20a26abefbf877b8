//! Image upload intake.
//!
//! This module provides:
//! - Stored file name generation (`<base>-<millis><ext>`)
//! - The upload gate: MIME allow-listing, field size limits, single file
//!   field enforcement and writing accepted files to disk

pub mod filename;
mod gate;

pub use filename::{stored_name, stored_name_at};
pub use gate::{mime_essence, StoredFile, UploadConfig, UploadError, UploadGate, UploadedFile};
