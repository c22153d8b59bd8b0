//! # Metadata Module
//!
//! This module holds [`RunMetadata`], the one-row summary of a processing run
//! that ends up in the append-only history log.
//!
//! ## Lifecycle
//!
//! 1. Created at run start with a generated timestamp and seeded from the
//!    header fields of the input file.
//! 2. Updated with the discharge capacity and oxidation degree.
//! 3. Updated with the internal resistance, only when the resistance stage ran.
//! 4. Appended to the history log.
//!
//! Each update consumes the value and returns a new one; nothing mutates it in
//! place after construction.

mod error;
mod run;


pub use error::MetadataError;
pub use run::{format_value, round4, RunMetadata, HISTORY_COLUMNS, JST_OFFSET_SECONDS, UNSET};
