//! # Vault Indexing
//!
//! Scans a vault directory tree once and produces the two read-only lookup
//! tables the resolvers need:
//!
//! - [`NoteIndex`](vaultpress_core::NoteIndex): note name → `+`-escaped vault path
//! - [`MediaIndex`](vaultpress_core::MediaIndex): image file name → web path
//!
//! ## Quick Start
//!
//! ```no_run
//! use vaultpress_vault::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let config = PublishConfig::from_env();
//! let index = VaultIndex::build(&config)?;
//! println!("{} notes, {} images", index.notes.len(), index.media.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Collisions
//!
//! Duplicate names are tolerated: the first file reached by the depth-first
//! traversal wins. With [`ScanOrder::Sorted`](vaultpress_core::ScanOrder)
//! entries are visited in file-name order within each directory, so the
//! winner is reproducible across platforms.
//!
//! ## Missing directories
//!
//! A vault or media root that does not exist yields an empty index rather
//! than an error.

pub mod indexer;
pub mod scanner;

pub use indexer::{VaultIndex, VaultIndexer};
pub use scanner::{ScannedFile, scan};
pub use vaultpress_core::prelude::*;

pub mod prelude {
    pub use crate::indexer::*;
    pub use vaultpress_core::prelude::*;
}
