//! # Vaultpress Core
//!
//! Core data models, error types, and configuration shared by the vaultpress
//! crates.
//!
//! ## Core Modules
//!
//! - [`models`] - Syntax tree ([`Node`]), frontmatter and documents
//! - [`index`] - Note/media lookup tables and the cross-post slug map
//! - [`config`] - Publishing configuration
//! - [`error`] - Error type and Result alias
//! - [`utils`] - HTML escaping and serialization helpers
//!
//! ## Usage Examples
//!
//! ### Building a tree by hand
//!
//! ```
//! use vaultpress_core::prelude::*;
//!
//! let root = Node::root(vec![Node::paragraph(vec![Node::text("See [[Note]]")])]);
//! assert_eq!(root.text_content(), "See [[Note]]");
//! ```
//!
//! ### Configuration
//!
//! ```
//! use vaultpress_core::prelude::*;
//!
//! let config = PublishConfig::builder("/vault")
//!     .scan_order(ScanOrder::Sorted)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.media_prefix, "/media");
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod models;
pub mod utils;

pub use config::*;
pub use error::{Error, Result};
pub use index::{MediaIndex, NoteIndex, SlugMap};
pub use models::*;
pub use utils::{escape_html, to_json_string};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{PublishConfig, ScanOrder};
    pub use crate::error::{Error, Result};
    pub use crate::index::{MediaIndex, NoteIndex, SlugMap};
    pub use crate::models::{Document, Frontmatter, Node, TableAlignment};
}
