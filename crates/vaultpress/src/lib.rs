//! # Vaultpress
//!
//! Publishing pipeline: indexes a vault once, then resolves Obsidian syntax in
//! each document and renders it to HTML.
//!
//! ```no_run
//! use vaultpress::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let config = PublishConfig::from_env();
//! let publisher = Publisher::new(config, SlugMap::new())?;
//!
//! let doc = publisher.render_markdown("See [[Some Note]] and ![[diagram.png]]");
//! println!("{}", doc.html);
//! # Ok(())
//! # }
//! ```

pub mod publisher;

pub use publisher::{Publisher, RenderedDocument};
pub use vaultpress_parser::{Transform, TransformStats};
pub use vaultpress_vault::VaultIndex;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::publisher::{Publisher, RenderedDocument};
    pub use vaultpress_parser::prelude::*;
    pub use vaultpress_vault::VaultIndex;
}
