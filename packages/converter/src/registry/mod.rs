//! Element registry system for rendering Doxygen XML.
//!
//! Every element tag (and, for `compounddef`, `sectiondef` and `memberdef`,
//! every `kind` attribute) maps to one [`ElementKind`]. The [`RenderEngine`]
//! resolves that variant for each node and dispatches to the matching
//! renderer in [`handlers`].

mod config;
mod core;
mod engine;
pub mod handlers;
mod types;

pub use config::create_doxygen_registry;
pub use core::ElementRegistry;
pub use engine::{join_blocks, RenderEngine, BLOCK_SEPARATOR, LINE_SEPARATOR};
pub use types::{ElementKind, ListMode, MemberKind, RenderContext, SectionKind};
