//! AsciiDoc text primitives shared by all renderers.

mod text;
mod title;

pub use text::{escape_text, render_text, sanitize};
pub use title::{heading, title, TitleAttributes};
