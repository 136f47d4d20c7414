//! Renderers for Doxygen XML elements, grouped by the kind of element.

pub mod compounds;
pub mod inline;
pub mod members;
pub mod sections;
pub mod structural;
