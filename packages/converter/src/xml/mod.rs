//! XML tree storage and navigation helpers.

mod tree;
mod utils;

pub use tree::{NodeId, Tree};
pub use utils::{
    child_text, element_children, find_child, find_children, find_children_of_kind,
    find_descendants, get_attribute, get_tag_name, get_text, has_tag, require_attribute,
};
