//! Resume-vs-role skill gap: matching, role catalog, learning links.

pub mod analysis;
pub mod catalog;
pub mod handlers;
pub mod matcher;
pub mod resources;
