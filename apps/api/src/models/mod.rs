pub mod application;
pub mod bookmark;
pub mod profile;
