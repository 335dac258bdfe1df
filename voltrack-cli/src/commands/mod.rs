pub mod list;
pub mod prune;
pub mod rm;
