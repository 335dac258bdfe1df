//! voltrack shared - error types and constants used by the library and the CLI.

pub mod constants;
pub mod errors;

pub use errors::{VoltrackError, VoltrackResult};
