pub mod options;

pub use options::VoltrackOptions;
