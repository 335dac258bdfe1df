//! Volume inventory management.
//!
//! - **VolumeManager**: owns the ordered volume snapshot, refreshes it from
//!   the engine, and prunes
//! - **Volume**: one entry in the snapshot (re-exported from [`crate::volumes`])
//!
//! # Example
//!
//! ```rust,no_run
//! use voltrack::{VoltrackOptions, VolumeManager};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = VolumeManager::from_options(&VoltrackOptions::default())?;
//! manager.refresh().await?;
//!
//! for volume in manager.volumes().iter() {
//!     let [driver, name, branch] = volume.display_fields(false);
//!     println!("{driver}\t{name}\t{branch}");
//! }
//! # Ok(())
//! # }
//! ```

mod manager;

pub use crate::volumes::{Volume, VolumeContext, VolumeInfo};
pub use manager::VolumeManager;
