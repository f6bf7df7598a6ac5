//! # lintra-core
//!
//! Foundation crate for the Lintra quality-profile persistence layer.
//! Defines errors, config, the clock collaborator, storage traits and row
//! types. `lintra-storage` depends on this.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::StorageConfig;
pub use errors::error_code::LintraErrorCode;
pub use errors::StorageError;
pub use traits::clock::{Clock, SystemClock};
pub use traits::storage::IQualityProfiles;
