//! Input adapters: price frames and the sector universe.

pub mod frame;
pub mod sectors;

pub use frame::{bars_from_frame, FrameError};
pub use sectors::{SectorMap, Universe, UniverseError, UNKNOWN_SECTOR};
