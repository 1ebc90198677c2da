//! Tournament snapshot data models.

mod group;
mod placement;
mod region;
mod snapshot;

pub use group::*;
pub use placement::*;
pub use region::*;
pub use snapshot::*;
