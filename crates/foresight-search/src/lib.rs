//! Speed-constrained spacetime path search for FORESIGHT.
//!
//! Best-first search over an [`OccupancyGrid`](foresight_grid::OccupancyGrid):
//! the actor may move through free cells within a time slice as far as its
//! speed allows, then step to the next slice. When the target cannot be
//! reached within the iteration budget the search falls back to the closest
//! node it finalized on the target's slice.

pub mod frontier;
pub mod neighbors;
pub mod node;
pub mod policy;
pub mod search;

pub use node::{NodeId, PathFindNode};
pub use policy::PriorityPolicy;
pub use search::{find_path, find_path_with, ChainIter, SearchOutcome};
