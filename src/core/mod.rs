pub mod block;
pub mod container;

pub use block::{BlockOutput, BuildingBlock};
pub use container::Container;
