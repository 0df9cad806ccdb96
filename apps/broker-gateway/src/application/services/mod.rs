//! Application services orchestrating gateway reads.

pub mod positions;

pub use positions::OptionPositionsService;
