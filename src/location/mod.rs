//! Location subsystem for SkyScope.
//!
//! Turns free text (a known city or a `"lat,lon"` pair) into a validated
//! coordinate and offers incremental suggestions from the built-in directory.

pub mod directory;
pub mod resolver;
pub mod search;
pub mod types;

pub use directory::NamedLocation;
pub use resolver::LocationResolver;
pub use search::SearchBox;
pub use types::{Coordinate, ValidationError};
