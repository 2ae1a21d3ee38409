//! SkyScope: pick an observation site by city name or coordinates and list
//! the sky objects a remote service reports as visible there.

pub mod config;
pub mod location;
pub mod render;
pub mod server;
pub mod sky;
