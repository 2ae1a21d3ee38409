//! Sky query subsystem: remote object lookup and the query lifecycle.

pub mod controller;
pub mod service;
pub mod types;

pub use controller::SkyQueryController;
pub use service::{HttpSkyService, SkyService};
pub use types::{ObjectKind, QueryFailure, QueryPhase, QueryState, SkyObject};
