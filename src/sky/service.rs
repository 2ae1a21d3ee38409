//! Sky object providers.

use super::types::{QueryFailure, SkyObject};
use crate::location::Coordinate;

/// A source of visible sky objects for a coordinate.
///
/// `fetch` blocks; the controller runs it on the blocking thread pool.
pub trait SkyService: Send + Sync + 'static {
    fn fetch(&self, at: Coordinate) -> Result<Vec<SkyObject>, QueryFailure>;
}

// ─── HTTP provider ───────────────────────────────────────────────

const USER_AGENT: &str = concat!("SkyScope/", env!("CARGO_PKG_VERSION"));

/// Queries `GET <base>/sky-objects?lat=..&lon=..`. One attempt, no retry.
pub struct HttpSkyService {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpSkyService {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::AgentBuilder::new().user_agent(USER_AGENT).build(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/sky-objects", self.base_url)
    }
}

impl SkyService for HttpSkyService {
    fn fetch(&self, at: Coordinate) -> Result<Vec<SkyObject>, QueryFailure> {
        let response = self
            .agent
            .get(&self.endpoint())
            .query("lat", &at.latitude.to_string())
            .query("lon", &at.longitude.to_string())
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => QueryFailure::Status(code),
                ureq::Error::Transport(t) => QueryFailure::Network(t.to_string()),
            })?;

        response
            .into_json::<Vec<SkyObject>>()
            .map_err(|e| QueryFailure::Decode(e.to_string()))
    }
}
