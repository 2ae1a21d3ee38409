//! Sky object records and the query lifecycle state.

use crate::location::Coordinate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification reported by the sky service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Star,
    Planet,
    Moon,
    Sun,
    #[serde(other)]
    Other,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Star => write!(f, "star"),
            Self::Planet => write!(f, "planet"),
            Self::Moon => write!(f, "moon"),
            Self::Sun => write!(f, "sun"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// One visible object, as returned by `GET /sky-objects`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkyObject {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    pub constellation: String,
    /// Degrees above the horizon.
    #[serde(rename = "altitude")]
    pub altitude_deg: f64,
    /// Degrees from north, clockwise.
    #[serde(rename = "azimuth")]
    pub azimuth_deg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
    /// Illuminated fraction in percent; moon-like objects only.
    #[serde(default, rename = "phase", skip_serializing_if = "Option::is_none")]
    pub phase_percent: Option<f64>,
}

/// Remote-side failures. All of them collapse into `QueryState::error_message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryFailure {
    /// Connection, DNS, TLS or I/O failure.
    Network(String),
    /// The service answered with a non-2xx status.
    Status(u16),
    /// The body was not a JSON array of sky objects.
    Decode(String),
}

impl fmt::Display for QueryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Status(code) => write!(f, "Failed to fetch sky objects (HTTP {})", code),
            Self::Decode(msg) => write!(f, "Invalid response from sky service: {}", msg),
        }
    }
}

impl std::error::Error for QueryFailure {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

impl fmt::Display for QueryPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
            Self::Success => write!(f, "success"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// What the view sees of the query lifecycle.
///
/// `objects` survives a failed query: the last good result stays visible
/// next to the error. It is replaced wholesale on every success.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryState {
    pub phase: QueryPhase,
    pub objects: Vec<SkyObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Monotonic id of the query this state belongs to; 0 before the first.
    pub request_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl QueryState {
    /// Enter `loading` for a new query. Any previous error is dropped at once.
    pub fn begin(&mut self, request_id: u64, coordinate: Coordinate) {
        self.phase = QueryPhase::Loading;
        self.error_message = None;
        self.request_id = request_id;
        self.coordinate = Some(coordinate);
    }

    /// Apply the outcome of query `request_id`.
    ///
    /// Returns false, leaving the state untouched, when the outcome belongs
    /// to a query that has since been replaced or the state is not loading.
    pub fn complete(
        &mut self,
        request_id: u64,
        outcome: Result<Vec<SkyObject>, QueryFailure>,
    ) -> bool {
        if self.request_id != request_id || self.phase != QueryPhase::Loading {
            return false;
        }
        match outcome {
            Ok(objects) => {
                self.phase = QueryPhase::Success;
                self.objects = objects;
                self.error_message = None;
            }
            Err(failure) => {
                self.phase = QueryPhase::Failed;
                self.error_message = Some(failure.to_string());
            }
        }
        self.updated_at = Some(Utc::now());
        true
    }

    pub fn is_loading(&self) -> bool {
        self.phase == QueryPhase::Loading
    }
}
