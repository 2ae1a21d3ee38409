//! The sky query controller — drives one fetch per resolved location.
//!
//! Lifecycle:  idle → loading → success | failed → loading → ...
//!
//! Overlapping queries are handled as cancel-and-replace: submitting a new
//! coordinate aborts the in-flight task, and any late outcome carrying an
//! old request id is discarded by [`QueryState::complete`].
//!
//! The state is published on a `watch` channel. The controller is its only
//! writer; views read it through [`SkyQueryController::subscribe`].

use super::service::SkyService;
use super::types::{QueryFailure, QueryState};
use crate::location::Coordinate;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub struct SkyQueryController {
    service: Arc<dyn SkyService>,
    state: Arc<watch::Sender<QueryState>>,
    next_id: u64,
    in_flight: Option<JoinHandle<()>>,
}

impl SkyQueryController {
    pub fn new(service: impl SkyService) -> Self {
        Self::with_shared(Arc::new(service))
    }

    pub fn with_shared(service: Arc<dyn SkyService>) -> Self {
        let (tx, _rx) = watch::channel(QueryState::default());
        Self {
            service,
            state: Arc::new(tx),
            next_id: 0,
            in_flight: None,
        }
    }

    /// Current state, copied.
    pub fn snapshot(&self) -> QueryState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryState> {
        self.state.subscribe()
    }

    /// Start a query for `at`, replacing any query still in flight.
    ///
    /// The state is `loading` with no error message by the time this returns.
    /// Must be called from within a tokio runtime. Returns the request id.
    pub fn submit(&mut self, at: Coordinate) -> u64 {
        if let Some(previous) = self.in_flight.take() {
            if !previous.is_finished() {
                debug!(request_id = self.next_id, "cancelling superseded query");
            }
            previous.abort();
        }

        self.next_id += 1;
        let id = self.next_id;
        self.state.send_modify(|st| st.begin(id, at));
        info!(request_id = id, lat = at.latitude, lon = at.longitude, "sky query started");

        let service = Arc::clone(&self.service);
        let state = Arc::clone(&self.state);
        self.in_flight = Some(tokio::spawn(async move {
            let outcome = tokio::task::spawn_blocking(move || service.fetch(at))
                .await
                .unwrap_or_else(|e| Err(QueryFailure::Network(format!("query task failed: {}", e))));

            match &outcome {
                Ok(objects) => info!(request_id = id, count = objects.len(), "sky query succeeded"),
                Err(failure) => warn!(request_id = id, %failure, "sky query failed"),
            }

            if !state.send_if_modified(|st| st.complete(id, outcome)) {
                debug!(request_id = id, "discarded stale query outcome");
            }
        }));
        id
    }

    /// Wait for the in-flight query (if any) and return the resulting state.
    pub async fn settle(&mut self) -> QueryState {
        if let Some(handle) = self.in_flight.take() {
            if let Err(e) = handle.await {
                if e.is_panic() {
                    warn!("sky query task panicked: {}", e);
                }
            }
        }
        self.snapshot()
    }

    /// `submit` followed by `settle`.
    pub async fn run(&mut self, at: Coordinate) -> QueryState {
        self.submit(at);
        self.settle().await
    }
}

impl Drop for SkyQueryController {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
