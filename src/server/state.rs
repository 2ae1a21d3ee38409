use crate::location::LocationResolver;
use crate::sky::SkyService;
use std::sync::Arc;

pub struct AppState {
    pub resolver: LocationResolver,
    pub service: Arc<dyn SkyService>,
}
