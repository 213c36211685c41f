use std::sync::Arc;

use tms_carriers::Exporter;

#[derive(Clone)]
pub struct AppState {
    pub exporter: Arc<Exporter>,
}
