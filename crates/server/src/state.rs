use crate::{config::Config, mailer::Mailer};
use database::services::lifecycle::RequestService;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub requests: RequestService,
    pub mailer: Arc<Mailer>,
    pub config: Arc<Config>,
    /// Serializes export/report runs so two near-simultaneous callers cannot
    /// read the same approved batch before either purges it.
    pub export_lock: Arc<Mutex<()>>,
}
