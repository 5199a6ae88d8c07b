use secrecy::Secret;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{LogbookStore, RatioConfig};

pub type LogbookStoreType = Arc<RwLock<dyn LogbookStore + Send + Sync>>;

#[derive(Clone)]
pub struct AppState {
    pub logbook_store: LogbookStoreType,
    pub ratio_config: Arc<RatioConfig>,
    pub form_token_secret: Secret<String>,
}

impl AppState {
    pub fn new(
        logbook_store: LogbookStoreType,
        ratio_config: RatioConfig,
        form_token_secret: Secret<String>,
    ) -> Self {
        Self {
            logbook_store,
            ratio_config: Arc::new(ratio_config),
            form_token_secret,
        }
    }
}
