use std::sync::Arc;

use crate::models::Report;
use crate::storage::StorageConfig;

#[derive(Clone)]
pub struct AppState {
    pub report: Arc<Report>,
    pub storage: Arc<StorageConfig>,
}
