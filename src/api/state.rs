use std::path::PathBuf;
use std::sync::Arc;

use crate::dom::Document;
use crate::fetch::Loader;

#[derive(Clone)]
pub struct AppState {
    pub loader: Arc<Loader>,
    /// Parsed host page; every request renders into its own copy
    pub template: Arc<Document>,
    pub static_dir: Option<PathBuf>,
    pub cors_origin: String,
}
