//! Application state for the web server.

use std::sync::Arc;

use notas::{Branding, GradeLookup, HtmlRenderer, NotasConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Lookup over the lazily loaded grade dataset.
    pub lookup: Arc<GradeLookup>,
    /// Page renderer with the institution branding baked in.
    pub renderer: Arc<HtmlRenderer>,
    /// Effective configuration.
    pub config: Arc<NotasConfig>,
}

impl AppState {
    /// Create new application state. The dataset is read on the first request.
    pub fn new(config: NotasConfig) -> notas::Result<Self> {
        let renderer = HtmlRenderer::new(Branding::from_config(&config))?;
        let lookup = GradeLookup::new(&config);
        Ok(Self::with_parts(config, lookup, renderer))
    }

    /// Create state around an existing lookup.
    pub fn with_parts(config: NotasConfig, lookup: GradeLookup, renderer: HtmlRenderer) -> Self {
        Self {
            lookup: Arc::new(lookup),
            renderer: Arc::new(renderer),
            config: Arc::new(config),
        }
    }
}
