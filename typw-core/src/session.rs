//! Session facade wiring search, resolution, and preview population
//! (made by FontLab https://www.fontlab.com/)

use std::sync::Arc;

use crate::catalog::{fetch_catalog, FamilyEntry};
use crate::error::{FontError, Result};
use crate::listing;
use crate::preview::{
    NoopListener, PreviewCache, PreviewListener, PreviewState, Spawner, ThreadSpawner,
};
use crate::remote::RemoteSource;
use crate::resolve::resolve;
use crate::stylesheet::{fetch_font_faces, ResolvedFontData};

/// Upper bound on catalog entries considered per search.
pub const CATALOG_SCAN_LIMIT: usize = 1000;

/// One interactive session: a shared remote source plus the preview cache
/// that lives from session start to session end.
///
/// Every search fetches its own catalog snapshot; nothing persists across
/// sessions. The listener is the shell's redraw hook for resolved previews.
pub struct FontSession<S> {
    source: Arc<S>,
    previews: Arc<PreviewCache>,
    spawner: Arc<dyn Spawner>,
    listener: Arc<dyn PreviewListener>,
}

impl<S: RemoteSource + 'static> FontSession<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            previews: Arc::new(PreviewCache::new()),
            spawner: Arc::new(ThreadSpawner),
            listener: Arc::new(NoopListener),
        }
    }

    /// Replace the resolved-preview listener.
    pub fn with_listener(mut self, listener: Arc<dyn PreviewListener>) -> Self {
        self.listener = listener;
        self
    }

    /// Replace the background task spawner.
    pub fn with_spawner(mut self, spawner: Arc<dyn Spawner>) -> Self {
        self.spawner = spawner;
        self
    }

    /// Fetch a fresh catalog snapshot and filter it by `query`.
    ///
    /// Returns every match; callers apply their own display limit.
    pub fn search(&self, query: &str) -> Result<Vec<FamilyEntry>> {
        let catalog = fetch_catalog(self.source.as_ref())?;
        let families = listing::list_families(&catalog, CATALOG_SCAN_LIMIT);
        Ok(listing::filter(&families, query))
    }

    /// Resolve `query` to a canonical family and fetch its face records.
    /// This is the synchronous "apply font" path.
    pub fn resolve_and_fetch(&self, query: &str) -> Result<ResolvedFontData> {
        let catalog = fetch_catalog(self.source.as_ref())?;
        let family = resolve(query, &catalog).ok_or_else(|| FontError::not_found(query))?;
        fetch_font_faces(self.source.as_ref(), family)
    }

    /// Fire-and-forget preview population for one family.
    ///
    /// The result arrives through the session listener; repeated calls for a
    /// pending or resolved family issue no new fetch.
    pub fn request_preview(&self, family: &str) {
        let source = Arc::clone(&self.source);
        self.previews.request(
            family,
            self.spawner.as_ref(),
            Arc::clone(&self.listener),
            move |name| {
                let catalog = fetch_catalog(source.as_ref()).ok()?;
                let canonical = resolve(name, &catalog)?;
                let data = fetch_font_faces(source.as_ref(), canonical).ok()?;
                data.preview_url().map(str::to_string)
            },
        );
    }

    /// Current preview state for a family, if any request was made.
    pub fn preview_state(&self, family: &str) -> Option<PreviewState> {
        self.previews.get(family)
    }

    /// Number of preview keys requested so far this session.
    pub fn preview_count(&self) -> usize {
        self.previews.len()
    }

    /// Drop all cached previews (session end).
    pub fn clear_previews(&self) {
        self.previews.clear();
    }
}
