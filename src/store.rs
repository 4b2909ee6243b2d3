// Catalog store: holds the fetched collection and decides whether a fetch result may land.
// A result applies only with the newest ticket; anything older arrived after the view moved on.

use serde_json::Value;

use crate::error::EngineError;
use crate::types::*;

/// Parse a movie-list response. Accepts `{ "movies": [...] }` or a bare array.
///
/// A missing or non-array `movies` value is an empty catalog. Records that are not
/// JSON objects are skipped; odd fields inside an object degrade on their own.
/// Only unparseable JSON is an error.
pub fn parse_catalog(payload: &str) -> Result<Catalog, EngineError> {
    let value: Value = serde_json::from_str(payload)?;

    let records = match value {
        Value::Array(records) => records,
        Value::Object(mut envelope) => match envelope.remove("movies") {
            Some(Value::Array(records)) => records,
            other => {
                tracing::warn!(movies = ?other, "Movie list response has no movies array");
                Vec::new()
            }
        },
        other => {
            tracing::warn!(payload = ?other, "Movie list response is not an object or array");
            Vec::new()
        }
    };

    let movies = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Movie>(record) {
            Ok(movie) => Some(movie),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipped malformed movie record");
                None
            }
        })
        .collect();

    Ok(Catalog::new(movies))
}

/// Parse a movie-detail response `{ "movie": {...} }`. A missing or null movie is `None`.
pub fn parse_movie(payload: &str) -> Result<Option<Movie>, EngineError> {
    let value: Value = serde_json::from_str(payload)?;
    let record = match value {
        Value::Object(mut envelope) => envelope.remove("movie").unwrap_or(Value::Null),
        _ => Value::Null,
    };
    if record.is_null() {
        return Ok(None);
    }
    serde_json::from_value(record)
        .map(Some)
        .map_err(|e| EngineError::MalformedCatalog(e.to_string()))
}

/// Identifies one catalog fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u32);

impl FetchTicket {
    pub fn from_id(id: u32) -> Self {
        FetchTicket(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}

/// What happened to a fetch result handed to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result replaced the catalog (an empty one on failure).
    Applied,
    /// A newer fetch was started or the view detached; the result was dropped.
    Stale,
}

/// Owns the catalog for one browse view.
#[derive(Debug, Default)]
pub struct CatalogStore {
    catalog: Catalog,
    generation: u32,
    pending: Option<u32>,
}

impl CatalogStore {
    pub fn new() -> Self {
        CatalogStore::default()
    }

    /// Start a fetch. Any earlier outstanding ticket becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(self.generation);
        tracing::debug!(ticket = self.generation, "Catalog fetch started");
        FetchTicket(self.generation)
    }

    /// Hand a fetch result to the store. Failures fall back to an empty catalog.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Catalog, EngineError>,
    ) -> FetchOutcome {
        if self.pending != Some(ticket.0) {
            tracing::debug!(
                ticket = ticket.0,
                pending = ?self.pending,
                "Ignored stale catalog fetch result"
            );
            return FetchOutcome::Stale;
        }
        self.pending = None;

        self.catalog = match result {
            Ok(catalog) => {
                tracing::info!(movies = catalog.len(), "Catalog replaced");
                catalog
            }
            Err(e) => {
                tracing::warn!(error = %e, "Catalog fetch failed, using empty catalog");
                Catalog::empty()
            }
        };
        FetchOutcome::Applied
    }

    /// The view is going away; no outstanding fetch may write into it.
    pub fn detach(&mut self) {
        if let Some(ticket) = self.pending.take() {
            tracing::debug!(ticket, "Detached with catalog fetch in flight");
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
