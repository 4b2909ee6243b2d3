// catalog_core: MoviesFear Rust/WASM catalog engine.
// Filtering, pagination and page sizing live here.
// JS forwards UI events and renders the JSON it gets back.

mod error;
mod fetch;
mod filter;
mod pagination;
mod responsive;
mod session;
mod state;
mod store;
mod types;

use serde::Serialize;
use wasm_bindgen::prelude::*;

pub use error::EngineError;
pub use fetch::CatalogClient;
pub use filter::{featured, filter, refilter, related};
pub use pagination::{
    accept_page_entry, clamp_page, next_page, paginate, prev_page, total_pages, Page, PageEntry,
};
pub use responsive::{page_size_for, PageSizePolicy};
pub use session::BrowseSession;
pub use state::{
    page_view, reconcile, reduce, reset_to_home, Action, BrowseState, Effect, Transition,
};
pub use store::{parse_catalog, parse_movie, CatalogStore, FetchOutcome, FetchTicket};
pub use types::*;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn js_error(err: EngineError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// What `dispatch` hands back to JS.
#[derive(Debug, Serialize)]
struct DispatchResult {
    view: PageView,
    effects: Vec<Effect>,
}

// =============================================================================
// WASM Bindings
// =============================================================================

/// Browse-page engine exposed to JavaScript.
///
/// Lifecycle from JS:
/// 1. `new CatalogEngine(configJson, window.innerWidth)` on mount.
/// 2. `const load = engine.load_catalog()`, then `await load.body()` and
///    `engine.apply_catalog(load.ticket, body)` (or `engine.fail_fetch(load.ticket, msg)`).
///    Hosts fetching on their own use `begin_fetch` for the ticket instead.
/// 3. `engine.dispatch(actionJson)` for every UI event; render the returned view.
/// 4. `engine.detach()` on unmount so a late response is ignored.
#[wasm_bindgen]
pub struct CatalogEngine {
    session: BrowseSession,
}

#[wasm_bindgen]
impl CatalogEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, viewport_width_px: u32) -> Result<CatalogEngine, JsValue> {
        let config = CatalogConfig::from_json(config_json).map_err(js_error)?;
        let session = BrowseSession::new(config, viewport_width_px).map_err(js_error)?;
        Ok(CatalogEngine { session })
    }

    /// Start a catalog fetch and return its ticket.
    pub fn begin_fetch(&mut self) -> u32 {
        self.session.begin_fetch().id()
    }

    /// Start a catalog fetch against the configured `api_base_url`.
    pub fn load_catalog(&mut self) -> Result<CatalogLoad, JsValue> {
        let (ticket, client) = self.session.begin_api_fetch().map_err(js_error)?;
        Ok(CatalogLoad {
            ticket: ticket.id(),
            client,
        })
    }

    /// Deliver a movie-list response body. Returns `false` if the ticket was stale.
    ///
    /// An unreadable body counts as a failed fetch and empties the catalog.
    pub fn apply_catalog(&mut self, ticket: u32, payload: &str) -> bool {
        let result = parse_catalog(payload);
        self.session.complete_fetch(FetchTicket::from_id(ticket), result) == FetchOutcome::Applied
    }

    /// Report a failed fetch. Returns `false` if the ticket was stale.
    pub fn fail_fetch(&mut self, ticket: u32, message: &str) -> bool {
        let result = Err(EngineError::Fetch(message.to_string()));
        self.session.complete_fetch(FetchTicket::from_id(ticket), result) == FetchOutcome::Applied
    }

    /// Unmount: outstanding fetches may no longer write.
    pub fn detach(&mut self) {
        self.session.detach();
    }

    pub fn is_loading(&self) -> bool {
        self.session.is_loading()
    }

    /// Apply a JSON action such as `{"type":"SetSearch","term":"dark"}`.
    /// Returns `{ view, effects }` as JSON.
    pub fn dispatch(&mut self, action_json: &str) -> Result<String, JsValue> {
        let action: Action = serde_json::from_str(action_json)
            .map_err(|e| js_error(EngineError::InvalidAction(e.to_string())))?;

        let effects = self.session.dispatch(action);
        let result = DispatchResult {
            view: self.session.view(),
            effects,
        };

        serde_json::to_string(&result).map_err(|e| js_error(e.into()))
    }

    /// Current page view as JSON.
    pub fn view(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.view()).map_err(|e| js_error(e.into()))
    }

    /// Current query and page state as JSON.
    pub fn state(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.session.state()).map_err(|e| js_error(e.into()))
    }

    /// The "latest" strip as a JSON array of movie cards.
    pub fn featured(&self) -> Result<String, JsValue> {
        let cards: Vec<MovieCard> = self.session.featured().iter().map(MovieCard::from).collect();
        serde_json::to_string(&cards).map_err(|e| js_error(e.into()))
    }

    /// Related movies for a detail page as a JSON array of movie cards.
    pub fn related(&self, movie_id: &str) -> Result<String, JsValue> {
        let cards: Vec<MovieCard> = self
            .session
            .related(&MovieId::new(movie_id))
            .into_iter()
            .map(MovieCard::from)
            .collect();
        serde_json::to_string(&cards).map_err(|e| js_error(e.into()))
    }
}

/// A catalog fetch opened by `CatalogEngine::load_catalog`.
#[wasm_bindgen]
pub struct CatalogLoad {
    ticket: u32,
    client: CatalogClient,
}

#[wasm_bindgen]
impl CatalogLoad {
    /// Ticket to pass back to `apply_catalog` or `fail_fetch`.
    #[wasm_bindgen(getter)]
    pub fn ticket(&self) -> u32 {
        self.ticket
    }

    #[wasm_bindgen(getter)]
    pub fn url(&self) -> String {
        self.client.movies_url()
    }

    /// Resolves to the raw response body. Rejects on network or HTTP errors.
    pub fn body(&self) -> js_sys::Promise {
        let client = self.client.clone();
        wasm_bindgen_futures::future_to_promise(async move {
            let body = client.fetch_catalog_body().await.map_err(js_error)?;
            Ok(JsValue::from_str(&body))
        })
    }
}

/// Fetch the movie list from `{base_url}/api/movies`. Resolves to a JSON array of movies.
#[wasm_bindgen]
pub async fn fetch_catalog(base_url: String) -> Result<String, JsValue> {
    let client = CatalogClient::new(&base_url).map_err(js_error)?;
    let catalog = client.fetch_catalog().await.map_err(js_error)?;
    serde_json::to_string(&catalog).map_err(|e| js_error(e.into()))
}

/// Fetch one movie. Resolves to the movie card as JSON, or `null` if the API has none.
#[wasm_bindgen]
pub async fn fetch_movie(base_url: String, movie_id: String) -> Result<String, JsValue> {
    let client = CatalogClient::new(&base_url).map_err(js_error)?;
    let movie = client
        .fetch_movie(&MovieId::new(movie_id))
        .await
        .map_err(js_error)?;
    let card = movie.as_ref().map(MovieCard::from);
    serde_json::to_string(&card).map_err(|e| js_error(e.into()))
}

/// Category and genre labels for the navigation bar, as JSON.
#[wasm_bindgen]
pub fn navigation_labels() -> Result<String, JsValue> {
    let labels = serde_json::json!({
        "home": HOME_CATEGORY,
        "categories": KNOWN_CATEGORIES,
        "genres": KNOWN_GENRES,
    });
    serde_json::to_string(&labels).map_err(|e| js_error(e.into()))
}

/// Page size for a viewport width under the default policy.
#[wasm_bindgen]
pub fn page_size_for_width(viewport_width_px: u32) -> u32 {
    page_size_for(viewport_width_px).get()
}
