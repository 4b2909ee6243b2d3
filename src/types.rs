// Strong typing over strings. Newtypes for movie ids and page sizes, plus the browse state shapes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::EngineError;

/// Poster shown when a record carries neither a main poster nor samples.
pub const PLACEHOLDER_POSTER: &str = "/placeholder.png";

/// Categories offered by the navigation bar. `Home` is the reset entry, not a filter.
pub const KNOWN_CATEGORIES: [&str; 8] = [
    "Home",
    "Bollywood",
    "Hollywood",
    "South",
    "Web Series",
    "Anime",
    "Documentary",
    "K-Drama",
];

/// Label of the category that navigates home instead of filtering.
pub const HOME_CATEGORY: &str = "Home";

/// Genres offered by the genre dropdown.
pub const KNOWN_GENRES: [&str; 15] = [
    "Action",
    "Thriller",
    "Horror",
    "Comedy",
    "Romance",
    "Sci-Fi",
    "Fantasy",
    "Drama",
    "Mystery",
    "Adventure",
    "Crime",
    "Animation",
    "War",
    "Family",
    "Documentary",
];

/// Opaque movie identifier as issued by the movie API.
///
/// Reads strings and numbers alike; anything else becomes the empty id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Default)]
#[serde(transparent)]
pub struct MovieId(String);

impl<'de> Deserialize<'de> for MovieId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(id) => MovieId(id),
            Value::Number(id) => MovieId(id.to_string()),
            _ => MovieId::default(),
        })
    }
}

impl MovieId {
    pub fn new(id: impl Into<String>) -> Self {
        MovieId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A movie record from the API.
///
/// Only `id`, `title`, `categories`, `genres` and `actors` drive engine logic.
/// Everything else is carried through untouched for rendering.
///
/// Reading is lenient so one odd field never costs the whole record: a missing
/// id is empty, a lone label string counts as a one-label list, and values of
/// the wrong shape read as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: MovieId,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_labels", skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_labels", skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_labels", skip_serializing_if = "Option::is_none")]
    pub actors: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub main_poster: Option<String>,
    #[serde(default, deserialize_with = "lenient_labels", skip_serializing_if = "Option::is_none")]
    pub img_sample: Option<Vec<String>>,
    /// Display-only fields the engine never reads.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Movie {
    /// Minimal record with only an id and a title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Movie {
            id: MovieId::new(id),
            title: Some(title.into()),
            categories: None,
            genres: None,
            actors: None,
            main_poster: None,
            img_sample: None,
            extra: Map::new(),
        }
    }

    pub fn with_categories(mut self, categories: &[&str]) -> Self {
        self.categories = Some(categories.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn with_genres(mut self, genres: &[&str]) -> Self {
        self.genres = Some(genres.iter().map(|g| g.to_string()).collect());
        self
    }

    pub fn with_actors(mut self, actors: &[&str]) -> Self {
        self.actors = Some(actors.iter().map(|a| a.to_string()).collect());
        self
    }

    pub fn has_category(&self, category: &str) -> bool {
        contains_label(self.categories.as_deref(), category)
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        contains_label(self.genres.as_deref(), genre)
    }

    pub fn has_actor(&self, actor: &str) -> bool {
        contains_label(self.actors.as_deref(), actor)
    }

    pub fn first_genre(&self) -> Option<&str> {
        self.genres.as_deref().and_then(|g| g.first()).map(String::as_str)
    }

    pub fn first_actor(&self) -> Option<&str> {
        self.actors.as_deref().and_then(|a| a.first()).map(String::as_str)
    }

    /// Main poster, else the first sample image, else the placeholder.
    /// Empty strings count as missing.
    pub fn poster_url(&self) -> &str {
        self.main_poster
            .as_deref()
            .filter(|p| !p.is_empty())
            .or_else(|| {
                self.img_sample
                    .as_deref()
                    .and_then(|s| s.first())
                    .map(String::as_str)
                    .filter(|s| !s.is_empty())
            })
            .unwrap_or(PLACEHOLDER_POSTER)
    }
}

fn contains_label(labels: Option<&[String]>, label: &str) -> bool {
    labels.is_some_and(|labels| labels.iter().any(|l| l == label))
}

fn lenient_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

/// A list of labels, a single label, or nothing. Non-string list items are dropped.
fn lenient_labels<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(label) => Some(label),
                    _ => None,
                })
                .collect(),
        ),
        Value::String(label) => Some(vec![label]),
        _ => None,
    })
}

/// A movie as handed to the UI: the record plus its resolved poster URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieCard {
    #[serde(flatten)]
    pub movie: Movie,
    pub poster: String,
}

impl From<&Movie> for MovieCard {
    fn from(movie: &Movie) -> Self {
        let mut movie = movie.clone();
        let poster = movie.poster_url().to_string();
        // The resolved poster replaces any raw `poster` field the API sent.
        movie.extra.remove("poster");
        MovieCard { movie, poster }
    }
}

impl std::ops::Deref for MovieCard {
    type Target = Movie;

    fn deref(&self) -> &Movie {
        &self.movie
    }
}

/// The full movie collection in API response order.
///
/// Never mutated in place; a re-fetch replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Catalog {
    movies: Vec<Movie>,
}

impl Catalog {
    pub fn new(movies: Vec<Movie>) -> Self {
        Catalog { movies }
    }

    pub fn empty() -> Self {
        Catalog { movies: Vec::new() }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn find(&self, id: &MovieId) -> Option<&Movie> {
        self.movies.iter().find(|m| &m.id == id)
    }
}

/// Search text plus an optional category or genre.
///
/// Category and genre are mutually exclusive: selecting one clears the other.
/// The default query matches every movie.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "QueryRepr")]
pub struct Query {
    pub(crate) search_term: String,
    pub(crate) category: Option<String>,
    pub(crate) genre: Option<String>,
}

impl Query {
    pub fn new() -> Self {
        Query::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.set_search(term);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.select_category(category);
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.select_genre(genre);
        self
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Select a category and clear any genre. An empty label unsets the category.
    pub fn select_category(&mut self, category: impl Into<String>) {
        self.category = non_empty(category.into());
        self.genre = None;
    }

    /// Select a genre and clear any category. An empty label unsets the genre.
    pub fn select_genre(&mut self, genre: impl Into<String>) {
        self.genre = non_empty(genre.into());
        self.category = None;
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref()
    }

    /// True when the query matches everything.
    pub fn is_unconstrained(&self) -> bool {
        self.search_term.is_empty() && self.category.is_none() && self.genre.is_none()
    }
}

fn non_empty(label: String) -> Option<String> {
    if label.is_empty() {
        None
    } else {
        Some(label)
    }
}

/// Wire shape of a query before the exclusivity check.
#[derive(Debug, Deserialize)]
struct QueryRepr {
    #[serde(default)]
    search_term: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    genre: Option<String>,
}

impl TryFrom<QueryRepr> for Query {
    type Error = EngineError;

    fn try_from(repr: QueryRepr) -> Result<Self, Self::Error> {
        let category = repr.category.and_then(non_empty);
        let genre = repr.genre.and_then(non_empty);
        if category.is_some() && genre.is_some() {
            return Err(EngineError::InvalidAction(
                "a query cannot select both a category and a genre".to_string(),
            ));
        }
        Ok(Query {
            search_term: repr.search_term,
            category,
            genre,
        })
    }
}

/// Number of movies per page. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageSize(u32);

impl PageSize {
    /// Page size below the mobile breakpoint.
    pub const COMPACT: PageSize = PageSize(15);
    /// Page size at or above the mobile breakpoint.
    pub const WIDE: PageSize = PageSize(25);

    pub fn new(size: u32) -> Option<Self> {
        if size == 0 {
            None
        } else {
            Some(PageSize(size))
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::WIDE
    }
}

impl TryFrom<u32> for PageSize {
    type Error = EngineError;

    fn try_from(size: u32) -> Result<Self, Self::Error> {
        PageSize::new(size)
            .ok_or_else(|| EngineError::InvalidConfig("page size must be at least 1".to_string()))
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> u32 {
        size.0
    }
}

/// Current page (1-based) and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    pub current_page: u32,
    pub page_size: PageSize,
}

impl PageState {
    pub fn new(page_size: PageSize) -> Self {
        PageState {
            current_page: 1,
            page_size,
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        PageState::new(PageSize::default())
    }
}

/// Engine configuration passed from JS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the movie API, without the `/api/movies` suffix.
    #[serde(default)]
    pub api_base_url: String,
    /// Viewport widths strictly below this use the compact page size.
    #[serde(default = "default_breakpoint_px")]
    pub breakpoint_px: u32,
    #[serde(default = "default_compact_page_size")]
    pub compact_page_size: u32,
    #[serde(default = "default_wide_page_size")]
    pub wide_page_size: u32,
    /// Length of the "latest" strip above the grid.
    #[serde(default = "default_featured_limit")]
    pub featured_limit: usize,
    /// Cap on related-movie suggestions on the detail page.
    #[serde(default = "default_related_limit")]
    pub related_limit: usize,
}

fn default_breakpoint_px() -> u32 {
    640
}

fn default_compact_page_size() -> u32 {
    PageSize::COMPACT.get()
}

fn default_wide_page_size() -> u32 {
    PageSize::WIDE.get()
}

fn default_featured_limit() -> usize {
    10
}

fn default_related_limit() -> usize {
    30
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            api_base_url: String::new(),
            breakpoint_px: default_breakpoint_px(),
            compact_page_size: default_compact_page_size(),
            wide_page_size: default_wide_page_size(),
            featured_limit: default_featured_limit(),
            related_limit: default_related_limit(),
        }
    }
}

impl CatalogConfig {
    pub fn from_json(config_json: &str) -> Result<Self, EngineError> {
        let config: CatalogConfig = serde_json::from_str(config_json)
            .map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.breakpoint_px == 0 {
            return Err(EngineError::InvalidConfig(
                "breakpoint_px must be at least 1".to_string(),
            ));
        }
        if self.compact_page_size == 0 || self.wide_page_size == 0 {
            return Err(EngineError::InvalidConfig(format!(
                "page sizes must be at least 1 (compact={}, wide={})",
                self.compact_page_size, self.wide_page_size
            )));
        }
        Ok(())
    }
}

/// Everything the UI needs to render the grid and pager. Returned to JS as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageView {
    pub visible: Vec<MovieCard>,
    /// Zero when nothing matches.
    pub total_pages: u32,
    /// `total_pages` floored at 1, for the "Page x / y" label.
    pub display_total_pages: u32,
    pub current_page: u32,
    pub page_size: u32,
    pub total_results: usize,
    pub has_prev: bool,
    pub has_next: bool,
}
