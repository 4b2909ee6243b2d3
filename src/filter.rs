// Filter engine: search text, category and genre composed with AND, order preserved.
// Also derives the featured strip and related-movie suggestions from the same catalog.

use crate::types::*;

/// Filter the catalog by a query. Output keeps catalog order.
pub fn filter<'a>(movies: &'a [Movie], query: &Query) -> Vec<&'a Movie> {
    let needle = query.search_term.to_lowercase();
    let filtered: Vec<&Movie> = movies
        .iter()
        .filter(|movie| matches(movie, &needle, query))
        .collect();

    tracing::debug!(
        total = movies.len(),
        matched = filtered.len(),
        search = %query.search_term,
        category = ?query.category,
        genre = ?query.genre,
        "Filtered catalog"
    );
    filtered
}

/// Filter an already-filtered slice again. Used where the input is borrowed rows.
pub fn refilter<'a>(movies: &[&'a Movie], query: &Query) -> Vec<&'a Movie> {
    let needle = query.search_term.to_lowercase();
    movies
        .iter()
        .copied()
        .filter(|movie| matches(movie, &needle, query))
        .collect()
}

/// Does a single movie satisfy the query? `needle` is the lowercased search term.
fn matches(movie: &Movie, needle: &str, query: &Query) -> bool {
    title_matches(movie, needle)
        && query.category.as_deref().map_or(true, |c| movie.has_category(c))
        && query.genre.as_deref().map_or(true, |g| movie.has_genre(g))
}

fn title_matches(movie: &Movie, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    // A record without a title cannot contain a non-empty term.
    movie
        .title
        .as_deref()
        .is_some_and(|title| title.to_lowercase().contains(needle))
}

/// The first `limit` movies of the unfiltered catalog.
pub fn featured(movies: &[Movie], limit: usize) -> &[Movie] {
    &movies[..limit.min(movies.len())]
}

/// Movies sharing the current movie's first genre or first actor, excluding itself.
pub fn related<'a>(movies: &'a [Movie], current: &Movie, limit: usize) -> Vec<&'a Movie> {
    let genre = current.first_genre();
    let actor = current.first_actor();
    if genre.is_none() && actor.is_none() {
        return Vec::new();
    }

    movies
        .iter()
        .filter(|m| m.id != current.id)
        .filter(|m| genre.is_some_and(|g| m.has_genre(g)) || actor.is_some_and(|a| m.has_actor(a)))
        .take(limit)
        .collect()
}
