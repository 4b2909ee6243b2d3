// Browse state reducer. Query and page state change only through `reduce`.
// Query edits send the page back to 1, page navigation leaves the query alone,
// and reset-to-home clears both together.

use serde::{Deserialize, Serialize};

use crate::filter::filter;
use crate::pagination::{self, PageEntry};
use crate::responsive::PageSizePolicy;
use crate::types::*;

/// Combined query and page state for the browse view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BrowseState {
    pub query: Query,
    pub page: PageState,
}

impl BrowseState {
    pub fn new(page_size: PageSize) -> Self {
        BrowseState {
            query: Query::default(),
            page: PageState::new(page_size),
        }
    }
}

/// User intents forwarded from the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    SetSearch { term: String },
    /// Selecting the `Home` category resets to home.
    SelectCategory { category: String },
    SelectGenre { genre: String },
    PrevPage,
    NextPage,
    GoToPage {
        /// A missing entry is treated like unreadable input.
        #[serde(default)]
        entry: PageEntry,
    },
    ViewportResized { width_px: u32 },
    ResetToHome,
}

/// Side effects the host must perform after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    ScrollToTop,
}

/// Result of one reducer step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: BrowseState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn quiet(state: BrowseState) -> Self {
        Transition {
            state,
            effects: Vec::new(),
        }
    }
}

/// Apply one action. Pure: the catalog and policy are read, never written.
pub fn reduce(
    state: &BrowseState,
    action: Action,
    catalog: &Catalog,
    policy: &PageSizePolicy,
) -> Transition {
    let mut next = state.clone();

    match action {
        Action::SetSearch { term } => {
            next.query.set_search(term);
            next.page.current_page = 1;
        }

        Action::SelectCategory { category } if category == HOME_CATEGORY => {
            return reset_to_home(state);
        }

        Action::SelectCategory { category } => {
            next.query.select_category(category);
            next.page.current_page = 1;
        }

        Action::SelectGenre { genre } => {
            next.query.select_genre(genre);
            next.page.current_page = 1;
        }

        Action::PrevPage => {
            next.page.current_page = pagination::prev_page(state.page.current_page);
        }

        Action::NextPage => {
            let total = total_pages_for(state, catalog);
            next.page.current_page = pagination::next_page(state.page.current_page, total);
        }

        Action::GoToPage { entry } => {
            let total = total_pages_for(state, catalog);
            next.page.current_page =
                pagination::accept_page_entry(&entry, state.page.current_page, total);
        }

        Action::ViewportResized { width_px } => {
            let page_size = policy.page_size_for(width_px);
            if page_size != state.page.page_size {
                next.page.page_size = page_size;
                let total = total_pages_for(&next, catalog);
                next.page.current_page = pagination::clamp_page(state.page.current_page, total);
                tracing::debug!(
                    width_px,
                    page_size = page_size.get(),
                    current_page = next.page.current_page,
                    "Page size changed"
                );
            }
        }

        Action::ResetToHome => return reset_to_home(state),
    }

    Transition::quiet(next)
}

/// Clear the query and return to page 1, keeping the page size. Scrolls to top once.
pub fn reset_to_home(state: &BrowseState) -> Transition {
    Transition {
        state: BrowseState::new(state.page.page_size),
        effects: vec![Effect::ScrollToTop],
    }
}

/// Pull the current page back in range after the catalog was replaced.
pub fn reconcile(state: &BrowseState, catalog: &Catalog) -> BrowseState {
    let mut next = state.clone();
    let total = total_pages_for(state, catalog);
    next.page.current_page = pagination::clamp_page(state.page.current_page, total);
    next
}

/// Filter, paginate, and package the result for rendering.
pub fn page_view(state: &BrowseState, catalog: &Catalog) -> PageView {
    let filtered = filter(catalog.movies(), &state.query);
    let page = pagination::paginate(&filtered, state.page);

    PageView {
        visible: page.visible.iter().map(|m| MovieCard::from(*m)).collect(),
        total_pages: page.total_pages,
        display_total_pages: page.total_pages.max(1),
        current_page: state.page.current_page,
        page_size: state.page.page_size.get(),
        total_results: filtered.len(),
        has_prev: state.page.current_page > 1,
        has_next: state.page.current_page < page.total_pages,
    }
}

fn total_pages_for(state: &BrowseState, catalog: &Catalog) -> u32 {
    let matched = filter(catalog.movies(), &state.query).len();
    pagination::total_pages(matched, state.page.page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 40 movies; three titles contain "dark" in some casing.
    fn forty() -> Catalog {
        let movies = (0..40)
            .map(|i| {
                let title = match i {
                    3 => "The Dark Knight".to_string(),
                    17 => "Dark Waters".to_string(),
                    31 => "into the DARKNESS".to_string(),
                    _ => format!("Movie {i}"),
                };
                let category = if i % 2 == 0 { "Anime" } else { "Hollywood" };
                Movie::new(i.to_string(), title)
                    .with_categories(&[category])
                    .with_genres(&["Action"])
            })
            .collect();
        Catalog::new(movies)
    }

    fn wide() -> BrowseState {
        BrowseState::new(PageSize::WIDE)
    }

    fn apply(state: &BrowseState, action: Action, catalog: &Catalog) -> BrowseState {
        reduce(state, action, catalog, &PageSizePolicy::default()).state
    }

    fn go_to(page: u32) -> Action {
        Action::GoToPage {
            entry: PageEntry::from(page),
        }
    }

    #[test]
    fn forty_movies_two_pages() {
        let catalog = forty();
        let state = wide();

        let first = page_view(&state, &catalog);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.visible.len(), 25);
        assert_eq!(first.visible[0].id.as_str(), "0");
        assert_eq!(first.visible[24].id.as_str(), "24");
        assert!(!first.has_prev);
        assert!(first.has_next);

        let state = apply(&state, Action::NextPage, &catalog);
        let second = page_view(&state, &catalog);
        assert_eq!(second.visible.len(), 15);
        assert_eq!(second.visible[0].id.as_str(), "25");
        assert_eq!(second.visible[14].id.as_str(), "39");
        assert!(!second.has_next);
    }

    #[test]
    fn search_dark_fits_one_page() {
        let catalog = forty();
        let state = apply(
            &wide(),
            Action::SetSearch {
                term: "dark".to_string(),
            },
            &catalog,
        );
        let view = page_view(&state, &catalog);
        assert_eq!(view.total_results, 3);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.visible.len(), 3);
    }

    #[test]
    fn out_of_range_page_entry_is_ignored() {
        let catalog = forty();
        let state = wide();
        assert_eq!(apply(&state, go_to(0), &catalog).page.current_page, 1);
        assert_eq!(apply(&state, go_to(3), &catalog).page.current_page, 1);

        let on_two = apply(&state, go_to(2), &catalog);
        assert_eq!(on_two.page.current_page, 2);
        assert_eq!(apply(&on_two, go_to(0), &catalog).page.current_page, 2);
        assert_eq!(apply(&on_two, go_to(3), &catalog).page.current_page, 2);
    }

    #[test]
    fn unreadable_page_entry_keeps_page() {
        let catalog = forty();
        let on_two = apply(&wide(), go_to(2), &catalog);

        for raw in [
            r#"{"type":"GoToPage","entry":null}"#,
            r#"{"type":"GoToPage","entry":true}"#,
            r#"{"type":"GoToPage"}"#,
        ] {
            let action: Action = serde_json::from_str(raw).unwrap();
            let transition = reduce(&on_two, action, &catalog, &PageSizePolicy::default());
            assert_eq!(transition.state, on_two, "{raw}");
            assert!(transition.effects.is_empty());
        }
    }

    #[test]
    fn reset_clears_everything_and_scrolls_once() {
        let catalog = forty();
        let mut state = wide();
        state = apply(&state, Action::SetSearch { term: "x".to_string() }, &catalog);
        state = apply(
            &state,
            Action::SelectCategory {
                category: "Anime".to_string(),
            },
            &catalog,
        );
        state.page.current_page = 2;

        let transition = reduce(&state, Action::ResetToHome, &catalog, &PageSizePolicy::default());
        assert_eq!(transition.state.query, Query::new());
        assert_eq!(transition.state.query.search_term(), "");
        assert_eq!(transition.state.query.category(), None);
        assert_eq!(transition.state.query.genre(), None);
        assert_eq!(transition.state.page.current_page, 1);
        assert_eq!(transition.state.page.page_size, PageSize::WIDE);
        assert_eq!(transition.effects, vec![Effect::ScrollToTop]);
    }

    #[test]
    fn reset_keeps_page_size() {
        let catalog = forty();
        let state = BrowseState::new(PageSize::COMPACT);
        let transition = reduce(&state, Action::ResetToHome, &catalog, &PageSizePolicy::default());
        assert_eq!(transition.state.page.page_size, PageSize::COMPACT);
    }

    #[test]
    fn home_category_is_reset() {
        let catalog = forty();
        let state = apply(&wide(), Action::SetSearch { term: "dark".to_string() }, &catalog);
        let transition = reduce(
            &state,
            Action::SelectCategory {
                category: HOME_CATEGORY.to_string(),
            },
            &catalog,
            &PageSizePolicy::default(),
        );
        assert!(transition.state.query.is_unconstrained());
        assert_eq!(transition.effects, vec![Effect::ScrollToTop]);
    }

    #[test]
    fn query_edits_return_to_first_page() {
        let catalog = forty();
        let on_two = apply(&wide(), go_to(2), &catalog);

        let searched = apply(&on_two, Action::SetSearch { term: "movie".to_string() }, &catalog);
        assert_eq!(searched.page.current_page, 1);

        let on_two = apply(&searched, go_to(2), &catalog);
        let genre = apply(&on_two, Action::SelectGenre { genre: "Action".to_string() }, &catalog);
        assert_eq!(genre.page.current_page, 1);
    }

    #[test]
    fn category_then_genre_clears_category() {
        let catalog = forty();
        let state = apply(
            &wide(),
            Action::SelectCategory {
                category: "Anime".to_string(),
            },
            &catalog,
        );
        let state = apply(&state, Action::SelectGenre { genre: "Action".to_string() }, &catalog);
        assert_eq!(state.query.category(), None);
        assert_eq!(state.query.genre(), Some("Action"));
    }

    #[test]
    fn navigation_does_not_touch_query() {
        let catalog = forty();
        let state = apply(&wide(), Action::SetSearch { term: "movie".to_string() }, &catalog);
        let next = apply(&state, Action::NextPage, &catalog);
        assert_eq!(next.query, state.query);
        assert_eq!(next.page.current_page, 2);
    }

    #[test]
    fn prev_and_next_stop_at_edges() {
        let catalog = forty();
        assert_eq!(apply(&wide(), Action::PrevPage, &catalog).page.current_page, 1);

        let last = apply(&wide(), go_to(2), &catalog);
        assert_eq!(apply(&last, Action::NextPage, &catalog).page.current_page, 2);
        assert_eq!(apply(&last, Action::PrevPage, &catalog).page.current_page, 1);
    }

    #[test]
    fn resize_switches_page_size() {
        let catalog = forty();
        let state = apply(&wide(), Action::ViewportResized { width_px: 639 }, &catalog);
        assert_eq!(state.page.page_size, PageSize::COMPACT);
        assert_eq!(page_view(&state, &catalog).total_pages, 3);

        let state = apply(&state, Action::ViewportResized { width_px: 640 }, &catalog);
        assert_eq!(state.page.page_size, PageSize::WIDE);
    }

    #[test]
    fn widening_clamps_current_page() {
        let catalog = forty();
        let compact = BrowseState::new(PageSize::COMPACT);
        let on_three = apply(&compact, go_to(3), &catalog);
        assert_eq!(on_three.page.current_page, 3);

        let widened = apply(&on_three, Action::ViewportResized { width_px: 1280 }, &catalog);
        assert_eq!(widened.page.page_size, PageSize::WIDE);
        assert_eq!(widened.page.current_page, 2);
        assert!(!page_view(&widened, &catalog).visible.is_empty());
    }

    #[test]
    fn same_width_class_keeps_page() {
        let catalog = forty();
        let on_two = apply(&wide(), go_to(2), &catalog);
        let resized = apply(&on_two, Action::ViewportResized { width_px: 2000 }, &catalog);
        assert_eq!(resized, on_two);
    }

    #[test]
    fn empty_result_displays_one_page() {
        let catalog = forty();
        let state = apply(&wide(), Action::SetSearch { term: "zzz".to_string() }, &catalog);
        let view = page_view(&state, &catalog);
        assert_eq!(view.total_pages, 0);
        assert_eq!(view.display_total_pages, 1);
        assert_eq!(view.current_page, 1);
        assert!(view.visible.is_empty());
        assert!(!view.has_prev);
        assert!(!view.has_next);
    }

    #[test]
    fn reconcile_after_catalog_shrinks() {
        let catalog = forty();
        let on_two = apply(&wide(), go_to(2), &catalog);

        let smaller = Catalog::new(catalog.movies()[..10].to_vec());
        assert_eq!(reconcile(&on_two, &smaller).page.current_page, 1);
        assert_eq!(reconcile(&on_two, &catalog).page.current_page, 2);
    }

    #[test]
    fn action_json_shape() {
        let action: Action = serde_json::from_str(r#"{"type":"GoToPage","entry":"2"}"#).unwrap();
        assert_eq!(action, go_to_text("2"));

        let action: Action =
            serde_json::from_str(r#"{"type":"ViewportResized","width_px":500}"#).unwrap();
        assert_eq!(action, Action::ViewportResized { width_px: 500 });

        let action: Action = serde_json::from_str(r#"{"type":"ResetToHome"}"#).unwrap();
        assert_eq!(action, Action::ResetToHome);
    }

    fn go_to_text(entry: &str) -> Action {
        Action::GoToPage {
            entry: PageEntry::from(entry),
        }
    }
}
