// One browse view: catalog store, browse state and page-size policy behind a single dispatcher.

use crate::error::EngineError;
use crate::fetch::CatalogClient;
use crate::filter;
use crate::responsive::PageSizePolicy;
use crate::state::{self, Action, BrowseState, Effect};
use crate::store::{CatalogStore, FetchOutcome, FetchTicket};
use crate::types::*;

/// Owns everything the browse page needs between UI events.
#[derive(Debug)]
pub struct BrowseSession {
    config: CatalogConfig,
    policy: PageSizePolicy,
    store: CatalogStore,
    state: BrowseState,
}

impl BrowseSession {
    /// Mount a session. The page size comes from the viewport width at mount time.
    pub fn new(config: CatalogConfig, viewport_width_px: u32) -> Result<Self, EngineError> {
        let policy = PageSizePolicy::from_config(&config)?;
        let state = BrowseState::new(policy.page_size_for(viewport_width_px));
        Ok(BrowseSession {
            config,
            policy,
            store: CatalogStore::new(),
            state,
        })
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.store.begin_fetch()
    }

    /// Start a fetch against the configured `api_base_url`.
    ///
    /// Fails without opening a ticket when no base URL is configured.
    pub fn begin_api_fetch(&mut self) -> Result<(FetchTicket, CatalogClient), EngineError> {
        let client = CatalogClient::from_config(&self.config)?;
        Ok((self.store.begin_fetch(), client))
    }

    /// Deliver a fetch result. Applied results re-clamp the current page.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Catalog, EngineError>,
    ) -> FetchOutcome {
        let outcome = self.store.complete(ticket, result);
        if outcome == FetchOutcome::Applied {
            self.state = state::reconcile(&self.state, self.store.catalog());
        }
        outcome
    }

    /// The view was torn down; late fetch results are dropped from now on.
    pub fn detach(&mut self) {
        self.store.detach();
    }

    /// Run one action through the reducer and return the effects to perform.
    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        let transition = state::reduce(&self.state, action, self.store.catalog(), &self.policy);
        self.state = transition.state;
        transition.effects
    }

    pub fn view(&self) -> PageView {
        state::page_view(&self.state, self.store.catalog())
    }

    pub fn featured(&self) -> &[Movie] {
        filter::featured(self.store.catalog().movies(), self.config.featured_limit)
    }

    /// Suggestions for a movie's detail page. Unknown or empty ids have none.
    pub fn related(&self, id: &MovieId) -> Vec<&Movie> {
        if id.as_str().is_empty() {
            return Vec::new();
        }
        let catalog = self.store.catalog();
        match catalog.find(id) {
            Some(current) => filter::related(catalog.movies(), current, self.config.related_limit),
            None => Vec::new(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    pub fn state(&self) -> &BrowseState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        self.store.catalog()
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(count: usize) -> Catalog {
        Catalog::new(
            (0..count)
                .map(|i| {
                    Movie::new(i.to_string(), format!("Title {i}"))
                        .with_genres(&[if i % 3 == 0 { "Horror" } else { "Comedy" }])
                })
                .collect(),
        )
    }

    fn loaded(count: usize, width: u32) -> BrowseSession {
        let mut session = BrowseSession::new(CatalogConfig::default(), width).unwrap();
        let ticket = session.begin_fetch();
        session.complete_fetch(ticket, Ok(catalog(count)));
        session
    }

    #[test]
    fn mount_uses_viewport_width() {
        let narrow = BrowseSession::new(CatalogConfig::default(), 375).unwrap();
        assert_eq!(narrow.state().page.page_size, PageSize::COMPACT);

        let wide = BrowseSession::new(CatalogConfig::default(), 1440).unwrap();
        assert_eq!(wide.state().page.page_size, PageSize::WIDE);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = CatalogConfig {
            compact_page_size: 0,
            ..Default::default()
        };
        assert!(BrowseSession::new(config, 800).is_err());
    }

    #[test]
    fn empty_before_fetch() {
        let session = BrowseSession::new(CatalogConfig::default(), 800).unwrap();
        let view = session.view();
        assert!(view.visible.is_empty());
        assert_eq!(view.display_total_pages, 1);
    }

    #[test]
    fn end_to_end_browse() {
        let mut session = loaded(40, 1024);
        assert_eq!(session.view().total_pages, 2);

        session.dispatch(Action::NextPage);
        assert_eq!(session.view().visible[0].id.as_str(), "25");

        let effects = session.dispatch(Action::ResetToHome);
        assert_eq!(effects, vec![Effect::ScrollToTop]);
        assert_eq!(session.state().page.current_page, 1);
    }

    #[test]
    fn late_fetch_after_detach_is_dropped() {
        let mut session = BrowseSession::new(CatalogConfig::default(), 1024).unwrap();
        let ticket = session.begin_fetch();
        assert!(session.is_loading());
        session.detach();

        assert_eq!(session.complete_fetch(ticket, Ok(catalog(5))), FetchOutcome::Stale);
        assert!(session.catalog().is_empty());
    }

    #[test]
    fn refetch_reclamps_page() {
        let mut session = loaded(40, 1024);
        session.dispatch(Action::NextPage);
        assert_eq!(session.state().page.current_page, 2);

        let ticket = session.begin_fetch();
        session.complete_fetch(ticket, Err(EngineError::Fetch("offline".to_string())));
        assert_eq!(session.state().page.current_page, 1);
        assert!(session.view().visible.is_empty());
    }

    #[test]
    fn featured_strip_uses_config_limit() {
        let session = loaded(40, 1024);
        let strip = session.featured();
        assert_eq!(strip.len(), 10);
        assert_eq!(strip[0].id.as_str(), "0");
    }

    #[test]
    fn related_by_id() {
        let session = loaded(40, 1024);
        // Movie 0 is Horror; so are 3, 6, ..., 39 (13 others).
        let related = session.related(&MovieId::new("0"));
        assert_eq!(related.len(), 13);
        assert!(related.iter().all(|m| m.has_genre("Horror")));
        assert!(session.related(&MovieId::new("missing")).is_empty());
    }

    #[test]
    fn api_fetch_uses_configured_base_url() {
        let config = CatalogConfig {
            api_base_url: "https://api.moviesfear.test/".to_string(),
            ..Default::default()
        };
        let mut session = BrowseSession::new(config, 1024).unwrap();
        let (ticket, client) = session.begin_api_fetch().unwrap();
        assert_eq!(client.movies_url(), "https://api.moviesfear.test/api/movies");
        assert!(session.is_loading());
        assert_eq!(session.complete_fetch(ticket, Ok(catalog(3))), FetchOutcome::Applied);
    }

    #[test]
    fn api_fetch_without_base_url_opens_no_ticket() {
        let mut session = BrowseSession::new(CatalogConfig::default(), 1024).unwrap();
        assert!(matches!(
            session.begin_api_fetch(),
            Err(EngineError::InvalidConfig(_))
        ));
        assert!(!session.is_loading());
    }
}
