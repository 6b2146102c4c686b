//! Interaction controller
//!
//! Binds the two page events (search submit, "Episodes" click) to the
//! catalog and the renderers, and tracks which panels are visible.
//!
//! Handlers take `&self` and never hold the page borrow across an `.await`,
//! so several transitions can be in flight at once on a single thread. By
//! default the response that resolves last overwrites its panel, even when
//! its request was issued earlier. Setting
//! [`ControllerConfig::discard_stale_responses`] drops any response that is
//! no longer the latest for its panel.

use std::cell::{Cell, Ref, RefCell, RefMut};

use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::dom::{Document, NodeId};
use crate::error::{CatalogError, Result};
use crate::render::{SHOW_CLASS, SHOW_ID_KEY, episodes_control, render_episodes, render_shows};
use crate::types::ShowId;

/// Element ids of the page handles the controller needs
#[derive(Debug, Clone)]
pub struct HandleSelectors {
    pub search_form: String,
    pub term_input: String,
    pub shows_list: String,
    pub episodes_list: String,
    pub episodes_area: String,
    /// Where failure messages go; skipped when the page has no such element
    pub alert: Option<String>,
}

impl Default for HandleSelectors {
    fn default() -> Self {
        Self {
            search_form: "searchForm".to_string(),
            term_input: "searchForm-term".to_string(),
            shows_list: "showsList".to_string(),
            episodes_list: "episodesList".to_string(),
            episodes_area: "episodesArea".to_string(),
            alert: Some("alertArea".to_string()),
        }
    }
}

/// Resolved page handles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiHandles {
    pub search_form: NodeId,
    pub term_input: NodeId,
    pub shows_list: NodeId,
    pub episodes_list: NodeId,
    pub episodes_area: NodeId,
    pub alert: Option<NodeId>,
}

impl UiHandles {
    /// Look up every handle in `doc` by element id
    ///
    /// # Errors
    /// `ElementNotFound` for the first required handle missing from the page
    pub fn locate(doc: &Document, selectors: &HandleSelectors) -> Result<Self> {
        let find = |id: &str| {
            doc.find_by_id(id)
                .ok_or_else(|| CatalogError::ElementNotFound(format!("#{id}")))
        };

        Ok(Self {
            search_form: find(&selectors.search_form)?,
            term_input: find(&selectors.term_input)?,
            shows_list: find(&selectors.shows_list)?,
            episodes_list: find(&selectors.episodes_list)?,
            episodes_area: find(&selectors.episodes_area)?,
            alert: selectors.alert.as_deref().and_then(|id| doc.find_by_id(id)),
        })
    }
}

/// Which panels are visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    ShowingShows,
    ShowingShowsAndEpisodes,
}

/// Form submission on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitEvent {
    target: NodeId,
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            default_prevented: false,
        }
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Stop the host from performing its own form submission
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Pointer click on an element of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    pub target: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Submit(SubmitEvent),
    Click(ClickEvent),
}

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Shows panel replaced, episodes panel hidden
    ShowsRendered(usize),
    /// Episodes panel replaced and revealed
    EpisodesRendered { show_id: ShowId, count: usize },
    /// A newer request for the same panel was issued; the response, or its
    /// failure, was dropped without touching the page
    Stale,
    /// No handler is registered for this event
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct ControllerConfig {
    /// Drop responses superseded by a newer request (default: false, last resolved wins)
    pub discard_stale_responses: bool,
    /// Write failure messages into the alert handle (default: false)
    pub show_failures: bool,
}

/// Event handlers for the show search page
pub struct Controller<C> {
    catalog: C,
    page: RefCell<Document>,
    ui: UiHandles,
    config: ControllerConfig,
    search_seq: Cell<u64>,
    episodes_seq: Cell<u64>,
}

impl<C: Catalog> Controller<C> {
    /// Take ownership of the page and put it in the initial state:
    /// no shows listed, episodes area hidden
    pub fn new(catalog: C, mut page: Document, ui: UiHandles, config: ControllerConfig) -> Self {
        page.empty(ui.shows_list);
        page.set_hidden(ui.episodes_area, true);
        if let Some(alert) = ui.alert {
            page.set_hidden(alert, true);
        }

        Self {
            catalog,
            page: RefCell::new(page),
            ui,
            config,
            search_seq: Cell::new(0),
            episodes_seq: Cell::new(0),
        }
    }

    pub fn handles(&self) -> &UiHandles {
        &self.ui
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Borrow the page; must not be held across a handler call
    pub fn page(&self) -> Ref<'_, Document> {
        self.page.borrow()
    }

    /// Mutably borrow the page (e.g., to type into the search field)
    pub fn page_mut(&self) -> RefMut<'_, Document> {
        self.page.borrow_mut()
    }

    pub fn into_page(self) -> Document {
        self.page.into_inner()
    }

    pub fn state(&self) -> PanelState {
        if self.page.borrow().is_hidden(self.ui.episodes_area) {
            PanelState::ShowingShows
        } else {
            PanelState::ShowingShowsAndEpisodes
        }
    }

    /// Route an event to its handler
    ///
    /// Submits of the search form and clicks inside a show's episodes
    /// control are handled; everything else is [`Outcome::Ignored`].
    ///
    /// # Errors
    /// Whatever the handler returns; the page is left untouched on error
    pub async fn dispatch(&self, event: &mut UiEvent) -> Result<Outcome> {
        match event {
            UiEvent::Submit(submit) if submit.target() == self.ui.search_form => {
                self.on_search_submit(submit).await
            }
            UiEvent::Click(click) if self.is_episodes_control(click.target) => {
                self.on_episodes_click(click).await
            }
            _ => Ok(Outcome::Ignored),
        }
    }

    /// Search with the current input value and list the results
    ///
    /// On success the episodes area is hidden whatever its previous state.
    ///
    /// # Errors
    /// Catalog errors, unchanged
    pub async fn on_search_submit(&self, event: &mut SubmitEvent) -> Result<Outcome> {
        let term = self.page.borrow().value(self.ui.term_input).to_string();
        event.prevent_default();

        let ticket = next_ticket(&self.search_seq);
        debug!(%term, ticket, "search submitted");

        let result = self.catalog.search_shows(&term).await;

        if self.is_stale(&self.search_seq, ticket) {
            debug!(%term, ticket, ok = result.is_ok(), "stale search response dropped");
            return Ok(Outcome::Stale);
        }
        let shows = result.map_err(|e| self.fail("search", e))?;

        // a pending episode lookup belongs to the replaced result list
        next_ticket(&self.episodes_seq);

        let mut page = self.page.borrow_mut();
        page.set_hidden(self.ui.episodes_area, true);
        render_shows(&mut page, self.ui.shows_list, &shows);
        self.clear_alert(&mut page);

        Ok(Outcome::ShowsRendered(shows.len()))
    }

    /// Load and reveal the episodes of the show the click landed in
    ///
    /// # Errors
    /// - `InvalidTarget` if the click is not inside a rendered show
    /// - Catalog errors, unchanged
    pub async fn on_episodes_click(&self, event: &ClickEvent) -> Result<Outcome> {
        let show_id = match self.show_id_for(event.target) {
            Ok(id) => id,
            Err(e) => return Err(self.fail("episodes", e)),
        };

        let ticket = next_ticket(&self.episodes_seq);
        debug!(show_id, ticket, "episodes requested");

        let result = self.catalog.get_episodes(show_id).await;

        if self.is_stale(&self.episodes_seq, ticket) {
            debug!(show_id, ticket, ok = result.is_ok(), "stale episodes response dropped");
            return Ok(Outcome::Stale);
        }
        let episodes = result.map_err(|e| self.fail("episodes", e))?;

        let mut page = self.page.borrow_mut();
        render_episodes(
            &mut page,
            self.ui.episodes_list,
            self.ui.episodes_area,
            &episodes,
        );
        self.clear_alert(&mut page);

        Ok(Outcome::EpisodesRendered {
            show_id,
            count: episodes.len(),
        })
    }

    fn is_episodes_control(&self, target: NodeId) -> bool {
        let page = self.page.borrow();
        self.show_container(&page, target)
            .and_then(|container| episodes_control(&page, container))
            .is_some_and(|control| page.is_within(target, control))
    }

    /// Rendered show container enclosing `target`: the direct child of the
    /// shows list on its ancestor path, never an element from summary markup
    fn show_container(&self, page: &Document, target: NodeId) -> Option<NodeId> {
        let mut node = target;
        loop {
            let parent = page.parent(node)?;
            if parent == self.ui.shows_list {
                return Some(node).filter(|&c| page.has_class(c, SHOW_CLASS));
            }
            node = parent;
        }
    }

    /// Recover the id embedded on the show container enclosing `target`
    fn show_id_for(&self, target: NodeId) -> Result<ShowId> {
        let page = self.page.borrow();

        let container = self
            .show_container(&page, target)
            .ok_or_else(|| CatalogError::InvalidTarget("click is not inside a show".to_string()))?;

        let raw = page.data(container, SHOW_ID_KEY).ok_or_else(|| {
            CatalogError::InvalidTarget(format!("show container has no data-{SHOW_ID_KEY}"))
        })?;

        raw.parse()
            .map_err(|_| CatalogError::InvalidTarget(format!("malformed show id {raw:?}")))
    }

    fn is_stale(&self, counter: &Cell<u64>, ticket: u64) -> bool {
        self.config.discard_stale_responses && counter.get() != ticket
    }

    fn fail(&self, transition: &'static str, error: CatalogError) -> CatalogError {
        warn!(transition, error = %error, "transition aborted");

        if self.config.show_failures
            && let Some(alert) = self.ui.alert
        {
            let mut page = self.page.borrow_mut();
            page.empty(alert);
            let message = page.create_text(&format!("Could not load {transition}: {error}"));
            page.append_child(alert, message);
            page.set_hidden(alert, false);
        }

        error
    }

    fn clear_alert(&self, page: &mut Document) {
        if let Some(alert) = self.ui.alert {
            page.empty(alert);
            page.set_hidden(alert, true);
        }
    }
}

fn next_ticket(counter: &Cell<u64>) -> u64 {
    let ticket = counter.get() + 1;
    counter.set(ticket);
    ticket
}
