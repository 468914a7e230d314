//! Documentation shell controller
//!
//! Owns the navigation, the active entry, the content pane and the sidebar.
//! Event handlers get it by `&mut` reference; there is no other state.

use tracing::{debug, error, info, warn};

use super::sidebar::{PreferenceStore, Sidebar};
use super::source::SpecSource;
use super::widget::RenderWidget;
use crate::error::FetchError;
use crate::indexer::SpecMetadata;

/// Navigation key of the static home entry
pub const HOME_KEY: &str = "about";

/// One link in the sidebar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub key: String,
    pub label: String,
    pub hover_text: String,
    pub has_tooltip: bool,
}

impl NavEntry {
    fn home() -> Self {
        Self {
            key: HOME_KEY.to_string(),
            label: "Home".to_string(),
            hover_text: "Home page and API overview".to_string(),
            has_tooltip: false,
        }
    }

    fn for_spec(spec: &SpecMetadata) -> Self {
        let has_tooltip = !spec.description.trim().is_empty();
        let hover_text = if has_tooltip {
            spec.description.clone()
        } else {
            format!("{} API documentation", spec.title)
        };

        Self {
            key: spec.id.clone(),
            label: spec.title.clone(),
            hover_text,
            has_tooltip,
        }
    }

    pub fn is_home(&self) -> bool {
        self.key == HOME_KEY
    }
}

/// What the content area currently shows
#[derive(Debug)]
pub enum ContentPane<I> {
    Home,
    /// Spec selected, existence check still in flight
    Loading { id: String },
    Rendered { id: String, instance: I },
    Error { id: String, message: String },
}

/// Pending spec selection
///
/// Completing a ticket that is no longer the latest one has no effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavTicket {
    generation: u64,
    id: String,
}

impl NavTicket {
    pub fn id(&self) -> &str {
        &self.id
    }
}

pub struct DocsShell<S, W: RenderWidget, P> {
    source: S,
    widget: W,
    preferences: P,
    specs: Vec<SpecMetadata>,
    nav: Vec<NavEntry>,
    active: String,
    content: ContentPane<W::Instance>,
    generation: u64,
    sidebar: Sidebar,
}

impl<S, W, P> DocsShell<S, W, P>
where
    S: SpecSource,
    W: RenderWidget,
    P: PreferenceStore,
{
    /// Fetch the index and build the shell, showing the home view
    ///
    /// An unreachable or invalid index leaves only the home entry.
    pub async fn load(source: S, widget: W, preferences: P) -> Self {
        let specs = match source.fetch_index().await {
            Ok(specs) => {
                info!(count = specs.len(), "Loaded sidebar data");
                specs
            }
            Err(e) => {
                error!(error = %e, "Error loading sidebar data");
                Vec::new()
            }
        };

        Self::with_index(source, widget, preferences, specs)
    }

    /// Build the shell from an already fetched index
    pub fn with_index(source: S, widget: W, preferences: P, specs: Vec<SpecMetadata>) -> Self {
        let nav = std::iter::once(NavEntry::home())
            .chain(specs.iter().map(NavEntry::for_spec))
            .collect();
        let sidebar = Sidebar::restore(&preferences);

        Self {
            source,
            widget,
            preferences,
            specs,
            nav,
            active: HOME_KEY.to_string(),
            content: ContentPane::Home,
            generation: 0,
            sidebar,
        }
    }

    pub fn specs(&self) -> &[SpecMetadata] {
        &self.specs
    }

    pub fn nav_entries(&self) -> &[NavEntry] {
        &self.nav
    }

    pub fn active_key(&self) -> &str {
        &self.active
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.active == key
    }

    pub fn content(&self) -> &ContentPane<W::Instance> {
        &self.content
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn preferences(&self) -> &P {
        &self.preferences
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn sidebar_mut(&mut self) -> &mut Sidebar {
        &mut self.sidebar
    }

    /// Finish a sidebar drag and persist the resulting width
    ///
    /// Returns false when no drag was in progress.
    pub fn end_resize(&mut self) -> bool {
        self.sidebar.end_drag(&mut self.preferences)
    }

    /// Activate the home entry; cancels any pending selection
    pub fn show_home(&mut self) {
        self.generation += 1;
        self.active = HOME_KEY.to_string();
        self.content = ContentPane::Home;
    }

    /// Mark `key` active and start loading it
    ///
    /// Returns a ticket when a spec fetch is needed. Home and keys that are
    /// not in the navigation switch to the home view immediately.
    pub fn begin_navigation(&mut self, key: &str) -> Option<NavTicket> {
        if key == HOME_KEY {
            self.show_home();
            return None;
        }

        if !self.nav.iter().any(|entry| entry.key == key) {
            warn!(key = %key, "Unknown navigation key, showing home");
            self.show_home();
            return None;
        }

        self.generation += 1;
        self.active = key.to_string();
        // Replacing the pane drops any previous widget instance
        self.content = ContentPane::Loading {
            id: key.to_string(),
        };

        Some(NavTicket {
            generation: self.generation,
            id: key.to_string(),
        })
    }

    /// Apply the outcome of resolving `ticket`'s spec
    ///
    /// Returns false when the ticket has been superseded.
    pub fn finish_navigation(
        &mut self,
        ticket: NavTicket,
        resolved: Result<String, FetchError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(id = %ticket.id, "Discarding stale navigation result");
            return false;
        }

        self.content = match resolved {
            Ok(url) => {
                debug!(id = %ticket.id, url = %url, "Rendering spec");
                let instance = self.widget.render(&url);
                ContentPane::Rendered {
                    id: ticket.id,
                    instance,
                }
            }
            Err(e) => {
                error!(id = %ticket.id, error = %e, "Failed to load API spec");
                ContentPane::Error {
                    id: ticket.id,
                    message: format!("Error loading API specification: {e}"),
                }
            }
        };
        true
    }

    /// Select a navigation entry and wait for its content
    pub async fn select(&mut self, key: &str) {
        if let Some(ticket) = self.begin_navigation(key) {
            let resolved = self.source.resolve_spec(ticket.id()).await;
            self.finish_navigation(ticket, resolved);
        }
        self.sidebar.after_navigation();
    }
}
