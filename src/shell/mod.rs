//! Documentation shell
//!
//! Builds the sidebar navigation from the generated index and drives the
//! rendering widget when an entry is selected.

mod controller;
mod page;
mod sidebar;
mod source;
mod widget;

pub use controller::{ContentPane, DocsShell, NavEntry, NavTicket, HOME_KEY};
pub use page::{
    escape_html, render_page, PORTAL_SCRIPT, PORTAL_SCRIPT_PATH, SIDEBAR_PREFERENCES_PATH,
};
pub use sidebar::{
    InMemoryPreferences, PreferenceStore, Sidebar, DEFAULT_SIDEBAR_WIDTH, MAX_SIDEBAR_WIDTH,
    MIN_SIDEBAR_WIDTH, MOBILE_BREAKPOINT, SIDEBAR_WIDTH_KEY,
};
pub use source::{spec_path, HttpPortalClient, LocalSite, SpecSource, SPEC_EXTENSION};
pub use widget::{
    Markup, RenderWidget, SwaggerUiMount, SwaggerUiWidget, SWAGGER_UI_ASSETS, SWAGGER_UI_DOM_ID,
};
