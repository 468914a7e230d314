//! Resizable sidebar and mobile menu state
//!
//! The width lives in an explicit field updated on every resize event,
//! never read back from a rendering surface.

use std::collections::HashMap;

/// Preference key holding the sidebar width in pixels
pub const SIDEBAR_WIDTH_KEY: &str = "sidebarWidth";

pub const MIN_SIDEBAR_WIDTH: u32 = 200;
pub const MAX_SIDEBAR_WIDTH: u32 = 500;
pub const DEFAULT_SIDEBAR_WIDTH: u32 = 280;

/// Viewports at or below this width show the sidebar as an overlay menu
pub const MOBILE_BREAKPOINT: u32 = 768;

/// Client-side key/value persistence (browser local storage or a stand-in)
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

/// Preference store backed by a HashMap
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferences {
    values: HashMap<String, String>,
}

impl InMemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a single value
    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.set(key, value.into());
        store
    }
}

impl PreferenceStore for InMemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    start_x: i32,
    start_width: u32,
}

#[derive(Debug, Clone)]
pub struct Sidebar {
    width: u32,
    drag: Option<DragState>,
    menu_open: bool,
    viewport_width: Option<u32>,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIDEBAR_WIDTH,
            drag: None,
            menu_open: false,
            viewport_width: None,
        }
    }
}

impl Sidebar {
    /// Sidebar with the persisted width, if any
    ///
    /// Values that do not parse are ignored; out-of-range ones are clamped.
    pub fn restore(store: &impl PreferenceStore) -> Self {
        let width = store
            .get(SIDEBAR_WIDTH_KEY)
            .and_then(|raw| parse_width(&raw))
            .map(clamp_width)
            .unwrap_or(DEFAULT_SIDEBAR_WIDTH);

        Self {
            width,
            ..Self::default()
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Pointer pressed on the drag handle at horizontal position `x`
    pub fn begin_drag(&mut self, x: i32) {
        self.drag = Some(DragState {
            start_x: x,
            start_width: self.width,
        });
    }

    /// Pointer moved to `x`; returns the new width
    pub fn drag_to(&mut self, x: i32) -> u32 {
        if let Some(drag) = self.drag {
            let proposed = i64::from(drag.start_width) + i64::from(x) - i64::from(drag.start_x);
            self.width = clamp_width(proposed);
        }
        self.width
    }

    /// Pointer released; persists the width if a drag was in progress
    pub fn end_drag(&mut self, store: &mut impl PreferenceStore) -> bool {
        if self.drag.take().is_none() {
            return false;
        }
        store.set(SIDEBAR_WIDTH_KEY, self.width.to_string());
        true
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    pub fn set_viewport_width(&mut self, width: u32) {
        self.viewport_width = Some(width);
    }

    /// On small screens the overlay menu closes once an entry is picked
    pub fn after_navigation(&mut self) {
        if self
            .viewport_width
            .is_some_and(|width| width <= MOBILE_BREAKPOINT)
        {
            self.close_menu();
        }
    }
}

/// Accepts `"320"` as well as the CSS form `"320px"`
fn parse_width(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.strip_suffix("px").unwrap_or(raw).trim().parse().ok()
}

fn clamp_width(width: i64) -> u32 {
    // Clamped into [200, 500], so the cast is lossless
    width.clamp(i64::from(MIN_SIDEBAR_WIDTH), i64::from(MAX_SIDEBAR_WIDTH)) as u32
}
