//! Server-side rendering of the portal page
//!
//! Produces the same layout the browser shell maintains: sidebar navigation,
//! the home panel and the Swagger UI container.

use std::fmt::Write;

use super::controller::{ContentPane, DocsShell, NavEntry};
use super::sidebar::PreferenceStore;
use super::source::SpecSource;
use super::sidebar::{MAX_SIDEBAR_WIDTH, MIN_SIDEBAR_WIDTH};
use super::widget::{Markup, RenderWidget, SWAGGER_UI_ASSETS, SWAGGER_UI_DOM_ID};

/// Where the page loads its client script from
pub const PORTAL_SCRIPT_PATH: &str = "/portal.js";

/// Where the client script reports a finished sidebar drag
pub const SIDEBAR_PREFERENCES_PATH: &str = "/preferences/sidebar";

/// Browser side of the shell: sidebar drag, width persistence and the mobile menu
///
/// Width bounds come from the drag handle's `data-min`/`data-max`. A finished
/// drag is posted to the preview server; on a plain static host the width is
/// persisted locally instead.
pub const PORTAL_SCRIPT: &str = r#"(function () {
  "use strict";

  var KEY = "sidebarWidth";
  var ONE_YEAR = 31536000;
  var root = document.documentElement;
  var sidebar = document.querySelector(".sidebar");
  var overlay = document.querySelector(".sidebar-overlay");
  var handle = document.querySelector(".sidebar-drag-handle");
  var menuButton = document.querySelector(".mobile-menu-button");

  var min = handle ? parseInt(handle.dataset.min, 10) : 200;
  var max = handle ? parseInt(handle.dataset.max, 10) : 500;
  var width = handle ? parseInt(handle.style.left, 10) : 280;

  function clamp(value) {
    return Math.min(max, Math.max(min, value));
  }

  function applyWidth(value) {
    root.style.setProperty("--sidebar-width", value + "px");
    if (handle) handle.style.left = value + "px";
  }

  function persist(value) {
    try {
      localStorage.setItem(KEY, String(value));
    } catch (e) {}
    document.cookie = KEY + "=" + value + "; path=/; max-age=" + ONE_YEAR + "; SameSite=Lax";
  }

  function hasCookie() {
    return document.cookie.split(";").some(function (pair) {
      return pair.trim().indexOf(KEY + "=") === 0;
    });
  }

  // Width saved in local storage but never sent to the server
  if (!hasCookie()) {
    var saved = null;
    try {
      saved = localStorage.getItem(KEY);
    } catch (e) {}
    var parsed = saved === null ? NaN : parseInt(saved, 10);
    if (!isNaN(parsed)) {
      width = clamp(parsed);
      applyWidth(width);
      persist(width);
    }
  }

  function pointerX(event) {
    if (event.changedTouches && event.changedTouches.length) {
      return event.changedTouches[0].clientX;
    }
    return event.clientX;
  }

  var startX = null;
  var startWidth = width;

  function beginDrag(event) {
    startX = pointerX(event);
    startWidth = width;
    document.body.classList.add("resizing");
    event.preventDefault();
  }

  function dragTo(event) {
    if (startX === null) return;
    width = clamp(startWidth + pointerX(event) - startX);
    applyWidth(width);
  }

  function endDrag(event) {
    if (startX === null) return;
    var from = startX;
    var to = pointerX(event);
    startX = null;
    document.body.classList.remove("resizing");

    fetch("/preferences/sidebar", {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      credentials: "same-origin",
      body: JSON.stringify({ from: Math.round(from), to: Math.round(to) })
    })
      .then(function (response) {
        if (!response.ok) throw new Error("HTTP " + response.status);
        return response.json();
      })
      .then(function (body) {
        width = body.width;
        applyWidth(width);
        persist(width);
      })
      .catch(function () {
        persist(width);
      });
  }

  if (handle) {
    handle.addEventListener("mousedown", beginDrag);
    handle.addEventListener("touchstart", beginDrag, { passive: false });
    document.addEventListener("mousemove", dragTo);
    document.addEventListener("touchmove", dragTo);
    document.addEventListener("mouseup", endDrag);
    document.addEventListener("touchend", endDrag);
  }

  function isMenuOpen() {
    return !!sidebar && sidebar.classList.contains("active");
  }

  function setMenu(open) {
    if (sidebar) sidebar.classList.toggle("active", open);
    if (overlay) overlay.classList.toggle("active", open);
    if (menuButton) menuButton.setAttribute("aria-expanded", String(open));
  }

  if (menuButton) {
    menuButton.addEventListener("click", function () {
      setMenu(!isMenuOpen());
    });
  }
  if (overlay) {
    overlay.addEventListener("click", function () {
      setMenu(false);
    });
  }

  // The server decides whether the menu survives navigation
  document.querySelectorAll(".sidebar a").forEach(function (link) {
    link.addEventListener("click", function () {
      var url = new URL(link.getAttribute("href"), window.location.href);
      url.searchParams.set("vw", String(window.innerWidth));
      if (isMenuOpen()) {
        url.searchParams.set("menu", "open");
      } else {
        url.searchParams.delete("menu");
      }
      link.href = url.toString();
    });
  });
})();
"#;

/// Escape text for use in HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn nav_item(entry: &NavEntry, active: bool) -> String {
    let mut classes = Vec::new();
    if entry.is_home() {
        classes.push("home-link");
    }
    if entry.has_tooltip {
        classes.push("has-tooltip");
    }
    if active {
        classes.push("active");
    }

    format!(
        r#"<li><a href="?api={key}" data-api="{key}" class="{classes}" title="{title}">{label}</a></li>"#,
        key = escape_html(&entry.key),
        classes = classes.join(" "),
        title = escape_html(&entry.hover_text),
        label = escape_html(&entry.label),
    )
}

/// Render the whole portal page for the shell's current state
pub fn render_page<S, W, P>(shell: &DocsShell<S, W, P>) -> String
where
    S: SpecSource,
    W: RenderWidget,
    W::Instance: Markup,
    P: PreferenceStore,
{
    let width = shell.sidebar().width();
    let home_visible = matches!(shell.content(), ContentPane::Home);

    let mut nav = String::new();
    for entry in shell.nav_entries() {
        nav.push_str(&nav_item(entry, shell.is_active(&entry.key)));
        nav.push('\n');
    }

    let mut overview = String::new();
    for spec in shell.specs() {
        let _ = writeln!(
            overview,
            r#"<li><a href="?api={id}">{title}</a> <span class="version">v{version}</span><p>{description}</p></li>"#,
            id = escape_html(&spec.id),
            title = escape_html(&spec.title),
            version = escape_html(&spec.version),
            description = escape_html(&spec.description),
        );
    }
    if overview.is_empty() {
        overview.push_str("<li>No API specifications available.</li>\n");
    }

    let content = match shell.content() {
        ContentPane::Home => String::new(),
        ContentPane::Loading { id } => format!(
            r#"<div class="loading">Loading {}...</div>"#,
            escape_html(id)
        ),
        ContentPane::Rendered { instance, .. } => instance.markup(),
        ContentPane::Error { message, .. } => format!(
            r#"<div class="error-message">{}</div>"#,
            escape_html(message)
        ),
    };

    let (home_display, widget_display) = if home_visible {
        ("block", "none")
    } else {
        ("none", "block")
    };
    let menu_open = shell.sidebar().is_menu_open();
    let menu_class = if menu_open { " active" } else { "" };

    format!(
        r#"<!DOCTYPE html>
<html lang="en" style="--sidebar-width: {width}px">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>API Documentation</title>
    {assets}
    <link rel="stylesheet" href="css/styles.css">
    <script src="{script}" defer></script>
</head>
<body>
    <button class="mobile-menu-button" aria-label="Toggle menu" aria-expanded="{menu_open}">&#9776;</button>
    <div class="sidebar-overlay{menu_class}"></div>
    <aside class="sidebar{menu_class}">
        <a href="?api=about" class="logo-link">API Documentation</a>
        <nav>
            <ul>
{nav}            </ul>
        </nav>
    </aside>
    <div class="sidebar-drag-handle" style="left: {width}px" data-min="{min_width}" data-max="{max_width}"></div>
    <main class="rightside">
        <div class="content-area">
            <section id="about-section" style="display: {home_display}">
                <h2>Available APIs</h2>
                <ul class="api-overview">
{overview}                </ul>
            </section>
            <div id="{dom_id}" style="display: {widget_display}">
{content}
            </div>
        </div>
    </main>
</body>
</html>
"#,
        assets = SWAGGER_UI_ASSETS,
        dom_id = SWAGGER_UI_DOM_ID,
        script = PORTAL_SCRIPT_PATH,
        min_width = MIN_SIDEBAR_WIDTH,
        max_width = MAX_SIDEBAR_WIDTH,
    )
}
