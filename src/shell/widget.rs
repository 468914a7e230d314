//! Rendering widget seam
//!
//! The interactive documentation view is produced by Swagger UI. The shell
//! only ever hands it a URL; everything else is the widget's business.

/// Turns a spec URL into a live documentation view
pub trait RenderWidget {
    /// Handle to one rendered view; dropping it discards the view
    type Instance;

    fn render(&mut self, url: &str) -> Self::Instance;
}

/// Something that can be embedded into the portal page
pub trait Markup {
    fn markup(&self) -> String;
}

/// DOM id of the widget container
pub const SWAGGER_UI_DOM_ID: &str = "swagger-ui";

/// Stylesheet and scripts Swagger UI needs, served from the unpkg CDN
pub const SWAGGER_UI_ASSETS: &str = r#"<link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-standalone-preset.js"></script>"#;

/// Swagger UI in read-only mode ("try it out" disabled)
#[derive(Debug, Clone)]
pub struct SwaggerUiWidget {
    dom_id: String,
}

impl SwaggerUiWidget {
    pub fn new(dom_id: impl Into<String>) -> Self {
        Self {
            dom_id: dom_id.into(),
        }
    }
}

impl Default for SwaggerUiWidget {
    fn default() -> Self {
        Self::new(SWAGGER_UI_DOM_ID)
    }
}

impl RenderWidget for SwaggerUiWidget {
    type Instance = SwaggerUiMount;

    fn render(&mut self, url: &str) -> SwaggerUiMount {
        SwaggerUiMount {
            url: url.to_string(),
            dom_id: self.dom_id.clone(),
        }
    }
}

/// One Swagger UI instance bound to a spec URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwaggerUiMount {
    pub url: String,
    pub dom_id: String,
}

/// Encode `value` as a JS string literal that is safe inside `<script>`
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace("</", "<\\/")
}

impl Markup for SwaggerUiMount {
    /// Boot script that mounts Swagger UI on the container
    fn markup(&self) -> String {
        format!(
            r#"<script>
        window.addEventListener('load', function() {{
            window.ui = SwaggerUIBundle({{
                url: {url},
                dom_id: {dom_id},
                deepLinking: true,
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "BaseLayout",
                supportedSubmitMethods: [],
                syntaxHighlight: {{
                    activated: true,
                    theme: "agate"
                }}
            }});
        }});
    </script>"#,
            url = js_string(&self.url),
            dom_id = js_string(&format!("#{}", self.dom_id)),
        )
    }
}
