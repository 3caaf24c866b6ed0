//! Plugin lifecycle surface: metadata, the dashboard widget registration and
//! the front-end script asset.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use shared::WIDGET_CONTAINER_ID;
use tracing::{info, warn};

pub const PLUGIN_NAME: &str = "Graph Dashboard Widget";
pub const PLUGIN_VERSION: &str = "1.0.0";

/// Admin page the widget and its script belong to
pub const DASHBOARD_HOOK: &str = "index.php";

/// Relative location of the bundled script and its manifest inside the plugin directory
pub const SCRIPT_PATH: &str = "build/index.js";
pub const ASSET_MANIFEST_PATH: &str = "build/index.asset.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardWidget {
    pub id: &'static str,
    pub title: &'static str,
}

impl Default for DashboardWidget {
    fn default() -> Self {
        Self {
            id: "dashboard_graph_widget",
            title: "Graph Widget",
        }
    }
}

impl DashboardWidget {
    /// Markup placed in the widget body; the front end mounts into it
    pub fn render_container(&self) -> String {
        format!(r#"<div id="{}"></div>"#, WIDGET_CONTAINER_ID)
    }
}

/// Dependency handles and version emitted next to the bundled script
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetManifest {
    #[serde(default)]
    pub dependencies: Vec<String>,
    pub version: String,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            dependencies: Vec::new(),
            version: PLUGIN_VERSION.to_string(),
        }
    }
}

impl AssetManifest {
    /// Read `build/index.asset.json` under `plugin_dir`.
    ///
    /// A missing manifest falls back to the defaults; an unreadable or malformed one
    /// is an error.
    pub fn load(plugin_dir: &Path) -> anyhow::Result<Self> {
        let path = plugin_dir.join(ASSET_MANIFEST_PATH);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("No asset manifest at {}, using plugin version", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("could not read {}", path.display()));
            }
        };

        let manifest: AssetManifest = serde_json::from_str(&raw)
            .with_context(|| format!("invalid asset manifest {}", path.display()))?;
        info!("Loaded asset manifest {} (version {})", path.display(), manifest.version);
        Ok(manifest)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptAsset {
    pub handle: &'static str,
    pub src: String,
    pub dependencies: Vec<String>,
    pub version: String,
    pub in_footer: bool,
}

impl ScriptAsset {
    pub fn new(plugin_base_path: &str, manifest: AssetManifest) -> Self {
        Self {
            handle: "graph-dashboard-script",
            src: format!("{}{}", plugin_base_path, SCRIPT_PATH),
            dependencies: manifest.dependencies,
            version: manifest.version,
            in_footer: true,
        }
    }

    /// Script URL with the cache-busting version appended
    pub fn versioned_src(&self) -> String {
        format!("{}?ver={}", self.src, self.version)
    }
}

/// Everything the host needs to show the widget
#[derive(Debug, Clone)]
pub struct GraphDashboardWidget {
    widget: DashboardWidget,
    script: ScriptAsset,
}

impl GraphDashboardWidget {
    pub fn new(script: ScriptAsset) -> Self {
        Self {
            widget: DashboardWidget::default(),
            script,
        }
    }

    pub fn widget(&self) -> &DashboardWidget {
        &self.widget
    }

    /// The script to enqueue on admin page `hook`, if any
    pub fn script_for_hook(&self, hook: &str) -> Option<&ScriptAsset> {
        (hook == DASHBOARD_HOOK).then_some(&self.script)
    }

    /// Whether the widget is shown on admin page `hook`
    pub fn shows_on(&self, hook: &str) -> bool {
        hook == DASHBOARD_HOOK
    }
}
