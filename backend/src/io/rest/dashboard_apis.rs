use axum::{
    extract::{Path, State},
    response::Html,
    routing::get,
    Router,
};
use tracing::info;

use crate::domain::{GraphDashboardWidget, PLUGIN_NAME};
use crate::error::ApiError;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/:page", get(admin_page))
}

/// Admin page shell. The dashboard gets the widget box and the script in the footer
async fn admin_page(
    State(state): State<AppState>,
    Path(page): Path<String>,
) -> Result<Html<String>, ApiError> {
    info!("GET /wp-admin/{}", page);

    if !page.ends_with(".php") {
        return Err(ApiError::NotFound(format!("admin page '{}'", page)));
    }
    Ok(Html(render_admin_page(&state.plugin, &page)))
}

pub fn render_admin_page(plugin: &GraphDashboardWidget, hook: &str) -> String {
    let widget_box = if plugin.shows_on(hook) {
        let widget = plugin.widget();
        format!(
            concat!(
                r#"<div class="postbox" id="{}"><h2 class="hndle">{}</h2>"#,
                r#"<div class="inside">{}</div></div>"#
            ),
            widget.id,
            escape_html(widget.title),
            widget.render_container()
        )
    } else {
        String::new()
    };

    let footer_script = match plugin.script_for_hook(hook) {
        Some(script) => format!(
            r#"<script id="{}-js" type="module" src="{}" data-dependencies="{}"></script>"#,
            script.handle,
            escape_html(&script.versioned_src()),
            escape_html(&script.dependencies.join(","))
        ),
        None => String::new(),
    };

    format!(
        concat!(
            "<!DOCTYPE html>\n<html>\n",
            "<head><meta charset=\"utf-8\"><title>{} &lsaquo; {}</title></head>\n",
            "<body class=\"wp-admin\">\n<div id=\"wpbody-content\">{}</div>\n{}\n</body>\n",
            "</html>\n"
        ),
        escape_html(hook),
        PLUGIN_NAME,
        widget_box,
        footer_script
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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
