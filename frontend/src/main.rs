mod components;
mod hooks;
mod services;

use components::graph_widget::GraphWidget;
use shared::WIDGET_CONTAINER_ID;

fn main() {
    let container = gloo::utils::document().get_element_by_id(WIDGET_CONTAINER_ID);

    // Only the dashboard page carries the container
    if let Some(root) = container {
        yew::Renderer::<GraphWidget>::with_root(root).render();
    }
}
