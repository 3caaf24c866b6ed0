use shared::{GraphDisplay, Period};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::components::graph_line_chart::GraphLineChart;
use crate::hooks::use_graph_view;
use crate::services::{ApiClient, Logger};

#[function_component(GraphWidget)]
pub fn graph_widget() -> Html {
    let api_client = use_memo((), |_| ApiClient::new());
    let graph = use_graph_view(&api_client);

    let on_period_change = {
        let select_period = graph.select_period.clone();
        Callback::from(move |e: Event| {
            let Some(select) = e.target_dyn_into::<HtmlSelectElement>() else {
                return;
            };
            match select.value().parse::<Period>() {
                Ok(period) => select_period.emit(period),
                Err(err) => Logger::warn_with_component("GraphWidget", &err.to_string()),
            }
        })
    };

    let on_retry = {
        let retry = graph.retry.clone();
        Callback::from(move |_: MouseEvent| retry.emit(()))
    };

    let selected = graph.view.period();
    let show_retry = matches!(graph.view.display(), GraphDisplay::Error(_));

    html! {
        <div class="graph-widget border border-secondary m-5 p-5">
            <div class="row mb-3">
                <select class="form-select form-select-lg" onchange={on_period_change}>
                    {for Period::ALL.iter().map(|period| html! {
                        <option
                            value={period.as_query_value()}
                            selected={*period == selected}
                        >
                            {period.label()}
                        </option>
                    })}
                </select>
                <GraphLineChart view={graph.view.clone()} />
                if show_retry {
                    <button class="button graph-widget-retry" onclick={on_retry}>{"Retry"}</button>
                }
            </div>
        </div>
    }
}
