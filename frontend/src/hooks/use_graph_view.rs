use std::rc::Rc;

use shared::{FetchTicket, GraphView, Period, Record, Resolution, ServiceError};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::{ApiClient, Logger};

/// `GraphView` wrapped for `use_reducer`
#[derive(Clone, Debug, PartialEq)]
pub struct GraphViewState {
    pub view: GraphView,
}

impl GraphViewState {
    pub fn new(period: Period) -> Self {
        let (view, _) = GraphView::mount(period);
        Self { view }
    }
}

impl Default for GraphViewState {
    fn default() -> Self {
        Self::new(Period::default())
    }
}

pub enum GraphViewAction {
    Select(Period),
    Retry,
    Resolved(FetchTicket, Result<Vec<Record>, ServiceError>),
}

impl Reducible for GraphViewState {
    type Action = GraphViewAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut view = self.view.clone();
        match action {
            GraphViewAction::Select(period) => {
                if view.select_period(period).is_none() {
                    return self;
                }
            }
            GraphViewAction::Retry => {
                view.retry();
            }
            GraphViewAction::Resolved(ticket, outcome) => {
                if view.resolve(ticket, outcome) == Resolution::Stale {
                    return self;
                }
            }
        }
        Rc::new(Self { view })
    }
}

pub struct UseGraphViewHandle {
    pub view: GraphView,
    pub select_period: Callback<Period>,
    pub retry: Callback<()>,
}

/// Owns the widget state and runs one fetch per ticket.
///
/// Responses that come back for an older ticket are dropped by the reducer.
#[hook]
pub fn use_graph_view(api_client: &ApiClient) -> UseGraphViewHandle {
    let state = use_reducer(GraphViewState::default);
    let ticket = state.view.current_ticket();

    {
        let api_client = api_client.clone();
        let dispatcher = state.dispatcher();
        use_effect_with(ticket, move |ticket| {
            let ticket = *ticket;
            spawn_local(async move {
                let period = ticket.period();
                let outcome = api_client.get_window(period).await;
                match &outcome {
                    Ok(records) => Logger::info_with_component(
                        "GraphWidget",
                        &format!("Loaded {} records for {}", records.len(), period),
                    ),
                    Err(e) => Logger::error_with_component(
                        "GraphWidget",
                        &format!("Failed to fetch {}: {}", period, e),
                    ),
                }
                dispatcher.dispatch(GraphViewAction::Resolved(ticket, outcome));
            });
            || ()
        });
    }

    let select_period = {
        let dispatcher = state.dispatcher();
        Callback::from(move |period: Period| dispatcher.dispatch(GraphViewAction::Select(period)))
    };

    let retry = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(GraphViewAction::Retry))
    };

    UseGraphViewHandle {
        view: state.view.clone(),
        select_period,
        retry,
    }
}
