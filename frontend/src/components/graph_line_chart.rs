use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use shared::chart::{GRID_COLOR, TOOLTIP_BACKGROUND};
use shared::{GraphDisplay, GraphView, LineChartModel, Rgb};
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use crate::services::Logger;

const CANVAS_WIDTH: u32 = 900;
const CANVAS_HEIGHT: u32 = 300;

#[derive(Properties, PartialEq)]
pub struct GraphLineChartProps {
    pub view: GraphView,
}

pub enum Msg {
    Hover(MouseEvent),
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct HoverPoint {
    index: usize,
    left: f64,
    top: f64,
}

/// Students and fees per record, or a placeholder while there is nothing to draw
pub struct GraphLineChart {
    canvas_ref: NodeRef,
    model: LineChartModel,
    /// Left edge and width of the plotting area in canvas pixels, known after the first draw
    plot_x: Option<(f64, f64)>,
    hover: Option<HoverPoint>,
}

impl Component for GraphLineChart {
    type Message = Msg;
    type Properties = GraphLineChartProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
            model: chart_model(&ctx.props().view),
            plot_x: None,
            hover: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Hover(event) => {
                let Some(canvas) = self.canvas_ref.cast::<HtmlCanvasElement>() else {
                    return false;
                };
                let Some((left, width)) = self.plot_x else {
                    return false;
                };

                // the canvas is scaled by CSS, pointer offsets are in CSS pixels
                let scale = if canvas.client_width() > 0 {
                    canvas.width() as f64 / canvas.client_width() as f64
                } else {
                    1.0
                };
                let x = event.offset_x() as f64 * scale;

                let next = self.model.hover_index(x, left, width).map(|index| HoverPoint {
                    index,
                    left: event.offset_x() as f64 + 12.0,
                    top: event.offset_y() as f64 + 12.0,
                });
                if next == self.hover {
                    return false;
                }
                self.hover = next;
                true
            }
            Msg::Leave => self.hover.take().is_some(),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().view != old_props.view {
            self.model = chart_model(&ctx.props().view);
            self.hover = None;
        }
        true
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if self.model.is_empty() {
            return;
        }
        self.plot_x = self.draw_chart();
        if self.plot_x.is_none() {
            Logger::debug_with_component("GraphLineChart", "Canvas not ready, chart not drawn");
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let content = match ctx.props().view.display() {
            GraphDisplay::Loading => html! { <div>{"Loading..."}</div> },
            GraphDisplay::Error(message) => html! {
                <div class="text-danger">{format!("Error: {}", message)}</div>
            },
            GraphDisplay::Empty => html! {
                <div>{"No data available. Please check again later"}</div>
            },
            GraphDisplay::Chart(_) => self.chart_view(ctx),
        };

        html! {
            <div class="graph-line-chart row">
                {content}
            </div>
        }
    }
}

impl GraphLineChart {
    fn chart_view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let tooltip = self
            .hover
            .and_then(|hover| self.model.tooltip(hover.index).map(|model| (hover, model)));

        html! {
            <div class="graph-line-chart-canvas" style="position: relative;">
                <canvas
                    ref={self.canvas_ref.clone()}
                    width={CANVAS_WIDTH.to_string()}
                    height={CANVAS_HEIGHT.to_string()}
                    style="width: 100%; height: auto;"
                    onmousemove={link.callback(Msg::Hover)}
                    onmouseleave={link.callback(|_| Msg::Leave)}
                ></canvas>
                {if let Some((hover, model)) = tooltip {
                    html! {
                        <div
                            class="graph-line-chart-tooltip"
                            style={tooltip_style(hover)}
                        >
                            <p style="margin: 0 0 4px 0;">{model.title}</p>
                            {for model.rows.into_iter().map(|row| html! {
                                <p style={format!("margin: 0; color: {};", row.color.to_css())}>
                                    {format!("{} : {}", row.label, row.value)}
                                </p>
                            })}
                        </div>
                    }
                } else {
                    html! {}
                }}
            </div>
        }
    }

    /// Draws the chart and returns where the plotting area sits horizontally
    fn draw_chart(&self) -> Option<(f64, f64)> {
        let canvas = self.canvas_ref.cast::<HtmlCanvasElement>()?;
        canvas.set_width(CANVAS_WIDTH);
        canvas.set_height(CANVAS_HEIGHT);

        let backend = CanvasBackend::with_canvas_object(canvas)?;
        let root = backend.into_drawing_area();
        root.fill(&WHITE).ok()?;

        let model = &self.model;
        let (x_min, x_max) = model.x_range();
        let y_max = model.y_max() as f64;

        let mut chart = ChartBuilder::on(&root)
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, 0.0..y_max)
            .ok()?;

        let categories = &model.categories;
        let grid = plot_color(GRID_COLOR);
        chart
            .configure_mesh()
            .x_labels(model.len() + 1)
            .x_label_formatter(&|v| category_label(categories, *v))
            .y_label_formatter(&|v| format!("{:.0}", v))
            .label_style(("sans-serif", 12))
            .axis_style(&grid)
            .bold_line_style(&grid)
            .light_line_style(&WHITE)
            .draw()
            .ok()?;

        for series in &model.series {
            let color = plot_color(series.color);
            let points: Vec<(f64, f64)> = series
                .values
                .iter()
                .enumerate()
                .map(|(i, &v)| (i as f64, v as f64))
                .collect();

            chart
                .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
                .ok()?
                .label(series.label)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });

            chart
                .draw_series(points.iter().map(|&p| Circle::new(p, 2, color.filled())))
                .ok()?;

            // active dot under the pointer
            if let Some(&point) = self.hover.and_then(|hover| points.get(hover.index)) {
                chart
                    .draw_series(std::iter::once(Circle::new(point, 4, color.filled())))
                    .ok()?;
            }
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&grid)
            .label_font(("sans-serif", 12))
            .draw()
            .ok()?;

        let (x_pixels, _) = chart.plotting_area().get_pixel_range();
        root.present().ok()?;

        Some((x_pixels.start as f64, (x_pixels.end - x_pixels.start) as f64))
    }
}

fn tooltip_style(hover: HoverPoint) -> String {
    format!(
        concat!(
            "position: absolute; left: {}px; top: {}px; ",
            "background-color: {}; border: 1px solid {}; ",
            "padding: 6px 10px; pointer-events: none; white-space: nowrap;"
        ),
        hover.left,
        hover.top,
        TOOLTIP_BACKGROUND.to_css(),
        GRID_COLOR.to_css()
    )
}

fn chart_model(view: &GraphView) -> LineChartModel {
    match view.display() {
        GraphDisplay::Chart(records) => LineChartModel::from_records(records),
        _ => LineChartModel::from_records(&[]),
    }
}

fn plot_color(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

/// Axis label for tick `value`: the record name at whole positions, nothing in between
fn category_label(categories: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    categories
        .get(rounded as usize)
        .cloned()
        .unwrap_or_default()
}
