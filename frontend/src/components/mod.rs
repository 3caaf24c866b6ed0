pub mod graph_line_chart;
pub mod graph_widget;
