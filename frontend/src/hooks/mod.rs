pub mod use_graph_view;

pub use use_graph_view::use_graph_view;
