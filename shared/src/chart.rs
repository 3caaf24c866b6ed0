//! Chart model for the students/fees line chart.
//!
//! Maps a window of records to what the canvas renderer needs: one category
//! per record (in the order received) and two series drawn over them.

use crate::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

pub const STUDENTS_COLOR: Rgb = Rgb(255, 0, 0);
pub const FEES_COLOR: Rgb = Rgb(0, 128, 0);
pub const GRID_COLOR: Rgb = Rgb(0xcc, 0xcc, 0xcc);
pub const TOOLTIP_BACKGROUND: Rgb = Rgb(255, 255, 0);

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesModel {
    /// Record field the series reads
    pub key: &'static str,
    /// Legend and tooltip label
    pub label: &'static str,
    pub color: Rgb,
    pub values: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipRow {
    pub label: &'static str,
    pub value: u32,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipModel {
    pub title: String,
    pub rows: Vec<TooltipRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChartModel {
    pub categories: Vec<String>,
    pub series: Vec<SeriesModel>,
}

impl LineChartModel {
    pub fn from_records(records: &[Record]) -> Self {
        let categories = records.iter().map(|r| r.name.clone()).collect();
        let series = vec![
            SeriesModel {
                key: "students",
                label: "Students",
                color: STUDENTS_COLOR,
                values: records.iter().map(|r| r.students).collect(),
            },
            SeriesModel {
                key: "fees",
                label: "Fees",
                color: FEES_COLOR,
                values: records.iter().map(|r| r.fees).collect(),
            },
        ];
        Self { categories, series }
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Upper bound of the value axis: largest value plus 10% headroom, at least 1
    pub fn y_max(&self) -> u32 {
        let max = self
            .series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .max()
            .unwrap_or(0);
        let padded = max.saturating_add(max.div_ceil(10));
        padded.max(1)
    }

    /// Horizontal range of the category axis; category `i` sits at `i`
    pub fn x_range(&self) -> (f64, f64) {
        (-0.5, self.len().max(1) as f64 - 0.5)
    }

    /// Category under a pointer at `x` pixels, given where the plot area starts and how wide it is
    pub fn hover_index(&self, x: f64, plot_left: f64, plot_width: f64) -> Option<usize> {
        if self.is_empty() || plot_width <= 0.0 || x < plot_left || x >= plot_left + plot_width {
            return None;
        }
        let slot = ((x - plot_left) / plot_width * self.len() as f64).floor() as usize;
        Some(slot.min(self.len() - 1))
    }

    pub fn tooltip(&self, index: usize) -> Option<TooltipModel> {
        let title = self.categories.get(index)?.clone();
        let rows = self
            .series
            .iter()
            .filter_map(|s| {
                s.values.get(index).map(|&value| TooltipRow {
                    label: s.label,
                    value,
                    color: s.color,
                })
            })
            .collect();
        Some(TooltipModel { title, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn records() -> Vec<Record> {
        let d = NaiveDate::from_ymd_opt(2023, 6, 12).unwrap();
        vec![
            Record::new(d, "php", 200, 2000),
            Record::new(d, "java", 200, 4000),
            Record::new(d, "react", 500, 6000),
        ]
    }

    #[test]
    fn test_model_keeps_record_order() {
        let model = LineChartModel::from_records(&records());
        assert_eq!(model.categories, vec!["php", "java", "react"]);
        assert_eq!(model.series.len(), 2);
        assert_eq!(model.series[0].label, "Students");
        assert_eq!(model.series[0].values, vec![200, 200, 500]);
        assert_eq!(model.series[1].label, "Fees");
        assert_eq!(model.series[1].values, vec![2000, 4000, 6000]);
    }

    #[test]
    fn test_series_colors_differ() {
        let model = LineChartModel::from_records(&records());
        assert_ne!(model.series[0].color, model.series[1].color);
        assert_eq!(STUDENTS_COLOR.to_css(), "#ff0000");
        assert_eq!(FEES_COLOR.to_css(), "#008000");
    }

    #[test]
    fn test_y_max_adds_headroom() {
        let model = LineChartModel::from_records(&records());
        assert_eq!(model.y_max(), 6600);
        assert_eq!(LineChartModel::from_records(&[]).y_max(), 1);
    }

    #[test]
    fn test_hover_index_maps_slots() {
        let model = LineChartModel::from_records(&records());
        // three slots of 100px starting at x=50
        assert_eq!(model.hover_index(49.0, 50.0, 300.0), None);
        assert_eq!(model.hover_index(50.0, 50.0, 300.0), Some(0));
        assert_eq!(model.hover_index(149.9, 50.0, 300.0), Some(0));
        assert_eq!(model.hover_index(150.0, 50.0, 300.0), Some(1));
        assert_eq!(model.hover_index(349.9, 50.0, 300.0), Some(2));
        assert_eq!(model.hover_index(350.0, 50.0, 300.0), None);
    }

    #[test]
    fn test_hover_index_on_empty_model() {
        let model = LineChartModel::from_records(&[]);
        assert_eq!(model.hover_index(10.0, 0.0, 100.0), None);
    }

    #[test]
    fn test_tooltip_lists_both_series() {
        let model = LineChartModel::from_records(&records());
        let tooltip = model.tooltip(2).unwrap();
        assert_eq!(tooltip.title, "react");
        assert_eq!(tooltip.rows.len(), 2);
        assert_eq!(tooltip.rows[0].label, "Students");
        assert_eq!(tooltip.rows[0].value, 500);
        assert_eq!(tooltip.rows[1].label, "Fees");
        assert_eq!(tooltip.rows[1].value, 6000);
        assert!(model.tooltip(3).is_none());
    }
}
