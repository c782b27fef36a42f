//! Chart-ready tables for the dashboard pages.
//!
//! A chart is a small named-column table plus the kind of figure it feeds. The client
//! renders the Plotly description; the HTML layer also prints the table itself.

mod explore;
mod overview;

pub use explore::explore_charts;
pub use overview::overview_charts;

use crate::domain::aggregate::{BoxSummary, Group};
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;

const MAX_MARKER_PX: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    HorizontalBar,
    VerticalBar,
    Pie,
    Choropleth,
    ScatterGeo,
    Box,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    fn number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(_) => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) if n.fract() == 0.0 => write!(f, "{n:.0}"),
            Cell::Number(n) => write!(f, "{n:.2}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// DOM id, unique per page.
    pub id: &'static str,
    pub kind: ChartKind,
    pub title: &'static str,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

impl ChartSpec {
    /// Category in the first column, one numeric value in the second.
    pub fn from_groups(
        id: &'static str,
        kind: ChartKind,
        title: &'static str,
        columns: [&'static str; 2],
        groups: &[Group],
    ) -> Self {
        Self {
            id,
            kind,
            title,
            columns: columns.to_vec(),
            rows: groups
                .iter()
                .map(|g| vec![Cell::Text(g.key.clone()), Cell::Number(g.value)])
                .collect(),
        }
    }

    pub fn from_box_summaries(
        id: &'static str,
        title: &'static str,
        category: &'static str,
        summaries: &[BoxSummary],
    ) -> Self {
        Self {
            id,
            kind: ChartKind::Box,
            title,
            columns: vec![category, "min", "q1", "median", "q3", "max"],
            rows: summaries
                .iter()
                .map(|s| {
                    vec![
                        Cell::Text(s.key.clone()),
                        Cell::Number(s.min),
                        Cell::Number(s.q1),
                        Cell::Number(s.median),
                        Cell::Number(s.q3),
                        Cell::Number(s.max),
                    ]
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column(&self, idx: usize) -> Vec<&Cell> {
        self.rows.iter().filter_map(|r| r.get(idx)).collect()
    }

    fn numbers(&self, idx: usize) -> Vec<f64> {
        self.column(idx).into_iter().filter_map(Cell::number).collect()
    }

    /// Plotly figure (`{data, layout}`) for this chart.
    pub fn to_plotly(&self) -> Value {
        let labels = self.column(0);
        let values = self.numbers(1);
        let value_name = self.columns.get(1).copied().unwrap_or("value");

        let data = match self.kind {
            ChartKind::HorizontalBar => json!([{
                "type": "bar",
                "orientation": "h",
                "x": values,
                "y": labels,
                "marker": { "color": values, "colorscale": "Viridis" },
                "name": value_name,
            }]),
            ChartKind::VerticalBar => json!([{
                "type": "bar",
                "x": labels,
                "y": values,
                "marker": { "color": values, "colorscale": "Viridis", "showscale": true },
                "name": value_name,
            }]),
            ChartKind::Pie => json!([{
                "type": "pie",
                "labels": labels,
                "values": values,
                "textposition": "outside",
                "textinfo": "value+label",
            }]),
            ChartKind::Choropleth => json!([{
                "type": "choropleth",
                "locations": labels,
                "locationmode": "country names",
                "z": values,
                "colorscale": "Plasma",
                "colorbar": { "title": value_name },
            }]),
            ChartKind::ScatterGeo => {
                let max = values.iter().copied().fold(0.0_f64, f64::max);
                let sizeref = if max > 0.0 { 2.0 * max / MAX_MARKER_PX.powi(2) } else { 1.0 };
                json!([{
                    "type": "scattergeo",
                    "locations": labels,
                    "locationmode": "country names",
                    "text": values,
                    "hovertemplate": format!("%{{location}}<br>{value_name}=%{{text}}<extra></extra>"),
                    "marker": {
                        "size": values,
                        "sizemode": "area",
                        "sizeref": sizeref,
                        "color": values,
                        "colorscale": "Viridis",
                        "showscale": true,
                    },
                }])
            }
            ChartKind::Box => Value::Array(
                self.rows
                    .iter()
                    .filter_map(|row| match row.as_slice() {
                        [
                            Cell::Text(name),
                            Cell::Number(min),
                            Cell::Number(q1),
                            Cell::Number(median),
                            Cell::Number(q3),
                            Cell::Number(max),
                        ] => Some(json!({
                                "type": "box",
                                "name": name,
                                "x": [name],
                                "lowerfence": [min],
                                "q1": [q1],
                                "median": [median],
                                "q3": [q3],
                                "upperfence": [max],
                        })),
                        _ => None,
                    })
                    .collect(),
            ),
        };

        json!({
            "data": data,
            "layout": {
                "title": { "text": self.title },
                "showlegend": matches!(self.kind, ChartKind::Pie | ChartKind::Box),
                "margin": { "l": 40, "r": 20, "t": 60, "b": 40 },
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups() -> Vec<Group> {
        vec![
            Group { key: "Brazil".into(), value: 10.0 },
            Group { key: "Spain".into(), value: 40.0 },
        ]
    }

    #[test]
    fn bar_chart_uses_values_on_x_axis() {
        let chart = ChartSpec::from_groups(
            "top",
            ChartKind::HorizontalBar,
            "Top",
            ["country", "Listings"],
            &groups(),
        );
        let fig = chart.to_plotly();

        assert_eq!(fig["data"][0]["orientation"], "h");
        assert_eq!(fig["data"][0]["x"], json!([10.0, 40.0]));
        assert_eq!(fig["data"][0]["y"], json!(["Brazil", "Spain"]));
        assert_eq!(fig["layout"]["title"]["text"], "Top");
    }

    #[test]
    fn scatter_geo_marker_area_scales_with_value() {
        let chart = ChartSpec::from_groups(
            "geo",
            ChartKind::ScatterGeo,
            "Geo",
            ["country", "price"],
            &groups(),
        );
        let fig = chart.to_plotly();

        assert_eq!(fig["data"][0]["marker"]["size"], json!([10.0, 40.0]));
        assert_eq!(fig["data"][0]["marker"]["sizeref"], json!(2.0 * 40.0 / 1600.0));
        assert_eq!(fig["data"][0]["locationmode"], "country names");
    }

    #[test]
    fn box_chart_has_one_trace_per_category() {
        let summaries = vec![BoxSummary {
            key: "Private room".into(),
            min: 0.0,
            q1: 10.0,
            median: 20.0,
            q3: 30.0,
            max: 365.0,
        }];
        let chart = ChartSpec::from_box_summaries("box", "Box", "room_type", &summaries);
        let fig = chart.to_plotly();

        assert_eq!(chart.columns, vec!["room_type", "min", "q1", "median", "q3", "max"]);
        assert_eq!(fig["data"].as_array().unwrap().len(), 1);
        assert_eq!(fig["data"][0]["upperfence"], json!([365.0]));
    }

    #[test]
    fn cells_print_integers_without_decimals() {
        assert_eq!(Cell::Number(3.0).to_string(), "3");
        assert_eq!(Cell::Number(60.5).to_string(), "60.50");
        assert_eq!(Cell::Text("house".into()).to_string(), "house");
    }
}
