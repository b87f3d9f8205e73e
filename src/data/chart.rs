use serde_json::{json, Map, Value as JsonValue};

use super::model::Table;
use crate::config::ColumnRoles;

/// Height of the chart, in points on screen and pixels in Vega-Lite.
pub const CHART_HEIGHT: f32 = 400.0;

/// One plotted row.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    /// `(column, text)` pairs shown when the point is hovered.
    pub tooltip: Vec<(String, String)>,
}

/// Mileage position (x) against transport distance (y), one point per row,
/// joined by a line in row order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub x_field: String,
    pub y_field: String,
    pub points: Vec<ChartPoint>,
}

/// Build the chart for a filtered table.
///
/// Returns `None` unless both the mileage and the distance column exist. Rows
/// where either value is not numeric are left out.
pub fn build_chart(table: &Table, roles: &ColumnRoles) -> Option<ChartSpec> {
    let x_idx = table.column_index(&roles.mileage)?;
    let y_idx = table.column_index(&roles.distance)?;
    let place_idx = table.column_index(&roles.place);

    let points = table
        .rows()
        .iter()
        .filter_map(|row| {
            let x = row[x_idx].as_f64()?;
            let y = row[y_idx].as_f64()?;
            let mut tooltip = Vec::with_capacity(3);
            if let Some(p) = place_idx {
                tooltip.push((roles.place.clone(), row[p].to_string()));
            }
            tooltip.push((roles.mileage.clone(), row[x_idx].to_string()));
            tooltip.push((roles.distance.clone(), row[y_idx].to_string()));
            Some(ChartPoint { x, y, tooltip })
        })
        .collect();

    Some(ChartSpec {
        x_field: roles.mileage.clone(),
        y_field: roles.distance.clone(),
        points,
    })
}

impl ChartSpec {
    /// The point drawn exactly at `(x, y)`, if any.
    pub fn point_at(&self, x: f64, y: f64) -> Option<&ChartPoint> {
        self.points.iter().find(|p| p.x == x && p.y == y)
    }

    /// Equivalent Vega-Lite v5 document: a point-marked line with inline data.
    pub fn to_vega_lite(&self) -> JsonValue {
        let tooltip_fields: Vec<&str> = self
            .points
            .first()
            .map(|p| p.tooltip.iter().map(|(name, _)| name.as_str()).collect())
            .unwrap_or_else(|| vec![self.x_field.as_str(), self.y_field.as_str()]);

        let values: Vec<JsonValue> = self
            .points
            .iter()
            .map(|p| {
                let mut record = Map::new();
                for (name, text) in &p.tooltip {
                    record.insert(name.clone(), JsonValue::String(text.clone()));
                }
                record.insert(self.x_field.clone(), json!(p.x));
                record.insert(self.y_field.clone(), json!(p.y));
                JsonValue::Object(record)
            })
            .collect();

        let tooltip: Vec<JsonValue> = tooltip_fields
            .iter()
            .map(|field| {
                let kind = if *field == self.x_field || *field == self.y_field {
                    "quantitative"
                } else {
                    "nominal"
                };
                json!({ "field": field, "type": kind })
            })
            .collect();

        json!({
            "$schema": "https://vega.github.io/schema/vega-lite/v5.json",
            "height": CHART_HEIGHT,
            "data": { "values": values },
            "mark": { "type": "line", "point": true },
            "encoding": {
                "x": { "field": self.x_field, "type": "quantitative" },
                "y": { "field": self.y_field, "type": "quantitative" },
                "tooltip": tooltip,
            }
        })
    }
}
