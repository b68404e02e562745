//! SVG time series of the recorded cash amounts.

use std::path::Path;

use chrono::NaiveDate;

use svg::{
    node::element::{path::Data, Circle, Line, Path as SvgPath, Text},
    Document,
};

use crate::{
    errors::{CashError, Result},
    ledger::Observation,
};

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 500.0;
const MARGIN: f64 = 60.0;
const STROKE_WIDTH: f64 = 2.0;
const LINE_COLOR: &str = "steelblue";

/// Plots observations by date. Points sharing a date stack vertically in
/// insertion order. Returns `None` for an empty history.
pub fn history_chart(observations: &[Observation]) -> Option<Document> {
    let mut points: Vec<&Observation> = observations.iter().collect();
    points.sort_by_key(|obs| obs.date);

    let first = points.first()?.date;
    let last = points.last()?.date;
    let span_days = (last - first).num_days().max(1) as f64;
    let max_amount = points
        .iter()
        .map(|obs| obs.amount)
        .fold(0.0_f64, f64::max)
        .max(1.0);

    let scale_x = |date: NaiveDate| (date - first).num_days() as f64 / span_days * WIDTH;
    let scale_y = |amount: f64| HEIGHT - amount / max_amount * HEIGHT;

    let mut data = Data::new().move_to((scale_x(first), scale_y(points[0].amount)));
    for obs in &points[1..] {
        data = data.line_to((scale_x(obs.date), scale_y(obs.amount)));
    }

    let series = SvgPath::new()
        .set("fill", "none")
        .set("stroke", LINE_COLOR)
        .set("stroke-width", STROKE_WIDTH)
        .set("d", data);

    let markers = points.iter().map(|obs| {
        Circle::new()
            .set("cx", scale_x(obs.date))
            .set("cy", scale_y(obs.amount))
            .set("r", 3.0)
            .set("fill", LINE_COLOR)
    });

    let yaxis = axis(0.0, 0.0, 0.0, HEIGHT);
    let xaxis = axis(0.0, HEIGHT, WIDTH, HEIGHT);

    let document = markers
        .fold(Document::new().add(series), |doc, marker| doc.add(marker))
        .add(yaxis)
        .add(xaxis)
        .add(label(0.0, HEIGHT + 25.0, "start", first.to_string()))
        .add(label(WIDTH, HEIGHT + 25.0, "end", last.to_string()))
        .add(label(-8.0, 5.0, "end", format!("{:.0}", max_amount)))
        .add(label(-8.0, HEIGHT, "end", "0".to_string()))
        .set(
            "viewBox",
            (-MARGIN, -MARGIN, WIDTH + 2.0 * MARGIN, HEIGHT + 2.0 * MARGIN),
        );
    Some(document)
}

/// Writes the chart for `observations` to `path`. Returns `false` when there
/// is nothing to plot.
pub fn write_history_chart(observations: &[Observation], path: &Path) -> Result<bool> {
    let document = match history_chart(observations) {
        Some(document) => document,
        None => return Ok(false),
    };
    svg::save(path, &document)
        .map_err(|err| CashError::WriteFailure(format!("{}: {}", path.display(), err)))?;
    Ok(true)
}

fn axis(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
    Line::new()
        .set("x1", x1)
        .set("y1", y1)
        .set("x2", x2)
        .set("y2", y2)
        .set("stroke", "black")
        .set("stroke-width", STROKE_WIDTH)
}

fn label(x: f64, y: f64, anchor: &str, content: String) -> Text {
    Text::new(content)
        .set("x", x)
        .set("y", y)
        .set("text-anchor", anchor)
        .set("font-size", "14")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(d: u32, amount: f64) -> Observation {
        Observation {
            date: NaiveDate::from_ymd_opt(2025, 1, d).unwrap(),
            amount,
        }
    }

    #[test]
    fn empty_history_has_no_chart() {
        assert!(history_chart(&[]).is_none());
    }

    #[test]
    fn chart_spans_first_and_last_dates() {
        let svg = history_chart(&[obs(9, 400.0), obs(2, 1200.0), obs(5, 0.0)])
            .unwrap()
            .to_string();
        assert!(svg.contains("2025-01-02"));
        assert!(svg.contains("2025-01-09"));
        assert!(svg.contains("1200"));
        assert_eq!(svg.matches("<circle").count(), 3);
    }

    #[test]
    fn single_point_chart_is_finite() {
        let svg = history_chart(&[obs(4, 0.0)]).unwrap().to_string();
        assert!(!svg.contains("NaN"));
        assert!(!svg.contains("inf"));
    }
}
