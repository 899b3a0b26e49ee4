//! Public types and constants for the chart module.

/// Pixel position on the drawing surface, origin top-left.
pub type Point = (i32, i32);

/// Space reserved around the plot area, in pixels.
pub const MARGIN_LEFT: i32 = 50;
pub const MARGIN_BOTTOM: i32 = 30;
pub const MARGIN_TOP: i32 = 10;
pub const MARGIN_RIGHT: i32 = 10;

/// Number of intervals on the value axis; `TICK_INTERVALS + 1` ticks are drawn.
pub const TICK_INTERVALS: i32 = 5;

/// Plain RGB colour, independent of any drawing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const AXIS_COLOR: Rgb = Rgb(0, 0, 0);
pub const BAR_COLOR: Rgb = Rgb(0, 255, 255);

/// Values and `HH:MM` labels of the in-range, non-null readings.
///
/// Rebuilt on every fetch; `values[i]` belongs to `labels[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    values: Vec<f64>,
    labels: Vec<String>,
}

impl ChartSeries {
    pub fn push(&mut self, value: f64, label: impl Into<String>) {
        self.values.push(value);
        self.labels.push(label.into());
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.labels.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// `(min, max)` of the values, `None` when empty.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        if self.values.is_empty() {
            return None;
        }
        Some((
            self.values.iter().cloned().fold(f64::INFINITY, f64::min),
            self.values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        ))
    }
}

impl<S: Into<String>> FromIterator<(f64, S)> for ChartSeries {
    fn from_iter<I: IntoIterator<Item = (f64, S)>>(iter: I) -> Self {
        let mut series = ChartSeries::default();
        for (v, label) in iter {
            series.push(v, label);
        }
        series
    }
}

/// One primitive of a chart, in surface pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Line { from: Point, to: Point },
    /// `at` is the top-left corner of the text.
    Text { text: String, at: Point },
    FillRect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Rgb,
    },
}
