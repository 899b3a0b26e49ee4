//! Minimal bar chart of a [`ChartSeries`].
//!
//! Layout is computed by [`plan`] as a list of [`DrawOp`]s, which [`render`]
//! replays onto any [`Canvas`]: the egui panel in the desktop app, or a
//! plotters SVG/PNG backend via [`plotters_canvas`].
//!
//! - value axis on the left margin, time axis on the bottom margin
//! - six ticks labelled with one decimal, bottom to top
//! - one cyan bar per value, left to right, 1 px gap between bars
//! - full redraw every call

pub mod plotters_canvas;
pub mod types;

pub use plotters_canvas::save_chart;
pub use types::{
    AXIS_COLOR, BAR_COLOR, ChartSeries, DrawOp, MARGIN_BOTTOM, MARGIN_LEFT, MARGIN_RIGHT,
    MARGIN_TOP, Point, Rgb, TICK_INTERVALS,
};

/// A drawing target the chart can be replayed onto.
pub trait Canvas {
    type Error;

    /// Wipe the surface before a redraw.
    fn clear(&mut self) -> Result<(), Self::Error>;
    fn line(&mut self, from: Point, to: Point, color: Rgb) -> Result<(), Self::Error>;
    fn text(&mut self, text: &str, at: Point, color: Rgb) -> Result<(), Self::Error>;
    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Rgb,
    ) -> Result<(), Self::Error>;
}

/// Compute the draw operations for `series` on a `width` x `height` surface.
///
/// An empty series yields no operations.
pub fn plan(series: &ChartSeries, width: i32, height: i32) -> Vec<DrawOp> {
    let Some((min, max)) = series.bounds() else {
        return Vec::new();
    };

    let plot_w = width - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = height - MARGIN_TOP - MARGIN_BOTTOM;
    let range = if max == min { 1.0 } else { max - min };
    // Integer division; leftover pixels on the right stay empty.
    let bar_w = (plot_w / series.len() as i32).max(1);
    let baseline = height - MARGIN_BOTTOM;

    let mut ops = Vec::with_capacity(2 + 2 * (TICK_INTERVALS as usize + 1) + series.len());
    ops.push(DrawOp::Line {
        from: (MARGIN_LEFT, MARGIN_TOP),
        to: (MARGIN_LEFT, baseline),
    });
    ops.push(DrawOp::Line {
        from: (MARGIN_LEFT, baseline),
        to: (width - MARGIN_RIGHT, baseline),
    });

    for i in 0..=TICK_INTERVALS {
        let value = min + f64::from(i) * range / f64::from(TICK_INTERVALS);
        let y = MARGIN_TOP + plot_h - (i * plot_h / TICK_INTERVALS);
        ops.push(DrawOp::Line {
            from: (MARGIN_LEFT - 3, y),
            to: (MARGIN_LEFT, y),
        });
        ops.push(DrawOp::Text {
            text: format!("{value:.1}"),
            at: (2, y - 7),
        });
    }

    for (i, v) in series.values().iter().enumerate() {
        let bar_h = ((v - min) / range * f64::from(plot_h)) as i32;
        ops.push(DrawOp::FillRect {
            x: MARGIN_LEFT + i as i32 * bar_w,
            y: MARGIN_TOP + plot_h - bar_h,
            width: bar_w - 1,
            height: bar_h,
            color: BAR_COLOR,
        });
    }

    ops
}

/// Clear `canvas` and draw `series` on it.
pub fn render<C: Canvas>(
    series: &ChartSeries,
    width: i32,
    height: i32,
    canvas: &mut C,
) -> Result<(), C::Error> {
    canvas.clear()?;
    for op in plan(series, width, height) {
        match op {
            DrawOp::Line { from, to } => canvas.line(from, to, AXIS_COLOR)?,
            DrawOp::Text { text, at } => canvas.text(&text, at, AXIS_COLOR)?,
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => canvas.fill_rect(x, y, width, height, color)?,
        }
    }
    Ok(())
}
