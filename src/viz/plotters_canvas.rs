//! [`Canvas`] over a plotters drawing area, used to export the chart as SVG or PNG.
//!
//! ```no_run
//! use gios_rs::viz::{ChartSeries, save_chart};
//!
//! let series: ChartSeries = [(12.5, "10:00"), (14.0, "11:00")].into_iter().collect();
//! save_chart(&series, "pm10.svg", 800, 200)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::{Canvas, Point, Rgb, render};
use crate::viz::ChartSeries;
use anyhow::{Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::Path;
use std::sync::OnceLock;

/// Label font size in pixels.
const FONT_PX: u32 = 12;

/// Bundled so labels render the same on every host.
static FONT_BYTES: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

static FONT_READY: OnceLock<bool> = OnceLock::new();

/// Register the bundled font as "sans-serif" for the `ab_glyph` text path,
/// which does not discover OS fonts. Runs once per process.
fn ensure_font_registered() -> Result<()> {
    let ready = *FONT_READY.get_or_init(|| {
        plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            FONT_BYTES,
        )
        .is_ok()
    });
    if ready {
        Ok(())
    } else {
        Err(anyhow!("bundled chart font could not be loaded"))
    }
}

fn color(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

/// Draws onto a borrowed plotters drawing area.
pub struct PlottersCanvas<'a, DB: DrawingBackend> {
    area: &'a DrawingArea<DB, Shift>,
}

impl<'a, DB: DrawingBackend> PlottersCanvas<'a, DB> {
    pub fn new(area: &'a DrawingArea<DB, Shift>) -> Self {
        Self { area }
    }
}

impl<DB: DrawingBackend> Canvas for PlottersCanvas<'_, DB> {
    type Error = anyhow::Error;

    fn clear(&mut self) -> Result<()> {
        self.area.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))
    }

    fn line(&mut self, from: Point, to: Point, c: Rgb) -> Result<()> {
        self.area
            .draw(&PathElement::new(vec![from, to], color(c)))
            .map_err(|e| anyhow!("{:?}", e))
    }

    fn text(&mut self, text: &str, at: Point, c: Rgb) -> Result<()> {
        let style = ("sans-serif", FONT_PX).into_font().color(&color(c));
        self.area
            .draw(&Text::new(text.to_string(), at, style))
            .map_err(|e| anyhow!("{:?}", e))
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, c: Rgb) -> Result<()> {
        // Zero-area bars (minimum value, or 1 px slots) leave no mark.
        if width <= 0 || height <= 0 {
            return Ok(());
        }
        self.area
            .draw(&Rectangle::new(
                [(x, y), (x + width, y + height)],
                color(c).filled(),
            ))
            .map_err(|e| anyhow!("{:?}", e))
    }
}

/// Write the chart to `out_path`: SVG for a `.svg` extension, PNG otherwise.
pub fn save_chart<P: AsRef<Path>>(
    series: &ChartSeries,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    if series.is_empty() {
        return Err(anyhow!("no data to plot"));
    }
    let out_path = out_path.as_ref();
    let (w, h) = (i32::try_from(width)?, i32::try_from(height)?);
    ensure_font_registered()?;

    let is_svg = out_path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

    if is_svg {
        let root = SVGBackend::new(out_path, (width, height)).into_drawing_area();
        render(series, w, h, &mut PlottersCanvas::new(&root))?;
        root.present().map_err(|e| anyhow!("{:?}", e))?;
    } else {
        let root = BitMapBackend::new(out_path, (width, height)).into_drawing_area();
        render(series, w, h, &mut PlottersCanvas::new(&root))?;
        root.present().map_err(|e| anyhow!("{:?}", e))?;
    }
    log::info!("wrote chart to {}", out_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_font_registers() {
        assert!(ensure_font_registered().is_ok());
        // Second call hits the cached result.
        assert!(ensure_font_registered().is_ok());
    }

    #[test]
    fn png_labels_are_rasterised() {
        ensure_font_registered().unwrap();
        let (w, h) = (400u32, 200u32);
        let series: ChartSeries = [(3.0, "10:00"), (9.0, "11:00")].into_iter().collect();
        let mut buf = vec![0u8; (w * h * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
            render(&series, w as i32, h as i32, &mut PlottersCanvas::new(&root)).unwrap();
            root.present().unwrap();
        }
        // Tick labels sit left of the tick marks, which start at x = 47.
        let dark_in_margin = (0..h as usize).any(|y| {
            (0..40usize).any(|x| {
                let i = (y * w as usize + x) * 3;
                buf[i] < 128 && buf[i + 1] < 128 && buf[i + 2] < 128
            })
        });
        assert!(dark_in_margin, "no label pixels in the left margin");
    }
}
