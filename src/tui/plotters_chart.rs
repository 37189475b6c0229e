//! Plotters-powered reduction bar chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
// `ratatui::style::Color` below shadows the prelude trait that provides `filled()`.
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::plot::ReductionBand;

/// A lightweight, render-only chart description.
///
/// All bars and bounds are computed outside the render call so `render()` only draws.
pub struct ReductionBarChart<'a> {
    /// `(label, percentage reduction)` in display order.
    pub bars: &'a [(String, f64)],
    /// Y bounds (percent). Always include zero.
    pub y_bounds: [f64; 2],
    pub y_label: &'a str,
}

impl<'a> ReductionBarChart<'a> {
    /// Bounds covering every bar and the zero line, padded by 5%.
    pub fn bounds_for(bars: &[(String, f64)]) -> [f64; 2] {
        let mut lo = 0.0_f64;
        let mut hi = 0.0_f64;
        for &(_, v) in bars {
            lo = lo.min(v);
            hi = hi.max(v);
        }
        if hi - lo < 1e-12 {
            hi = lo + 1.0;
        }
        let pad = (hi - lo) * 0.05;
        [lo - pad, hi + pad]
    }
}

impl<'a> Widget for ReductionBarChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let n = self.bars.len();
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];
        if n == 0 || !(y0.is_finite() && y1.is_finite()) || y1 <= y0 {
            return;
        }

        // Bar `i` is centred on x = i, so integer ticks line up with bars.
        let x0 = -0.5;
        let x1 = n as f64 - 0.5;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 2)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .y_desc(self.y_label)
                .x_labels(n)
                .y_labels(5)
                .x_label_formatter(&|v| bar_label(self.bars, *v))
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            chart.draw_series(self.bars.iter().enumerate().map(|(i, (_, v))| {
                let x = i as f64;
                let color = band_rgb(ReductionBand::classify(*v));
                // Upper-left then lower-right, whatever the sign of the bar.
                Rectangle::new([(x - 0.35, v.max(0.0)), (x + 0.35, v.min(0.0))], color.filled())
            }))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Short country code under integer ticks, blank elsewhere.
fn bar_label(bars: &[(String, f64)], v: f64) -> String {
    let idx = v.round();
    if (v - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    bars.get(idx as usize)
        .map(|(label, _)| label.chars().take(3).collect::<String>().to_uppercase())
        .unwrap_or_default()
}

/// Diverging red-yellow-green palette.
pub fn band_rgb(band: ReductionBand) -> RGBColor {
    match band {
        ReductionBand::MajorCut => RGBColor(26, 152, 80),
        ReductionBand::Cut => RGBColor(145, 207, 96),
        ReductionBand::Flat => RGBColor(255, 255, 191),
        ReductionBand::Rise => RGBColor(252, 141, 89),
        ReductionBand::MajorRise => RGBColor(215, 48, 39),
    }
}

/// Same palette as a Ratatui color.
pub fn band_color(band: ReductionBand) -> Color {
    let RGBColor(r, g, b) = band_rgb(band);
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_include_zero() {
        let bars = vec![("Spain".to_string(), 20.0), ("Italy".to_string(), 10.0)];
        let [lo, hi] = ReductionBarChart::bounds_for(&bars);
        assert!(lo < 0.0 && lo > -2.0);
        assert!(hi > 20.0);

        let [lo, hi] = ReductionBarChart::bounds_for(&[("Malta".to_string(), -40.0)]);
        assert!(lo < -40.0);
        assert!(hi > 0.0);
    }

    #[test]
    fn labels_only_on_bar_centres() {
        let bars = vec![("Germany".to_string(), 30.0), ("France".to_string(), 20.0)];
        assert_eq!(bar_label(&bars, 0.0), "GER");
        assert_eq!(bar_label(&bars, 1.0), "FRA");
        assert_eq!(bar_label(&bars, 0.5), "");
        assert_eq!(bar_label(&bars, 2.0), "");
        assert_eq!(bar_label(&bars, -1.0), "");
    }
}
