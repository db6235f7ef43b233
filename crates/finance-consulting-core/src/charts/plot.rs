use super::canvas::{Canvas, Rgb};
use super::font::{draw_text, draw_text_centered, text_width, GLYPH_HEIGHT};

const MARGIN_LEFT: i32 = 130;
const MARGIN_RIGHT: i32 = 40;
const MARGIN_TOP: i32 = 80;
const MARGIN_BOTTOM: i32 = 80;
const LABEL_SCALE: i32 = 2;
const TITLE_SCALE: i32 = 3;
const TARGET_TICKS: usize = 6;

/// How a legend entry is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendMark {
    Line,
    Dashed,
    Area,
}

#[derive(Debug, Clone, Copy)]
pub struct LegendEntry<'a> {
    pub label: &'a str,
    pub color: Rgb,
    pub mark: LegendMark,
}

/// Pixel rectangle of the plotting region plus the data window it shows.
#[derive(Debug, Clone, Copy)]
pub struct PlotArea {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl PlotArea {
    pub fn new(canvas: &Canvas, (x_min, x_max): (f64, f64), (y_min, y_max): (f64, f64)) -> Self {
        let x_max = if x_max > x_min { x_max } else { x_min + 1.0 };
        let y_max = if y_max > y_min { y_max } else { y_min + 1.0 };
        PlotArea {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            right: canvas.width() as i32 - MARGIN_RIGHT,
            bottom: canvas.height() as i32 - MARGIN_BOTTOM,
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn to_px(&self, x: f64, y: f64) -> (i32, i32) {
        let fx = (x - self.x_min) / (self.x_max - self.x_min);
        let fy = (y - self.y_min) / (self.y_max - self.y_min);
        let px = self.left as f64 + fx * (self.right - self.left) as f64;
        let py = self.bottom as f64 - fy * (self.bottom - self.top) as f64;
        (px.round() as i32, py.round() as i32)
    }

    fn column_to_x(&self, px: i32) -> f64 {
        let f = (px - self.left) as f64 / (self.right - self.left) as f64;
        self.x_min + f * (self.x_max - self.x_min)
    }

    fn clamp_row(&self, py: i32) -> i32 {
        py.clamp(self.top, self.bottom)
    }

    /// Title, grid, axes and tick labels.
    pub fn draw_frame(
        &self,
        canvas: &mut Canvas,
        title: &str,
        x_label: &str,
        y_label: &str,
        format_x: impl Fn(f64) -> String,
        format_y: impl Fn(f64) -> String,
    ) {
        let center = (self.left + self.right) / 2;
        draw_text_centered(canvas, center, 20, title, Rgb::BLACK, TITLE_SCALE);

        for x in nice_ticks(self.x_min, self.x_max, TARGET_TICKS) {
            let (px, _) = self.to_px(x, self.y_min);
            canvas.draw_line((px, self.top), (px, self.bottom), Rgb::GRID, 1, 0);
            canvas.draw_line((px, self.bottom), (px, self.bottom + 6), Rgb::AXIS, 2, 0);
            draw_text_centered(canvas, px, self.bottom + 12, &format_x(x), Rgb::AXIS, LABEL_SCALE);
        }
        for y in nice_ticks(self.y_min, self.y_max, TARGET_TICKS) {
            let (_, py) = self.to_px(self.x_min, y);
            canvas.draw_line((self.left, py), (self.right, py), Rgb::GRID, 1, 0);
            canvas.draw_line((self.left - 6, py), (self.left, py), Rgb::AXIS, 2, 0);
            let label = format_y(y);
            let lx = self.left - 10 - text_width(&label, LABEL_SCALE);
            draw_text(canvas, lx, py - GLYPH_HEIGHT * LABEL_SCALE / 2, &label, Rgb::AXIS, LABEL_SCALE);
        }

        canvas.draw_line((self.left, self.top), (self.left, self.bottom), Rgb::AXIS, 2, 0);
        canvas.draw_line((self.left, self.bottom), (self.right, self.bottom), Rgb::AXIS, 2, 0);

        draw_text_centered(canvas, center, self.bottom + 44, x_label, Rgb::BLACK, LABEL_SCALE);
        draw_text(canvas, 10, self.top - 26, y_label, Rgb::BLACK, LABEL_SCALE);
    }

    /// Polyline through data points.
    pub fn draw_series(&self, canvas: &mut Canvas, points: &[(f64, f64)], color: Rgb, thickness: i32) {
        for pair in points.windows(2) {
            let a = self.to_px(pair[0].0, pair[0].1);
            let b = self.to_px(pair[1].0, pair[1].1);
            canvas.draw_line(a, b, color, thickness, 0);
        }
    }

    pub fn draw_hline(&self, canvas: &mut Canvas, y: f64, color: Rgb, dash: u32) {
        let (_, py) = self.to_px(self.x_min, y);
        canvas.draw_line((self.left, py), (self.right, py), color, 2, dash);
    }

    pub fn draw_vline(&self, canvas: &mut Canvas, x: f64, color: Rgb, dash: u32) {
        let (px, _) = self.to_px(x, self.y_min);
        canvas.draw_line((px, self.top), (px, self.bottom), color, 2, dash);
    }

    /// Shade, column by column, the band returned by `band(x)`. Columns where
    /// `band` yields `None` stay untouched.
    pub fn fill_band(
        &self,
        canvas: &mut Canvas,
        color: Rgb,
        alpha: f64,
        band: impl Fn(f64) -> Option<(f64, f64)>,
    ) {
        for px in self.left..=self.right {
            let x = self.column_to_x(px);
            if let Some((low, high)) = band(x) {
                let (_, py_low) = self.to_px(x, low);
                let (_, py_high) = self.to_px(x, high);
                canvas.blend_column(px, self.clamp_row(py_low), self.clamp_row(py_high), color, alpha);
            }
        }
    }

    /// Filled dot with a text callout to its upper left.
    pub fn annotate(&self, canvas: &mut Canvas, x: f64, y: f64, text: &str) {
        let (px, py) = self.to_px(x, y);
        canvas.fill_rect(px - 4, py - 4, 9, 9, Rgb::BLACK);
        let w = text_width(text, LABEL_SCALE);
        let tx = (px - w - 12).max(self.left + 8);
        let ty = (py - 30).max(self.top + 4);
        draw_text(canvas, tx, ty, text, Rgb::BLACK, LABEL_SCALE);
    }

    /// Legend box in the top-left corner of the plot.
    pub fn draw_legend(&self, canvas: &mut Canvas, entries: &[LegendEntry<'_>]) {
        let row_height = GLYPH_HEIGHT * LABEL_SCALE + 10;
        let widest = entries
            .iter()
            .map(|e| text_width(e.label, LABEL_SCALE))
            .max()
            .unwrap_or(0);
        let x0 = self.left + 16;
        let y0 = self.top + 12;
        let w = widest + 60;
        let h = entries.len() as i32 * row_height + 10;
        canvas.fill_rect(x0, y0, w, h, Rgb::WHITE);
        canvas.draw_line((x0, y0), (x0 + w, y0), Rgb::GRID, 1, 0);
        canvas.draw_line((x0, y0 + h), (x0 + w, y0 + h), Rgb::GRID, 1, 0);
        canvas.draw_line((x0, y0), (x0, y0 + h), Rgb::GRID, 1, 0);
        canvas.draw_line((x0 + w, y0), (x0 + w, y0 + h), Rgb::GRID, 1, 0);

        for (i, entry) in entries.iter().enumerate() {
            let ry = y0 + 8 + i as i32 * row_height;
            let mid = ry + GLYPH_HEIGHT * LABEL_SCALE / 2;
            match entry.mark {
                LegendMark::Line => canvas.draw_line((x0 + 8, mid), (x0 + 40, mid), entry.color, 3, 0),
                LegendMark::Dashed => canvas.draw_line((x0 + 8, mid), (x0 + 40, mid), entry.color, 2, 4),
                LegendMark::Area => canvas.fill_rect(x0 + 8, ry, 32, GLYPH_HEIGHT * LABEL_SCALE, entry.color),
            }
            draw_text(canvas, x0 + 50, ry, entry.label, Rgb::BLACK, LABEL_SCALE);
        }
    }
}

/// Linear interpolation over points sorted by x; clamps outside the range.
pub fn interpolate(points: &[(f64, f64)], x: f64) -> Option<f64> {
    let first = points.first()?;
    let last = points.last()?;
    if x <= first.0 {
        return Some(first.1);
    }
    if x >= last.0 {
        return Some(last.1);
    }
    let idx = points.partition_point(|p| p.0 <= x);
    let (x0, y0) = points[idx - 1];
    let (x1, y1) = points[idx];
    if (x1 - x0).abs() < f64::EPSILON {
        return Some(y1);
    }
    Some(y0 + (y1 - y0) * (x - x0) / (x1 - x0))
}

/// Round tick positions (1, 2, 5 × 10^k steps) covering [min, max].
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    let span = max - min;
    if !span.is_finite() || span <= 0.0 || target == 0 {
        return vec![min];
    }
    let raw = span / target as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let step = magnitude
        * if residual <= 1.0 {
            1.0
        } else if residual <= 2.0 {
            2.0
        } else if residual <= 5.0 {
            5.0
        } else {
            10.0
        };
    let start = (min / step).ceil() * step;
    let mut ticks = Vec::new();
    let mut tick = start;
    while tick <= max + step * 1e-9 {
        ticks.push(tick);
        tick += step;
    }
    ticks
}

/// Whole-unit number with thousands separators, e.g. `-12,500`.
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0 {
        format!("-{out}")
    } else {
        out
    }
}

pub fn format_money(value: f64) -> String {
    if value < 0.0 {
        format!("-${}", format_thousands(-value))
    } else {
        format!("${}", format_thousands(value))
    }
}
