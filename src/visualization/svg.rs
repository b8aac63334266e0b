//! Minimal SVG canvas: explicit shape calls, a linear scale and a plot frame.

use std::fmt::Write as _;

pub const FONT_FAMILY: &str = "DejaVu Sans, Arial, sans-serif";
/// Colour of axes, outlines and whiskers.
pub const INK: &str = "#2b2b2b";

/// Escape the characters reserved in SVG text content.
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('\'', "&apos;")
}

/// Map `value` from `[domain_min, domain_max]` onto `[range_min, range_max]`.
///
/// A degenerate domain maps everything to the middle of the range.
///
/// # Examples
///
/// ```
/// use reef_survey_analyzer::visualization::scale;
///
/// assert_eq!(scale(5.0, 0.0, 10.0, 0.0, 100.0), 50.0);
/// assert_eq!(scale(3.0, 2.0, 2.0, 10.0, 20.0), 15.0);
/// ```
pub fn scale(value: f64, domain_min: f64, domain_max: f64, range_min: f64, range_max: f64) -> f64 {
    if domain_max == domain_min {
        return (range_min + range_max) / 2.0;
    }
    range_min + (value - domain_min) * (range_max - range_min) / (domain_max - domain_min)
}

/// `n` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Coordinate with at most two decimals and no trailing zeros.
pub fn fmt_num(value: f64) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// Fill, outline and opacity of a shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    fill: Option<String>,
    stroke: Option<String>,
    opacity: Option<f64>,
}

impl Style {
    pub fn fill(color: impl Into<String>) -> Self {
        Self {
            fill: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn stroke(mut self, color: impl Into<String>) -> Self {
        self.stroke = Some(color.into());
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    fn attrs(&self) -> String {
        let mut out = String::new();
        if let Some(fill) = &self.fill {
            let _ = write!(out, " fill='{}'", escape_attr(fill));
        }
        if let Some(stroke) = &self.stroke {
            let _ = write!(out, " stroke='{}'", escape_attr(stroke));
        }
        if let Some(opacity) = self.opacity {
            let _ = write!(out, " opacity='{}'", fmt_num(opacity));
        }
        out
    }
}

/// An SVG document under construction.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    width: u32,
    height: u32,
    body: String,
}

impl SvgDocument {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width as f64
    }

    pub fn height(&self) -> f64 {
        self.height as f64
    }

    /// Straight line in the ink colour.
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> &mut Self {
        let _ = writeln!(
            self.body,
            "<line x1='{}' y1='{}' x2='{}' y2='{}' stroke='{INK}'/>",
            fmt_num(x1),
            fmt_num(y1),
            fmt_num(x2),
            fmt_num(y2)
        );
        self
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: &Style) -> &mut Self {
        let _ = writeln!(
            self.body,
            "<rect x='{}' y='{}' width='{}' height='{}'{}/>",
            fmt_num(x),
            fmt_num(y),
            fmt_num(width),
            fmt_num(height.max(0.0)),
            style.attrs()
        );
        self
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, style: &Style) -> &mut Self {
        let _ = writeln!(
            self.body,
            "<circle cx='{}' cy='{}' r='{}'{}/>",
            fmt_num(cx),
            fmt_num(cy),
            fmt_num(r),
            style.attrs()
        );
        self
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, size: u32, anchor: Anchor) -> &mut Self {
        let _ = writeln!(
            self.body,
            "<text x='{}' y='{}' font-size='{size}' text-anchor='{}' font-family='{FONT_FAMILY}'>{}</text>",
            fmt_num(x),
            fmt_num(y),
            anchor.as_str(),
            escape_text(content)
        );
        self
    }

    /// Text anchored at (x, y) and rotated about that point.
    pub fn rotated_text(
        &mut self,
        x: f64,
        y: f64,
        degrees: f64,
        content: &str,
        size: u32,
        anchor: Anchor,
    ) -> &mut Self {
        let _ = writeln!(
            self.body,
            "<g transform='translate({},{}) rotate({})'><text font-size='{size}' text-anchor='{}' font-family='{FONT_FAMILY}'>{}</text></g>",
            fmt_num(x),
            fmt_num(y),
            fmt_num(degrees),
            anchor.as_str(),
            escape_text(content)
        );
        self
    }

    /// Close the document and return its text.
    pub fn finish(self) -> String {
        format!(
            "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}' viewBox='0 0 {w} {h}'>\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

/// Space around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 70.0,
            right: 20.0,
            top: 50.0,
            bottom: 100.0,
        }
    }
}

/// Plot area of a chart with a linear y axis.
///
/// Pixel y grows downwards: `bottom` is the x-axis, `top` the end of the y-axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotFrame {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl PlotFrame {
    pub fn new(width: f64, height: f64, margins: Margins, y_min: f64, y_max: f64) -> Self {
        Self {
            left: margins.left,
            right: width - margins.right,
            top: margins.top,
            bottom: height - margins.bottom,
            y_min,
            y_max,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Pixel row of a data value.
    pub fn y(&self, value: f64) -> f64 {
        scale(value, self.y_min, self.y_max, self.bottom, self.top)
    }

    /// Both axes plus `ticks` labelled marks on the y axis.
    pub fn draw_axes(&self, doc: &mut SvgDocument, ticks: usize) {
        doc.line(self.left, self.bottom, self.right, self.bottom);
        doc.line(self.left, self.bottom, self.left, self.top);
        for tick in linspace(self.y_min, self.y_max, ticks) {
            let y = self.y(tick);
            doc.line(self.left - 4.0, y, self.left, y);
            doc.text(self.left - 8.0, y + 4.0, &format!("{tick:.0}"), 11, Anchor::End);
        }
    }

    /// Slanted category label below the x axis.
    pub fn category_label(&self, doc: &mut SvgDocument, x: f64, label: &str) {
        doc.rotated_text(x, self.bottom + 30.0, -30.0, label, 11, Anchor::End);
    }

    /// Chart title and axis titles.
    pub fn draw_titles(&self, doc: &mut SvgDocument, title: &str, x_title: &str, y_title: &str) {
        let (width, height) = (doc.width(), doc.height());
        doc.text(width / 2.0, 28.0, title, 16, Anchor::Middle);
        doc.text(width / 2.0, height - 10.0, x_title, 12, Anchor::Middle);
        doc.rotated_text(18.0, height / 2.0, -90.0, y_title, 12, Anchor::Middle);
    }
}
