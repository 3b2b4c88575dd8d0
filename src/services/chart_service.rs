use plotters::prelude::{BitMapBackend, IntoDrawingArea, PathElement, RGBColor};
use plotters::style::Color as _;

use crate::models::{ChartDimensions, ChartImage, Color, PriceHistory};
use crate::utils::WidgetError;

/// Fraction of the price range added above and below the line
pub const RANGE_BUFFER_RATIO: f64 = 0.1;
/// Logical stroke width, multiplied by the device scale
pub const STROKE_WIDTH: f64 = 2.0;
/// Largest raster the bitmap canvas will allocate
pub const MAX_CANVAS_PIXELS: usize = 4096 * 4096;

/// Minimal drawing surface the sparkline is stroked onto
pub trait Canvas {
    /// Pixel size
    fn size(&self) -> (u32, u32);

    fn stroke_polyline(&mut self, points: &[(f64, f64)], color: Color, width: f64) -> Result<(), WidgetError>;
}

/// Map a price series onto pixel coordinates
///
/// Prices are scaled linearly between min and max, padded by
/// `RANGE_BUFFER_RATIO` of the range on each side, with Y inverted so
/// higher prices sit higher on screen. A flat series maps every point to
/// mid-height. A single point becomes a horizontal line across the width.
pub fn sparkline_points(history: &PriceHistory, width: f64, height: f64) -> Vec<(f64, f64)> {
    let mid = height / 2.0;
    let count = history.len();

    if count == 1 {
        return vec![(0.0, mid), (width, mid)];
    }

    let min = history.prices().fold(f64::INFINITY, f64::min);
    let max = history.prices().fold(f64::NEG_INFINITY, f64::max);

    let buffer = (max - min) * RANGE_BUFFER_RATIO;
    let adjusted_min = min - buffer;
    let adjusted_max = max + buffer;
    let range = adjusted_max - adjusted_min;

    history
        .prices()
        .enumerate()
        .map(|(i, price)| {
            let x = (i as f64 / (count - 1) as f64) * width;
            let y = if range > 0.0 {
                height - ((price - adjusted_min) / range) * height
            } else {
                mid
            };
            (x, y)
        })
        .collect()
}

/// Stroke the sparkline for `history` across the whole canvas
pub fn draw_sparkline<C: Canvas + ?Sized>(
    canvas: &mut C,
    history: &PriceHistory,
    color: Color,
    device_scale: f64,
) -> Result<(), WidgetError> {
    let (width, height) = canvas.size();
    let points = sparkline_points(history, width as f64, height as f64);
    canvas.stroke_polyline(&points, color, STROKE_WIDTH * device_scale)
}

/// Render the sparkline to a transparent image at device resolution
pub fn render_sparkline(
    history: &PriceHistory,
    color: Color,
    dimensions: ChartDimensions,
    device_scale: f64,
) -> Result<ChartImage, WidgetError> {
    let (width, height) = dimensions.scaled(device_scale);
    let mut canvas = BitmapCanvas::new(width, height)?;
    draw_sparkline(&mut canvas, history, color, device_scale)?;
    Ok(canvas.into_image())
}

/// Plotters-backed raster canvas
///
/// Strokes are rasterized on black, then coverage is recovered as alpha for
/// the stroke color. Only meaningful for single-color drawings.
pub struct BitmapCanvas {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
    stroke: Option<Color>,
}

impl BitmapCanvas {
    pub fn new(width: u32, height: u32) -> Result<Self, WidgetError> {
        let pixel_count = (width as usize)
            .checked_mul(height as usize)
            .filter(|n| *n <= MAX_CANVAS_PIXELS)
            .ok_or_else(|| {
                WidgetError::Chart(format!("Canvas {}x{} exceeds {} pixels", width, height, MAX_CANVAS_PIXELS))
            })?;

        Ok(Self {
            width,
            height,
            rgb: vec![0; pixel_count * 3],
            stroke: None,
        })
    }

    pub fn into_image(self) -> ChartImage {
        let pixel_count = self.rgb.len() / 3;
        let mut pixels = Vec::with_capacity(pixel_count * 4);

        match self.stroke {
            Some(c) => {
                let peak = c.r.max(c.g).max(c.b).max(1) as f64;
                for px in self.rgb.chunks_exact(3) {
                    let intensity = px[0].max(px[1]).max(px[2]) as f64;
                    let alpha = (intensity / peak * 255.0).round().min(255.0) as u8;
                    pixels.extend_from_slice(&[c.r, c.g, c.b, alpha]);
                }
            }
            None => pixels.resize(pixel_count * 4, 0),
        }

        ChartImage {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

impl Canvas for BitmapCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn stroke_polyline(&mut self, points: &[(f64, f64)], color: Color, width: f64) -> Result<(), WidgetError> {
        let path: Vec<(i32, i32)> = points
            .iter()
            .map(|&(x, y)| (x.round() as i32, y.round() as i32))
            .collect();
        let stroke_width = width.round().max(1.0) as u32;

        {
            let backend = BitMapBackend::with_buffer(&mut self.rgb, (self.width, self.height));
            let root = backend.into_drawing_area();

            root.draw(&PathElement::new(
                path,
                RGBColor(color.r, color.g, color.b).stroke_width(stroke_width),
            ))
            .map_err(|e| WidgetError::Chart(format!("Failed to draw line: {}", e)))?;

            root.present()
                .map_err(|e| WidgetError::Chart(format!("Failed to render chart: {}", e)))?;
        }

        self.stroke = Some(color);
        Ok(())
    }
}
