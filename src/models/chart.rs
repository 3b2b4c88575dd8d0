//! Chart generation models

use serde::{Deserialize, Serialize};

/// A single data point on a price chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix seconds
    pub timestamp: i64,
    pub price: f64,
}

/// Price samples sorted ascending by timestamp. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceHistory(Vec<PricePoint>);

impl TryFrom<Vec<PricePoint>> for PriceHistory {
    type Error = &'static str;

    fn try_from(points: Vec<PricePoint>) -> Result<Self, Self::Error> {
        Self::from_points(points).ok_or("price history must contain at least one point")
    }
}

impl From<PriceHistory> for Vec<PricePoint> {
    fn from(history: PriceHistory) -> Self {
        history.0
    }
}

impl PriceHistory {
    /// Normalize raw samples into a history. Returns `None` when no points remain.
    pub fn from_points(mut points: Vec<PricePoint>) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        points.sort_by_key(|p| p.timestamp);
        Some(Self(points))
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.0
    }

    pub fn first(&self) -> &PricePoint {
        &self.0[0]
    }

    pub fn last(&self) -> &PricePoint {
        &self.0[self.0.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|p| p.price)
    }
}

/// Logical chart size before device scaling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDimensions {
    pub width: u32,
    pub height: u32,
}

impl ChartDimensions {
    pub const SPARKLINE: ChartDimensions = ChartDimensions { width: 300, height: 50 };

    /// Pixel size at the given device scale, at least 1x1
    pub fn scaled(&self, scale: f64) -> (u32, u32) {
        let w = (self.width as f64 * scale).round().max(1.0) as u32;
        let h = (self.height as f64 * scale).round().max(1.0) as u32;
        (w, h)
    }
}

impl Default for ChartDimensions {
    fn default() -> Self {
        Self::SPARKLINE
    }
}

/// RGBA8 raster with a transparent background
#[derive(Debug, Clone, PartialEq)]
pub struct ChartImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl ChartImage {
    /// RGBA at `(x, y)`, or `None` outside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.pixels.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Number of pixels with any coverage
    pub fn painted_pixels(&self) -> usize {
        self.pixels.chunks_exact(4).filter(|px| px[3] > 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(timestamp: i64, price: f64) -> PricePoint {
        PricePoint { timestamp, price }
    }

    #[test]
    fn test_history_sorts_ascending() {
        let history = PriceHistory::from_points(vec![pt(30, 3.0), pt(10, 1.0), pt(20, 2.0)]).unwrap();
        let ts: Vec<i64> = history.points().iter().map(|p| p.timestamp).collect();
        assert_eq!(ts, vec![10, 20, 30]);
        assert_eq!(history.first().price, 1.0);
        assert_eq!(history.last().price, 3.0);

        let again = PriceHistory::from_points(history.points().to_vec()).unwrap();
        assert_eq!(again, history);
    }

    #[test]
    fn test_empty_history_rejected() {
        assert!(PriceHistory::from_points(Vec::new()).is_none());
    }

    #[test]
    fn test_deserialize_enforces_history_invariants() {
        assert!(serde_json::from_str::<PriceHistory>("[]").is_err());

        let history: PriceHistory = serde_json::from_str(
            r#"[{"timestamp":30,"price":3.0},{"timestamp":10,"price":1.0},{"timestamp":20,"price":2.0}]"#,
        )
        .unwrap();
        let ts: Vec<i64> = history.points().iter().map(|p| p.timestamp).collect();
        assert_eq!(ts, vec![10, 20, 30]);
        assert_eq!(history.last().price, 3.0);

        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(json[0]["timestamp"], 10);
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let image = ChartImage {
            width: 2,
            height: 1,
            pixels: vec![1, 2, 3, 4, 5, 6, 7, 8],
        };
        assert_eq!(image.pixel(1, 0), Some([5, 6, 7, 8]));
        assert_eq!(image.pixel(2, 0), None);
        assert_eq!(image.pixel(0, 1), None);
        assert_eq!(image.pixel(u32::MAX, u32::MAX), None);
    }

    #[test]
    fn test_scaled_dimensions() {
        assert_eq!(ChartDimensions::SPARKLINE.scaled(3.0), (900, 150));
        assert_eq!(ChartDimensions::SPARKLINE.scaled(0.0), (1, 1));
    }
}
