//! Data models shared by services and the widget layer

pub mod chart;
pub mod snapshot;
pub mod widget;

pub use chart::{ChartDimensions, ChartImage, PriceHistory, PricePoint};
pub use snapshot::Snapshot;
pub use widget::{Axis, Color, Element, Font, ImageElement, TextAlign, TextElement, Widget};
