use std::fmt::Write as _;

use super::surface::WidgetSurface;
use crate::models::{Axis, Color, ImageElement, TextAlign, TextElement};

/// Headless surface producing an indented outline of the layout
#[derive(Debug, Default)]
pub struct TextPreview {
    lines: Vec<String>,
    depth: usize,
}

impl TextPreview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    fn push_line(&mut self, line: String) {
        self.lines.push(format!("{}{}", "  ".repeat(self.depth), line));
    }
}

impl WidgetSurface for TextPreview {
    fn set_background(&mut self, color: Color) {
        self.push_line(format!("widget background={}", color.hex()));
    }

    fn set_padding(&mut self, padding: f64) {
        if let Some(first) = self.lines.first_mut() {
            let _ = write!(first, " padding={}", padding);
        }
    }

    fn push_stack(&mut self, axis: Axis) {
        let name = match axis {
            Axis::Horizontal => "hstack",
            Axis::Vertical => "vstack",
        };
        self.push_line(name.to_string());
        self.depth += 1;
    }

    fn pop_stack(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn place_text(&mut self, text: &TextElement) {
        let align = match text.align {
            TextAlign::Leading => "leading",
            TextAlign::Center => "center",
            TextAlign::Trailing => "trailing",
        };
        let weight = if text.font.bold { " bold" } else { "" };
        self.push_line(format!(
            "text {:?} size={}{} color={} align={}",
            text.text,
            text.font.size,
            weight,
            text.color.hex(),
            align
        ));
    }

    fn place_image(&mut self, image: &ImageElement) {
        self.push_line(format!(
            "image {}x{} ({}x{} px, {} painted)",
            image.size.0,
            image.size.1,
            image.image.width,
            image.image.height,
            image.image.painted_pixels()
        ));
    }

    fn add_spacer(&mut self, length: Option<f64>) {
        match length {
            Some(len) => self.push_line(format!("spacer {}", len)),
            None => self.push_line("spacer".to_string()),
        }
    }
}
