//! Layout tree produced by the composer

use super::chart::ChartImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const MUTED: Color = Color::rgb(0x88, 0x88, 0x88);
    pub const GAIN: Color = Color::rgb(0x4c, 0xaf, 0x50);
    pub const LOSS: Color = Color::rgb(0xf4, 0x43, 0x36);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f64,
    pub bold: bool,
}

impl Font {
    pub const fn system(size: f64) -> Self {
        Self { size, bold: false }
    }

    pub const fn bold(size: f64) -> Self {
        Self { size, bold: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Leading,
    Center,
    Trailing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub text: String,
    pub font: Font,
    pub color: Color,
    pub align: TextAlign,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageElement {
    pub image: ChartImage,
    /// Logical display size
    pub size: (u32, u32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Stack { axis: Axis, children: Vec<Element> },
    Text(TextElement),
    Image(ImageElement),
    /// `None` is a flexible spacer
    Spacer(Option<f64>),
}

/// Root of a composed widget
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub background: Color,
    pub padding: f64,
    pub content: Vec<Element>,
}

impl Widget {
    /// All text in document order
    pub fn texts(&self) -> Vec<&TextElement> {
        fn walk<'a>(elements: &'a [Element], out: &mut Vec<&'a TextElement>) {
            for element in elements {
                match element {
                    Element::Stack { children, .. } => walk(children, out),
                    Element::Text(t) => out.push(t),
                    _ => {}
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.content, &mut out);
        out
    }

    pub fn images(&self) -> Vec<&ImageElement> {
        fn walk<'a>(elements: &'a [Element], out: &mut Vec<&'a ImageElement>) {
            for element in elements {
                match element {
                    Element::Stack { children, .. } => walk(children, out),
                    Element::Image(i) => out.push(i),
                    _ => {}
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.content, &mut out);
        out
    }
}
