use crate::models::{Axis, Color, Element, ImageElement, TextElement, Widget};

/// Host layout primitives the composed widget is presented through
pub trait WidgetSurface {
    fn set_background(&mut self, color: Color);
    fn set_padding(&mut self, padding: f64);
    fn push_stack(&mut self, axis: Axis);
    fn pop_stack(&mut self);
    fn place_text(&mut self, text: &TextElement);
    fn place_image(&mut self, image: &ImageElement);
    /// `None` is a flexible spacer
    fn add_spacer(&mut self, length: Option<f64>);
}

/// Replay a composed widget onto a host surface
pub fn present<S: WidgetSurface + ?Sized>(widget: &Widget, surface: &mut S) {
    surface.set_background(widget.background);
    surface.set_padding(widget.padding);
    for element in &widget.content {
        present_element(element, surface);
    }
}

fn present_element<S: WidgetSurface + ?Sized>(element: &Element, surface: &mut S) {
    match element {
        Element::Stack { axis, children } => {
            surface.push_stack(*axis);
            for child in children {
                present_element(child, surface);
            }
            surface.pop_stack();
        }
        Element::Text(text) => surface.place_text(text),
        Element::Image(image) => surface.place_image(image),
        Element::Spacer(length) => surface.add_spacer(*length),
    }
}
