use chrono::{Local, TimeZone, Utc};

use crate::models::{
    Axis, ChartDimensions, ChartImage, Color, Element, Font, ImageElement, Snapshot, TextAlign, TextElement, Widget,
};
use crate::utils::WidgetError;

pub const WIDGET_PADDING: f64 = 16.0;
pub const SECTION_SPACING: f64 = 8.0;

const HEADLINE_FONT: Font = Font::bold(24.0);
const DETAIL_FONT: Font = Font::system(12.0);
const FOOTER_FONT: Font = Font::system(10.0);

/// What the normal layout shows besides price data
#[derive(Debug, Clone, Copy)]
pub struct LayoutOptions {
    pub show_balance: bool,
    pub chart_size: ChartDimensions,
}

/// Green when flat or up, red when down
pub fn change_color(snapshot: &Snapshot) -> Color {
    if snapshot.is_up() {
        Color::GAIN
    } else {
        Color::LOSS
    }
}

/// `+$1.23 (4.56%)` or `-$1.23 (-4.56%)`
pub fn format_change(price_change: f64, percent_change: f64) -> String {
    let sign = if price_change >= 0.0 { '+' } else { '-' };
    format!("{}${:.2} ({:.2}%)", sign, price_change.abs(), percent_change)
}

/// Footer text in the given time zone
pub fn format_last_updated<Tz: TimeZone>(last_updated_millis: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match Utc.timestamp_millis_opt(last_updated_millis).single() {
        Some(utc) => format!("Last updated: {}", utc.with_timezone(tz).format("%Y-%m-%d %H:%M:%S")),
        None => "Last updated: unknown".to_string(),
    }
}

/// Normal layout: top row, chart, footer
pub fn compose(snapshot: &Snapshot, chart: ChartImage, options: &LayoutOptions) -> Widget {
    let main_stack = Element::Stack {
        axis: Axis::Vertical,
        children: vec![
            top_row(snapshot, options.show_balance),
            Element::Spacer(Some(SECTION_SPACING)),
            Element::Image(ImageElement {
                image: chart,
                size: (options.chart_size.width, options.chart_size.height),
            }),
            Element::Spacer(Some(SECTION_SPACING)),
            text(
                format_last_updated(snapshot.last_updated, &Local),
                FOOTER_FONT,
                Color::MUTED,
                TextAlign::Center,
            ),
        ],
    };

    Widget {
        background: Color::BLACK,
        padding: WIDGET_PADDING,
        content: vec![main_stack],
    }
}

/// Fallback layout carrying only the error message
pub fn compose_error(error: &WidgetError) -> Widget {
    Widget {
        background: Color::BLACK,
        padding: WIDGET_PADDING,
        content: vec![text(
            format!("Error: {}", error),
            DETAIL_FONT,
            Color::LOSS,
            TextAlign::Leading,
        )],
    }
}

fn top_row(snapshot: &Snapshot, show_balance: bool) -> Element {
    let mut left = vec![text(
        snapshot.symbol.to_uppercase(),
        HEADLINE_FONT,
        Color::WHITE,
        TextAlign::Leading,
    )];
    if show_balance {
        left.push(text(
            format!("{:.4} tokens", snapshot.balance),
            DETAIL_FONT,
            Color::MUTED,
            TextAlign::Leading,
        ));
        left.push(text(
            format!("${:.2}", snapshot.total_value),
            DETAIL_FONT,
            Color::MUTED,
            TextAlign::Leading,
        ));
    }

    let right = vec![
        text(
            format!("${:.2}", snapshot.current_price),
            HEADLINE_FONT,
            Color::WHITE,
            TextAlign::Trailing,
        ),
        text(
            format_change(snapshot.price_change, snapshot.percent_change),
            DETAIL_FONT,
            change_color(snapshot),
            TextAlign::Trailing,
        ),
    ];

    Element::Stack {
        axis: Axis::Horizontal,
        children: vec![
            Element::Stack { axis: Axis::Vertical, children: left },
            Element::Spacer(None),
            Element::Stack { axis: Axis::Vertical, children: right },
        ],
    }
}

fn text(text: String, font: Font, color: Color, align: TextAlign) -> Element {
    Element::Text(TextElement { text, font, color, align })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PriceHistory, PricePoint};

    fn snapshot(first: f64, last: f64, balance: f64) -> Snapshot {
        let history = PriceHistory::from_points(vec![
            PricePoint { timestamp: 1, price: first },
            PricePoint { timestamp: 2, price: last },
        ])
        .unwrap();
        Snapshot {
            symbol: "mpl".to_string(),
            current_price: last,
            price_change: last - first,
            percent_change: (last - first) / first * 100.0,
            price_history: history,
            balance,
            total_value: balance * last,
            last_updated: 1_700_000_000_000,
        }
    }

    fn blank_chart() -> ChartImage {
        ChartImage {
            width: 2,
            height: 1,
            pixels: vec![0; 8],
        }
    }

    fn options(show_balance: bool) -> LayoutOptions {
        LayoutOptions {
            show_balance,
            chart_size: ChartDimensions::SPARKLINE,
        }
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(10.0, 10.0), "+$10.00 (10.00%)");
        assert_eq!(format_change(0.0, 0.0), "+$0.00 (0.00%)");
        assert_eq!(format_change(-0.5, -2.5), "-$0.50 (-2.50%)");
    }

    #[test]
    fn test_format_last_updated() {
        assert_eq!(format_last_updated(1_700_000_000_000, &Utc), "Last updated: 2023-11-14 22:13:20");
    }

    #[test]
    fn test_format_last_updated_out_of_range() {
        assert_eq!(format_last_updated(i64::MAX, &Utc), "Last updated: unknown");
        assert_eq!(format_last_updated(i64::MIN, &Utc), "Last updated: unknown");
    }

    #[test]
    fn test_layout_without_balance() {
        let widget = compose(&snapshot(100.0, 110.0, 0.0), blank_chart(), &options(false));
        let texts: Vec<&str> = widget.texts().iter().map(|t| t.text.as_str()).collect();

        assert_eq!(texts.len(), 4);
        assert_eq!(texts[0], "MPL");
        assert_eq!(texts[1], "$110.00");
        assert_eq!(texts[2], "+$10.00 (10.00%)");
        assert!(texts[3].starts_with("Last updated: "));

        let all = widget.texts();
        assert_eq!(all[1].align, TextAlign::Trailing);
        assert_eq!(all[2].color, Color::GAIN);
        assert_eq!(all[3].align, TextAlign::Center);

        let images = widget.images();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].size, (300, 50));
    }

    #[test]
    fn test_layout_with_balance_and_loss() {
        let widget = compose(&snapshot(2.0, 1.5, 3.0), blank_chart(), &options(true));
        let texts = widget.texts();

        assert_eq!(texts[1].text, "3.0000 tokens");
        assert_eq!(texts[2].text, "$4.50");
        assert_eq!(texts[4].text, "-$0.50 (-25.00%)");
        assert_eq!(texts[4].color, Color::LOSS);
    }

    #[test]
    fn test_error_layout_is_message_only() {
        let widget = compose_error(&WidgetError::DataUnavailable("Empty price history".to_string()));
        let texts = widget.texts();
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].text, "Error: Price data unavailable: Empty price history");
        assert_eq!(texts[0].color, Color::LOSS);
        assert!(widget.images().is_empty());
    }
}
