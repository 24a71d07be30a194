use maud::{html, Markup};

use crate::domain::PriceHistory;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 420.0;
const LEFT: f64 = 80.0;
const RIGHT: f64 = 20.0;
const TOP: f64 = 50.0;
const BOTTOM: f64 = 90.0;
const Y_TICKS: usize = 5;

/// Bars for each price plus a red trend line through the bar tops.
/// The x axis is the observation index, labelled with its date.
pub fn price_chart(address: &str, history: &PriceHistory) -> Markup {
    let points: Vec<_> = history.points().collect();
    let plot_w = WIDTH - LEFT - RIGHT;
    let plot_h = HEIGHT - TOP - BOTTOM;

    let max_price = points.iter().map(|(_, p)| *p).fold(0.0_f64, f64::max);
    let y_max = if max_price > 0.0 { max_price * 1.1 } else { 1.0 };

    let band = plot_w / points.len().max(1) as f64;
    let x_at = |i: usize| LEFT + band * (i as f64 + 0.5);
    let y_at = |price: f64| TOP + plot_h - (price.max(0.0) / y_max) * plot_h;

    let trend = points
        .iter()
        .enumerate()
        .map(|(i, (_, p))| format!("{:.1},{:.1}", x_at(i), y_at(*p)))
        .collect::<Vec<_>>()
        .join(" ");

    html! {
        svg
            xmlns="http://www.w3.org/2000/svg"
            viewBox=(format!("0 0 {WIDTH} {HEIGHT}"))
            width="100%"
            role="img"
            class="price-chart"
        {
            rect x="0" y="0" width=(WIDTH) height=(HEIGHT) fill="#111111" {}
            text x=(WIDTH / 2.0) y="28" fill="#fafafa" font-size="18" text-anchor="middle" {
                "Price Changes for Address: " (address)
            }

            @for step in 0..=Y_TICKS {
                @let value = y_max * step as f64 / Y_TICKS as f64;
                @let y = y_at(value);
                line x1=(LEFT) x2=(WIDTH - RIGHT) y1=(y) y2=(y) stroke="#333333" stroke-width="1" {}
                text x=(LEFT - 8.0) y=(y + 4.0) fill="#d1d5db" font-size="11" text-anchor="end" {
                    (format_price(value))
                }
            }

            @for (i, (date, price)) in points.iter().enumerate() {
                @let x = x_at(i);
                @let y = y_at(*price);
                rect
                    x=(format!("{:.1}", x - band * 0.3))
                    y=(format!("{:.1}", y))
                    width=(format!("{:.1}", band * 0.6))
                    height=(format!("{:.1}", TOP + plot_h - y))
                    fill="royalblue"
                {
                    title { (date.format("%m/%d/%Y").to_string()) ": " (format_price(*price)) }
                }
                text
                    x=(format!("{:.1}", x))
                    y=(TOP + plot_h + 16.0)
                    fill="#d1d5db"
                    font-size="11"
                    text-anchor="end"
                    transform=(format!("rotate(-45 {:.1} {:.1})", x, TOP + plot_h + 16.0))
                {
                    (date.format("%m/%d/%Y").to_string())
                }
            }

            polyline points=(trend) fill="none" stroke="red" stroke-width="2" {}
            @for (i, (_, price)) in points.iter().enumerate() {
                circle cx=(format!("{:.1}", x_at(i))) cy=(format!("{:.1}", y_at(*price))) r="4" fill="red" {}
            }

            text x=(LEFT + plot_w / 2.0) y=(HEIGHT - 8.0) fill="#fafafa" font-size="13" text-anchor="middle" { "Date" }
            text
                x="16"
                y=(TOP + plot_h / 2.0)
                fill="#fafafa"
                font-size="13"
                text-anchor="middle"
                transform=(format!("rotate(-90 16 {})", TOP + plot_h / 2.0))
            { "Price" }
        }
    }
}

/// `$1,234,567` style, whole dollars.
pub fn format_price(value: f64) -> String {
    let whole = value.round() as i64;
    let digits = whole.unsigned_abs().to_string();

    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if whole < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
