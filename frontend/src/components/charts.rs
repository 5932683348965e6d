use std::f64::consts::PI;
use yew::prelude::*;

use crate::aggregate::{CategoryTotal, MonthlyPoint};
use crate::format::format_currency;

pub const PALETTE: [&str; 5] = ["#FFD700", "#FF4500", "#00CED1", "#32CD32", "#9370DB"];

const PIE_SIZE: f64 = 240.0;
const PIE_RADIUS: f64 = 100.0;
const TREND_WIDTH: f64 = 500.0;
const TREND_HEIGHT: f64 = 260.0;
const TREND_PAD: f64 = 40.0;

#[derive(Clone, Debug, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub color: &'static str,
    /// SVG path; `None` when the slice is the whole circle.
    pub path: Option<String>,
}

fn point_on_circle(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    (cx + r * angle.sin(), cy - r * angle.cos())
}

pub fn pie_slices(totals: &[CategoryTotal], cx: f64, cy: f64, r: f64) -> Vec<PieSlice> {
    let positive: Vec<&CategoryTotal> = totals.iter().filter(|t| t.total > 0.0).collect();
    let sum: f64 = positive.iter().map(|t| t.total).sum();
    if sum <= 0.0 {
        return Vec::new();
    }

    let mut start = 0.0_f64;
    positive
        .iter()
        .enumerate()
        .map(|(idx, t)| {
            let sweep = t.total / sum * 2.0 * PI;
            let path = if positive.len() == 1 {
                None
            } else {
                let (x0, y0) = point_on_circle(cx, cy, r, start);
                let (x1, y1) = point_on_circle(cx, cy, r, start + sweep);
                let large = if sweep > PI { 1 } else { 0 };
                Some(format!(
                    "M {cx:.2} {cy:.2} L {x0:.2} {y0:.2} A {r:.2} {r:.2} 0 {large} 1 {x1:.2} {y1:.2} Z"
                ))
            };
            start += sweep;
            PieSlice {
                label: t.category.to_string(),
                value: t.total,
                color: PALETTE[idx % PALETTE.len()],
                path,
            }
        })
        .collect()
}

/// Polyline coordinates for the trend chart, x evenly spaced, y scaled so
/// the largest month touches the top padding.
pub fn trend_points(points: &[MonthlyPoint], width: f64, height: f64, pad: f64) -> Vec<(f64, f64)> {
    let max = points.iter().map(|p| p.spend).fold(0.0_f64, f64::max);
    let span_x = width - 2.0 * pad;
    let span_y = height - 2.0 * pad;
    let step = if points.len() > 1 {
        span_x / (points.len() - 1) as f64
    } else {
        0.0
    };
    points
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            let x = pad + step * idx as f64;
            let ratio = if max > 0.0 { p.spend.max(0.0) / max } else { 0.0 };
            (x, height - pad - ratio * span_y)
        })
        .collect()
}

#[derive(Properties, PartialEq)]
pub struct CategoryChartProps {
    pub totals: Vec<CategoryTotal>,
}

#[function_component(CategoryChart)]
pub fn category_chart(props: &CategoryChartProps) -> Html {
    let center = PIE_SIZE / 2.0;
    let slices = pie_slices(&props.totals, center, center, PIE_RADIUS);

    html! {
        <div class="chart-section">
            <h2>{"Spending by Category"}</h2>
            if slices.is_empty() {
                <p class="chart-empty">{"No expenses to chart yet."}</p>
            } else {
                <div class="pie-chart">
                    <svg width={PIE_SIZE.to_string()} height={PIE_SIZE.to_string()} viewBox={format!("0 0 {PIE_SIZE} {PIE_SIZE}")}>
                        { for slices.iter().map(|slice| match &slice.path {
                            Some(d) => html! {
                                <path d={d.clone()} fill={slice.color}>
                                    <title>{ format!("{}: {}", slice.label, format_currency(slice.value)) }</title>
                                </path>
                            },
                            None => html! {
                                <circle cx={center.to_string()} cy={center.to_string()} r={PIE_RADIUS.to_string()} fill={slice.color}>
                                    <title>{ format!("{}: {}", slice.label, format_currency(slice.value)) }</title>
                                </circle>
                            },
                        }) }
                    </svg>
                    <ul class="chart-legend">
                        { for slices.iter().map(|slice| html! {
                            <li>
                                <span class="legend-swatch" style={format!("background: {}", slice.color)}></span>
                                { format!("{} ({})", slice.label, format_currency(slice.value)) }
                            </li>
                        }) }
                    </ul>
                </div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TrendChartProps {
    pub points: Vec<MonthlyPoint>,
}

#[function_component(MonthlyTrendChart)]
pub fn monthly_trend_chart(props: &TrendChartProps) -> Html {
    let coords = trend_points(&props.points, TREND_WIDTH, TREND_HEIGHT, TREND_PAD);
    let polyline = coords
        .iter()
        .map(|(x, y)| format!("{x:.2},{y:.2}"))
        .collect::<Vec<_>>()
        .join(" ");
    let max = props.points.iter().map(|p| p.spend).fold(0.0_f64, f64::max);
    let baseline = TREND_HEIGHT - TREND_PAD;

    html! {
        <div class="chart-section">
            <h2>{"Monthly Spending Trend"}</h2>
            <svg width={TREND_WIDTH.to_string()} height={TREND_HEIGHT.to_string()} viewBox={format!("0 0 {TREND_WIDTH} {TREND_HEIGHT}")}>
                <line x1={TREND_PAD.to_string()} y1={baseline.to_string()} x2={(TREND_WIDTH - TREND_PAD).to_string()} y2={baseline.to_string()} stroke="#888" stroke-dasharray="3 3" />
                <line x1={TREND_PAD.to_string()} y1={TREND_PAD.to_string()} x2={TREND_PAD.to_string()} y2={baseline.to_string()} stroke="#888" stroke-dasharray="3 3" />
                <text x="4" y={(TREND_PAD - 8.0).to_string()} font-size="10" fill="#ccc">{ format_currency(max) }</text>
                <polyline points={polyline} fill="none" stroke={PALETTE[0]} stroke-width="2" />
                { for props.points.iter().zip(coords.iter()).map(|(point, (x, y))| html! {
                    <g>
                        <circle cx={format!("{x:.2}")} cy={format!("{y:.2}")} r="3" fill={PALETTE[0]}>
                            <title>{ format!("{} {}: {}", point.label, point.year, format_currency(point.spend)) }</title>
                        </circle>
                        <text x={format!("{x:.2}")} y={(baseline + 16.0).to_string()} font-size="11" text-anchor="middle" fill="#ccc">{ point.label }</text>
                    </g>
                }) }
            </svg>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn total(category: Category, total: f64) -> CategoryTotal {
        CategoryTotal { category, total }
    }

    #[test]
    fn single_category_is_a_full_circle() {
        let slices = pie_slices(&[total(Category::Food, 10.0)], 50.0, 50.0, 40.0);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].path, None);
        assert_eq!(slices[0].color, PALETTE[0]);
    }

    #[test]
    fn colors_cycle_through_palette() {
        let totals: Vec<CategoryTotal> = (0..7)
            .map(|i| total(Category::Custom(format!("c{i}")), 1.0))
            .collect();
        let slices = pie_slices(&totals, 50.0, 50.0, 40.0);
        assert_eq!(slices.len(), 7);
        assert_eq!(slices[5].color, PALETTE[0]);
        assert_eq!(slices[6].color, PALETTE[1]);
        assert!(slices.iter().all(|s| s.path.is_some()));
    }

    #[test]
    fn zero_and_negative_totals_are_not_drawn() {
        let slices = pie_slices(
            &[total(Category::Food, 0.0), total(Category::Bills, -5.0)],
            50.0,
            50.0,
            40.0,
        );
        assert!(slices.is_empty());
    }

    #[test]
    fn largest_month_reaches_the_top() {
        let points = vec![
            MonthlyPoint { year: 2024, month: 1, label: "Jan", spend: 0.0 },
            MonthlyPoint { year: 2024, month: 2, label: "Feb", spend: 50.0 },
            MonthlyPoint { year: 2024, month: 3, label: "Mar", spend: 100.0 },
        ];
        let coords = trend_points(&points, 200.0, 100.0, 10.0);
        assert_eq!(coords[0], (10.0, 90.0));
        assert_eq!(coords[1], (100.0, 50.0));
        assert_eq!(coords[2], (190.0, 10.0));
    }
}
