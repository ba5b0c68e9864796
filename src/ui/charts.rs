use std::ops::RangeInclusive;

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridInput, GridMark, Plot};

use crate::color::outline_for;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Bar charts (central panel)
// ---------------------------------------------------------------------------

/// One grid mark per whole number inside `[lo, hi]`, clamped to the bounds.
fn integer_marks(input: GridInput, lo: f64, hi: f64) -> Vec<GridMark> {
    let start = input.bounds.0.max(lo).ceil() as i64;
    let end = input.bounds.1.min(hi).floor() as i64;
    (start..=end)
        .map(|v| GridMark {
            value: v as f64,
            step_size: 1.0,
        })
        .collect()
}

fn styled(bar: Bar, color: Color32) -> Bar {
    bar.fill(color).stroke(Stroke::new(1.0, outline_for(color))).width(0.7)
}

/// Vertical bars of sales per hour, one x tick per hour.
pub fn hourly_chart(ui: &mut Ui, state: &AppState) {
    ui.strong("Sales by Hour");

    let bars: Vec<Bar> = state
        .view
        .aggregations
        .by_hour
        .iter()
        .map(|&(hour, total)| styled(Bar::new(hour as f64, total).name(format!("{hour}:00")), state.bar_color))
        .collect();

    let chart = BarChart::new(bars)
        .color(state.bar_color)
        .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| {
            format!("{}\nUS $ {:.2}", bar.name, bar.value)
        }));

    Plot::new("sales_by_hour")
        .x_axis_label("hour")
        .y_axis_label("Total")
        .x_grid_spacer(|input| integer_marks(input, 0.0, 23.0))
        .x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| format!("{}", mark.value as i64))
        .show_grid([false, false])
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

/// Horizontal bars of sales per product line, smallest at the bottom.
pub fn product_line_chart(ui: &mut Ui, state: &AppState) {
    ui.strong("Sales by Product Line");

    let groups = &state.view.aggregations.by_product_line;
    let bars: Vec<Bar> = groups
        .iter()
        .enumerate()
        .map(|(i, (name, total))| styled(Bar::new(i as f64, *total).name(name), state.bar_color))
        .collect();

    let chart = BarChart::new(bars)
        .horizontal()
        .color(state.bar_color)
        .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| {
            format!("{}\nUS $ {:.2}", bar.name, bar.value)
        }));

    let labels: Vec<String> = groups.iter().map(|(name, _)| name.clone()).collect();
    let last = labels.len().saturating_sub(1) as f64;

    Plot::new("sales_by_product_line")
        .x_axis_label("Total")
        .y_grid_spacer(move |input| integer_marks(input, 0.0, last))
        .y_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            labels
                .get(mark.value.round() as usize)
                .cloned()
                .unwrap_or_default()
        })
        .show_grid([false, false])
        .include_x(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marks(lo: f64, hi: f64, clamp_hi: f64) -> Vec<f64> {
        let input = GridInput {
            bounds: (lo, hi),
            base_step_size: 0.1,
        };
        integer_marks(input, 0.0, clamp_hi)
            .into_iter()
            .map(|m| m.value)
            .collect()
    }

    #[test]
    fn one_mark_per_hour() {
        assert_eq!(marks(9.4, 13.2, 23.0), vec![10.0, 11.0, 12.0, 13.0]);
        assert_eq!(marks(-2.0, 30.0, 23.0).len(), 24);
    }

    #[test]
    fn no_marks_outside_categories() {
        assert!(marks(-0.5, -0.1, 5.0).is_empty());
        assert_eq!(marks(-1.0, 9.0, 2.0), vec![0.0, 1.0, 2.0]);
    }
}
