use eframe::egui::{self, Align2, FontId, Sense, Stroke, StrokeKind};

use super::style;
use crate::presenter::{GAUGE_AXIS, GaugeView};

const BAR_HEIGHT: f32 = 18.0;
const TICK_HEIGHT: f32 = 5.0;
const LABEL_SPACE: f32 = 14.0;

/// Horizontal magnitude bar with integer ticks along the fixed axis.
pub(super) fn render_gauge(ui: &mut egui::Ui, gauge: &GaugeView) {
    let palette = style::palette();
    let width = ui.available_width().max(120.0);
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(width, BAR_HEIGHT + TICK_HEIGHT + LABEL_SPACE),
        Sense::hover(),
    );
    let painter = ui.painter_at(rect);
    let bar = egui::Rect::from_min_size(rect.min, egui::vec2(rect.width(), BAR_HEIGHT));
    painter.rect_filled(bar, 0.0, palette.bg_primary);
    let filled = egui::Rect::from_min_size(
        bar.min,
        egui::vec2(bar.width() * gauge.fill_fraction, BAR_HEIGHT),
    );
    painter.rect_filled(filled, 0.0, palette.accent_salmon);
    painter.rect_stroke(bar, 0.0, style::outer_border(), StrokeKind::Inside);

    let (min, max) = GAUGE_AXIS;
    let ticks = (max - min) as usize;
    for step in 0..=ticks {
        let x = bar.left() + bar.width() * step as f32 / ticks as f32;
        painter.line_segment(
            [
                egui::pos2(x, bar.bottom()),
                egui::pos2(x, bar.bottom() + TICK_HEIGHT),
            ],
            Stroke::new(1.0, palette.text_muted),
        );
        let align = match step {
            0 => Align2::LEFT_TOP,
            s if s == ticks => Align2::RIGHT_TOP,
            _ => Align2::CENTER_TOP,
        };
        painter.text(
            egui::pos2(x, bar.bottom() + TICK_HEIGHT),
            align,
            format!("{}", min as usize + step),
            FontId::proportional(10.0),
            palette.text_muted,
        );
    }
    response.on_hover_text(format!("Magnitude {:.4}", gauge.value));
}
