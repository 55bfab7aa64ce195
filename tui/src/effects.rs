//! Overlay animation effects: the microscope pops in, the celebration slides up.

use ratatui::layout::Rect;

use matter_engine::{OverlayEffect, OverlayEffectKind};

/// Transform `base` according to the effect's progress.
#[must_use]
pub fn apply_overlay_effect(effect: &OverlayEffect, base: Rect, viewport: Rect) -> Rect {
    let t = ease_out_cubic(effect.progress());
    match effect.kind() {
        OverlayEffectKind::PopScale => scale_rect(base, 0.5 + 0.5 * t),
        OverlayEffectKind::SlideUp => {
            let viewport_bottom = viewport.y.saturating_add(viewport.height);
            let base_bottom = base.y.saturating_add(base.height);
            let room = viewport_bottom.saturating_sub(base_bottom);
            let offset = room.min(base.height).min(8);
            let y_offset = ((1.0 - t) * f32::from(offset)).round() as u16;
            Rect {
                y: base.y.saturating_add(y_offset),
                ..base
            }
        }
    }
}

fn scale_rect(base: Rect, scale: f32) -> Rect {
    let width = (f32::from(base.width) * scale).round() as u16;
    let height = (f32::from(base.height) * scale).round() as u16;
    let width = width.clamp(1, base.width.max(1));
    let height = height.clamp(1, base.height.max(1));
    Rect {
        x: base.x + base.width.saturating_sub(width) / 2,
        y: base.y + base.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}
