use egui::{Color32, Visuals};

pub(crate) fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |c1: u8, c2: u8| -> u8 { ((c1 as f32 * (1.0 - t)) + (c2 as f32 * t)).round() as u8 };
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

const ACCENT: Color32 = Color32::from_rgb(0x9b, 0x87, 0xf5);
const NOW_LINE: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);

#[derive(Clone, Copy)]
pub(crate) struct HeaderPalette {
    pub cell_bg: Color32,
    pub today_bg: Color32,
    pub border: Color32,
    pub today_border: Color32,
    pub text: Color32,
    pub muted_text: Color32,
}

impl HeaderPalette {
    pub fn from_visuals(visuals: &Visuals) -> Self {
        Self {
            cell_bg: visuals.faint_bg_color,
            today_bg: with_alpha(ACCENT, if visuals.dark_mode { 70 } else { 40 }),
            border: visuals.widgets.noninteractive.bg_stroke.color,
            today_border: ACCENT,
            text: visuals.strong_text_color(),
            muted_text: visuals.weak_text_color(),
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct TimeGridPalette {
    pub label_bg: Color32,
    pub column_bg: Color32,
    pub today_bg: Color32,
    pub hour_line: Color32,
    pub slot_line: Color32,
    pub hover_overlay: Color32,
    pub drop_overlay: Color32,
    pub now_line: Color32,
    pub label_text: Color32,
    pub block_text: Color32,
}

impl TimeGridPalette {
    pub fn from_visuals(visuals: &Visuals) -> Self {
        let line = visuals.widgets.noninteractive.bg_stroke.color;
        Self {
            label_bg: blend(visuals.panel_fill, visuals.extreme_bg_color, 0.4),
            column_bg: visuals.extreme_bg_color,
            today_bg: blend(visuals.extreme_bg_color, ACCENT, 0.06),
            hour_line: line,
            slot_line: with_alpha(line, 90),
            hover_overlay: with_alpha(ACCENT, if visuals.dark_mode { 50 } else { 30 }),
            drop_overlay: with_alpha(ACCENT, 110),
            now_line: NOW_LINE,
            label_text: visuals.weak_text_color(),
            block_text: Color32::WHITE,
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct SidebarPalette {
    pub task_bg: Color32,
    pub text: Color32,
}

impl SidebarPalette {
    pub fn from_visuals(visuals: &Visuals) -> Self {
        Self {
            task_bg: visuals.faint_bg_color,
            text: visuals.text_color(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints() {
        let a = Color32::from_rgb(0, 0, 0);
        let b = Color32::from_rgb(200, 100, 50);
        assert_eq!(blend(a, b, 0.0), a);
        assert_eq!(blend(a, b, 1.0), b);
        assert_eq!(blend(a, b, 0.5), Color32::from_rgb(100, 50, 25));
    }

    #[test]
    fn test_with_alpha_keeps_channels() {
        let c = with_alpha(Color32::from_rgb(10, 20, 30), 255);
        assert_eq!(c, Color32::from_rgb(10, 20, 30));
    }
}
