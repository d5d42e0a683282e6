use egui::Color32;
use shared::domain::MarkState;

pub const TILE_SIZE: f32 = 56.0;
pub const TILE_GAP: f32 = 6.0;

pub fn tile_fill(mark: MarkState, has_letter: bool) -> Color32 {
    match mark {
        MarkState::Correct => Color32::from_rgb(0x53, 0x8d, 0x4e),
        MarkState::Present => Color32::from_rgb(0xb5, 0x9f, 0x3b),
        MarkState::Unset if has_letter => Color32::from_rgb(0x3a, 0x3a, 0x3c),
        MarkState::Unset => Color32::from_rgb(0x12, 0x12, 0x13),
    }
}

pub fn tile_text(has_letter: bool) -> Color32 {
    if has_letter {
        Color32::WHITE
    } else {
        Color32::from_gray(0x60)
    }
}
