//! Drawing module - clock face rendering
//!
//! Renders the readout with nannou's Draw API, placed by the gesture transform.

use nannou::prelude::*;
use shared::{parse_hex_color, TransformState, CLOCK_BOX_HEIGHT, CLOCK_BOX_WIDTH, CLOCK_FONT_SIZE};

/// Fallback palette
pub mod colors {
    use nannou::prelude::*;

    pub const CLOCK_FALLBACK: Srgb<u8> = Srgb {
        red: 255,
        green: 255,
        blue: 255,
        standard: std::marker::PhantomData,
    };
    pub const BACKGROUND_FALLBACK: Srgb<u8> = Srgb {
        red: 0,
        green: 0,
        blue: 0,
        standard: std::marker::PhantomData,
    };
}

/// Convert a stored hex color, using `fallback` if it doesn't parse
pub fn hex_to_srgb(hex: &str, fallback: Srgb<u8>) -> Srgb<u8> {
    match parse_hex_color(hex) {
        Some([r, g, b]) => srgb(r, g, b),
        None => fallback,
    }
}

/// Draw the time readout in its transformed box
///
/// The transform is in screen space (y down, clockwise-positive rotation);
/// nannou's y axis points up, so both are flipped here.
pub fn draw_clock_face(draw: &Draw, text: &str, transform: &TransformState, color: Srgb<u8>) {
    let face = draw
        .x_y(transform.translation_x, -transform.translation_y)
        .rotate(-transform.angle)
        .scale(transform.scale);

    face.text(text)
        .color(color)
        .font_size(CLOCK_FONT_SIZE)
        .w_h(CLOCK_BOX_WIDTH, CLOCK_BOX_HEIGHT)
        .center_justify()
        .align_text_middle_y();
}
