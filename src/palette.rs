//! Color palettes for the scene.
//!
//! Colors are written the way a designer would hand them over: `0xRRGGBB`
//! integers in sRGB. The renderer draws into an sRGB surface, so everything
//! that reaches a shader goes through [`srgb_to_linear`] first.

use glam::Vec3;

/// Gold, pink, cyan, orange, light green, sky blue.
pub const CONFETTI: [u32; 6] = [0xffd700, 0xff69b4, 0x00ffff, 0xffa500, 0x98fb98, 0x87ceeb];

/// Red, hot pink, light pink.
pub const HEARTS: [u32; 3] = [0xff0000, 0xff69b4, 0xffc0cb];

/// Alice blue.
pub const BACKGROUND: u32 = 0xf0f8ff;

/// Split a `0xRRGGBB` integer into sRGB channels in `0.0..=1.0`.
///
/// Bits above the low 24 are ignored.
pub fn hex_to_srgb(hex: u32) -> Vec3 {
    let r = (hex >> 16) & 0xff;
    let g = (hex >> 8) & 0xff;
    let b = hex & 0xff;
    Vec3::new(r as f32, g as f32, b as f32) / 255.0
}

/// Convert one sRGB channel to linear light.
#[inline]
pub fn srgb_channel_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert an sRGB color to linear light, channel by channel.
pub fn srgb_to_linear(c: Vec3) -> Vec3 {
    Vec3::new(
        srgb_channel_to_linear(c.x),
        srgb_channel_to_linear(c.y),
        srgb_channel_to_linear(c.z),
    )
}

/// `0xRRGGBB` straight to the linear color a shader expects.
pub fn hex_to_linear(hex: u32) -> Vec3 {
    srgb_to_linear(hex_to_srgb(hex))
}

/// Clear color for the render pass.
pub fn clear_color(hex: u32) -> wgpu::Color {
    let c = hex_to_linear(hex);
    wgpu::Color {
        r: c.x as f64,
        g: c.y as f64,
        b: c.z as f64,
        a: 1.0,
    }
}
