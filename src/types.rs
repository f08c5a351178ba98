//! Plain data passed between the renderer and the surface.

use serde::{Deserialize, Serialize};

/// Four 2D points in triangle-fan order.
///
/// Used for both corner positions (surface pixels, origin top-left, Y down)
/// and texture coordinates (0..1). A quad drawn as a fan must list its
/// corners in a consistent rotational order, e.g. top-left, top-right,
/// bottom-right, bottom-left.
pub type Quad = [[f32; 2]; 4];

/// An RGBA color with channels nominally in `0.0..=1.0`.
pub type Color = [f32; 4];

/// Fill color used when an image handle cannot be drawn: half-transparent
/// magenta.
pub const FALLBACK_COLOR: Color = [1.0, 0.0, 1.0, 0.5];

/// Corners of the axis-aligned rectangle `(x, y)`–`(x + width, y + height)`
/// in top-left, top-right, bottom-right, bottom-left order.
#[must_use]
pub fn rect_corners(x: f32, y: f32, width: f32, height: f32) -> Quad {
    let (right, bottom) = (x + width, y + height);
    [[x, y], [right, y], [right, bottom], [x, bottom]]
}

/// Texture coordinates for the crop box `(s1, t1)`–`(s2, t2)`, matching the
/// corner order of [`rect_corners`].
#[must_use]
pub fn crop_tex_coords(s1: f32, t1: f32, s2: f32, t2: f32) -> Quad {
    [[s1, t1], [s2, t1], [s2, t2], [s1, t2]]
}

/// Normalize 8-bit channels to `0.0..=1.0`.
#[must_use]
pub fn color_from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Color {
    [r, g, b, a].map(|c| f32::from(c) / 255.0)
}

/// Size of the backing surface.
///
/// Defaults to 1920×1080. Deserializable so hosts can keep it in their own
/// configuration files; missing fields fall back to the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rect_corners_wind_clockwise_on_screen() {
        assert_eq!(
            rect_corners(10.0, 20.0, 30.0, 40.0),
            [[10.0, 20.0], [40.0, 20.0], [40.0, 60.0], [10.0, 60.0]]
        );
    }

    #[test]
    fn crop_matches_corner_order() {
        let tex = crop_tex_coords(0.25, 0.5, 0.75, 1.0);
        assert_eq!(tex[0], [0.25, 0.5]);
        assert_eq!(tex[1], [0.75, 0.5]);
        assert_eq!(tex[2], [0.75, 1.0]);
        assert_eq!(tex[3], [0.25, 1.0]);
    }

    #[test]
    fn rgba8_normalizes_endpoints() {
        assert_eq!(color_from_rgba8(0, 0, 0, 0), [0.0; 4]);
        assert_eq!(color_from_rgba8(255, 255, 255, 255), [1.0; 4]);
        let [r, ..] = color_from_rgba8(51, 0, 0, 0);
        assert!((r - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn config_defaults_to_1080p() {
        let config = SurfaceConfig::default();
        assert_eq!((config.width, config.height), (1920, 1080));
    }

    #[test]
    fn config_fills_missing_fields() {
        let config: SurfaceConfig = serde_json::from_str(r#"{ "width": 640 }"#).unwrap();
        assert_eq!(config, SurfaceConfig { width: 640, height: 1080 });
    }
}
