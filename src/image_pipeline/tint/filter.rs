use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::color::Color;
use crate::image_pipeline::capture::CapturedImage;
use crate::image_pipeline::tint::Tint;

/// Rec. 709 luma weights, as used by the platform saturation matrix.
const LUMA_R: f32 = 0.213;
const LUMA_G: f32 = 0.715;
const LUMA_B: f32 = 0.072;

/// 4x5 row-major color matrix acting on `[R, G, B, A, 1]`.
///
/// Rows produce R, G, B, A; the fifth column is an additive offset in
/// 0..255 units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix {
    m: [f32; 20],
}

impl ColorMatrix {
    pub fn from_array(m: [f32; 20]) -> Self {
        Self { m }
    }

    pub fn identity() -> Self {
        let mut m = [0.0f32; 20];
        m[0] = 1.0;
        m[6] = 1.0;
        m[12] = 1.0;
        m[18] = 1.0;
        Self { m }
    }

    /// 0 is grayscale, 1 is unchanged, above 1 boosts saturation.
    pub fn saturation(sat: f32) -> Self {
        let inv = 1.0 - sat;
        let r = LUMA_R * inv;
        let g = LUMA_G * inv;
        let b = LUMA_B * inv;

        let mut m = [0.0f32; 20];
        m[0] = r + sat;
        m[1] = g;
        m[2] = b;
        m[5] = r;
        m[6] = g + sat;
        m[7] = b;
        m[10] = r;
        m[11] = g;
        m[12] = b + sat;
        m[18] = 1.0;
        Self { m }
    }

    pub fn scale(r: f32, g: f32, b: f32, a: f32) -> Self {
        let mut m = [0.0f32; 20];
        m[0] = r;
        m[6] = g;
        m[12] = b;
        m[18] = a;
        Self { m }
    }

    /// Saturation boost by the color's own saturation, then a per-channel
    /// scale leaning toward the color. Grays give the identity.
    pub fn for_color(color: Color) -> Self {
        Self::for_color_with_saturation(color, 1.0 + color.hsv_saturation())
    }

    /// Like [`ColorMatrix::for_color`] with an explicit saturation factor.
    pub fn for_color_with_saturation(color: Color, saturation: f32) -> Self {
        let max = color.max_channel() as f32;
        let factor = |c: u8| (255.0 + c as f32) / (255.0 + max);

        ColorMatrix::saturation(saturation).post_concat(&ColorMatrix::scale(
            factor(color.r),
            factor(color.g),
            factor(color.b),
            1.0,
        ))
    }

    /// Matrix that applies `self` first and `post` second.
    pub fn post_concat(&self, post: &ColorMatrix) -> Self {
        let a = &post.m;
        let b = &self.m;
        let mut m = [0.0f32; 20];
        for row in 0..4 {
            for col in 0..5 {
                let mut sum = a[row * 5] * b[col]
                    + a[row * 5 + 1] * b[5 + col]
                    + a[row * 5 + 2] * b[10 + col]
                    + a[row * 5 + 3] * b[15 + col];
                if col == 4 {
                    sum += a[row * 5 + 4];
                }
                m[row * 5 + col] = sum;
            }
        }
        Self { m }
    }

    pub fn as_array(&self) -> &[f32; 20] {
        &self.m
    }

    pub fn apply(&self, pixel: Rgba<u8>) -> Rgba<u8> {
        let input = [
            pixel[0] as f32,
            pixel[1] as f32,
            pixel[2] as f32,
            pixel[3] as f32,
        ];
        let mut out = [0u8; 4];
        for (row, slot) in out.iter_mut().enumerate() {
            let coeffs = &self.m[row * 5..row * 5 + 5];
            let value = coeffs[0] * input[0]
                + coeffs[1] * input[1]
                + coeffs[2] * input[2]
                + coeffs[3] * input[3]
                + coeffs[4];
            *slot = value.round().clamp(0.0, 255.0) as u8;
        }
        Rgba(out)
    }
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

/// Display-time filter. Rendering reads the original and fills a new buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorFilter {
    matrix: ColorMatrix,
}

impl ColorFilter {
    pub fn new(matrix: ColorMatrix) -> Self {
        Self { matrix }
    }

    pub fn from_color(color: Color) -> Self {
        Self::new(ColorMatrix::for_color(color))
    }

    /// Plain saturation filter, e.g. from [`ColorMapper::saturation`](crate::color::ColorMapper::saturation).
    pub fn saturation(sat: f32) -> Self {
        Self::new(ColorMatrix::saturation(sat))
    }

    pub fn matrix(&self) -> &ColorMatrix {
        &self.matrix
    }

    pub fn render(&self, image: &CapturedImage) -> RgbaImage {
        let source = image.pixels();
        RgbaImage::from_fn(source.width(), source.height(), |x, y| {
            self.matrix.apply(*source.get_pixel(x, y))
        })
    }
}

/// [`Tint`] that renders through [`ColorFilter::from_color`].
pub struct FilterTint;

impl Tint for FilterTint {
    fn apply(&self, image: &CapturedImage, color: Color) -> RgbaImage {
        debug!(%color, "rendering color filter");
        ColorFilter::from_color(color).render(image)
    }
}

/// [`Tint`] with a saturation taken from the magnetometer instead of the
/// color, see [`ColorMapper::saturation`](crate::color::ColorMapper::saturation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaturationTint {
    saturation: f32,
}

impl SaturationTint {
    pub fn new(saturation: f32) -> Self {
        Self { saturation }
    }

    pub fn saturation(&self) -> f32 {
        self.saturation
    }
}

impl Tint for SaturationTint {
    fn apply(&self, image: &CapturedImage, color: Color) -> RgbaImage {
        debug!(%color, saturation = self.saturation, "rendering saturation filter");
        ColorFilter::new(ColorMatrix::for_color_with_saturation(color, self.saturation)).render(image)
    }
}
