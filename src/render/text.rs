//! 文字绘制（列标题、行标签）
//!
//! 字体随程序一起编译（DejaVu Sans），保证不同机器上的输出一致。

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::{imageops, Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};

use crate::error::{AppError, Result};

static DEJAVU_SANS: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// 标签字体
pub struct LabelFont {
    font: FontRef<'static>,
}

impl LabelFont {
    /// 加载内置字体
    pub fn embedded() -> Result<Self> {
        let font = FontRef::try_from_slice(DEJAVU_SANS)
            .map_err(|e| AppError::Image(format!("无法加载内置字体: {e}")))?;
        Ok(Self { font })
    }

    /// 文字的像素宽高（高度为行高）
    pub fn measure(&self, text: &str, size: f32) -> (u32, u32) {
        let scale = PxScale::from(size);
        let (width, _) = text_size(scale, &self.font, text);
        let height = self.font.as_scaled(scale).height().ceil() as u32;
        (width, height)
    }

    /// 以 (center_x, center_y) 为中心水平绘制文字
    pub fn draw_centered(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        center: (u32, u32),
        size: f32,
        color: Rgba<u8>,
    ) {
        let (width, height) = self.measure(text, size);
        let x = center.0 as i32 - (width / 2) as i32;
        let y = center.1 as i32 - (height / 2) as i32;
        draw_text_mut(canvas, color, x, y, PxScale::from(size), &self.font, text);
    }

    /// 以 (center_x, center_y) 为中心绘制逆时针旋转 90° 的文字（自下而上阅读）
    pub fn draw_vertical(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        center: (u32, u32),
        size: f32,
        color: Rgba<u8>,
        background: Rgba<u8>,
    ) {
        let (width, height) = self.measure(text, size);
        let mut strip = RgbaImage::from_pixel(width + 2, height + 2, background);
        draw_text_mut(&mut strip, color, 1, 1, PxScale::from(size), &self.font, text);

        let rotated = imageops::rotate270(&strip);
        let x = i64::from(center.0) - i64::from(rotated.width() / 2);
        let y = i64::from(center.1) - i64::from(rotated.height() / 2);
        imageops::replace(canvas, &rotated, x, y);
    }
}
