//! 渲染结果的编码、保存和展示

use std::path::{Path, PathBuf};
use std::process::Command;

use image::RgbaImage;
use tracing::{debug, info, warn};

use crate::error::{AppError, Result};

/// 输出图片的分辨率
pub const OUTPUT_DPI: u32 = 100;

/// PNG 编码后的组合图
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl RenderedImage {
    /// 编码为 PNG（带 pHYs 分辨率信息，不含时间戳）
    pub fn encode(canvas: &RgbaImage) -> Result<Self> {
        let (width, height) = canvas.dimensions();
        // 每英寸像素 → 每米像素
        let pixels_per_meter = (f64::from(OUTPUT_DPI) / 0.0254).round() as u32;

        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, width, height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: pixels_per_meter,
                yppu: pixels_per_meter,
                unit: png::Unit::Meter,
            }));
            let mut writer = encoder
                .write_header()
                .map_err(|e| AppError::Image(e.to_string()))?;
            writer
                .write_image_data(canvas.as_raw())
                .map_err(|e| AppError::Image(e.to_string()))?;
            writer.finish().map_err(|e| AppError::Image(e.to_string()))?;
        }

        debug!("PNG 编码完成: {}x{}, {} 字节", width, height, bytes.len());
        Ok(Self {
            bytes,
            width,
            height,
        })
    }

    /// 保存为 `{dir}/puzzle_{id}.png`
    pub fn save(&self, dir: &Path, puzzle_id: &str) -> Result<PathBuf> {
        let path = dir.join(file_name(puzzle_id));
        std::fs::write(&path, &self.bytes)
            .map_err(|e| AppError::io(path.display().to_string(), e))?;
        info!("💾 图片已保存: {}", path.display());
        Ok(path)
    }

    /// 用系统默认的图片查看器打开
    ///
    /// 打开失败只记录警告，不影响后续流程。
    pub fn present(&self, puzzle_id: &str) {
        let path = std::env::temp_dir().join(file_name(puzzle_id));
        if let Err(e) = std::fs::write(&path, &self.bytes) {
            warn!("⚠️ 无法写入临时文件 {}: {}", path.display(), e);
            return;
        }

        match opener_command(&path).spawn() {
            Ok(_) => info!("🖼️ 已打开图片: {}", path.display()),
            Err(e) => warn!("⚠️ 无法打开图片查看器: {}", e),
        }
    }
}

/// 图片文件名
pub fn file_name(puzzle_id: &str) -> String {
    format!("puzzle_{puzzle_id}.png")
}

fn opener_command(path: &Path) -> Command {
    if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg("start").arg("").arg(path);
        cmd
    } else if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}
