//! 渲染样式
//!
//! 所有样式都通过 [`RenderStyle`] 显式传入，不存在进程级的全局主题。

use image::Rgba;

use crate::render::palette::{Palette, ARC_PALETTE};

/// 组合图的样式参数（单位：像素）
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    /// 单元格调色板
    pub palette: Palette,
    /// 画布背景色
    pub background: Rgba<u8>,
    /// 单元格边框颜色，必须不同于调色板中的任何颜色
    pub border: Rgba<u8>,
    /// 标题与标签文字颜色
    pub text: Rgba<u8>,
    /// 每个面板的边长
    pub panel_size: u32,
    /// 面板之间的水平间距
    pub column_gap: u32,
    /// 面板之间的垂直间距
    pub row_gap: u32,
    /// 第一行上方的列标题区高度
    pub header_height: u32,
    /// 左侧 "Example N" 标签区宽度
    pub label_width: u32,
    /// 画布外边距
    pub margin: u32,
    /// 单元格边框宽度
    pub border_width: u32,
    /// 列标题字号
    pub header_font_size: f32,
    /// 行标签字号
    pub label_font_size: f32,
}

impl RenderStyle {
    /// 深色背景主题
    pub fn dark() -> Self {
        Self {
            palette: ARC_PALETTE,
            background: Rgba([0, 0, 0, 255]),
            border: Rgba([105, 105, 105, 255]),
            text: Rgba([255, 255, 255, 255]),
            panel_size: 280,
            column_gap: 8,
            row_gap: 28,
            header_height: 36,
            label_width: 36,
            margin: 10,
            border_width: 1,
            header_font_size: 20.0,
            label_font_size: 24.0,
        }
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::dark()
    }
}
