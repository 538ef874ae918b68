//! 渲染层
//!
//! - `palette` - 10 色调色板
//! - `style` - 显式传入的渲染样式
//! - `grid_painter` - 单个网格的绘制
//! - `text` - 标题与行标签
//! - `composer` - 整道题目的组合布局
//! - `output` - PNG 编码、保存与展示

pub mod composer;
pub mod grid_painter;
pub mod output;
pub mod palette;
pub mod style;
pub mod text;

pub use composer::{Column, LayoutPlan, Panel, PuzzleComposer};
pub use grid_painter::{paint_grid, GridPlacement, Region};
pub use output::RenderedImage;
pub use palette::{Palette, ARC_PALETTE};
pub use style::RenderStyle;
