//! 题目组合图
//!
//! 布局规则：
//!
//! ```text
//!              Input      Output     Test - Input   [Test - Output]
//! Example 1   train[0]   train[0]   test.input     [test.output]
//! Example 2   train[1]   train[1]
//! ...
//! ```
//!
//! - 列数：不显示答案为 3，显示答案为 4
//! - 行数：训练样例数量
//! - 列标题只出现在第一行上方
//! - 测试输入（和答案）只画在第一行

use image::RgbaImage;
use tracing::debug;

use crate::error::{AppError, FormatError, Result};
use crate::models::{Grid, Puzzle};
use crate::render::grid_painter::{paint_grid, Region};
use crate::render::output::RenderedImage;
use crate::render::style::RenderStyle;
use crate::render::text::LabelFont;

/// 组合图中的列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Input,
    Output,
    TestInput,
    TestOutput,
}

impl Column {
    pub fn index(&self) -> usize {
        match self {
            Column::Input => 0,
            Column::Output => 1,
            Column::TestInput => 2,
            Column::TestOutput => 3,
        }
    }

    /// 列标题
    pub fn header(&self) -> &'static str {
        match self {
            Column::Input => "Input",
            Column::Output => "Output",
            Column::TestInput => "Test - Input",
            Column::TestOutput => "Test - Output",
        }
    }
}

/// 一个面板：某行某列上的一个网格
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel<'a> {
    pub row: usize,
    pub column: Column,
    pub grid: &'a Grid,
    /// 只有第一行的面板带标题
    pub header: Option<&'static str>,
}

impl Panel<'_> {
    /// 网格在题目 JSON 中的位置，例如 `train[1].output`
    pub fn location(&self) -> String {
        match self.column {
            Column::Input => format!("train[{}].input", self.row),
            Column::Output => format!("train[{}].output", self.row),
            Column::TestInput => "test[0].input".to_string(),
            Column::TestOutput => "test[0].output".to_string(),
        }
    }
}

/// 逻辑布局：行列数、行标签和所有面板
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan<'a> {
    pub rows: usize,
    pub columns: usize,
    pub row_labels: Vec<String>,
    pub panels: Vec<Panel<'a>>,
}

impl<'a> LayoutPlan<'a> {
    /// 根据题目生成布局
    ///
    /// 要求显示答案但题目没有答案时返回 [`AppError::MissingAnswer`]。
    pub fn new(puzzle: &'a Puzzle, show_answer: bool) -> Result<Self> {
        let answer = match (show_answer, puzzle.test.output.as_ref()) {
            (false, _) => None,
            (true, Some(output)) => Some(output),
            (true, None) => {
                return Err(AppError::MissingAnswer {
                    puzzle_id: puzzle.id.clone(),
                })
            }
        };

        let rows = puzzle.n_train();
        let columns = if answer.is_some() { 4 } else { 3 };
        let header_for = |row: usize, column: Column| (row == 0).then(|| column.header());

        let mut panels = Vec::with_capacity(rows * 2 + 2);
        for (row, example) in puzzle.train.iter().enumerate() {
            panels.push(Panel {
                row,
                column: Column::Input,
                grid: &example.input,
                header: header_for(row, Column::Input),
            });
            panels.push(Panel {
                row,
                column: Column::Output,
                grid: &example.output,
                header: header_for(row, Column::Output),
            });
        }

        panels.push(Panel {
            row: 0,
            column: Column::TestInput,
            grid: &puzzle.test.input,
            header: Some(Column::TestInput.header()),
        });
        if let Some(output) = answer {
            panels.push(Panel {
                row: 0,
                column: Column::TestOutput,
                grid: output,
                header: Some(Column::TestOutput.header()),
            });
        }

        Ok(Self {
            rows,
            columns,
            row_labels: (1..=rows).map(|i| format!("Example {i}")).collect(),
            panels,
        })
    }
}

/// 像素几何：由样式和行列数决定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    left: u32,
    top: u32,
    panel: u32,
    column_step: u32,
    row_step: u32,
    margin: u32,
    label_width: u32,
    header_height: u32,
}

impl Geometry {
    pub fn new(style: &RenderStyle, rows: usize, columns: usize) -> Self {
        let rows = rows as u32;
        let columns = columns as u32;
        let left = style.margin + style.label_width;
        let top = style.margin + style.header_height;
        let width = left
            + columns * style.panel_size
            + columns.saturating_sub(1) * style.column_gap
            + style.margin;
        let height = top
            + rows * style.panel_size
            + rows.saturating_sub(1) * style.row_gap
            + style.margin;

        Self {
            width,
            height,
            left,
            top,
            panel: style.panel_size,
            column_step: style.panel_size + style.column_gap,
            row_step: style.panel_size + style.row_gap,
            margin: style.margin,
            label_width: style.label_width,
            header_height: style.header_height,
        }
    }

    /// 面板区域
    pub fn panel_region(&self, row: usize, column: usize) -> Region {
        Region::new(
            self.left + column as u32 * self.column_step,
            self.top + row as u32 * self.row_step,
            self.panel,
            self.panel,
        )
    }

    /// 列标题中心点（面板正上方）
    pub fn header_center(&self, column: usize) -> (u32, u32) {
        let region = self.panel_region(0, column);
        (
            region.x + region.width / 2,
            self.margin + self.header_height / 2,
        )
    }

    /// 行标签中心点（面板左侧）
    pub fn label_center(&self, row: usize) -> (u32, u32) {
        let region = self.panel_region(row, 0);
        (
            self.margin + self.label_width / 2,
            region.y + region.height / 2,
        )
    }
}

/// 组合图绘制器
///
/// 样式在构造时传入，多次渲染之间互不影响。
pub struct PuzzleComposer {
    style: RenderStyle,
    font: LabelFont,
}

impl PuzzleComposer {
    pub fn new(style: RenderStyle) -> Result<Self> {
        Ok(Self {
            style,
            font: LabelFont::embedded()?,
        })
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// 绘制组合图画布
    pub fn draw(&self, plan: &LayoutPlan<'_>) -> RgbaImage {
        let style = &self.style;
        let geometry = Geometry::new(style, plan.rows, plan.columns);
        let mut canvas = RgbaImage::from_pixel(geometry.width, geometry.height, style.background);

        for panel in &plan.panels {
            let region = geometry.panel_region(panel.row, panel.column.index());
            paint_grid(&mut canvas, panel.grid, region, style);

            if let Some(header) = panel.header {
                self.font.draw_centered(
                    &mut canvas,
                    header,
                    geometry.header_center(panel.column.index()),
                    style.header_font_size,
                    style.text,
                );
            }
        }

        for (row, label) in plan.row_labels.iter().enumerate() {
            self.font.draw_vertical(
                &mut canvas,
                label,
                geometry.label_center(row),
                style.label_font_size,
                style.text,
                style.background,
            );
        }

        canvas
    }

    /// 渲染题目并编码为 PNG
    pub fn compose(&self, puzzle: &Puzzle, show_answer: bool) -> Result<RenderedImage> {
        let plan = LayoutPlan::new(puzzle, show_answer)?;
        debug!(
            "题目 {} 布局: {} 行 x {} 列, {} 个面板",
            puzzle.id,
            plan.rows,
            plan.columns,
            plan.panels.len()
        );
        self.check_fits(puzzle, &plan)?;
        RenderedImage::encode(&self.draw(&plan))
    }

    /// 每个网格的单元格至少要有 1 像素，否则会画到相邻面板上
    fn check_fits(&self, puzzle: &Puzzle, plan: &LayoutPlan<'_>) -> Result<()> {
        let panel = Region::new(0, 0, self.style.panel_size, self.style.panel_size);
        match plan.panels.iter().find(|p| !panel.can_hold(p.grid)) {
            Some(oversized) => Err(FormatError::GridTooLarge {
                context: String::new(),
                width: oversized.grid.width(),
                height: oversized.grid.height(),
                max: self.style.panel_size as usize,
            }
            .with_context(&format!("{}/{}", puzzle.id, oversized.location()))
            .into()),
            None => Ok(()),
        }
    }
}
