//! 单个网格的绘制
//!
//! 第 0 行画在最上方；单元格为正方形，尺寸取能放入区域的最大整数像素，网格在区域内居中。

use image::RgbaImage;
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use crate::models::Grid;
use crate::render::style::RenderStyle;

/// 画布上的矩形区域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (u32, u32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// 能否以至少 1 像素的单元格放下整个网格
    pub fn can_hold(&self, grid: &Grid) -> bool {
        grid.width() as u32 <= self.width && grid.height() as u32 <= self.height
    }

    fn contains(&self, x: u32, y: u32, width: u32, height: u32) -> bool {
        x >= self.x
            && y >= self.y
            && x + width <= self.x + self.width
            && y + height <= self.y + self.height
    }
}

/// 网格在画布上的实际位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPlacement {
    /// 网格外框左上角
    pub origin_x: u32,
    pub origin_y: u32,
    /// 单元格边长（含一条共享边框）
    pub cell: u32,
    /// 边框宽度；单元格太小时为 0
    pub border: u32,
}

impl GridPlacement {
    /// 计算网格在区域中的位置
    pub fn fit(grid: &Grid, region: Region, border_width: u32) -> Self {
        let cols = grid.width() as u32;
        let rows = grid.height() as u32;

        let fit = |border: u32| {
            let by_width = region.width.saturating_sub(border) / cols;
            let by_height = region.height.saturating_sub(border) / rows;
            by_width.min(by_height)
        };

        // 单元格内部至少留 2 像素，否则不画边框
        let (cell, border) = match fit(border_width) {
            cell if border_width > 0 && cell >= border_width + 2 => (cell, border_width),
            _ => (fit(0).max(1), 0),
        };

        let grid_width = cols * cell + border;
        let grid_height = rows * cell + border;
        Self {
            origin_x: region.x + region.width.saturating_sub(grid_width) / 2,
            origin_y: region.y + region.height.saturating_sub(grid_height) / 2,
            cell,
            border,
        }
    }

    /// 单元格中心点坐标
    pub fn cell_center(&self, row: usize, col: usize) -> (u32, u32) {
        let inner = self.cell - self.border;
        (
            self.origin_x + col as u32 * self.cell + self.border + inner / 2,
            self.origin_y + row as u32 * self.cell + self.border + inner / 2,
        )
    }
}

/// 在画布的指定区域内绘制网格
///
/// 只修改区域内的像素；放不下的网格（见 [`Region::can_hold`]）会被裁剪。
pub fn paint_grid(
    canvas: &mut RgbaImage,
    grid: &Grid,
    region: Region,
    style: &RenderStyle,
) -> GridPlacement {
    let placement = GridPlacement::fit(grid, region, style.border_width);
    let cell = placement.cell;
    let border = placement.border;
    let inner = cell - border;

    if border > 0 {
        let outline = Rect::at(placement.origin_x as i32, placement.origin_y as i32).of_size(
            grid.width() as u32 * cell + border,
            grid.height() as u32 * cell + border,
        );
        draw_filled_rect_mut(canvas, outline, style.border);
    }

    for (row, values) in grid.rows().enumerate() {
        for (col, &value) in values.iter().enumerate() {
            // Grid 保证取值在 [0, 9]，调色板恰有 10 色
            let Some(color) = style.palette.color(value) else {
                continue;
            };
            let x = placement.origin_x + col as u32 * cell + border;
            let y = placement.origin_y + row as u32 * cell + border;
            if !region.contains(x, y, inner, inner) {
                continue;
            }
            draw_filled_rect_mut(
                canvas,
                Rect::at(x as i32, y as i32).of_size(inner, inner),
                color,
            );
        }
    }

    placement
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use proptest::prelude::*;

    fn blank_canvas(style: &RenderStyle, size: u32) -> RgbaImage {
        RgbaImage::from_pixel(size, size, style.background)
    }

    #[test]
    fn test_fit_square_cells_centered() {
        let grid = Grid::new(&[vec![0, 1]]).unwrap();
        let placement = GridPlacement::fit(&grid, Region::new(0, 0, 281, 281), 1);

        // (281 - 1) / 2 = 140，高度方向不受限制
        assert_eq!(placement.cell, 140);
        assert_eq!(placement.border, 1);
        assert_eq!(placement.origin_x, 0);
        assert_eq!(placement.origin_y, (281 - 141) / 2);
    }

    #[test]
    fn test_tiny_region_drops_border() {
        let grid = Grid::new(&vec![vec![0; 30]; 30]).unwrap();
        let placement = GridPlacement::fit(&grid, Region::new(0, 0, 60, 60), 1);
        assert_eq!(placement.border, 0);
        assert_eq!(placement.cell, 2);
    }

    #[test]
    fn test_row_zero_is_drawn_on_top() {
        let style = RenderStyle::dark();
        let grid = Grid::new(&[vec![1], vec![2]]).unwrap();
        let mut canvas = blank_canvas(&style, 100);
        let placement = paint_grid(&mut canvas, &grid, Region::new(0, 0, 100, 100), &style);

        let (x, top_y) = placement.cell_center(0, 0);
        let (_, bottom_y) = placement.cell_center(1, 0);
        assert!(top_y < bottom_y);
        assert_eq!(*canvas.get_pixel(x, top_y), style.palette.color(1).unwrap());
        assert_eq!(*canvas.get_pixel(x, bottom_y), style.palette.color(2).unwrap());
    }

    #[test]
    fn test_border_drawn_between_cells() {
        let style = RenderStyle::dark();
        let grid = Grid::new(&[vec![3, 4]]).unwrap();
        let mut canvas = blank_canvas(&style, 50);
        let placement = paint_grid(&mut canvas, &grid, Region::new(0, 0, 50, 50), &style);

        let shared_edge_x = placement.origin_x + placement.cell;
        let (_, y) = placement.cell_center(0, 0);
        assert_eq!(*canvas.get_pixel(shared_edge_x, y), style.border);
        assert_eq!(
            *canvas.get_pixel(placement.origin_x, placement.origin_y),
            style.border
        );
    }

    #[test]
    fn test_paint_only_touches_region() {
        let style = RenderStyle::dark();
        let grid = Grid::new(&[vec![5, 5], vec![5, 5]]).unwrap();
        let sentinel = Rgba([12, 34, 56, 255]);
        let mut canvas = RgbaImage::from_pixel(120, 120, sentinel);
        let region = Region::new(40, 40, 40, 40);
        paint_grid(&mut canvas, &grid, region, &style);

        for (x, y, pixel) in canvas.enumerate_pixels() {
            let inside = (40..80).contains(&x) && (40..80).contains(&y);
            if !inside {
                assert_eq!(*pixel, sentinel, "({x}, {y}) 在区域外被修改");
            }
        }
    }

    #[test]
    fn test_oversized_grid_is_clipped_to_region() {
        let style = RenderStyle::dark();
        let grid = Grid::new(&[vec![4; 400]]).unwrap();
        let sentinel = Rgba([12, 34, 56, 255]);
        let mut canvas = RgbaImage::from_pixel(600, 300, sentinel);
        let region = Region::new(10, 10, 280, 280);
        assert!(!region.can_hold(&grid));

        paint_grid(&mut canvas, &grid, region, &style);

        for (x, y, pixel) in canvas.enumerate_pixels() {
            let inside = (10..290).contains(&x) && (10..290).contains(&y);
            if !inside {
                assert_eq!(*pixel, sentinel, "({x}, {y}) 在区域外被修改");
            }
        }
    }

    #[test]
    fn test_can_hold_largest_arc_grid() {
        let grid = Grid::new(&vec![vec![0; 30]; 30]).unwrap();
        assert!(Region::new(0, 0, 280, 280).can_hold(&grid));
        assert!(!Region::new(0, 0, 29, 280).can_hold(&grid));
    }

    fn grid_strategy() -> impl Strategy<Value = Vec<Vec<i64>>> {
        (1usize..=30, 1usize..=30).prop_flat_map(|(h, w)| {
            prop::collection::vec(prop::collection::vec(0i64..=9, w), h)
        })
    }

    proptest! {
        #[test]
        fn prop_cell_centers_recover_values(rows in grid_strategy()) {
            let style = RenderStyle::dark();
            let grid = Grid::new(&rows).unwrap();
            let mut canvas = blank_canvas(&style, style.panel_size);
            let region = Region::new(0, 0, style.panel_size, style.panel_size);
            let placement = paint_grid(&mut canvas, &grid, region, &style);

            for (r, row) in rows.iter().enumerate() {
                for (c, &value) in row.iter().enumerate() {
                    let (x, y) = placement.cell_center(r, c);
                    let decoded = style.palette.value_of(*canvas.get_pixel(x, y));
                    prop_assert_eq!(decoded, Some(value as u8));
                }
            }
        }
    }
}
