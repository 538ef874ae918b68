//! 网格模型
//!
//! `Grid` 在构造时完成校验，之后的渲染代码不再需要处理非法数据。

use crate::error::FormatError;

/// 单元格允许的最大取值
pub const MAX_CELL_VALUE: u8 = 9;

/// ARC 网格：高 `height` 行、宽 `width` 列，取值 0–9
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// 从原始二维数组构造网格
    ///
    /// 空数组、行长不一致、取值越界都会返回 [`FormatError`]。
    pub fn new(rows: &[Vec<i64>]) -> Result<Self, FormatError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(FormatError::EmptyGrid {
                context: String::new(),
            });
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(FormatError::RaggedRow {
                    context: String::new(),
                    row: row_index,
                    expected: width,
                    found: row.len(),
                });
            }
            for (col_index, &value) in row.iter().enumerate() {
                let cell = u8::try_from(value)
                    .ok()
                    .filter(|v| *v <= MAX_CELL_VALUE)
                    .ok_or(FormatError::ValueOutOfRange {
                        context: String::new(),
                        row: row_index,
                        col: col_index,
                        value,
                    })?;
                cells.push(cell);
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// 读取单元格，`row` 0 为最上方一行
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row < self.height && col < self.width {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// 按行遍历
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid_grid() {
        let grid = Grid::new(&[vec![0, 1, 2], vec![3, 4, 9]]).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(0, 0), Some(0));
        assert_eq!(grid.get(1, 2), Some(9));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.rows().count(), 2);
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        let err = Grid::new(&[vec![0, 10]]).unwrap_err();
        assert!(matches!(
            err,
            FormatError::ValueOutOfRange {
                row: 0,
                col: 1,
                value: 10,
                ..
            }
        ));

        let err = Grid::new(&[vec![-1]]).unwrap_err();
        assert!(matches!(err, FormatError::ValueOutOfRange { value: -1, .. }));
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let err = Grid::new(&[vec![0, 1], vec![2]]).unwrap_err();
        assert!(matches!(
            err,
            FormatError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(matches!(
            Grid::new(&[]).unwrap_err(),
            FormatError::EmptyGrid { .. }
        ));
        assert!(matches!(
            Grid::new(&[vec![]]).unwrap_err(),
            FormatError::EmptyGrid { .. }
        ));
    }
}
