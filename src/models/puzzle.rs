//! 题目模型
//!
//! 题目 JSON 格式：
//!
//! ```json
//! {
//!   "train": [{ "input": [[0, 1]], "output": [[1, 0]] }],
//!   "test":  [{ "input": [[2, 2]], "output": [[2, 2]] }]
//! }
//! ```
//!
//! `test[*].output` 可以缺失。

use serde::Deserialize;
use tracing::debug;

use crate::error::FormatError;
use crate::models::grid::Grid;

/// 训练样例（输入/输出网格对）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub input: Grid,
    pub output: Grid,
}

/// 测试用例，答案可能未知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub input: Grid,
    pub output: Option<Grid>,
}

/// 一道 ARC 题目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub id: String,
    pub train: Vec<Example>,
    pub test: TestCase,
}

#[derive(Debug, Deserialize)]
struct RawPair {
    input: Vec<Vec<i64>>,
    #[serde(default)]
    output: Option<Vec<Vec<i64>>>,
}

#[derive(Debug, Deserialize)]
struct RawPuzzle {
    train: Vec<RawPair>,
    test: Vec<RawPair>,
}

impl Puzzle {
    /// 解析题目 JSON
    ///
    /// 所有网格都会被校验；错误信息中带有出错位置，例如 `train[1].output`。
    pub fn from_json(id: impl Into<String>, bytes: &[u8]) -> Result<Self, FormatError> {
        let id = id.into();
        let raw: RawPuzzle =
            serde_json::from_slice(bytes).map_err(|e| FormatError::InvalidJson {
                puzzle_id: id.clone(),
                message: e.to_string(),
            })?;

        if raw.train.is_empty() {
            return Err(FormatError::NoTrainingExamples { puzzle_id: id });
        }

        let train = raw
            .train
            .iter()
            .enumerate()
            .map(|(i, pair)| {
                let context = format!("{id}/train[{i}]");
                let input = Grid::new(&pair.input)
                    .map_err(|e| e.with_context("input").with_context(&context))?;
                let raw_output = pair.output.as_ref().ok_or_else(|| FormatError::InvalidJson {
                    puzzle_id: id.clone(),
                    message: format!("train[{i}] 缺少 output"),
                })?;
                let output = Grid::new(raw_output)
                    .map_err(|e| e.with_context("output").with_context(&context))?;
                Ok(Example { input, output })
            })
            .collect::<Result<Vec<_>, FormatError>>()?;

        let first_test = raw
            .test
            .first()
            .ok_or_else(|| FormatError::NoTestCase {
                puzzle_id: id.clone(),
            })?;
        if raw.test.len() > 1 {
            debug!("题目 {} 有 {} 个测试用例，只使用第一个", id, raw.test.len());
        }

        let context = format!("{id}/test[0]");
        let test = TestCase {
            input: Grid::new(&first_test.input)
                .map_err(|e| e.with_context("input").with_context(&context))?,
            output: first_test
                .output
                .as_deref()
                .map(Grid::new)
                .transpose()
                .map_err(|e| e.with_context("output").with_context(&context))?,
        };

        Ok(Self { id, train, test })
    }

    /// 训练样例数量
    pub fn n_train(&self) -> usize {
        self.train.len()
    }

    /// 测试答案是否已知
    pub fn has_answer(&self) -> bool {
        self.test.output.is_some()
    }
}
