use std::fmt::Display;

use crate::models::dataset::Dataset;

/// 命令行 `--puzzle_id` 的三种取值
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleRequest {
    /// 今日题目（从 arcprize.org 抓取）
    Today,
    /// 从数据集中随机选择
    Random,
    /// 指定题目 ID
    Literal(String),
}

impl PuzzleRequest {
    pub fn parse(value: &str) -> Self {
        match value {
            "today" => PuzzleRequest::Today,
            "random" => PuzzleRequest::Random,
            other => PuzzleRequest::Literal(other.to_string()),
        }
    }
}

/// 选定的题目
///
/// `datasets` 按顺序尝试；`date` 只在今日题目路径下存在。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub puzzle_id: String,
    pub datasets: Vec<Dataset>,
    pub date: Option<String>,
}

impl Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let datasets = self
            .datasets
            .iter()
            .map(Dataset::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "[题目 {} 数据集 [{}]", self.puzzle_id, datasets)?;
        if let Some(date) = &self.date {
            write!(f, " 日期 {}", date)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request() {
        assert_eq!(PuzzleRequest::parse("today"), PuzzleRequest::Today);
        assert_eq!(PuzzleRequest::parse("random"), PuzzleRequest::Random);
        assert_eq!(
            PuzzleRequest::parse("1ae2feb7"),
            PuzzleRequest::Literal("1ae2feb7".to_string())
        );
    }

    #[test]
    fn test_display() {
        let selection = Selection {
            puzzle_id: "abc".to_string(),
            datasets: vec![Dataset::Evaluation, Dataset::Training],
            date: Some("Oct 16, 2026".to_string()),
        };
        assert_eq!(
            selection.to_string(),
            "[题目 abc 数据集 [evaluation, training] 日期 Oct 16, 2026]"
        );
    }
}
