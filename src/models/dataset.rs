use std::fmt;

/// ARC-AGI-2 仓库中的数据集
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    /// `data/evaluation`
    Evaluation,
    /// `data/training`
    Training,
    /// `data/test`
    Test,
}

impl Dataset {
    /// 仓库中使用的目录名
    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::Evaluation => "evaluation",
            Dataset::Training => "training",
            Dataset::Test => "test",
        }
    }

    /// 题目文件在仓库中的路径
    pub fn puzzle_path(&self, puzzle_id: &str) -> String {
        format!("data/{}/{}.json", self.as_str(), puzzle_id)
    }

    /// ID 列表文件在仓库中的路径
    pub fn listing_path(&self) -> String {
        format!("data/{}.txt", self.as_str())
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
