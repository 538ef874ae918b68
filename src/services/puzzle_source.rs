//! 题目来源服务 - 业务能力层
//!
//! 只负责"取题目"和"列出题目 ID"，不关心流程

use tracing::{debug, info};

use crate::clients::{GithubClient, GithubError};
use crate::error::{AppError, Result};
use crate::models::{Dataset, Puzzle};

/// 题目来源
#[allow(async_fn_in_trait)]
pub trait PuzzleSource {
    /// 按顺序在候选数据集中查找题目，第一个找到的生效
    ///
    /// 只有"不存在"才会尝试下一个数据集，其它错误立即返回。
    async fn fetch_puzzle(&self, puzzle_id: &str, datasets: &[Dataset]) -> Result<Puzzle>;

    /// 列出数据集中的所有题目 ID
    async fn list_puzzle_ids(&self, dataset: Dataset) -> Result<Vec<String>>;
}

/// 基于 GitHub 仓库的题目来源
pub struct GithubPuzzleSource {
    client: GithubClient,
}

impl GithubPuzzleSource {
    pub fn new(client: GithubClient) -> Self {
        Self { client }
    }
}

impl PuzzleSource for GithubPuzzleSource {
    async fn fetch_puzzle(&self, puzzle_id: &str, datasets: &[Dataset]) -> Result<Puzzle> {
        for dataset in datasets {
            let path = dataset.puzzle_path(puzzle_id);
            match self.client.get_file(&path).await {
                Ok(bytes) => {
                    let puzzle = Puzzle::from_json(puzzle_id, &bytes)?;
                    info!("✓ 在数据集 {} 中找到题目 {}", dataset, puzzle_id);
                    return Ok(puzzle);
                }
                Err(GithubError::NotFound { .. }) => {
                    debug!("数据集 {} 中没有题目 {}，尝试下一个", dataset, puzzle_id);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::NotFound {
            puzzle_id: puzzle_id.to_string(),
            datasets: datasets.iter().map(|d| d.as_str().to_string()).collect(),
        })
    }

    async fn list_puzzle_ids(&self, dataset: Dataset) -> Result<Vec<String>> {
        let bytes = match self.client.get_file(&dataset.listing_path()).await {
            Ok(bytes) => bytes,
            Err(GithubError::NotFound { .. }) => {
                return Err(AppError::EmptyDataset {
                    dataset: dataset.to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        let ids = parse_id_list(&String::from_utf8_lossy(&bytes));
        debug!("数据集 {} 共 {} 个题目", dataset, ids.len());
        Ok(ids)
    }
}

/// 解析按行分隔的 ID 列表（忽略空行）
pub fn parse_id_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
