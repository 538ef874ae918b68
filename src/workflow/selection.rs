//! 题目选择流程
//!
//! 把命令行的 `--puzzle_id` / `--dataset` 变成一个确定的 [`Selection`]

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::{Dataset, PuzzleRequest, Selection};
use crate::services::{PuzzleSource, TodayResolver};

/// 今日题目可能出现的数据集，按顺序尝试
const TODAY_DATASETS: [Dataset; 2] = [Dataset::Evaluation, Dataset::Training];

/// 取题时要尝试的数据集
///
/// `today` 固定为 evaluation → training，其余只用请求的数据集。
pub fn datasets_for(request: &PuzzleRequest, dataset: Dataset) -> Vec<Dataset> {
    match request {
        PuzzleRequest::Today => TODAY_DATASETS.to_vec(),
        PuzzleRequest::Random | PuzzleRequest::Literal(_) => vec![dataset],
    }
}

/// 均匀随机地选一个 ID
pub fn pick_random<'a, R: Rng + ?Sized>(ids: &'a [String], rng: &mut R) -> Option<&'a String> {
    ids.choose(rng)
}

/// 解析本次要发布的题目
pub async fn resolve_selection<S, T, R>(
    request: &PuzzleRequest,
    dataset: Dataset,
    source: &S,
    resolver: &T,
    rng: &mut R,
) -> Result<Selection>
where
    S: PuzzleSource,
    T: TodayResolver,
    R: Rng + ?Sized,
{
    let datasets = datasets_for(request, dataset);

    let (puzzle_id, date) = match request {
        PuzzleRequest::Today => {
            info!("🌐 正在获取今日题目...");
            let today = resolver.resolve_today().await?;
            (today.puzzle_id, Some(today.date))
        }
        PuzzleRequest::Random => {
            let ids = source.list_puzzle_ids(dataset).await?;
            let id = pick_random(&ids, rng).ok_or_else(|| AppError::EmptyDataset {
                dataset: dataset.to_string(),
            })?;
            info!("🎲 从 {} 个题目中随机选中 {}", ids.len(), id);
            (id.clone(), None)
        }
        PuzzleRequest::Literal(id) => (id.clone(), None),
    };

    Ok(Selection {
        puzzle_id,
        datasets,
        date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Puzzle;
    use crate::services::TodayPuzzle;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;

    struct ListingSource {
        ids: Vec<String>,
        listed: RefCell<Vec<Dataset>>,
    }

    impl ListingSource {
        fn new(ids: &[&str]) -> Self {
            Self {
                ids: ids.iter().map(|s| s.to_string()).collect(),
                listed: RefCell::new(Vec::new()),
            }
        }
    }

    impl PuzzleSource for ListingSource {
        async fn fetch_puzzle(&self, puzzle_id: &str, datasets: &[Dataset]) -> Result<Puzzle> {
            Err(AppError::NotFound {
                puzzle_id: puzzle_id.to_string(),
                datasets: datasets.iter().map(|d| d.to_string()).collect(),
            })
        }

        async fn list_puzzle_ids(&self, dataset: Dataset) -> Result<Vec<String>> {
            self.listed.borrow_mut().push(dataset);
            Ok(self.ids.clone())
        }
    }

    struct FixedToday;

    impl TodayResolver for FixedToday {
        async fn resolve_today(&self) -> Result<TodayPuzzle> {
            Ok(TodayPuzzle {
                puzzle_id: "1ae2feb7".to_string(),
                date: "Oct 16, 2026".to_string(),
            })
        }
    }

    struct NoToday;

    impl TodayResolver for NoToday {
        async fn resolve_today(&self) -> Result<TodayPuzzle> {
            panic!("today resolver should not be called");
        }
    }

    #[test]
    fn test_datasets_for() {
        assert_eq!(
            datasets_for(&PuzzleRequest::Today, Dataset::Test),
            vec![Dataset::Evaluation, Dataset::Training]
        );
        assert_eq!(
            datasets_for(&PuzzleRequest::Random, Dataset::Test),
            vec![Dataset::Test]
        );
        assert_eq!(
            datasets_for(&PuzzleRequest::Literal("abc".to_string()), Dataset::Evaluation),
            vec![Dataset::Evaluation]
        );
    }

    #[test]
    fn test_pick_random_stays_in_list() {
        let ids: Vec<String> = (0..50).map(|i| format!("{i:08x}")).collect();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let id = pick_random(&ids, &mut rng).unwrap();
            assert!(ids.contains(id));
        }
        assert!(pick_random(&[], &mut rng).is_none());
    }

    #[tokio::test]
    async fn test_today_selection() {
        let source = ListingSource::new(&[]);
        let mut rng = StdRng::seed_from_u64(0);

        let selection = resolve_selection(
            &PuzzleRequest::Today,
            Dataset::Test,
            &source,
            &FixedToday,
            &mut rng,
        )
        .await
        .unwrap();

        assert_eq!(selection.puzzle_id, "1ae2feb7");
        assert_eq!(selection.date.as_deref(), Some("Oct 16, 2026"));
        assert_eq!(selection.datasets, vec![Dataset::Evaluation, Dataset::Training]);
        assert!(source.listed.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_random_selection_uses_requested_dataset() {
        let source = ListingSource::new(&["aaa", "bbb", "ccc"]);
        let mut rng = StdRng::seed_from_u64(42);

        let selection = resolve_selection(
            &PuzzleRequest::Random,
            Dataset::Test,
            &source,
            &NoToday,
            &mut rng,
        )
        .await
        .unwrap();

        assert!(["aaa", "bbb", "ccc"].contains(&selection.puzzle_id.as_str()));
        assert_eq!(selection.datasets, vec![Dataset::Test]);
        assert_eq!(selection.date, None);
        assert_eq!(*source.listed.borrow(), vec![Dataset::Test]);
    }

    #[tokio::test]
    async fn test_random_selection_from_empty_listing() {
        let source = ListingSource::new(&[]);
        let mut rng = StdRng::seed_from_u64(1);

        let result = resolve_selection(
            &PuzzleRequest::Random,
            Dataset::Evaluation,
            &source,
            &NoToday,
            &mut rng,
        )
        .await;

        assert!(matches!(result, Err(AppError::EmptyDataset { .. })));
    }

    #[tokio::test]
    async fn test_literal_selection() {
        let source = ListingSource::new(&[]);
        let mut rng = StdRng::seed_from_u64(1);

        let selection = resolve_selection(
            &PuzzleRequest::Literal("abc".to_string()),
            Dataset::Evaluation,
            &source,
            &NoToday,
            &mut rng,
        )
        .await
        .unwrap();

        assert_eq!(selection.puzzle_id, "abc");
        assert_eq!(selection.datasets, vec![Dataset::Evaluation]);
        assert_eq!(selection.date, None);
    }
}
