//! 今日题目解析服务 - 业务能力层
//!
//! 打开 arcprize.org/play，读取 `#task_name`（形如 `Task: 1ae2feb7`）与 `#current-date`

use std::path::PathBuf;

use tracing::info;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::infrastructure::{BrowserSession, ElementReader};

/// 今日题目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodayPuzzle {
    pub puzzle_id: String,
    pub date: String,
}

/// 今日题目解析
#[allow(async_fn_in_trait)]
pub trait TodayResolver {
    async fn resolve_today(&self) -> Result<TodayPuzzle>;
}

/// 通过无头浏览器抓取今日题目
pub struct BrowserTodayResolver {
    play_url: String,
    chrome_executable: Option<PathBuf>,
}

impl BrowserTodayResolver {
    pub fn new(config: &Config) -> Self {
        Self {
            play_url: config.play_url.clone(),
            chrome_executable: config.chrome_executable.clone(),
        }
    }
}

impl TodayResolver for BrowserTodayResolver {
    async fn resolve_today(&self) -> Result<TodayPuzzle> {
        let session = BrowserSession::open(&self.play_url, self.chrome_executable.as_deref()).await?;
        let today = read_and_close(session).await?;
        info!("✓ 今日题目: {} ({})", today.puzzle_id, today.date);
        Ok(today)
    }
}

/// 读取今日题目，无论成功与否都关闭页面
pub async fn read_and_close<E: ElementReader>(session: E) -> Result<TodayPuzzle> {
    let outcome = read_today(&session).await;
    session.close().await;
    outcome
}

async fn read_today<E: ElementReader>(session: &E) -> Result<TodayPuzzle> {
    let task_name = session.element_text("#task_name").await?;
    let puzzle_id = parse_task_name(&task_name)?;

    let date = session.element_text("#current-date").await?.trim().to_string();
    if date.is_empty() {
        return Err(AppError::Resolution("#current-date 为空".to_string()));
    }

    Ok(TodayPuzzle { puzzle_id, date })
}

/// 从 `Task: 1ae2feb7` 中取出题目 ID
pub fn parse_task_name(text: &str) -> Result<String> {
    text.split(':')
        .nth(1)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::Resolution(format!("无法从 {text:?} 中解析题目 ID")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// 内存页面：记录关闭次数
    struct FakePage {
        elements: HashMap<&'static str, &'static str>,
        closed: Rc<Cell<usize>>,
    }

    impl FakePage {
        fn new(elements: &[(&'static str, &'static str)]) -> (Self, Rc<Cell<usize>>) {
            let closed = Rc::new(Cell::new(0));
            let page = Self {
                elements: elements.iter().copied().collect(),
                closed: Rc::clone(&closed),
            };
            (page, closed)
        }
    }

    impl ElementReader for FakePage {
        async fn element_text(&self, selector: &str) -> Result<String> {
            self.elements
                .get(selector)
                .map(|text| text.to_string())
                .ok_or_else(|| AppError::Resolution(format!("页面中找不到元素 {selector}")))
        }

        async fn close(self) {
            self.closed.set(self.closed.get() + 1);
        }
    }

    #[tokio::test]
    async fn test_read_and_close_success() {
        let (page, closed) = FakePage::new(&[
            ("#task_name", "Task: 1ae2feb7"),
            ("#current-date", " Oct 16, 2026 \n"),
        ]);

        let today = read_and_close(page).await.unwrap();

        assert_eq!(
            today,
            TodayPuzzle {
                puzzle_id: "1ae2feb7".to_string(),
                date: "Oct 16, 2026".to_string(),
            }
        );
        assert_eq!(closed.get(), 1);
    }

    #[tokio::test]
    async fn test_closes_when_task_name_missing() {
        let (page, closed) = FakePage::new(&[("#current-date", "Oct 16, 2026")]);

        let result = read_and_close(page).await;

        assert!(matches!(result, Err(AppError::Resolution(_))));
        assert_eq!(closed.get(), 1);
    }

    #[tokio::test]
    async fn test_closes_when_date_missing() {
        let (page, closed) = FakePage::new(&[("#task_name", "Task: 1ae2feb7")]);

        let result = read_and_close(page).await;

        assert!(matches!(result, Err(AppError::Resolution(_))));
        assert_eq!(closed.get(), 1);
    }

    #[tokio::test]
    async fn test_closes_when_date_empty() {
        let (page, closed) =
            FakePage::new(&[("#task_name", "Task: 1ae2feb7"), ("#current-date", "  ")]);

        let result = read_and_close(page).await;

        assert!(matches!(result, Err(AppError::Resolution(_))));
        assert_eq!(closed.get(), 1);
    }

    #[tokio::test]
    async fn test_closes_when_task_name_has_no_id() {
        let (page, closed) = FakePage::new(&[
            ("#task_name", "Loading puzzle"),
            ("#current-date", "Oct 16, 2026"),
        ]);

        let result = read_and_close(page).await;

        assert!(matches!(result, Err(AppError::Resolution(_))));
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn test_parse_task_name() {
        assert_eq!(parse_task_name("Task: 1ae2feb7").unwrap(), "1ae2feb7");
        assert_eq!(parse_task_name("Task:abc \n").unwrap(), "abc");
    }

    #[test]
    fn test_parse_task_name_without_separator() {
        assert!(matches!(
            parse_task_name("Loading..."),
            Err(AppError::Resolution(_))
        ));
        assert!(matches!(
            parse_task_name("Task: "),
            Err(AppError::Resolution(_))
        ));
    }
}
