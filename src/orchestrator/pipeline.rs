//! 每日发布流水线 - 编排层
//!
//! ## 职责
//!
//! 一次运行只处理一道题目：
//!
//! ```text
//! Init → ResolvingId → Fetching → Rendering → Publishing → Done
//!   └──────────────── 任一阶段出错 ──────────────→ Failed
//! ```
//!
//! 不使用发布器（`--dry_run`）时从 `Rendering` 直接进入 `Done`。
//! 所有错误都不重试，记录失败阶段后原样返回。

use std::fmt::Display;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info};

use crate::clients::GithubClient;
use crate::config::Config;
use crate::error::Result;
use crate::models::Selection;
use crate::render::{PuzzleComposer, RenderStyle, RenderedImage};
use crate::services::{
    BrowserTodayResolver, BskyPublisher, GithubPuzzleSource, PostResult, Publisher, PuzzleSource,
    TodayResolver,
};
use crate::utils::logging::{log_finish, log_selection, log_startup};
use crate::workflow::{alt_text, compose_caption, resolve_selection};

/// 流水线阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    ResolvingId,
    Fetching,
    Rendering,
    Publishing,
    Done,
    Failed,
}

impl Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PipelineState::Init => "Init",
            PipelineState::ResolvingId => "ResolvingId",
            PipelineState::Fetching => "Fetching",
            PipelineState::Rendering => "Rendering",
            PipelineState::Publishing => "Publishing",
            PipelineState::Done => "Done",
            PipelineState::Failed => "Failed",
        };
        write!(f, "{name}")
    }
}

/// 一次成功运行的结果
#[derive(Debug)]
pub struct RunReport {
    pub selection: Selection,
    pub image: RenderedImage,
    /// `--save` 时的文件路径
    pub saved_to: Option<PathBuf>,
    /// 未发布时为 `None`
    pub post: Option<PostResult>,
}

/// 应用主结构
///
/// 协作者通过泛型注入，`publisher` 为 `None` 时只渲染不发布。
pub struct App<S, R, P> {
    config: Config,
    composer: PuzzleComposer,
    source: S,
    resolver: R,
    publisher: Option<P>,
}

impl App<GithubPuzzleSource, BrowserTodayResolver, BskyPublisher> {
    /// 初始化应用（Init 阶段）
    ///
    /// 先校验配置，凭据缺失时在任何网络或浏览器操作之前失败。
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);
        debug!("进入阶段: {}", PipelineState::Init);

        if let Err(e) = config.validate() {
            error!("❌ 阶段 {} 失败: {}", PipelineState::Init, e);
            return Err(e.into());
        }

        let source = GithubPuzzleSource::new(GithubClient::new(&config)?);
        let resolver = BrowserTodayResolver::new(&config);
        let publisher = if config.dry_run {
            info!("🧪 dry run: 只渲染，不发布");
            None
        } else {
            Some(BskyPublisher::from_config(&config)?)
        };

        App::new(config, source, resolver, publisher)
    }
}

impl<S, R, P> App<S, R, P>
where
    S: PuzzleSource,
    R: TodayResolver,
    P: Publisher,
{
    pub fn new(config: Config, source: S, resolver: R, publisher: Option<P>) -> Result<Self> {
        Ok(Self {
            config,
            composer: PuzzleComposer::new(RenderStyle::default())?,
            source,
            resolver,
            publisher,
        })
    }

    /// 运行一次完整流程
    pub async fn run(&self) -> Result<RunReport> {
        let mut state = PipelineState::Init;
        match self.execute(&mut state).await {
            Ok(report) => {
                log_finish(
                    &report.selection.puzzle_id,
                    report.post.as_ref().map(|post| post.uri.as_str()),
                );
                Ok(report)
            }
            Err(e) => {
                error!("❌ 阶段 {} 失败: {}", state, e);
                enter(&mut state, PipelineState::Failed);
                Err(e)
            }
        }
    }

    async fn execute(&self, state: &mut PipelineState) -> Result<RunReport> {
        let config = &self.config;

        enter(state, PipelineState::ResolvingId);
        let mut rng = StdRng::from_entropy();
        let selection = resolve_selection(
            &config.puzzle,
            config.dataset,
            &self.source,
            &self.resolver,
            &mut rng,
        )
        .await?;
        log_selection(&selection);

        enter(state, PipelineState::Fetching);
        let puzzle = self
            .source
            .fetch_puzzle(&selection.puzzle_id, &selection.datasets)
            .await?;
        info!(
            "📥 题目 {} 已加载: {} 个训练样例",
            puzzle.id,
            puzzle.n_train()
        );

        enter(state, PipelineState::Rendering);
        let image = self.composer.compose(&puzzle, config.show_answer)?;
        info!("🎨 图片已渲染: {}x{}", image.width, image.height);

        let saved_to = if config.save {
            Some(image.save(&config.output_dir, &puzzle.id)?)
        } else {
            None
        };
        if config.show {
            image.present(&puzzle.id);
        }

        let post = match &self.publisher {
            Some(publisher) => {
                enter(state, PipelineState::Publishing);
                let caption =
                    compose_caption(&puzzle.id, selection.date.as_deref(), &config.play_url);
                Some(
                    publisher
                        .publish(&image, &alt_text(&puzzle.id), &caption)
                        .await?,
                )
            }
            None => None,
        };

        enter(state, PipelineState::Done);
        Ok(RunReport {
            selection,
            image,
            saved_to,
            post,
        })
    }
}

fn enter(state: &mut PipelineState, next: PipelineState) {
    debug!("阶段 {} → {}", state, next);
    *state = next;
}
