//! # ARC Daily Bluesky
//!
//! 每天从 ARC-AGI-2 题库中选出一道题目，渲染成带标签的多面板图片并发布到 Bluesky
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure / Clients）
//! - `browser/` - 启动无头浏览器
//! - `infrastructure/` - `BrowserSession`，持有浏览器与页面，只暴露读取元素文本的能力
//! - `clients/` - GitHub contents API 与 Bluesky XRPC 的 HTTP 客户端
//!
//! ### ② 领域模型与绘图（Models / Render）
//! - `models/` - `Grid`、`Puzzle`、`Dataset`、`Selection`、`StyledText`
//! - `render/` - 调色板、样式、网格绘制、组合图布局与 PNG 编码
//!
//! ### ③ 业务能力层（Services）
//! - `PuzzleSource` - 按数据集顺序取题、列出题目 ID
//! - `TodayResolver` - 获取今日题目
//! - `Publisher` - 发布带图帖子
//!
//! ### ④ 流程层（Workflow）
//! - `selection` - `today` / `random` / 指定 ID 的选题策略
//! - `caption` - 帖子正文与图片描述
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/pipeline` - `Init → ResolvingId → Fetching → Rendering → Publishing → Done`

pub mod browser;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod render;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{Args, Config};
pub use error::{AppError, Result};
pub use models::{Dataset, Grid, Puzzle, PuzzleRequest, Selection, StyledText};
pub use orchestrator::{App, PipelineState, RunReport};
pub use render::{PuzzleComposer, RenderStyle, RenderedImage};
