//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责一次运行的流程调度，是整个系统的"指挥中心"。
//!
//! ### `pipeline` - 每日发布流水线
//! - 初始化：校验配置，创建题库、今日题目解析器、发布器
//! - 选题 → 取题 → 渲染 → 保存/展示 → 发布
//! - 记录每个阶段，失败时报告出错的阶段
//!
//! ## 层次关系
//!
//! ```text
//! pipeline (一次运行 = 一道题)
//!     ↓
//! workflow (选题策略 / 帖子正文)
//!     ↓
//! services (能力层：puzzle_source / today_resolver / publisher)  render (绘图)
//!     ↓
//! clients / infrastructure (GitHub、Bluesky、浏览器会话)
//! ```

pub mod pipeline;

pub use pipeline::{App, PipelineState, RunReport};
