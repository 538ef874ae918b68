//! 日志工具模块
//!
//! 初始化 tracing，并提供运行摘要的输出函数

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::Selection;

/// 初始化日志
///
/// 默认级别 `info`，可通过 `RUST_LOG` 覆盖。重复调用无副作用。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 每日 ARC-AGI 题目发布");
    info!("🧩 题目: {:?}  数据集: {}", config.puzzle, config.dataset);
    info!(
        "⚙️ 显示答案: {}  保存: {}  打开: {}  仅渲染: {}",
        config.show_answer, config.save, config.show, config.dry_run
    );
    info!("{}", "=".repeat(60));
}

/// 记录选中的题目
pub fn log_selection(selection: &Selection) {
    info!("\n{}", "─".repeat(60));
    info!("🎯 选中题目 {}", selection);
    info!("{}", "─".repeat(60));
}

/// 打印最终结果
///
/// # 参数
/// - `puzzle_id`: 题目 ID
/// - `post_uri`: 帖子 URI，未发布时为 `None`
pub fn log_finish(puzzle_id: &str, post_uri: Option<&str>) {
    info!("\n{}", "=".repeat(60));
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    match post_uri {
        Some(uri) => info!("✅ 题目 {} 已发布: {}", puzzle_id, uri),
        None => info!("✅ 题目 {} 已渲染（未发布）", puzzle_id),
    }
    info!("{}", "=".repeat(60));
}
