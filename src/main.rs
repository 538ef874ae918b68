use anyhow::Result;
use arc_daily_bsky::utils::logging;
use arc_daily_bsky::{App, Args, Config};
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_args(Args::parse());

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
