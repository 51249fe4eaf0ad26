use anyhow::Result;
use seewo_auto_answer::utils::logging;
use seewo_auto_answer::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::load();

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
