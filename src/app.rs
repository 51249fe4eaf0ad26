use anyhow::Result;
use chromiumoxide::Browser;
use tracing::{error, info, warn};

use crate::browser::connect_to_browser_and_page;
use crate::config::Config;
use crate::infrastructure::JsExecutor;
use crate::orchestrator::{RunController, RunOutcome};
use crate::page::SeewoPage;
use crate::services::AnswerResolver;
use crate::workflow::CycleOutcome;

/// 应用主结构
pub struct App {
    config: Config,
    // 连接断开会使页面失效，必须在整个运行期间持有
    _browser: Browser,
    controller: RunController<SeewoPage, AnswerResolver>,
}

impl App {
    /// 初始化应用：连接浏览器，组装答题控制器
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let (browser, page) =
            connect_to_browser_and_page(config.browser_debug_port, &config.target_url).await?;

        let executor = JsExecutor::new(page);
        let seewo_page = SeewoPage::new(executor);
        let resolver = AnswerResolver::new(&config);
        let controller = RunController::new(seewo_page, resolver, config.auto_submit);

        Ok(Self {
            config,
            _browser: browser,
            controller,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        // Ctrl-C 发出停止请求，正在等待的定时器续点检查到标志后退出
        let stop = self.controller.stop_handle();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("收到 Ctrl-C，正在停止自动答题...");
                stop.stop();
            }
        });

        match self.config.run_mode.as_str() {
            "single" => self.run_single().await,
            _ => self.run_auto().await,
        }
    }

    /// 单题解答模式：执行一个答题周期，错误只报告不传播
    async fn run_single(&self) -> Result<()> {
        info!("🤖 单题解答模式");
        match self.controller.solve_one().await {
            Ok(CycleOutcome::Answered { answer }) => info!("✅ 本题已作答: {}", answer),
            Ok(CycleOutcome::NoMatch { answer }) => warn!("❌ 无法选择选项: {}", answer),
            Ok(CycleOutcome::Interrupted) => {}
            Err(e) => error!("❌ 错误: {}", e),
        }
        Ok(())
    }

    /// 全自动模式：跑完整场答题，结束后输出统计
    async fn run_auto(&self) -> Result<()> {
        let outcome = self.controller.run_auto().await;
        print_final_stats(&outcome);
        Ok(())
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 Seewo 自动答题启动");
    info!("📊 模型: {} / 运行模式: {}", config.model, config.run_mode);
    info!(
        "📤 自动交卷: {}",
        if config.auto_submit { "开启" } else { "关闭" }
    );
    info!("{}", "=".repeat(60));
}

fn print_final_stats(outcome: &crate::error::Result<RunOutcome>) {
    info!("{}", "=".repeat(60));
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    match outcome {
        Ok(RunOutcome::Submitted) => info!("✅ 全部题目已作答并完成交卷"),
        Ok(RunOutcome::Finished) => info!("✅ 全部题目已作答，请手动交卷"),
        Ok(RunOutcome::Stopped) => info!("⏹ 已停止自动答题"),
        Ok(RunOutcome::AlreadyRunning) => {}
        Err(e) => info!("❌ 运行因错误终止: {}", e),
    }
    info!("{}", "=".repeat(60));
}
