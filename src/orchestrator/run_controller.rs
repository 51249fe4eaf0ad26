//! 自动答题控制器 - 编排层
//!
//! Idle / Running 状态机：触发答题周期，决定继续切题还是结束，
//! 管理题间停顿的定时器。任何一个周期出错都会停止自动运行，
//! 不重试当前题目，交由人工处理。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::time::{sleep, Duration};
use tracing::{error, info, warn};

use crate::error::Result;
use crate::page::ExamPage;
use crate::services::AnswerSource;
use crate::workflow::{AnswerFlow, CycleOutcome};

/// 答完一题后的停顿，让答案在页面上停留片刻再切题
const NEXT_QUESTION_DELAY: Duration = Duration::from_secs(3);
/// 切题后的停顿，等待新题目渲染完成
const PAGE_SETTLE_DELAY: Duration = Duration::from_secs(2);

/// 自动答题的终止方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// 已答到最后一题（未交卷）
    Finished,
    /// 已答到最后一题并自动交卷
    Submitted,
    /// 被停止请求终止
    Stopped,
    /// 已有自动运行在进行中，本次启动被忽略
    AlreadyRunning,
}

/// 停止句柄
///
/// 可以从任意任务（如 Ctrl-C 处理器）发出停止请求。
/// 停止只是翻转标志位：正在等待的定时器续点和 AI 调用返回点
/// 检查到标志后不再产生任何副作用。
#[derive(Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// 自动答题控制器
///
/// 职责：
/// - 维护 Idle / Running 状态
/// - 单题解答与全自动两种入口
/// - 管理题间停顿与最后一题的交卷决策
///
/// `running` 标志是唯一的并发守卫：同一时刻最多只有一个答题周期
/// 在产生副作用，每个续点都先检查它。
pub struct RunController<P: ExamPage, R: AnswerSource> {
    page: P,
    flow: AnswerFlow<R>,
    auto_submit: bool,
    running: Arc<AtomicBool>,
}

impl<P: ExamPage, R: AnswerSource> RunController<P, R> {
    /// 创建新的控制器（初始为 Idle）
    pub fn new(page: P, resolver: R, auto_submit: bool) -> Self {
        Self {
            page,
            flow: AnswerFlow::new(resolver),
            auto_submit,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// 获取停止句柄
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(self.running.clone())
    }

    /// 是否处于自动运行状态
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// 单题解答：只执行一个答题周期，无论成败都不做任何调度
    pub async fn solve_one(&self) -> Result<CycleOutcome> {
        self.flow.run(&self.page, || true).await
    }

    /// 全自动答题：循环执行答题周期直到最后一题、出错或被停止
    pub async fn run_auto(&self) -> Result<RunOutcome> {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("⚠️ 自动答题已在运行中，忽略本次启动");
            return Ok(RunOutcome::AlreadyRunning);
        }

        info!("🚀 开始全自动答题");
        let result = self.auto_loop().await;
        // 无论以何种方式退出都回到 Idle
        self.running.store(false, Ordering::SeqCst);

        match &result {
            Ok(outcome) => info!("⏹ 自动答题结束: {:?}", outcome),
            Err(e) => error!("❌ 错误: {}，自动答题已停止", e),
        }
        result
    }

    async fn auto_loop(&self) -> Result<RunOutcome> {
        loop {
            if !self.is_running() {
                return Ok(RunOutcome::Stopped);
            }

            match self.flow.run(&self.page, || self.is_running()).await? {
                CycleOutcome::Interrupted => return Ok(RunOutcome::Stopped),
                // 匹配失败只报告，不中断自动运行
                CycleOutcome::Answered { .. } | CycleOutcome::NoMatch { .. } => {}
            }

            info!("⏳ {}秒后进入下一题...", NEXT_QUESTION_DELAY.as_secs());
            sleep(NEXT_QUESTION_DELAY).await;
            if !self.is_running() {
                return Ok(RunOutcome::Stopped);
            }

            if !self.page.next_question().await? {
                // 最后一题
                return if self.auto_submit {
                    info!("🏁 正在自动交卷...");
                    self.page.submit().await?;
                    Ok(RunOutcome::Submitted)
                } else {
                    info!("🏁 已到达最后一题，请手动交卷");
                    Ok(RunOutcome::Finished)
                };
            }

            // 等待新题目渲染
            sleep(PAGE_SETTLE_DELAY).await;
        }
    }
}
