//! 答题流程 - 流程层
//!
//! 核心职责：定义"一道题"的完整答题周期
//!
//! 流程顺序：
//! 1. 读取题目快照（没有题目则短路）
//! 2. AI 解答
//! 3. 停止标志检查（AI 调用无法取消，返回后先检查再动页面）
//! 4. 应用答案并报告结果

use tracing::{info, warn};

use crate::error::{AnswerError, Result};
use crate::models::QuestionKind;
use crate::page::ExamPage;
use crate::services::{AnswerApplier, AnswerSource};
use crate::utils::logging::truncate_text;

/// 单个答题周期的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// 答案已应用到页面
    Answered { answer: String },
    /// AI 给出了答案但没有匹配到任何选项
    NoMatch { answer: String },
    /// 周期内收到停止请求，答案被丢弃
    Interrupted,
}

/// 答题流程
///
/// 职责：
/// - 编排一道题的完整周期
/// - 不持有任何资源（page 由调用方传入）
/// - 不做任何调度，跑完一个周期就返回
pub struct AnswerFlow<R: AnswerSource> {
    resolver: R,
    applier: AnswerApplier,
}

impl<R: AnswerSource> AnswerFlow<R> {
    /// 创建新的答题流程
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            applier: AnswerApplier::new(),
        }
    }

    /// 执行一个答题周期
    ///
    /// `keep_going` 是停止标志检查：AI 调用期间到达的停止请求
    /// 会让调用正常完成，但其结果在改动页面之前被丢弃。
    pub async fn run<P: ExamPage>(
        &self,
        page: &P,
        keep_going: impl Fn() -> bool,
    ) -> Result<CycleOutcome> {
        let question = page.read_question().await?;
        if question.is_empty() {
            return Err(AnswerError::NoQuestion);
        }

        info!("题干: {}", truncate_text(&question.stem, 80));
        info!("🤖 AI 正在思考...");

        let answer = self.resolver.resolve(&question).await?;

        if !keep_going() {
            info!("收到停止请求，丢弃本题答案");
            return Ok(CycleOutcome::Interrupted);
        }

        info!("✅ AI 答案: {}", answer);

        let applied = self.applier.apply(page, &question, &answer).await?;
        if !applied && question.kind != QuestionKind::Short {
            warn!("❌ 无法选择选项: {}", answer);
            return Ok(CycleOutcome::NoMatch { answer });
        }

        Ok(CycleOutcome::Answered { answer })
    }
}
