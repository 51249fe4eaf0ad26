//! 答题页面适配层
//!
//! `ExamPage` 是核心流程与具体答题平台之间的唯一边界：
//! 核心不认识任何选择器，只通过这组能力读写页面状态。

pub mod seewo;

pub use seewo::SeewoPage;

use crate::error::Result;
use crate::models::Question;

/// 答题页面契约
///
/// 职责：
/// - 读取当前题目快照
/// - 执行选项点击 / 简答题填写
/// - 执行切题与交卷动作
/// - 不关心答案从哪里来
#[allow(async_fn_in_trait)]
pub trait ExamPage {
    /// 读取当前题目；页面上没有题目时返回题干为空的快照
    async fn read_question(&self) -> Result<Question>;

    /// 点击指定字母对应的选项
    ///
    /// 匹配不到的字母静默跳过（允许部分成功），
    /// 至少命中一个选项时返回 true。
    async fn apply_choice(&self, letters: &[String]) -> Result<bool>;

    /// 将文本填入简答题编辑器
    ///
    /// 保证不向上抛出异常：找不到编辑器或脚本失败时返回 false。
    async fn apply_free_text(&self, content: &str) -> Result<bool>;

    /// 切换到下一题；已是最后一题或按钮不可用时返回 false
    async fn next_question(&self) -> Result<bool>;

    /// 切换到上一题
    async fn prev_question(&self) -> Result<bool>;

    /// 交卷（内部处理确认弹窗），返回是否成功发起交卷
    async fn submit(&self) -> Result<bool>;
}
