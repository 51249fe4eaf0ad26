//! Seewo 答题页面适配器
//!
//! 通过 `JsExecutor` 在页面内执行 JS 完成题目读取、选项点击、
//! 切题和交卷。所有平台相关的选择器都集中在本文件。

use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::infrastructure::JsExecutor;
use crate::models::{OptionItem, Question, QuestionKind};
use crate::page::ExamPage;

/// 读取当前题目（题型标签、题干、选项列表）
const READ_QUESTION_JS: &str = r#"
(() => {
    const typeEl = document.querySelector('.title-B4SlM .label-362aA .icon-15MxH');
    const titleEl = document.querySelector('.title-B4SlM p.content-edHC-');
    const options = [];
    document.querySelectorAll('.option-item-2nxPs').forEach((el, index) => {
        const checkbox = el.querySelector('.check-box-1frsD');
        const content = el.querySelector('.content-1IAZc');
        if (checkbox && content) {
            options.push({
                letter: checkbox.textContent.trim(),
                text: content.textContent.trim(),
                index: index
            });
        }
    });
    return {
        typeText: typeEl ? typeEl.textContent.trim() : '',
        stem: titleEl ? titleEl.textContent.trim() : '',
        options: options
    };
})()
"#;

/// 点击交卷按钮
const CLICK_SUBMIT_JS: &str = r#"
(() => {
    const buttons = document.querySelectorAll('.ant-btn');
    for (const btn of buttons) {
        if (btn.textContent.includes('交 卷') || btn.textContent.includes('交卷')) {
            btn.click();
            return true;
        }
    }
    return false;
})()
"#;

/// 点击交卷确认弹窗中的确定按钮
const CONFIRM_SUBMIT_JS: &str = r#"
(() => {
    // 策略1：查找所有模态框中的主要按钮，匹配文字
    const primaryBtns = document.querySelectorAll('.ant-modal-root .ant-btn-primary');
    for (const btn of primaryBtns) {
        // offsetParent 为 null 说明按钮不可见
        if (btn.offsetParent !== null) {
            const text = btn.textContent.trim();
            if (text.includes('确定') || text.includes('确 定')) {
                btn.click();
                return true;
            }
        }
    }
    // 策略2：没找到特定文字的，直接用选择器找可见的按钮
    const candidates = document.querySelectorAll('.ant-modal-footer .ant-btn-primary');
    for (const btn of candidates) {
        if (btn.offsetParent !== null) {
            btn.click();
            return true;
        }
    }
    return false;
})()
"#;

/// 页面返回的原始题目数据
#[derive(Debug, serde::Deserialize)]
struct RawQuestion {
    #[serde(rename = "typeText")]
    type_text: String,
    stem: String,
    options: Vec<RawOption>,
}

#[derive(Debug, serde::Deserialize)]
struct RawOption {
    letter: String,
    text: String,
    index: usize,
}

impl From<RawQuestion> for Question {
    fn from(raw: RawQuestion) -> Self {
        Question {
            kind: QuestionKind::from_label(&raw.type_text),
            stem: raw.stem,
            options: raw
                .options
                .into_iter()
                .map(|opt| OptionItem {
                    letter: opt.letter,
                    text: opt.text,
                    index: opt.index,
                })
                .collect(),
        }
    }
}

/// Seewo 答题页面
///
/// 职责：
/// - 实现 `ExamPage` 契约
/// - 封装 Seewo 平台的全部选择器
/// - 不关心答案内容的含义
pub struct SeewoPage {
    executor: JsExecutor,
}

impl SeewoPage {
    /// 创建新的 Seewo 页面适配器
    pub fn new(executor: JsExecutor) -> Self {
        Self { executor }
    }

    /// 按文字查找并点击切题按钮
    ///
    /// 按钮被禁用时返回 false（"下一题"禁用说明已是最后一题）。
    async fn click_nav_button(&self, label: &str) -> Result<bool> {
        let js_code = format!(
            r#"
            (() => {{
                const buttons = document.querySelectorAll('.ant-btn');
                for (const btn of buttons) {{
                    if (btn.textContent.includes('{label}')) {{
                        if (btn.disabled || btn.hasAttribute('disabled')) {{
                            return false;
                        }}
                        btn.click();
                        return true;
                    }}
                }}
                return false;
            }})()
            "#
        );
        self.executor.eval_as::<bool>(js_code).await
    }
}

impl ExamPage for SeewoPage {
    async fn read_question(&self) -> Result<Question> {
        let raw: RawQuestion = self.executor.eval_as(READ_QUESTION_JS).await?;
        debug!(
            "读取题目: 题型 '{}'，{} 个选项",
            raw.type_text,
            raw.options.len()
        );
        Ok(raw.into())
    }

    async fn apply_choice(&self, letters: &[String]) -> Result<bool> {
        let letters_json = serde_json::to_string(letters)?;
        let js_code = format!(
            r#"
            ((letters) => {{
                const options = [];
                document.querySelectorAll('.option-item-2nxPs').forEach((el) => {{
                    const checkbox = el.querySelector('.check-box-1frsD');
                    if (checkbox) {{
                        options.push({{ letter: checkbox.textContent.trim().toUpperCase(), el: el }});
                    }}
                }});
                let matched = 0;
                for (const letter of letters) {{
                    const option = options.find(o => o.letter === letter);
                    if (option) {{
                        option.el.click();
                        matched += 1;
                    }}
                }}
                return matched > 0;
            }})({letters_json})
            "#
        );
        let matched = self.executor.eval_as::<bool>(js_code).await?;
        if matched {
            info!("✓ 已选择选项: {}", letters.join(","));
        }
        Ok(matched)
    }

    async fn apply_free_text(&self, content: &str) -> Result<bool> {
        let content_json = serde_json::to_string(content)?;
        // Draft.js 编辑器不能直接写 textContent，优先模拟粘贴事件，
        // 延时后内容仍未写入时退回 execCommand
        let js_code = format!(
            r#"
            ((content) => {{
                const editor = document.querySelector('.public-DraftEditor-content');
                if (!editor) {{
                    return false;
                }}
                editor.focus();
                try {{
                    const dataTransfer = new DataTransfer();
                    dataTransfer.setData('text/plain', content);
                    const pasteEvent = new ClipboardEvent('paste', {{
                        bubbles: true,
                        cancelable: true,
                        clipboardData: dataTransfer
                    }});
                    editor.dispatchEvent(pasteEvent);
                }} catch (e) {{
                    console.warn('粘贴事件模拟失败:', e);
                }}
                setTimeout(() => {{
                    const currentText = editor.textContent || '';
                    if (!currentText.includes(content.substring(0, Math.min(content.length, 10)))) {{
                        try {{
                            // 不要手动操作 Range 全选，容易导致 React 状态不一致而白屏
                            document.execCommand('insertText', false, content);
                        }} catch (e) {{
                            console.warn('execCommand 失败:', e);
                        }}
                    }}
                }}, 200);
                return true;
            }})({content_json})
            "#
        );
        // 契约保证不向上抛异常，脚本失败降级为"未找到编辑器"
        match self.executor.eval_as::<bool>(js_code).await {
            Ok(found) => {
                if found {
                    info!("📝 已尝试填写简答题");
                }
                Ok(found)
            }
            Err(e) => {
                warn!("简答题填写脚本执行失败: {}", e);
                Ok(false)
            }
        }
    }

    async fn next_question(&self) -> Result<bool> {
        self.click_nav_button("下一题").await
    }

    async fn prev_question(&self) -> Result<bool> {
        self.click_nav_button("上一题").await
    }

    async fn submit(&self) -> Result<bool> {
        let clicked = self.executor.eval_as::<bool>(CLICK_SUBMIT_JS).await?;
        if !clicked {
            warn!("⚠️ 未找到交卷按钮");
            return Ok(false);
        }
        info!("已点击交卷按钮，等待确认弹窗...");
        sleep(Duration::from_secs(1)).await;

        let confirmed = self.executor.eval_as::<bool>(CONFIRM_SUBMIT_JS).await?;
        if confirmed {
            info!("✓ 已确认交卷");
        } else {
            warn!("⚠️ 未找到交卷确认按钮，请手动点击");
        }
        Ok(clicked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_question_into_question() {
        let raw: RawQuestion = serde_json::from_value(serde_json::json!({
            "typeText": "单选题",
            "stem": "中国的首都是哪里？",
            "options": [
                { "letter": "A", "text": "北京", "index": 0 },
                { "letter": "B", "text": "上海", "index": 1 }
            ]
        }))
        .unwrap();

        let question: Question = raw.into();
        assert_eq!(question.kind, QuestionKind::Single);
        assert_eq!(question.stem, "中国的首都是哪里？");
        assert_eq!(question.options.len(), 2);
        assert_eq!(question.options[0].letter, "A");
        assert_eq!(question.options[1].index, 1);
    }

    #[test]
    fn test_raw_question_empty_page() {
        // 页面上没有题目时各字段为空，快照应判空
        let raw: RawQuestion = serde_json::from_value(serde_json::json!({
            "typeText": "",
            "stem": "",
            "options": []
        }))
        .unwrap();

        let question: Question = raw.into();
        assert!(question.is_empty());
        assert_eq!(question.kind, QuestionKind::Unknown);
    }
}
