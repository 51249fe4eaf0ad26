//! AI 答案解析服务 - 业务能力层
//!
//! 只负责"把一道题变成一个答案"的能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `reqwest` 直接调用 OpenAI 兼容的 chat completion 接口
//! - 请求体支持合并用户自定义参数（temperature 等）
//! - AI 必须按约定的 JSON 格式作答，响应会先清理 Markdown 代码块标记

use regex::Regex;
use serde_json::{json, Value as JsonValue};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AnswerError, Result};
use crate::models::Question;

/// 答案来源能力
///
/// 核心流程只依赖这个 trait；测试时可以换成脚本化的假实现，
/// 不需要真实的网络调用。
#[allow(async_fn_in_trait)]
pub trait AnswerSource {
    /// 根据题目快照获取原始答案文本
    ///
    /// 返回的是 AI 的 `answer` 字段原文，不做任何规整；
    /// 拆分成选项字母是 `AnswerApplier` 的职责。
    async fn resolve(&self, question: &Question) -> Result<String>;
}

/// AI 答案解析器
///
/// 职责：
/// - 构建答题提示词
/// - 调用 AI 接口并解析响应
/// - 只处理单个题目
/// - 不关心答案如何应用到页面
pub struct AnswerResolver {
    client: reqwest::Client,
    api_url: String,
    api_token: String,
    model: String,
    custom_body: String,
}

impl AnswerResolver {
    /// 从配置创建新的解析器
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_token: config.api_token.clone(),
            model: config.model.clone(),
            custom_body: config.custom_body.clone(),
        }
    }

    /// 构建请求体，合并自定义参数
    ///
    /// 自定义参数解析失败不是致命错误：请求不带这些字段也能继续，
    /// 只记一条警告。
    fn build_payload(&self, prompt: &str) -> JsonValue {
        let mut payload = json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": prompt }
            ],
            "stream": false
        });

        if !self.custom_body.trim().is_empty() {
            match serde_json::from_str::<JsonValue>(&self.custom_body) {
                Ok(JsonValue::Object(custom)) => {
                    if let Some(map) = payload.as_object_mut() {
                        for (key, value) in custom {
                            map.insert(key, value);
                        }
                    }
                }
                Ok(_) => warn!("自定义参数不是 JSON 对象，已忽略"),
                Err(e) => warn!("自定义参数解析失败，已忽略: {}", e),
            }
        }

        payload
    }
}

impl AnswerSource for AnswerResolver {
    async fn resolve(&self, question: &Question) -> Result<String> {
        // 发起网络调用之前先检查配置
        if self.api_url.is_empty() {
            return Err(AnswerError::Config("API URL"));
        }
        if self.api_token.is_empty() {
            return Err(AnswerError::Config("API Token"));
        }

        let prompt = build_prompt(question);
        let payload = self.build_payload(&prompt);

        debug!("调用 AI 接口，模型: {}", self.model);
        debug!("提示词长度: {} 字符", prompt.len());

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnswerError::Upstream { status });
        }

        let body: JsonValue = response
            .json()
            .await
            .map_err(|e| AnswerError::Parse(format!("响应不是有效 JSON: {}", e)))?;

        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                AnswerError::Parse("响应缺少 choices[0].message.content 字段".to_string())
            })?;

        debug!("AI 接口调用成功");
        parse_answer(content)
    }
}

/// 构建答题提示词
///
/// 包含题型、题干和全部选项，并要求 AI 按题型对应的
/// 四种 JSON 格式之一作答。
pub(crate) fn build_prompt(question: &Question) -> String {
    let mut context = format!(
        "题目类型：{}\n题目内容：{}\n",
        question.kind, question.stem
    );
    if !question.options.is_empty() {
        context.push_str("选项：\n");
        for opt in &question.options {
            context.push_str(&format!("{}. {}\n", opt.letter, opt.text));
        }
    }

    format!(
        r#"你是一个智能答题助手。请根据以下题目信息，直接给出答案。

{context}
请严格按照以下 JSON 格式返回答案，不要包含任何 Markdown 标记或其他文字：
{{"answer": "A"}} (单选)
{{"answer": "A,B"}} (多选)
{{"answer": "T"}} (判断题，T是对，F是错)
{{"answer": "答案内容"}} (简答题)
"#
    )
}

/// 从 AI 响应内容中提取 answer 字段
///
/// 先无条件清理 Markdown 代码块标记再解析 JSON，不做其他清洗：
/// 正文里夹带 JSON 片段的散文回答按解析失败处理。
pub(crate) fn parse_answer(content: &str) -> Result<String> {
    let fence_re = Regex::new(r"```(?:json)?")
        .map_err(|e| AnswerError::Parse(format!("代码块清理规则构建失败: {}", e)))?;
    let cleaned = fence_re.replace_all(content, "");
    let cleaned = cleaned.trim();

    let value: JsonValue = serde_json::from_str(cleaned)
        .map_err(|e| AnswerError::Parse(format!("AI 答案不是有效 JSON: {}", e)))?;

    value
        .get("answer")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| AnswerError::Parse("AI 答案缺少 answer 字段".to_string()))
}
