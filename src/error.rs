use thiserror::Error;

/// 答题流程错误类型
///
/// 分类原则：
/// - `Config` 是用户可修复的，永远不会自动重试
/// - `Transport` / `Upstream` / `Parse` 对应一次 AI 调用的三个失败阶段
/// - `NoQuestion` 表示页面上没有可作答的题目
/// - 自动模式下任何错误都会停止循环，交由人工处理
#[derive(Debug, Error)]
pub enum AnswerError {
    /// 配置缺失（API URL / Token 未配置）
    #[error("配置缺失: {0}，请先配置 API URL 和 Token")]
    Config(&'static str),

    /// 网络请求本身失败（如无法连接服务器）
    #[error("网络请求错误: {0}")]
    Transport(#[from] reqwest::Error),

    /// API 返回非成功状态码
    #[error("API 请求失败: HTTP {status}")]
    Upstream { status: reqwest::StatusCode },

    /// AI 响应格式不符合预期
    #[error("解析 AI 响应失败: {0}")]
    Parse(String),

    /// 页面上未检测到题目
    #[error("未检测到题目")]
    NoQuestion,

    /// 浏览器脚本执行失败
    #[error("浏览器错误: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    /// JSON 序列化/反序列化失败
    #[error("JSON解析失败: {0}")]
    Json(#[from] serde_json::Error),
}

/// 答题流程结果类型
pub type Result<T> = std::result::Result<T, AnswerError>;
