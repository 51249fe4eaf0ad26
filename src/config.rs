use serde::Deserialize;
use tracing::warn;

/// 程序配置
///
/// 加载顺序：默认值 → config.toml（可选）→ 环境变量覆盖
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// AI 接口地址（OpenAI 兼容的 chat completion 端点）
    pub api_url: String,
    /// AI 接口 Token（必填，默认为空）
    pub api_token: String,
    /// 模型名称
    pub model: String,
    /// 合并进请求体的自定义参数（JSON 文本）
    pub custom_body: String,
    /// 答完最后一题后是否自动交卷
    pub auto_submit: bool,
    /// 运行模式："auto"（全自动）或 "single"（单题解答）
    pub run_mode: String,
    /// 浏览器调试端口
    pub browser_debug_port: u16,
    /// 答题页面 URL
    pub target_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1/chat/completions".to_string(),
            api_token: String::new(),
            model: "gpt-3.5-turbo".to_string(),
            custom_body: "{}".to_string(),
            auto_submit: false,
            run_mode: "auto".to_string(),
            browser_debug_port: 9222,
            target_url: "https://pinco.seewo.com/teacher/".to_string(),
        }
    }
}

impl Config {
    /// 加载配置：读取 config.toml（如果存在），再应用环境变量覆盖
    pub fn load() -> Self {
        let base = match std::fs::read_to_string("config.toml") {
            Ok(content) => match toml::from_str::<Config>(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("config.toml 解析失败，使用默认配置: {}", e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        };
        base.apply_env()
    }

    /// 应用环境变量覆盖
    fn apply_env(self) -> Self {
        Self {
            api_url: std::env::var("API_URL").unwrap_or(self.api_url),
            api_token: std::env::var("API_TOKEN").unwrap_or(self.api_token),
            model: std::env::var("MODEL").unwrap_or(self.model),
            custom_body: std::env::var("CUSTOM_BODY").unwrap_or(self.custom_body),
            auto_submit: std::env::var("AUTO_SUBMIT").ok().and_then(|v| v.parse().ok()).unwrap_or(self.auto_submit),
            run_mode: std::env::var("RUN_MODE").unwrap_or(self.run_mode),
            browser_debug_port: std::env::var("BROWSER_DEBUG_PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(self.browser_debug_port),
            target_url: std::env::var("TARGET_URL").unwrap_or(self.target_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_url, "https://api.openai.com/v1/chat/completions");
        assert!(config.api_token.is_empty());
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.custom_body, "{}");
        assert!(!config.auto_submit);
        assert_eq!(config.run_mode, "auto");
    }

    #[test]
    fn test_parse_toml_config() {
        let content = r#"
            api_token = "sk-test"
            model = "gpt-4o-mini"
            auto_submit = true
        "#;
        let config: Config = toml::from_str(content).unwrap();
        assert_eq!(config.api_token, "sk-test");
        assert_eq!(config.model, "gpt-4o-mini");
        assert!(config.auto_submit);
        // 未出现的字段保持默认值
        assert_eq!(config.custom_body, "{}");
        assert_eq!(config.browser_debug_port, 9222);
    }
}
