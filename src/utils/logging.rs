//! 日志工具模块

use tracing_subscriber::EnvFilter;

/// 初始化日志输出
///
/// 默认 info 级别，可用 RUST_LOG 环境变量覆盖。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("短文本", 80), "短文本");
        let long = "长".repeat(100);
        let truncated = truncate_text(&long, 80);
        assert_eq!(truncated.chars().count(), 83);
        assert!(truncated.ends_with("..."));
    }
}
