//! 真实浏览器集成测试
//!
//! 需要一个带调试端口启动的浏览器，并且已登录答题平台：
//! ```bash
//! chrome --remote-debugging-port=9222
//! cargo test -- --ignored
//! ```

use seewo_auto_answer::browser::connect_to_browser_and_page;
use seewo_auto_answer::config::Config;
use seewo_auto_answer::infrastructure::JsExecutor;
use seewo_auto_answer::page::{ExamPage, SeewoPage};

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_browser_connection() {
    let _ = tracing_subscriber::fmt::try_init();

    let config = Config::load();

    let result = connect_to_browser_and_page(config.browser_debug_port, &config.target_url).await;

    assert!(result.is_ok(), "应该能够成功连接浏览器");
}

#[tokio::test]
#[ignore]
async fn test_read_question_from_live_page() {
    let _ = tracing_subscriber::fmt::try_init();

    let config = Config::load();

    let (_browser, page) =
        connect_to_browser_and_page(config.browser_debug_port, &config.target_url)
            .await
            .expect("连接浏览器失败");

    let seewo_page = SeewoPage::new(JsExecutor::new(page));
    let question = seewo_page.read_question().await.expect("读取题目失败");

    println!("题型: {}", question.kind);
    println!("题干: {}", question.stem);
    for opt in &question.options {
        println!("  {}. {}", opt.letter, opt.text);
    }
}

#[tokio::test]
#[ignore]
async fn test_solve_one_live() {
    let _ = tracing_subscriber::fmt::try_init();

    let mut config = Config::load();
    config.run_mode = "single".to_string();
    assert!(!config.api_token.is_empty(), "请先配置 API_TOKEN");

    let app = seewo_auto_answer::App::initialize(config)
        .await
        .expect("初始化应用失败");

    // 单题解答一次，结果看日志输出
    app.run().await.expect("运行失败");
}
