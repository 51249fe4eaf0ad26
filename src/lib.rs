//! # Seewo Auto Answer
//!
//! 一个驱动 Seewo 答题页面自动作答的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的分层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `JsExecutor` - 唯一的 page owner，提供 eval() 能力
//!
//! ### ② 页面适配层（Page）
//! - `page/` - 核心与答题平台之间的唯一边界
//! - `ExamPage` - 读题 / 选择 / 切题 / 交卷的能力契约
//! - `SeewoPage` - Seewo 平台的具体实现，封装全部选择器
//!
//! ### ③ 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个 Question
//! - `AnswerResolver` - AI 解答能力
//! - `AnswerApplier` - 答案规整与应用能力
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/` - 定义"一道题"的完整答题周期
//! - `AnswerFlow` - 周期编排（读题 → 解答 → 应用 → 报告）
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/` - Idle / Running 状态机与题间调度
//! - `RunController` - 单题解答与全自动两种入口

pub mod app;
pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod page;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use browser::connect_to_browser_and_page;
pub use config::Config;
pub use error::{AnswerError, Result};
pub use infrastructure::JsExecutor;
pub use models::{OptionItem, Question, QuestionKind};
pub use orchestrator::{RunController, RunOutcome, StopHandle};
pub use page::{ExamPage, SeewoPage};
pub use services::{AnswerApplier, AnswerResolver, AnswerSource};
pub use workflow::{AnswerFlow, CycleOutcome};
