//! FemFit 共享领域库
//!
//! 与运行目标无关的部分：问题目录、问卷引擎、输入控件状态机、
//! 答案格式化、周期派生值、传输协议和页面流程。

pub mod answer;
pub mod cycle;
pub mod date;
pub mod engine;
pub mod flow;
pub mod format;
pub mod input;
pub mod protocol;
pub mod question;
pub mod user;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 会话 token 在 localStorage 中的键
pub const STORAGE_TOKEN_KEY: &str = "token";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

pub use answer::{AnswerMap, AnswerValue, is_answered};
pub use cycle::{BmiCategory, CyclePhase, CycleSnapshot, Mood};
pub use date::{IsoDate, today};
pub use engine::{AnswerError, QuestionnaireSession, is_stage_complete, serialize_for_submission};
pub use format::{extract_free_text, format_answers, format_catalog_answers};
pub use question::{
    CatalogError, Question, QuestionCatalog, QuestionDefinition, QuestionKind, QuestionOption,
    RenderType,
};
