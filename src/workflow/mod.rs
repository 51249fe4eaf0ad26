pub mod answer_flow;

pub use answer_flow::{AnswerFlow, CycleOutcome};
