pub mod applier;
pub mod resolver;

pub use applier::AnswerApplier;
pub use resolver::{AnswerResolver, AnswerSource};
