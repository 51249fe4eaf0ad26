pub mod question;

pub use question::{OptionItem, Question, QuestionKind};
