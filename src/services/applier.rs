//! 答案应用服务 - 业务能力层
//!
//! 把 AI 的原始答案文本规整成选项字母集合，再交给页面适配器点击；
//! 简答题的答案原样转发。匹配失败只向上报告，这里永远不重试。

use phf::phf_map;

use crate::error::Result;
use crate::models::{Question, QuestionKind};
use crate::page::ExamPage;

/// 判断题答案映射表
///
/// AI 可能用 A/B、对/错或 T/F 作答，而页面选项统一标 T/F。
/// 映射不到的值原样保留，自然匹配不到任何选项。
static JUDGMENT_MAP: phf::Map<&'static str, &'static str> = phf_map! {
    "A" => "T",
    "对" => "T",
    "T" => "T",
    "B" => "F",
    "错" => "F",
    "F" => "F",
};

/// 答案应用器
///
/// 职责：
/// - 规整 AI 的原始答案（格式容错）
/// - 通过 `ExamPage` 应用到页面
/// - 不发起任何网络调用
pub struct AnswerApplier;

impl AnswerApplier {
    pub fn new() -> Self {
        Self
    }

    /// 将原始答案应用到当前题目
    ///
    /// 返回是否至少命中了一个选项（简答题返回是否找到编辑器）。
    pub async fn apply<P: ExamPage>(
        &self,
        page: &P,
        question: &Question,
        raw_answer: &str,
    ) -> Result<bool> {
        if question.kind == QuestionKind::Short {
            return page.apply_free_text(raw_answer).await;
        }

        let letters = normalize_letters(question.kind, raw_answer);
        if letters.is_empty() {
            return Ok(false);
        }
        page.apply_choice(&letters).await
    }
}

impl Default for AnswerApplier {
    fn default() -> Self {
        Self::new()
    }
}

/// 把原始答案文本规整成选项字母列表
///
/// 支持 "A,B"、"A，B"、"A B" 等写法；多选题的连写答案
/// （如 "ABC"）拆成单个字母，其他题型按一个完整候选处理。
pub(crate) fn normalize_letters(kind: QuestionKind, raw_answer: &str) -> Vec<String> {
    let upper = raw_answer.to_uppercase();
    let mut letters: Vec<String> = upper
        .split(|c: char| c == ',' || c == '，' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if letters.len() == 1 && letters[0].chars().count() > 1 && kind == QuestionKind::Multiple {
        letters = letters[0].chars().map(|c| c.to_string()).collect();
    }

    if kind == QuestionKind::Judgment {
        letters = letters
            .into_iter()
            .map(|letter| match JUDGMENT_MAP.get(letter.as_str()) {
                Some(mapped) => (*mapped).to_string(),
                None => letter,
            })
            .collect();
    }

    letters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OptionItem;
    use std::cell::RefCell;

    /// 记录点击动作的假页面
    struct FakePage {
        letters_on_page: Vec<&'static str>,
        clicked: RefCell<Vec<String>>,
        free_text: RefCell<Option<String>>,
    }

    impl FakePage {
        fn new(letters_on_page: Vec<&'static str>) -> Self {
            Self {
                letters_on_page,
                clicked: RefCell::new(Vec::new()),
                free_text: RefCell::new(None),
            }
        }
    }

    impl ExamPage for FakePage {
        async fn read_question(&self) -> Result<Question> {
            unimplemented!("应用测试不读题")
        }

        async fn apply_choice(&self, letters: &[String]) -> Result<bool> {
            let mut matched_any = false;
            for letter in letters {
                if self.letters_on_page.contains(&letter.as_str()) {
                    self.clicked.borrow_mut().push(letter.clone());
                    matched_any = true;
                }
            }
            Ok(matched_any)
        }

        async fn apply_free_text(&self, content: &str) -> Result<bool> {
            *self.free_text.borrow_mut() = Some(content.to_string());
            Ok(true)
        }

        async fn next_question(&self) -> Result<bool> {
            Ok(false)
        }

        async fn prev_question(&self) -> Result<bool> {
            Ok(false)
        }

        async fn submit(&self) -> Result<bool> {
            Ok(false)
        }
    }

    fn question(kind: QuestionKind, letters: &[&str]) -> Question {
        Question {
            kind,
            stem: "测试题干".to_string(),
            options: letters
                .iter()
                .enumerate()
                .map(|(index, letter)| OptionItem {
                    letter: (*letter).to_string(),
                    text: format!("选项{}", letter),
                    index,
                })
                .collect(),
        }
    }

    #[test]
    fn test_normalize_single_letter() {
        assert_eq!(normalize_letters(QuestionKind::Single, "A"), vec!["A"]);
        assert_eq!(normalize_letters(QuestionKind::Single, " b "), vec!["B"]);
    }

    #[test]
    fn test_normalize_separators() {
        assert_eq!(
            normalize_letters(QuestionKind::Multiple, "A,B"),
            vec!["A", "B"]
        );
        assert_eq!(
            normalize_letters(QuestionKind::Multiple, "A，B"),
            vec!["A", "B"]
        );
        assert_eq!(
            normalize_letters(QuestionKind::Multiple, "A  B\tC"),
            vec!["A", "B", "C"]
        );
        assert_eq!(
            normalize_letters(QuestionKind::Multiple, ",A,,B,"),
            vec!["A", "B"]
        );
    }

    #[test]
    fn test_normalize_contiguous_letters_multiple_only() {
        // 多选题的连写答案拆成单个字母
        assert_eq!(
            normalize_letters(QuestionKind::Multiple, "ABC"),
            vec!["A", "B", "C"]
        );
        // 其他题型按一个完整候选处理，自然匹配不到选项
        assert_eq!(normalize_letters(QuestionKind::Single, "ABC"), vec!["ABC"]);
    }

    #[test]
    fn test_normalize_judgment_remap() {
        assert_eq!(normalize_letters(QuestionKind::Judgment, "A"), vec!["T"]);
        assert_eq!(normalize_letters(QuestionKind::Judgment, "对"), vec!["T"]);
        assert_eq!(normalize_letters(QuestionKind::Judgment, "T"), vec!["T"]);
        assert_eq!(normalize_letters(QuestionKind::Judgment, "B"), vec!["F"]);
        assert_eq!(normalize_letters(QuestionKind::Judgment, "错"), vec!["F"]);
        assert_eq!(normalize_letters(QuestionKind::Judgment, "F"), vec!["F"]);
        // 映射不到的值原样保留
        assert_eq!(normalize_letters(QuestionKind::Judgment, "C"), vec!["C"]);
    }

    #[test]
    fn test_apply_single_choice_selects_exactly_one() {
        let applier = AnswerApplier::new();
        let page = FakePage::new(vec!["A", "B", "C"]);
        let q = question(QuestionKind::Single, &["A", "B", "C"]);

        let applied = tokio_test::block_on(applier.apply(&page, &q, "A")).unwrap();
        assert!(applied);
        assert_eq!(*page.clicked.borrow(), vec!["A"]);
    }

    #[test]
    fn test_apply_contiguous_on_single_fails_to_match() {
        let applier = AnswerApplier::new();
        let page = FakePage::new(vec!["A", "B", "C"]);
        let q = question(QuestionKind::Single, &["A", "B", "C"]);

        let applied = tokio_test::block_on(applier.apply(&page, &q, "ABC")).unwrap();
        assert!(!applied);
        assert!(page.clicked.borrow().is_empty());
    }

    #[test]
    fn test_apply_partial_match_is_success() {
        // 匹配不到的字母静默跳过，命中一个即算成功
        let applier = AnswerApplier::new();
        let page = FakePage::new(vec!["A", "B"]);
        let q = question(QuestionKind::Multiple, &["A", "B"]);

        let applied = tokio_test::block_on(applier.apply(&page, &q, "A,D")).unwrap();
        assert!(applied);
        assert_eq!(*page.clicked.borrow(), vec!["A"]);
    }

    #[test]
    fn test_apply_short_answer_forwards_verbatim() {
        let applier = AnswerApplier::new();
        let page = FakePage::new(vec![]);
        let q = question(QuestionKind::Short, &[]);

        let applied =
            tokio_test::block_on(applier.apply(&page, &q, "长江是中国最长的河流。")).unwrap();
        assert!(applied);
        assert_eq!(
            page.free_text.borrow().as_deref(),
            Some("长江是中国最长的河流。")
        );
        assert!(page.clicked.borrow().is_empty());
    }

    #[test]
    fn test_apply_empty_answer_matches_nothing() {
        let applier = AnswerApplier::new();
        let page = FakePage::new(vec!["A", "B"]);
        let q = question(QuestionKind::Single, &["A", "B"]);

        let applied = tokio_test::block_on(applier.apply(&page, &q, "  ")).unwrap();
        assert!(!applied);
    }
}
