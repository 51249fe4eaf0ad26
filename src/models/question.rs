use serde::{Deserialize, Serialize};

/// 题目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    /// 单选题
    Single,
    /// 多选题
    Multiple,
    /// 判断题
    Judgment,
    /// 简答题
    Short,
    /// 未识别的题型
    Unknown,
}

impl QuestionKind {
    /// 从页面题型标签文本解析题目类型
    ///
    /// 页面标签形如 "单选题"、"多选题"、"判断题"、"简答题"，
    /// 匹配不到任何已知题型时返回 `Unknown`。
    pub fn from_label(text: &str) -> Self {
        if text.contains("单选题") {
            QuestionKind::Single
        } else if text.contains("多选题") {
            QuestionKind::Multiple
        } else if text.contains("判断题") {
            QuestionKind::Judgment
        } else if text.contains("简答题") {
            QuestionKind::Short
        } else {
            QuestionKind::Unknown
        }
    }

    /// 获取题型的标准名称
    pub fn name(self) -> &'static str {
        match self {
            QuestionKind::Single => "单选题",
            QuestionKind::Multiple => "多选题",
            QuestionKind::Judgment => "判断题",
            QuestionKind::Short => "简答题",
            QuestionKind::Unknown => "未知题型",
        }
    }
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 题目选项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionItem {
    /// 选项字母（如 "A"）
    pub letter: String,
    /// 选项内容
    pub text: String,
    /// 选项在页面上的显示顺序
    pub index: usize,
}

/// 当前题目的完整快照
///
/// 每个答题周期开始时从页面重新读取一次，周期内不再变化。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// 题目类型
    pub kind: QuestionKind,
    /// 题干内容
    pub stem: String,
    /// 选项列表（按显示顺序）
    pub options: Vec<OptionItem>,
}

impl Question {
    /// 页面上是否没有可作答的题目
    pub fn is_empty(&self) -> bool {
        self.stem.is_empty()
    }
}
