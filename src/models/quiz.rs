use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 选项字母 A-D
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AnswerLetter {
    A,
    B,
    C,
    D,
}

impl AnswerLetter {
    pub const ALL: [AnswerLetter; 4] = [
        AnswerLetter::A,
        AnswerLetter::B,
        AnswerLetter::C,
        AnswerLetter::D,
    ];

    /// 在 options 中的下标（0-based）
    pub fn index(self) -> usize {
        match self {
            AnswerLetter::A => 0,
            AnswerLetter::B => 1,
            AnswerLetter::C => 2,
            AnswerLetter::D => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AnswerLetter::A => "A",
            AnswerLetter::B => "B",
            AnswerLetter::C => "C",
            AnswerLetter::D => "D",
        }
    }
}

impl fmt::Display for AnswerLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 非法的选项字母
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidLetter(pub String);

impl fmt::Display for InvalidLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "答案必须是 A/B/C/D 之一，实际为 {:?}", self.0)
    }
}

impl std::error::Error for InvalidLetter {}

impl FromStr for AnswerLetter {
    type Err = InvalidLetter;

    /// 严格匹配大写单字母
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(AnswerLetter::A),
            "B" => Ok(AnswerLetter::B),
            "C" => Ok(AnswerLetter::C),
            "D" => Ok(AnswerLetter::D),
            other => Err(InvalidLetter(other.to_string())),
        }
    }
}

impl TryFrom<String> for AnswerLetter {
    type Error = InvalidLetter;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AnswerLetter> for String {
    fn from(letter: AnswerLetter) -> Self {
        letter.as_str().to_string()
    }
}

/// 单道选择题
///
/// 只能通过 `loaders::parse_quiz` 从网关输出构造，保证正好 4 个选项。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: [String; 4],
    pub answer: AnswerLetter,
}

impl QuizQuestion {
    pub fn new(question: impl Into<String>, options: [String; 4], answer: AnswerLetter) -> Self {
        Self {
            question: question.into(),
            options,
            answer,
        }
    }

    pub fn option(&self, letter: AnswerLetter) -> &str {
        &self.options[letter.index()]
    }

    pub fn correct_option(&self) -> &str {
        self.option(self.answer)
    }

    pub fn is_correct(&self, letter: AnswerLetter) -> bool {
        self.answer == letter
    }
}

/// 加载后不可变的测验
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Quiz {
    questions: Vec<QuizQuestion>,
}

impl Quiz {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QuizQuestion> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuizQuestion> {
        self.questions.iter()
    }
}

impl<'a> IntoIterator for &'a Quiz {
    type Item = &'a QuizQuestion;
    type IntoIter = std::slice::Iter<'a, QuizQuestion>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}
