use anyhow::{anyhow, Context, Error, Result};
use serde::{Deserialize, Serialize, Serializer};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

pub const NUM_OPTIONS: usize = 4;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Letter {
    A,
    B,
    C,
    D,
}

impl Letter {
    pub const ALL: [Letter; NUM_OPTIONS] = [Letter::A, Letter::B, Letter::C, Letter::D];

    pub fn from_index(index: usize) -> Option<Letter> {
        Letter::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            Letter::A => 0,
            Letter::B => 1,
            Letter::C => 2,
            Letter::D => 3,
        }
    }

    pub fn as_char(self) -> char {
        (b'A' + self.index() as u8) as char
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Letter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Letter> {
        match s.trim().to_uppercase().as_ref() {
            "A" => Ok(Letter::A),
            "B" => Ok(Letter::B),
            "C" => Ok(Letter::C),
            "D" => Ok(Letter::D),
            other => Err(anyhow!("`{}` is not one of A, B, C or D", other)),
        }
    }
}

impl Serialize for Letter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Question as it appears in a structured question bank, before validation.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestion {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub text: String,
    pub options: [String; NUM_OPTIONS],
    pub correct_answer: Letter,
    pub section: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    pub fn option(&self, letter: Letter) -> &str {
        &self.options[letter.index()]
    }

    pub fn is_answer_correct(&self, answer: Letter) -> bool {
        self.correct_answer == answer
    }
}

impl TryFrom<RawQuestion> for Question {
    type Error = Error;

    fn try_from(raw_question: RawQuestion) -> Result<Self> {
        let num_options = raw_question.options.len();
        let options = <[String; NUM_OPTIONS]>::try_from(raw_question.options).map_err(|_| {
            anyhow!(
                "expected {} options but found {}",
                NUM_OPTIONS,
                num_options
            )
        })?;
        let correct_answer = raw_question
            .correct_answer
            .parse()
            .context("invalid correct answer")?;
        Ok(Question {
            text: raw_question.text,
            options,
            correct_answer,
            section: raw_question.section.unwrap_or_default(),
            explanation: raw_question.explanation,
        })
    }
}
