//! Question validation.
//!
//! Turns an untrusted request payload into a normalized [`ValidatedQuestion`],
//! or rejects it with an [`InvalidQuestion`] naming the first violated rule.
//! The validators are pure and run in a fixed order: type, prompt, choices,
//! answer, tags, links.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The accepted question kinds, as wire tags.
pub const VALID_TYPES: &[&str] = &["true_false", "single", "multiple"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    TrueFalse,
    Single,
    Multiple,
}

impl QuestionType {
    pub fn as_tag(self) -> &'static str {
        match self {
            QuestionType::TrueFalse => "true_false",
            QuestionType::Single => "single",
            QuestionType::Multiple => "multiple",
        }
    }

    /// Tags are exact tokens, never trimmed.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "true_false" => Some(QuestionType::TrueFalse),
            "single" => Some(QuestionType::Single),
            "multiple" => Some(QuestionType::Multiple),
            _ => None,
        }
    }

    /// `true_false` questions carry no choice list; every other kind requires
    /// one.
    pub fn has_choices(self) -> bool {
        !matches!(self, QuestionType::TrueFalse)
    }
}

/// Rejection raised by the validators, one message per violated rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct InvalidQuestion(pub &'static str);

/// Untrusted question payload as received from a request body.
///
/// Field values are kept as raw JSON so shape errors surface as
/// [`InvalidQuestion`] instead of a body deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuestion {
    #[serde(rename = "type", default)]
    pub kind: Option<Value>,
    #[serde(default)]
    pub prompt: Option<Value>,
    #[serde(default)]
    pub choices: Option<Value>,
    #[serde(default)]
    pub answer: Option<Value>,
    #[serde(default)]
    pub tags: Option<Value>,
    #[serde(default)]
    pub links: Option<Value>,
    /// Opaque user id, passed through untouched.
    #[serde(default)]
    pub creator: Option<String>,
}

/// The correct answer, shaped by the question kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Bool(bool),
    Index(usize),
    Indices(Vec<usize>),
}

/// Normalized question record.
///
/// `choices` is present exactly when the kind has a choice list; absent
/// optional fields are omitted from the serialized form rather than null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedQuestion {
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    pub answer: Answer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
}

pub fn valid_type(kind: Option<&Value>) -> Result<QuestionType, InvalidQuestion> {
    let kind = kind.ok_or(InvalidQuestion("type is required"))?;
    let tag = kind
        .as_str()
        .ok_or(InvalidQuestion("type must be a string"))?;
    QuestionType::from_tag(tag).ok_or(InvalidQuestion(
        "type must be one of true_false, single, multiple",
    ))
}

pub fn valid_prompt(prompt: Option<&Value>) -> Result<String, InvalidQuestion> {
    let prompt = prompt.ok_or(InvalidQuestion("prompt is required"))?;
    let prompt = prompt
        .as_str()
        .ok_or(InvalidQuestion("prompt must be a string"))?;
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(InvalidQuestion("prompt must not be blank"));
    }
    Ok(prompt.to_owned())
}

/// Entries are trimmed before the blank and duplicate checks, so `"x"` and
/// `"x "` collide.
pub fn valid_choices(
    kind: QuestionType,
    choices: Option<&Value>,
) -> Result<Option<Vec<String>>, InvalidQuestion> {
    if !kind.has_choices() {
        return match choices {
            Some(_) => Err(InvalidQuestion(
                "choices are not allowed for true_false questions",
            )),
            None => Ok(None),
        };
    }

    let choices = choices.ok_or(InvalidQuestion("choices are required"))?;
    let choices = choices
        .as_array()
        .ok_or(InvalidQuestion("choices must be an array"))?;
    if choices.is_empty() {
        return Err(InvalidQuestion("choices must not be empty"));
    }

    let mut trimmed = Vec::with_capacity(choices.len());
    for choice in choices {
        let choice = choice
            .as_str()
            .ok_or(InvalidQuestion("choices must all be strings"))?;
        let choice = choice.trim();
        if choice.is_empty() {
            return Err(InvalidQuestion("choices must not contain blank entries"));
        }
        if trimmed.iter().any(|seen: &String| seen == choice) {
            return Err(InvalidQuestion("choices must not contain duplicates"));
        }
        trimmed.push(choice.to_owned());
    }
    Ok(Some(trimmed))
}

pub fn valid_answer(
    kind: QuestionType,
    choices: Option<&[String]>,
    answer: Option<&Value>,
) -> Result<Answer, InvalidQuestion> {
    // An absent choice list leaves no valid index, so index-based kinds
    // reject every answer against it.
    let choice_count = choices.map_or(0, <[String]>::len);

    match kind {
        QuestionType::TrueFalse => {
            let answer = answer
                .and_then(Value::as_bool)
                .ok_or(InvalidQuestion("answer must be true or false"))?;
            Ok(Answer::Bool(answer))
        }
        QuestionType::Single => {
            let index = answer
                .and_then(Value::as_i64)
                .ok_or(InvalidQuestion("answer must be an integer"))?;
            let index = usize::try_from(index)
                .ok()
                .filter(|&index| index < choice_count)
                .ok_or(InvalidQuestion("answer must be a valid choice index"))?;
            Ok(Answer::Index(index))
        }
        QuestionType::Multiple => {
            let indices = answer
                .and_then(Value::as_array)
                .ok_or(InvalidQuestion("answer must be an array of choice indices"))?;
            let mut seen = Vec::with_capacity(indices.len());
            for index in indices {
                let index = index
                    .as_i64()
                    .ok_or(InvalidQuestion("answer indices must be integers"))?;
                let index = usize::try_from(index)
                    .ok()
                    .filter(|&index| index < choice_count)
                    .ok_or(InvalidQuestion("answer indices must be valid choice indices"))?;
                if seen.contains(&index) {
                    return Err(InvalidQuestion("answer indices must not repeat"));
                }
                seen.push(index);
            }
            Ok(Answer::Indices(seen))
        }
    }
}

pub fn valid_tags(tags: Option<&Value>) -> Result<Option<Vec<String>>, InvalidQuestion> {
    valid_string_list(tags, "tags must be an array", "tags must all be strings")
}

pub fn valid_links(links: Option<&Value>) -> Result<Option<Vec<String>>, InvalidQuestion> {
    valid_string_list(links, "links must be an array", "links must all be strings")
}

fn valid_string_list(
    value: Option<&Value>,
    not_an_array: &'static str,
    not_all_strings: &'static str,
) -> Result<Option<Vec<String>>, InvalidQuestion> {
    let Some(value) = value else {
        return Ok(None);
    };
    let items = value.as_array().ok_or(InvalidQuestion(not_an_array))?;
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let item = item.as_str().ok_or(InvalidQuestion(not_all_strings))?;
        out.push(item.to_owned());
    }
    Ok(Some(out))
}

/// Validate an untrusted payload into a normalized question, aborting on the
/// first violated rule.
pub fn validate(raw: &RawQuestion) -> Result<ValidatedQuestion, InvalidQuestion> {
    let kind = valid_type(raw.kind.as_ref())?;
    let prompt = valid_prompt(raw.prompt.as_ref())?;
    let choices = valid_choices(kind, raw.choices.as_ref())?;
    let answer = valid_answer(kind, choices.as_deref(), raw.answer.as_ref())?;
    let tags = valid_tags(raw.tags.as_ref())?;
    let links = valid_links(raw.links.as_ref())?;

    Ok(ValidatedQuestion {
        kind,
        prompt,
        choices,
        answer,
        tags,
        links,
        creator: raw.creator.clone(),
    })
}
