//! Scaffold configuration and the interactive question model
//!
//! Questions are answered through the [`PromptDriver`] capability trait, so
//! the interactive cliclack front end (see the `tui` module) and scripted
//! test drivers share the same collection logic.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{ToolError, ToolResult};

/// A single configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Text(String),
    Bool(bool),
}

impl ConfigValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(value) => Some(*value),
            ConfigValue::Text(_) => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Text(value) => write!(f, "{}", value),
            ConfigValue::Bool(value) => write!(f, "{}", value),
        }
    }
}

/// Parameter map consumed by the template renderer.
///
/// Built once per invocation by the configuration collector (or from CLI
/// flags) and treated as read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldConfig {
    values: BTreeMap<String, ConfigValue>,
}

impl ScaffoldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: ConfigValue) {
        self.values.insert(name.into(), value);
    }

    pub fn set_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.set(name, ConfigValue::Text(value.into()));
    }

    pub fn set_bool(&mut self, name: impl Into<String>, value: bool) {
        self.set(name, ConfigValue::Bool(value));
    }

    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.values.get(name)
    }

    /// Fold another configuration into this one; `other` wins on key clashes.
    pub fn merge(&mut self, other: ScaffoldConfig) {
        self.values.extend(other.values);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One enumerated answer for a select question.
#[derive(Debug, Clone)]
pub struct Choice {
    /// Value recorded in the configuration when this choice is picked
    pub value: ConfigValue,
    /// Label shown to the operator
    pub label: String,
    /// Secondary hint line (may be empty)
    pub hint: String,
}

impl Choice {
    pub fn new(value: ConfigValue, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
            hint: String::new(),
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }
}

/// Kinds of question the collector understands.
///
/// Single-select is currently the only kind; answers are constrained to the
/// enumerated choices by construction.
#[derive(Debug, Clone)]
pub enum QuestionKind {
    Select { choices: Vec<Choice> },
}

#[derive(Debug, Clone)]
pub struct Question {
    /// Machine name; becomes the configuration key
    pub name: String,
    /// Human-readable prompt
    pub prompt: String,
    pub kind: QuestionKind,
}

impl Question {
    pub fn select(
        name: impl Into<String>,
        prompt: impl Into<String>,
        choices: Vec<Choice>,
    ) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            kind: QuestionKind::Select { choices },
        }
    }

    /// A boolean feature flag phrased as a Yes/No select.
    pub fn yes_no(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self::select(
            name,
            prompt,
            vec![
                Choice::new(ConfigValue::Bool(true), "Yes"),
                Choice::new(ConfigValue::Bool(false), "No"),
            ],
        )
    }

    pub fn choices(&self) -> &[Choice] {
        let QuestionKind::Select { choices } = &self.kind;
        choices
    }
}

/// Capability interface for answering questions.
///
/// Implementations present a single-select question and return the index of
/// the chosen choice. Cancellation surfaces as [`ToolError::PromptAborted`].
pub trait PromptDriver {
    fn select(&mut self, question: &Question) -> ToolResult<usize>;
}

/// Ask every question in order and accumulate the answers.
///
/// Aborting any question discards the partial configuration; callers never
/// see a half-collected config.
pub fn collect(
    driver: &mut dyn PromptDriver,
    questions: &[Question],
) -> ToolResult<ScaffoldConfig> {
    let mut config = ScaffoldConfig::new();

    for question in questions {
        let choices = question.choices();
        let index = driver.select(question)?;
        // An answer outside the closed choice list cannot be recorded
        let choice = choices.get(index).ok_or(ToolError::PromptAborted)?;
        config.set(question.name.clone(), choice.value.clone());
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Non-interactive driver fed with pre-recorded answers.
    struct ScriptedDriver {
        answers: Vec<usize>,
        next: usize,
    }

    impl ScriptedDriver {
        fn new(answers: Vec<usize>) -> Self {
            Self { answers, next: 0 }
        }
    }

    impl PromptDriver for ScriptedDriver {
        fn select(&mut self, _question: &Question) -> ToolResult<usize> {
            let answer = self
                .answers
                .get(self.next)
                .copied()
                .ok_or(ToolError::PromptAborted)?;
            self.next += 1;
            Ok(answer)
        }
    }

    fn rock_version_question() -> Question {
        Question::select(
            "RockVersion",
            "Which Rock version do you target?",
            vec![
                Choice::new(ConfigValue::Text("1.16.2".into()), "1.16.2"),
                Choice::new(ConfigValue::Text("1.16.0".into()), "1.16.0"),
            ],
        )
    }

    #[test]
    fn test_collect_records_one_answer_per_question() {
        let questions = vec![
            rock_version_question(),
            Question::yes_no("RestApiSupport", "Include REST API support?"),
        ];
        let mut driver = ScriptedDriver::new(vec![1, 0]);

        let config = collect(&mut driver, &questions).unwrap();

        assert_eq!(
            config.get("RockVersion"),
            Some(&ConfigValue::Text("1.16.0".into()))
        );
        assert_eq!(
            config.get("RestApiSupport"),
            Some(&ConfigValue::Bool(true))
        );
    }

    #[test]
    fn test_aborted_prompt_discards_partial_config() {
        let questions = vec![
            rock_version_question(),
            Question::yes_no("RestApiSupport", "Include REST API support?"),
        ];
        // Only the first question is answered before the operator bails
        let mut driver = ScriptedDriver::new(vec![0]);

        let result = collect(&mut driver, &questions);
        assert!(matches!(result, Err(ToolError::PromptAborted)));
    }

    #[test]
    fn test_out_of_range_answer_is_an_abort_not_a_panic() {
        let questions = vec![rock_version_question()];
        // Two choices exist; the driver answers with index 5
        let mut driver = ScriptedDriver::new(vec![5]);

        let result = collect(&mut driver, &questions);
        assert!(matches!(result, Err(ToolError::PromptAborted)));
    }

    #[test]
    fn test_yes_no_maps_to_bool_values() {
        let question = Question::yes_no("Copy", "Copy output to RockWeb?");
        assert_eq!(question.choices()[0].value, ConfigValue::Bool(true));
        assert_eq!(question.choices()[1].value, ConfigValue::Bool(false));
    }

    #[test]
    fn test_merge_prefers_incoming_values() {
        let mut base = ScaffoldConfig::new();
        base.set_text("RockVersion", "1.15.0");
        base.set_bool("Copy", false);

        let mut incoming = ScaffoldConfig::new();
        incoming.set_text("RockVersion", "1.16.2");

        base.merge(incoming);

        assert_eq!(
            base.get("RockVersion"),
            Some(&ConfigValue::Text("1.16.2".into()))
        );
        assert_eq!(base.get("Copy"), Some(&ConfigValue::Bool(false)));
    }
}
