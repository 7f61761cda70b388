// ABOUTME: Prompt specifications and the interactive input seam used by setup
// ABOUTME: Production prompts run through inquire with masked secrets and inline validation

use inquire::{
    validator::{ErrorMessage, Validation},
    CustomUserError, InquireError, Password, PasswordDisplayMode, Text,
};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

use crate::setup::validation::FieldRule;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Input cancelled by operator")]
    Aborted,

    #[error("Interactive input unavailable: {0}")]
    Unavailable(String),

    #[error("No value collected for '{0}'")]
    MissingField(&'static str),
}

impl From<InquireError> for PromptError {
    fn from(err: InquireError) -> Self {
        match err {
            InquireError::OperationCanceled | InquireError::OperationInterrupted => {
                PromptError::Aborted
            }
            other => PromptError::Unavailable(other.to_string()),
        }
    }
}

/// How a field's input is echoed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Secret,
}

/// One question in a prompt batch
#[derive(Debug, Clone)]
pub struct PromptField {
    pub name: &'static str,
    pub kind: FieldKind,
    pub message: String,
    pub initial: Option<String>,
    pub rule: FieldRule,
}

impl PromptField {
    pub fn text(name: &'static str, message: impl Into<String>, rule: FieldRule) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
            message: message.into(),
            initial: None,
            rule,
        }
    }

    pub fn secret(name: &'static str, message: impl Into<String>, rule: FieldRule) -> Self {
        Self {
            name,
            kind: FieldKind::Secret,
            message: message.into(),
            initial: None,
            rule,
        }
    }

    pub fn with_initial(mut self, initial: impl Into<String>) -> Self {
        self.initial = Some(initial.into());
        self
    }
}

/// Values collected for one batch, keyed by field name
#[derive(Default)]
pub struct PromptValues(HashMap<&'static str, String>);

impl PromptValues {
    pub fn insert(&mut self, name: &'static str, value: String) {
        self.0.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Remove a value, failing if the prompter never supplied it
    pub fn take(&mut self, name: &'static str) -> Result<String, PromptError> {
        self.0.remove(name).ok_or(PromptError::MissingField(name))
    }
}

impl FromIterator<(&'static str, String)> for PromptValues {
    fn from_iter<I: IntoIterator<Item = (&'static str, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Asks the operator every field of a batch, in order
pub trait Prompter {
    fn prompt_fields(&self, fields: &[PromptField]) -> Result<PromptValues, PromptError>;
}

/// Terminal prompts. Re-asks a field in place until its rule passes.
#[derive(Debug, Default, Clone, Copy)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn prompt_fields(&self, fields: &[PromptField]) -> Result<PromptValues, PromptError> {
        let mut values = PromptValues::default();

        for field in fields {
            let value = match field.kind {
                FieldKind::Text => {
                    let mut prompt =
                        Text::new(&field.message).with_validator(rule_validator(field.rule));
                    if let Some(initial) = field.initial.as_deref() {
                        prompt = prompt.with_initial_value(initial);
                    }
                    prompt.prompt()?
                }
                FieldKind::Secret => Password::new(&field.message)
                    .without_confirmation()
                    .with_display_mode(PasswordDisplayMode::Masked)
                    .with_validator(rule_validator(field.rule))
                    .prompt()?,
            };

            debug!("Collected value for '{}'", field.name);
            values.insert(field.name, value);
        }

        Ok(values)
    }
}

fn rule_validator(
    rule: FieldRule,
) -> impl Fn(&str) -> Result<Validation, CustomUserError> + Clone {
    move |input: &str| {
        Ok(match rule.validate(input) {
            Ok(()) => Validation::Valid,
            Err(e) => Validation::Invalid(ErrorMessage::Custom(e.to_string())),
        })
    }
}
