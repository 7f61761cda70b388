// ABOUTME: Collects Google registration secrets and the authorization code from the operator
// ABOUTME: Builds each prompt batch and re-asks until every value passes its rule

use std::fmt;
use tracing::{debug, warn};

use crate::setup::{
    prompt::{PromptError, PromptField, PromptValues, Prompter},
    validation::FieldRule,
};

pub const DEFAULT_INTEGRATION_NAME: &str = "Google Sheets";

/// Registration fields entered by the operator
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub client_id: String,
    pub client_secret: String,
    pub document_id: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("client_id", &"<redacted>")
            .field("client_secret", &"<redacted>")
            .field("document_id", &self.document_id)
            .finish()
    }
}

/// Single-use code copied from the consent page
#[derive(Clone, PartialEq, Eq)]
pub struct AuthorizationCode {
    pub code: String,
}

impl AuthorizationCode {
    pub fn as_str(&self) -> &str {
        &self.code
    }
}

impl fmt::Debug for AuthorizationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthorizationCode(<redacted>)")
    }
}

/// Supplies prompt batches to a [`Prompter`] and checks what comes back
pub struct CredentialCollector<'a> {
    prompter: &'a dyn Prompter,
}

impl<'a> CredentialCollector<'a> {
    pub fn new(prompter: &'a dyn Prompter) -> Self {
        Self { prompter }
    }

    /// Name, Client ID, Client Secret, Document ID
    pub fn registration_fields() -> Vec<PromptField> {
        vec![
            PromptField::text(
                "name",
                "What would you like to call this integration?",
                FieldRule::display_name(),
            )
            .with_initial(DEFAULT_INTEGRATION_NAME),
            PromptField::secret("clientId", "Client ID", FieldRule::credential()),
            PromptField::secret("clientSecret", "Client Secret", FieldRule::credential()),
            PromptField::text(
                "documentId",
                "Document ID (from the sheet you just created: https://docs.google.com/spreadsheets/d/DOCUMENT_ID/edit)",
                FieldRule::credential(),
            ),
        ]
    }

    pub fn authorization_fields() -> Vec<PromptField> {
        vec![PromptField::secret(
            "code",
            "Enter the code from your browser here",
            FieldRule::credential(),
        )]
    }

    pub fn collect_registration(&self) -> Result<Registration, PromptError> {
        let mut values = self.collect(&Self::registration_fields())?;

        Ok(Registration {
            name: values.take("name")?,
            client_id: values.take("clientId")?,
            client_secret: values.take("clientSecret")?,
            document_id: values.take("documentId")?,
        })
    }

    pub fn collect_authorization_code(&self) -> Result<AuthorizationCode, PromptError> {
        let mut values = self.collect(&Self::authorization_fields())?;

        Ok(AuthorizationCode {
            code: values.take("code")?,
        })
    }

    /// Prompt until the whole batch validates. Only abort or a missing
    /// terminal ends the loop early.
    fn collect(&self, fields: &[PromptField]) -> Result<PromptValues, PromptError> {
        loop {
            let values = self.prompter.prompt_fields(fields)?;

            match first_invalid(fields, &values) {
                None => {
                    debug!("Collected {} field(s)", fields.len());
                    return Ok(values);
                }
                Some((name, message)) => {
                    warn!("Value for '{}' rejected: {}", name, message);
                }
            }
        }
    }
}

fn first_invalid(fields: &[PromptField], values: &PromptValues) -> Option<(&'static str, String)> {
    fields.iter().find_map(|field| {
        let value = values.get(field.name).unwrap_or_default();
        field
            .rule
            .validate(value)
            .err()
            .map(|e| (field.name, e.to_string()))
    })
}
