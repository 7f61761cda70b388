// ABOUTME: Google Sheets setup flow from registration prompts to persisted tokens
// ABOUTME: Linear state machine; each completed merge stays on disk if a later step fails

use std::fmt;
use tracing::{debug, info, warn};

use tally_auth::AuthorizationProvider;
use tally_storage::{ConfigStore, GoogleConfig, StorageError, StorageResult, TokenSet};

use crate::{
    error::{SetupError, SetupResult},
    setup::{
        browser::BrowserLauncher,
        collector::{AuthorizationCode, CredentialCollector, Registration},
        prompt::Prompter,
        reporter::{GuideStep, OutcomeReporter},
    },
};

/// Stages of the flow, in order. `Failed` can follow any stage before `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupState {
    CollectingRegistration,
    PersistingRegistration,
    AwaitingAuthorization,
    ExchangingCode,
    PersistingTokens,
    Done,
    Failed,
}

impl fmt::Display for SetupState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CollectingRegistration => "collecting registration",
            Self::PersistingRegistration => "persisting registration",
            Self::AwaitingAuthorization => "awaiting authorization",
            Self::ExchangingCode => "exchanging code",
            Self::PersistingTokens => "persisting tokens",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Failure tagged with the stage it happened in
type StepFailure = (SetupState, SetupError);

/// Drives one run of the Google setup flow
pub struct GoogleSetupFlow<'a> {
    store: &'a ConfigStore,
    collector: CredentialCollector<'a>,
    provider: &'a dyn AuthorizationProvider,
    browser: &'a dyn BrowserLauncher,
    reporter: &'a dyn OutcomeReporter,
}

impl<'a> GoogleSetupFlow<'a> {
    pub fn new(
        store: &'a ConfigStore,
        prompter: &'a dyn Prompter,
        provider: &'a dyn AuthorizationProvider,
        browser: &'a dyn BrowserLauncher,
        reporter: &'a dyn OutcomeReporter,
    ) -> Self {
        Self {
            store,
            collector: CredentialCollector::new(prompter),
            provider,
            browser,
            reporter,
        }
    }

    /// Run every stage and report the outcome. Returns the stored tokens.
    pub async fn run(&self) -> SetupResult<TokenSet> {
        match self.execute().await {
            Ok((name, tokens)) => {
                enter(SetupState::Done);
                self.reporter.report_success(&name);
                Ok(tokens)
            }
            Err((state, err)) => {
                debug!("Google setup failed while {}: {}", state, err);
                enter(SetupState::Failed);
                self.reporter.report_failure(&err);
                Err(err)
            }
        }
    }

    async fn execute(&self) -> Result<(String, TokenSet), StepFailure> {
        enter(SetupState::CollectingRegistration);
        self.reporter.show_guide(&GuideStep::Registration);
        let registration = self
            .collector
            .collect_registration()
            .map_err(at(SetupState::CollectingRegistration))?;

        enter(SetupState::PersistingRegistration);
        let google = self
            .persist_registration(&registration)
            .map_err(at(SetupState::PersistingRegistration))?;

        enter(SetupState::AwaitingAuthorization);
        let code = self
            .await_authorization(&google)
            .map_err(at(SetupState::AwaitingAuthorization))?;

        enter(SetupState::ExchangingCode);
        let tokens = self
            .provider
            .exchange_code(&google.credentials, code.as_str())
            .await
            .map_err(at(SetupState::ExchangingCode))?;

        enter(SetupState::PersistingTokens);
        self.persist_tokens(&tokens)
            .map_err(at(SetupState::PersistingTokens))?;

        Ok((google.name, tokens))
    }

    /// Merge the registration fields and return the entry as written
    fn persist_registration(&self, registration: &Registration) -> StorageResult<GoogleConfig> {
        let document = self.store.merge::<GoogleConfig, _>(self.store.load()?, |google| {
            google.name = registration.name.clone();
            google.document_id = registration.document_id.clone();
            google.credentials.client_id = registration.client_id.clone();
            google.credentials.client_secret = registration.client_secret.clone();
        })?;
        self.store.persist(&document)?;

        let google = document
            .typed::<GoogleConfig>()?
            .filter(GoogleConfig::is_registered)
            .ok_or_else(|| {
                StorageError::InvalidDocument("google entry incomplete after merge".to_string())
            })?;

        if google.is_authorized() {
            info!("Existing Google tokens will be replaced once the new code is exchanged");
        }

        Ok(google)
    }

    fn await_authorization(&self, google: &GoogleConfig) -> SetupResult<AuthorizationCode> {
        let url = self.provider.authorization_url(&google.credentials)?;

        // Best-effort: the operator can still open the URL by hand
        if let Err(e) = self.browser.open(url.as_str()) {
            warn!("Could not open browser, continuing: {}", e);
        }

        self.reporter.show_guide(&GuideStep::Authorization {
            url: url.to_string(),
        });

        Ok(self.collector.collect_authorization_code()?)
    }

    /// Re-read the document so the token merge builds on the registration merge
    fn persist_tokens(&self, tokens: &TokenSet) -> StorageResult<()> {
        let document = self.store.merge::<GoogleConfig, _>(self.store.load()?, |google| {
            google.credentials.tokens = Some(tokens.clone());
        })?;
        self.store.persist(&document)?;
        Ok(())
    }
}

fn enter(state: SetupState) {
    info!("Google setup: {}", state);
}

fn at<E: Into<SetupError>>(state: SetupState) -> impl FnOnce(E) -> StepFailure {
    move |err| (state, err.into())
}
