// ABOUTME: Interactive Google Sheets setup: prompts, browser hand-off, flow, and reporting
// ABOUTME: Wires the production collaborators together for the setup binary

pub mod browser;
pub mod collector;
pub mod flow;
pub mod prompt;
pub mod reporter;
pub mod validation;

pub use browser::{BrowserLauncher, SystemBrowser};
pub use collector::{AuthorizationCode, CredentialCollector, Registration};
pub use flow::{GoogleSetupFlow, SetupState};
pub use prompt::{FieldKind, InquirePrompter, PromptError, PromptField, PromptValues, Prompter};
pub use reporter::{ConsoleReporter, GuideStep, OutcomeReporter};
pub use validation::{FieldRule, ValidationError};

use tally_auth::GoogleOAuthProvider;
use tally_storage::ConfigStore;
use tracing::info;

use crate::config::Config;
use crate::error::{SetupError, SetupResult};

/// Run the Google setup flow against the terminal, the system browser, and Google
pub async fn run_google_setup() -> SetupResult<()> {
    let reporter = ConsoleReporter;

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            let err = SetupError::Configuration(e.to_string());
            reporter.report_failure(&err);
            return Err(err);
        }
    };

    let provider = match GoogleOAuthProvider::new(config.google.clone(), config.http_timeout) {
        Ok(provider) => provider,
        Err(e) => {
            let err = SetupError::from(e);
            reporter.report_failure(&err);
            return Err(err);
        }
    };

    info!("Using config file {}", config.config_file.display());
    let store = ConfigStore::new(config.config_file);

    let prompter = InquirePrompter;
    let browser = SystemBrowser;
    let flow = GoogleSetupFlow::new(&store, &prompter, &provider, &browser, &reporter);

    let result = flow.run().await;
    result.map(|_| ())
}
