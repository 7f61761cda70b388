// ABOUTME: Integration tests for the Google setup flow
// ABOUTME: Drives the flow with scripted prompts, a fake provider, and a temp config file

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::sync::Mutex;
use tempfile::TempDir;

use tally_auth::{AuthError, AuthResult, AuthorizationProvider};
use tally_cli::setup::{
    BrowserLauncher, GoogleSetupFlow, GuideStep, OutcomeReporter, PromptError, PromptField,
    PromptValues, Prompter,
};
use tally_cli::SetupError;
use tally_storage::{ConfigStore, GoogleCredentials, TokenSet};
use url::Url;

type Batch = Result<Vec<(&'static str, &'static str)>, PromptError>;

/// Replays one scripted batch per prompt call
struct ScriptedPrompter {
    batches: RefCell<VecDeque<Batch>>,
}

impl ScriptedPrompter {
    fn new(batches: Vec<Batch>) -> Self {
        Self {
            batches: RefCell::new(batches.into()),
        }
    }

    fn remaining(&self) -> usize {
        self.batches.borrow().len()
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt_fields(&self, _fields: &[PromptField]) -> Result<PromptValues, PromptError> {
        let batch = self
            .batches
            .borrow_mut()
            .pop_front()
            .expect("prompted more times than scripted")?;
        Ok(batch
            .into_iter()
            .map(|(name, value)| (name, value.to_string()))
            .collect())
    }
}

enum ExchangeOutcome {
    Tokens(Value),
    Rejected,
    Timeout,
}

/// Provider double that records every exchange attempt
struct FakeProvider {
    outcome: ExchangeOutcome,
    exchanges: Mutex<Vec<(String, String)>>,
}

impl FakeProvider {
    fn new(outcome: ExchangeOutcome) -> Self {
        Self {
            outcome,
            exchanges: Mutex::new(Vec::new()),
        }
    }

    fn exchanges(&self) -> Vec<(String, String)> {
        self.exchanges.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthorizationProvider for FakeProvider {
    fn authorization_url(&self, credentials: &GoogleCredentials) -> AuthResult<Url> {
        let mut url = Url::parse("https://auth.example.test/consent").unwrap();
        url.query_pairs_mut()
            .append_pair("client_id", &credentials.client_id);
        Ok(url)
    }

    async fn exchange_code(
        &self,
        credentials: &GoogleCredentials,
        code: &str,
    ) -> AuthResult<TokenSet> {
        self.exchanges
            .lock()
            .unwrap()
            .push((credentials.client_id.clone(), code.to_string()));

        match &self.outcome {
            ExchangeOutcome::Tokens(value) => {
                Ok(serde_json::from_value(value.clone()).unwrap())
            }
            ExchangeOutcome::Rejected => Err(AuthError::ExchangeRejected(
                "provider returned 400 Bad Request (invalid_grant)".to_string(),
            )),
            ExchangeOutcome::Timeout => Err(AuthError::Timeout),
        }
    }
}

#[derive(Default)]
struct FakeBrowser {
    fail: bool,
    opened: RefCell<Vec<String>>,
}

impl BrowserLauncher for FakeBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        self.opened.borrow_mut().push(url.to_string());
        if self.fail {
            Err(io::Error::new(io::ErrorKind::NotFound, "no browser"))
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, PartialEq)]
enum Reported {
    Guide(GuideStep),
    Success(String),
    Failure(String),
}

#[derive(Default)]
struct RecordingReporter {
    events: RefCell<Vec<Reported>>,
}

impl RecordingReporter {
    fn failures(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, Reported::Failure(_)))
            .count()
    }
}

impl OutcomeReporter for RecordingReporter {
    fn show_guide(&self, step: &GuideStep) {
        self.events.borrow_mut().push(Reported::Guide(step.clone()));
    }

    fn report_success(&self, integration_name: &str) {
        self.events
            .borrow_mut()
            .push(Reported::Success(integration_name.to_string()));
    }

    fn report_failure(&self, cause: &SetupError) {
        self.events
            .borrow_mut()
            .push(Reported::Failure(cause.to_string()));
    }
}

fn registration() -> Batch {
    Ok(vec![
        ("name", "Google Sheets"),
        ("clientId", "abcd1234"),
        ("clientSecret", "efgh5678"),
        ("documentId", "doc1234567"),
    ])
}

fn code() -> Batch {
    Ok(vec![("code", "code12345")])
}

/// Helper to create a store inside a fresh temp dir
fn setup_store() -> (ConfigStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = ConfigStore::new(temp_dir.path().join("config.json"));
    (store, temp_dir)
}

fn read_raw(store: &ConfigStore) -> Value {
    serde_json::from_slice(&fs::read(store.path()).unwrap()).unwrap()
}

fn assert_registration_only(store: &ConfigStore) {
    let on_disk = read_raw(store);
    let entries = on_disk["integrations"].as_object().unwrap();
    assert_eq!(entries.len(), 1);

    let google = &entries["google"];
    assert_eq!(google["name"], json!("Google Sheets"));
    assert_eq!(google["documentId"], json!("doc1234567"));
    assert_eq!(google["credentials"]["clientId"], json!("abcd1234"));
    assert_eq!(google["credentials"]["clientSecret"], json!("efgh5678"));
    assert!(google["credentials"].get("tokens").is_none());
}

#[tokio::test]
async fn test_full_flow_persists_registration_and_tokens() {
    let (store, _temp_dir) = setup_store();
    let prompter = ScriptedPrompter::new(vec![registration(), code()]);
    let provider = FakeProvider::new(ExchangeOutcome::Tokens(json!({ "accessToken": "tok_abc" })));
    let browser = FakeBrowser::default();
    let reporter = RecordingReporter::default();

    let flow = GoogleSetupFlow::new(&store, &prompter, &provider, &browser, &reporter);
    let tokens = flow.run().await.unwrap();

    assert_eq!(tokens.get("accessToken"), Some(&json!("tok_abc")));

    let google = &read_raw(&store)["integrations"]["google"];
    assert_eq!(google["credentials"]["tokens"]["accessToken"], json!("tok_abc"));
    assert_eq!(google["name"], json!("Google Sheets"));
    assert_eq!(google["documentId"], json!("doc1234567"));
    assert_eq!(google["credentials"]["clientId"], json!("abcd1234"));
    assert_eq!(google["credentials"]["clientSecret"], json!("efgh5678"));

    assert_eq!(
        provider.exchanges(),
        vec![("abcd1234".to_string(), "code12345".to_string())]
    );
    assert_eq!(prompter.remaining(), 0);
}

#[tokio::test]
async fn test_authorization_url_reflects_entered_client_id() {
    let (store, _temp_dir) = setup_store();
    let prompter = ScriptedPrompter::new(vec![registration(), code()]);
    let provider = FakeProvider::new(ExchangeOutcome::Tokens(json!({ "accessToken": "tok_abc" })));
    let browser = FakeBrowser::default();
    let reporter = RecordingReporter::default();

    GoogleSetupFlow::new(&store, &prompter, &provider, &browser, &reporter)
        .run()
        .await
        .unwrap();

    let expected_url = "https://auth.example.test/consent?client_id=abcd1234";
    assert_eq!(*browser.opened.borrow(), vec![expected_url.to_string()]);
    assert_eq!(
        *reporter.events.borrow(),
        vec![
            Reported::Guide(GuideStep::Registration),
            Reported::Guide(GuideStep::Authorization {
                url: expected_url.to_string()
            }),
            Reported::Success("Google Sheets".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_rejected_code_keeps_registration() {
    let (store, _temp_dir) = setup_store();
    let prompter = ScriptedPrompter::new(vec![registration(), code()]);
    let provider = FakeProvider::new(ExchangeOutcome::Rejected);
    let browser = FakeBrowser::default();
    let reporter = RecordingReporter::default();

    let result = GoogleSetupFlow::new(&store, &prompter, &provider, &browser, &reporter)
        .run()
        .await;

    assert!(matches!(result, Err(SetupError::ExchangeRejected(_))));
    assert_registration_only(&store);
    assert_eq!(reporter.failures(), 1);
    assert!(matches!(
        reporter.events.borrow().last(),
        Some(Reported::Failure(message)) if message.contains("invalid_grant")
    ));
}

#[tokio::test]
async fn test_abort_at_code_prompt_skips_exchange() {
    let (store, _temp_dir) = setup_store();
    let prompter = ScriptedPrompter::new(vec![registration(), Err(PromptError::Aborted)]);
    let provider = FakeProvider::new(ExchangeOutcome::Tokens(json!({ "accessToken": "tok_abc" })));
    let browser = FakeBrowser::default();
    let reporter = RecordingReporter::default();

    let result = GoogleSetupFlow::new(&store, &prompter, &provider, &browser, &reporter)
        .run()
        .await;

    assert!(matches!(result, Err(SetupError::InputAborted(_))));
    assert_registration_only(&store);
    assert!(provider.exchanges().is_empty());
    assert_eq!(reporter.failures(), 1);
}

#[tokio::test]
async fn test_abort_at_registration_writes_nothing() {
    let (store, _temp_dir) = setup_store();
    let prompter = ScriptedPrompter::new(vec![Err(PromptError::Unavailable(
        "not a terminal".to_string(),
    ))]);
    let provider = FakeProvider::new(ExchangeOutcome::Rejected);
    let browser = FakeBrowser::default();
    let reporter = RecordingReporter::default();

    let result = GoogleSetupFlow::new(&store, &prompter, &provider, &browser, &reporter)
        .run()
        .await;

    assert!(matches!(result, Err(SetupError::InputAborted(_))));
    assert!(!store.path().exists());
    assert!(browser.opened.borrow().is_empty());
}

#[tokio::test]
async fn test_browser_failure_does_not_stop_flow() {
    let (store, _temp_dir) = setup_store();
    let prompter = ScriptedPrompter::new(vec![registration(), code()]);
    let provider = FakeProvider::new(ExchangeOutcome::Tokens(json!({ "accessToken": "tok_abc" })));
    let browser = FakeBrowser {
        fail: true,
        ..FakeBrowser::default()
    };
    let reporter = RecordingReporter::default();

    let result = GoogleSetupFlow::new(&store, &prompter, &provider, &browser, &reporter)
        .run()
        .await;

    assert!(result.is_ok());
    assert_eq!(browser.opened.borrow().len(), 1);
    assert_eq!(
        read_raw(&store)["integrations"]["google"]["credentials"]["tokens"]["accessToken"],
        json!("tok_abc")
    );
}

#[tokio::test]
async fn test_exchange_timeout_is_reported() {
    let (store, _temp_dir) = setup_store();
    let prompter = ScriptedPrompter::new(vec![registration(), code()]);
    let provider = FakeProvider::new(ExchangeOutcome::Timeout);
    let browser = FakeBrowser::default();
    let reporter = RecordingReporter::default();

    let result = GoogleSetupFlow::new(&store, &prompter, &provider, &browser, &reporter)
        .run()
        .await;

    assert!(matches!(result, Err(SetupError::ExchangeTimeout)));
    assert_registration_only(&store);
}

#[tokio::test]
async fn test_storage_failure_stops_before_authorization() {
    let temp_dir = TempDir::new().unwrap();
    // A directory where the config file should be cannot be read as a document
    let config_path = temp_dir.path().join("config.json");
    fs::create_dir(&config_path).unwrap();
    let store = ConfigStore::new(&config_path);

    let prompter = ScriptedPrompter::new(vec![registration(), code()]);
    let provider = FakeProvider::new(ExchangeOutcome::Tokens(json!({ "accessToken": "tok_abc" })));
    let browser = FakeBrowser::default();
    let reporter = RecordingReporter::default();

    let result = GoogleSetupFlow::new(&store, &prompter, &provider, &browser, &reporter)
        .run()
        .await;

    assert!(matches!(result, Err(SetupError::Storage(_))));
    assert!(browser.opened.borrow().is_empty());
    assert!(provider.exchanges().is_empty());
    assert_eq!(prompter.remaining(), 1);
}

#[tokio::test]
async fn test_flow_preserves_other_integrations() {
    let (store, _temp_dir) = setup_store();
    let original = json!({
        "integrations": {
            "plaid": {
                "id": "plaid",
                "type": "import",
                "credentials": { "clientId": "plaid-id", "secret": "plaid-secret" }
            }
        },
        "accounts": {},
        "transactions": { "startDate": "2020-01-01" }
    });
    fs::write(store.path(), serde_json::to_vec_pretty(&original).unwrap()).unwrap();

    let prompter = ScriptedPrompter::new(vec![registration(), code()]);
    let provider = FakeProvider::new(ExchangeOutcome::Tokens(json!({ "accessToken": "tok_abc" })));
    let browser = FakeBrowser::default();
    let reporter = RecordingReporter::default();

    GoogleSetupFlow::new(&store, &prompter, &provider, &browser, &reporter)
        .run()
        .await
        .unwrap();

    let on_disk = read_raw(&store);
    assert_eq!(on_disk["integrations"]["plaid"], original["integrations"]["plaid"]);
    assert_eq!(on_disk["accounts"], original["accounts"]);
    assert_eq!(on_disk["transactions"], original["transactions"]);
}

#[tokio::test]
async fn test_rerun_after_partial_setup_collects_registration_again() {
    let (store, _temp_dir) = setup_store();

    let first = ScriptedPrompter::new(vec![registration(), Err(PromptError::Aborted)]);
    let provider = FakeProvider::new(ExchangeOutcome::Tokens(json!({ "accessToken": "tok_abc" })));
    let browser = FakeBrowser::default();
    let reporter = RecordingReporter::default();
    let _ = GoogleSetupFlow::new(&store, &first, &provider, &browser, &reporter)
        .run()
        .await;
    assert_registration_only(&store);

    let second = ScriptedPrompter::new(vec![
        Ok(vec![
            ("name", "Budget Sheet"),
            ("clientId", "wxyz9876"),
            ("clientSecret", "secret-two"),
            ("documentId", "doc7654321"),
        ]),
        code(),
    ]);
    GoogleSetupFlow::new(&store, &second, &provider, &browser, &reporter)
        .run()
        .await
        .unwrap();

    let google = &read_raw(&store)["integrations"]["google"];
    assert_eq!(google["name"], json!("Budget Sheet"));
    assert_eq!(google["credentials"]["clientId"], json!("wxyz9876"));
    assert_eq!(google["credentials"]["tokens"]["accessToken"], json!("tok_abc"));
    assert_eq!(second.remaining(), 0);
}
