// ABOUTME: Operator-facing output for the setup flow: instructions and the final outcome
// ABOUTME: Writes to the tracing sink and the terminal; never affects control flow

use colored::*;
use tracing::info;

use crate::error::SetupError;

/// Instruction blocks shown at fixed points of the flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuideStep {
    /// Before the registration questions
    Registration,
    /// After the consent page has been handed to the browser
    Authorization { url: String },
}

pub trait OutcomeReporter {
    /// Print instructions for the next step. Silent unless overridden.
    fn show_guide(&self, _step: &GuideStep) {}

    fn report_success(&self, integration_name: &str);

    fn report_failure(&self, cause: &SetupError);
}

/// Colored terminal output plus tracing events
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl OutcomeReporter for ConsoleReporter {
    fn show_guide(&self, step: &GuideStep) {
        match step {
            GuideStep::Registration => {
                println!();
                println!(
                    "{}",
                    "This will walk you through setting up the Google Sheets integration."
                        .bold()
                        .cyan()
                );
                println!();
                println!(
                    "   1. Visit {}",
                    "https://console.cloud.google.com/apis/library/sheets.googleapis.com".yellow()
                );
                println!("      and enable the Google Sheets API");
                println!("   2. Under APIs & Services > Credentials, create an OAuth client ID (Desktop app)");
                println!("   3. Create a new Google Sheet");
                println!("   4. Answer the following questions:");
                println!();
            }
            GuideStep::Authorization { url } => {
                println!();
                println!("   5. A page will open in your browser asking you to sign in");
                println!("      If it does not, open this link yourself:");
                println!("      {}", url.yellow());
                println!("   6. Sign in with the account you want to use with Tally");
                println!(
                    "   7. If you see {}, click {} and then {}",
                    "'This app isn't verified'".bold(),
                    "'Advanced'".bold(),
                    "'Go to app (unsafe)'".bold()
                );
                println!("   8. Click {} on the next screens", "'Allow'".bold());
                println!("   9. Copy & paste the code from your browser below:");
                println!();
            }
        }
    }

    fn report_success(&self, integration_name: &str) {
        info!("Successfully set up Google integration '{}'", integration_name);
        println!();
        println!(
            "{} Successfully set up {}.",
            "✓".green().bold(),
            integration_name.bold()
        );
    }

    fn report_failure(&self, cause: &SetupError) {
        eprintln!();
        eprintln!("{} {}", "✗".red().bold(), failure_message(cause));
    }
}

/// The one line the operator sees for a failed run
pub fn failure_message(cause: &SetupError) -> String {
    format!("Unable to set up Google integration: {}", cause)
        .replace(['\r', '\n'], " ")
}
