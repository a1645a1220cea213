//! Console Form
//! The interactive surface: eight labeled fields, one trigger action
//!
//! Every edit goes through the session reducer, so a displayed result is
//! cleared the moment any field changes. Scoring results arrive on the
//! session channel and are rendered only if still current.

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::warn;

use crate::core::session::{ScreenerSession, SessionEvent, SessionState};
use crate::models::config::{ScreenerConfig, FIELD_SPECS};
use crate::models::errors::AppResult;
use crate::models::types::{Assessment, FormField, Prediction};
use crate::utils::constants::DISCLAIMER;
use crate::utils::telemetry::TelemetryCollector;

/// One parsed line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store a raw value for one field
    Set { field: FormField, value: String },
    /// Render the current form
    Show,
    /// Run the input gate and schedule a scoring pass
    Assess,
    /// Clear all fields and the prediction
    Reset,
    Help,
    Quit,
    /// Blank line
    Nothing,
    /// Anything else, with a notice to display
    Unknown(String),
}

/// Parse one line typed at the prompt.
/// Accepts both `set glucose 148` and the shorthand `glucose 148`.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Nothing;
    }

    let mut parts = line.splitn(2, char::is_whitespace);
    let head = parts.next().unwrap_or_default();
    let rest = parts.next().unwrap_or("").trim();

    match head.to_lowercase().as_str() {
        "show" | "form" => Command::Show,
        "assess" | "submit" => Command::Assess,
        "reset" | "clear" => Command::Reset,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "set" => {
            let mut kv = rest.splitn(2, char::is_whitespace);
            let name = kv.next().unwrap_or_default();
            let value = kv.next().unwrap_or("").trim();
            match FormField::parse(name) {
                Some(field) if !value.is_empty() => Command::Set {
                    field,
                    value: value.to_string(),
                },
                Some(_) => Command::Unknown("Usage: set <field> <value>".to_string()),
                None => Command::Unknown(format!(
                    "Unknown field: '{}'. Type 'help' to list fields.",
                    name
                )),
            }
        }
        _ => match FormField::parse(head) {
            Some(field) if !rest.is_empty() => Command::Set {
                field,
                value: rest.to_string(),
            },
            Some(field) => Command::Unknown(format!("Usage: {} <value>", field.as_str())),
            None => Command::Unknown(format!(
                "Unknown command: '{}'. Type 'help' for usage.",
                head
            )),
        },
    }
}

/// Interactive console driver
pub struct Console {
    session: ScreenerSession,
    events: UnboundedReceiver<SessionEvent>,
}

impl Console {
    pub fn new(config: &ScreenerConfig, telemetry: Arc<TelemetryCollector>) -> Self {
        let (session, events) = ScreenerSession::new(config, telemetry);
        Self { session, events }
    }

    /// Run the form loop until quit or EOF
    pub async fn run(mut self) -> AppResult<()> {
        print_help();
        render_form(self.session.state());

        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    match line? {
                        Some(line) => {
                            if !self.handle(&line) {
                                break;
                            }
                        }
                        None => break, // EOF
                    }
                }
                Some(event) = self.events.recv() => self.on_event(event),
            }
        }

        self.session.shutdown();
        Ok(())
    }

    /// Dispatch one parsed command. Returns false on quit.
    fn handle(&mut self, line: &str) -> bool {
        match parse_command(line) {
            Command::Set { field, value } => {
                self.session.edit(field, &value);
                println!("✏️  {} = {}", field.as_str(), value.trim());
            }
            Command::Show => render_form(self.session.state()),
            Command::Assess => match self.session.submit() {
                Ok(()) => println!("⏳ Assessing risk profile..."),
                Err(e) if e.code.is_user_input() => notice(&e.message),
                Err(e) => {
                    warn!(code = e.code_str(), "Submission failed: {}", e);
                    notice(&e.message);
                }
            },
            Command::Reset => {
                self.session.reset();
                println!("🧹 Form cleared");
            }
            Command::Help => print_help(),
            Command::Quit => return false,
            Command::Nothing => {}
            Command::Unknown(msg) => notice(&msg),
        }
        true
    }

    /// A scoring pass came back; render it only if it installed
    fn on_event(&mut self, event: SessionEvent) {
        if let Some(assessment) = self.session.deliver(event).cloned() {
            render_result(&assessment);
        }
    }
}

/// Transient, non-fatal notice. The form stays editable.
fn notice(msg: &str) {
    println!("⚠️  {}", msg);
}

fn print_help() {
    println!("\nCommands:");
    println!("  set <field> <value>   enter a measurement (or just: <field> <value>)");
    println!("  show                  display the form");
    println!("  assess                run the risk assessment");
    println!("  reset                 clear all fields");
    println!("  quit                  exit\n");
}

/// Render the form: labels, units, declared ranges and current values
fn render_form(state: &SessionState) {
    println!("\n┌─────────────────────────────────────────────────────┐");
    for spec in &FIELD_SPECS {
        let value = state.draft.get(spec.field);
        let value = if value.is_empty() { "—" } else { value };
        println!(
            "│ {:<18} {:>10}   ({}, step {})",
            spec.label,
            value,
            spec.range_hint(),
            spec.step,
        );
    }
    println!("└─────────────────────────────────────────────────────┘");

    match &state.prediction {
        Prediction::Absent => println!("  Prediction: (none)\n"),
        Prediction::Classified(a) => {
            println!("  Prediction: {} {}\n", a.classification.emoji(), a.classification.as_str())
        }
    }
}

/// Render one of the two result states, always with the disclaimer
fn render_result(assessment: &Assessment) {
    println!("{}", assessment.summary());
    println!("{}\n", DISCLAIMER);
}
