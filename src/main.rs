use blanks::adapters::{self, render, render_json, render_text};
use blanks::cli::{Cli, Command, HELP};
use blanks::config::Settings;
use blanks::domain::FormError;
use blanks::engine::FormSession;
use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing::{debug, info, warn};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::new_with_cli(&cli)?;

    // Initialize tracing; stdout is reserved for the form itself
    tracing_subscriber::fmt()
        .with_max_level(settings.logging.max_level()?)
        .with_ansi(settings.logging.ansi)
        .with_writer(io::stderr)
        .init();

    let form = settings.load_form()?;
    let mut session = FormSession::new(&form)?;
    session.subscribe(|change| {
        debug!(added = ?change.added, removed = ?change.removed, "Control tree changed");
    });

    for assignment in &cli.set {
        adapters::edit_field(&mut session, &assignment.key, &assignment.value)?;
    }

    if cli.interactive {
        run_interactive(&mut session)?;
    } else if cli.json {
        println!("{}", serde_json::to_string_pretty(&render_json(&session))?);
    } else {
        println!("{}", render_text(&render(&session)));
    }

    Ok(())
}

fn run_interactive(session: &mut FormSession<'_>) -> anyhow::Result<()> {
    info!("Interactive session started, type 'help' for commands");
    println!("{}", render_text(&render(session)));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                warn!("{}", e);
                continue;
            }
        };

        let result = match command {
            Command::Set { key, value } => fill(session, &key, &value),
            Command::Clear(key) => session.reset_value(&key).map(|_| ()),
            Command::Touch(key) => adapters::leave_field(session, &key),
            Command::Disable(key) => session.set_disabled(&key, true),
            Command::Enable(key) => session.set_disabled(&key, false),
            Command::Show => Ok(()),
            Command::Values => {
                println!("{}", serde_json::to_string_pretty(&session.value())?);
                continue;
            }
            Command::Submit => {
                match session.submit() {
                    Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
                    Err(invalid) => println!("Invalid: {}", invalid.join(", ")),
                }
                continue;
            }
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::Quit => break,
        };

        match result {
            Ok(()) => println!("{}", render_text(&render(session))),
            Err(e) => warn!("{}", e),
        }
        stdout.flush()?;
    }

    Ok(())
}

/// Edit a blank and leave it, as a user typing and moving on would
fn fill(session: &mut FormSession<'_>, key: &str, value: &str) -> Result<(), FormError> {
    adapters::edit_field(session, key, value)?;
    adapters::leave_field(session, key)
}
