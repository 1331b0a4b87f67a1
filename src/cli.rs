use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

/// Fill-in-the-blanks form runner
#[derive(Parser, Debug, Clone)]
#[command(name = "blanks", version, about, long_about = None)]
pub struct Cli {
    /// Path to the settings file
    #[arg(short, long, env = "BLANKS_CONFIG", default_value = "blanks.toml")]
    pub config: PathBuf,

    /// Form definition file, overriding `form.path`
    #[arg(short, long, env = "BLANKS_FORM")]
    pub form: Option<PathBuf>,

    /// Log level, overriding `logging.level`
    #[arg(long, env = "BLANKS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Fill a blank before rendering (repeatable, applied in order)
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<Assignment>,

    /// Print a JSON report instead of the rendered text
    #[arg(long)]
    pub json: bool,

    /// Read commands from stdin after applying assignments
    #[arg(short, long)]
    pub interactive: bool,
}

/// `key=value` pair from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub key: String,
    pub value: String,
}

impl FromStr for Assignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("missing key in '{}'", s));
        }
        Ok(Self {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

/// A command of the interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Edit a blank through its adapter
    Set { key: String, value: String },
    /// Restore a blank to its default
    Clear(String),
    /// Mark a blank touched
    Touch(String),
    Disable(String),
    Enable(String),
    Show,
    Values,
    Submit,
    Help,
    Quit,
}

pub const HELP: &str = "\
set <key> <value>   fill a blank
clear <key>         restore a blank to its default
touch <key>         mark a blank as visited
disable <key>       disable a blank, keeping its value
enable <key>        re-enable a blank
show                print the form
values              print the form value as JSON
submit              submit the form
help                show this help
quit                leave";

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let key = |verb: &str| -> Result<String, String> {
            if rest.is_empty() {
                Err(format!("usage: {} <key>", verb))
            } else {
                Ok(rest.to_string())
            }
        };

        match verb {
            "set" => {
                let (key, value) = rest
                    .split_once(char::is_whitespace)
                    .map(|(k, v)| (k, v.trim()))
                    .unwrap_or((rest, ""));
                if key.is_empty() {
                    return Err("usage: set <key> <value>".to_string());
                }
                Ok(Command::Set {
                    key: key.to_string(),
                    value: value.to_string(),
                })
            }
            "clear" => key(verb).map(Command::Clear),
            "touch" => key(verb).map(Command::Touch),
            "disable" => key(verb).map(Command::Disable),
            "enable" => key(verb).map(Command::Enable),
            "show" | "" => Ok(Command::Show),
            "values" => Ok(Command::Values),
            "submit" => Ok(Command::Submit),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("unknown command '{}', try 'help'", other)),
        }
    }
}
