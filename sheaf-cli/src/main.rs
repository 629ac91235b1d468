//! Sheaf CLI
//!
//! Expand CSS declarations into longhands, or serialize them back with
//! shorthands rebuilt where possible.

use std::collections::HashMap;
use std::io;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use serde_json::json;
use sheaf_common::warning::warning_count;
use sheaf_css::{CollectingErrorSink, DeclarationError, StyleDeclaration};

/// Rejected declarations are printed by [`report_rejected`], not logged.
const DEFAULT_FILTER: &str = "warn,sheaf::declaration=off";

/// Sheaf: shorthand-aware CSS declarations
#[derive(Parser, Debug)]
#[command(name = "sheaf")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Longhands of a shorthand
    sheaf expand "margin: 1px 2px"

    # The same as JSON
    sheaf expand --json "border: 1px solid red"

    # Rebuild shorthands
    sheaf serialize "margin-top: 1px; margin-right: 1px; margin-bottom: 1px; margin-left: 1px"

    # Minified, with a variable supplied from outside
    sheaf serialize --minify --var gap=4px "margin: var(--gap)"

    # Read declarations from stdin
    echo "flex: 1" | sheaf expand -
"#)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print without colors
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the longhand declarations
    Expand {
        /// Declarations, or "-" to read stdin
        #[arg(value_name = "DECLARATIONS")]
        input: String,

        /// Print JSON instead of CSS
        #[arg(long)]
        json: bool,

        /// Custom property values for var() (NAME=VALUE, without the leading "--")
        #[arg(long = "var", value_name = "NAME=VALUE")]
        vars: Vec<String>,
    },
    /// Print the declaration block with shorthands rebuilt
    Serialize {
        /// Declarations, or "-" to read stdin
        #[arg(value_name = "DECLARATIONS")]
        input: String,

        /// Omit optional whitespace
        #[arg(long)]
        minify: bool,

        /// Custom property values for var() (NAME=VALUE, without the leading "--")
        #[arg(long = "var", value_name = "NAME=VALUE")]
        vars: Vec<String>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER))
        .init();
    let cli = Cli::parse();

    let (input, vars) = match &cli.command {
        Command::Expand { input, vars, .. } | Command::Serialize { input, vars, .. } => {
            (read_input(input)?, parse_vars(vars)?)
        }
    };

    let (declaration, rejected) = load(&input, &vars);

    match cli.command {
        Command::Expand { json: true, .. } => print_json(&declaration)?,
        Command::Expand { .. } => print_longhands(&declaration, cli.no_color),
        Command::Serialize { minify, .. } => {
            let text = if minify {
                declaration.minified_css_text()
            } else {
                declaration.css_text()
            };
            println!("{text}");
        }
    }

    report_rejected(&rejected, cli.no_color)
}

/// Parse the declarations and substitute `var()`. Shorthand errors are
/// collected instead of logged; they come back in the rejected list.
fn load(input: &str, vars: &HashMap<String, String>) -> (StyleDeclaration, Vec<DeclarationError>) {
    let mut declaration = StyleDeclaration::with_error_sink(Box::new(CollectingErrorSink::new()));
    let rejected = declaration.set_css_text(input);
    let resolved = declaration.resolve_variables(vars);
    log::debug!(target: "sheaf::cli", "resolved {resolved} pending values");
    (declaration, rejected)
}

/// The positional argument, or stdin for "-".
fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        io::read_to_string(io::stdin()).context("failed to read declarations from stdin")
    } else {
        Ok(input.to_string())
    }
}

/// `NAME=VALUE` pairs keyed as custom property names.
fn parse_vars(vars: &[String]) -> Result<HashMap<String, String>> {
    let mut map = HashMap::with_capacity(vars.len());
    for var in vars {
        let Some((name, value)) = var.split_once('=') else {
            bail!("--var expects NAME=VALUE, got '{var}'");
        };
        let name = name.trim().trim_start_matches("--");
        if name.is_empty() {
            bail!("--var has an empty name: '{var}'");
        }
        let _ = map.insert(format!("--{name}"), value.trim().to_string());
    }
    Ok(map)
}

fn print_longhands(declaration: &StyleDeclaration, no_color: bool) {
    for entry in declaration.entries() {
        let value = entry.value.css_text();
        let priority = if entry.important { " !important" } else { "" };
        if no_color {
            println!("{}: {value}{priority};", entry.name);
        } else {
            println!("{}: {value}{};", entry.name.cyan(), priority.yellow());
        }
    }
}

fn print_json(declaration: &StyleDeclaration) -> Result<()> {
    let entries: Vec<_> = declaration
        .entries()
        .iter()
        .map(|entry| {
            json!({
                "name": entry.name,
                "value": entry.value,
                "text": entry.value.css_text(),
                "important": entry.important,
            })
        })
        .collect();
    let compat: Vec<_> = declaration
        .ledger()
        .compat_entries()
        .iter()
        .map(|entry| json!({ "name": entry.property, "text": entry.value.raw }))
        .collect();
    let output = json!({ "longhands": entries, "compat": compat });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print rejected declarations to stderr and fail when there were any.
fn report_rejected(rejected: &[DeclarationError], no_color: bool) -> Result<()> {
    if rejected.is_empty() {
        return Ok(());
    }
    for error in rejected {
        if no_color {
            eprintln!("error: {error}");
        } else {
            eprintln!("{} {error}", "error:".red().bold());
        }
    }
    log::debug!(target: "sheaf::cli", "{} distinct warnings", warning_count());
    bail!("{} declaration(s) rejected", rejected.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_shorthand_is_not_logged() {
        let before = warning_count();
        let (declaration, rejected) = load("margin: 1px 2px 3px 4px 5px; padding: 1px", &HashMap::new());
        assert_eq!(rejected.len(), 1);
        assert_eq!(warning_count(), before);
        assert_eq!(declaration.css_text(), "padding: 1px;");
    }

    #[test]
    fn test_parse_vars() {
        let vars = parse_vars(&["--gap=4px".to_string(), "w = 1px".to_string()]).unwrap();
        assert_eq!(vars.get("--gap").map(String::as_str), Some("4px"));
        assert_eq!(vars.get("--w").map(String::as_str), Some("1px"));
        assert!(parse_vars(&["gap".to_string()]).is_err());
    }
}
