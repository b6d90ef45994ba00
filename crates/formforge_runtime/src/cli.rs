//! Command-line interface: argument definitions and command execution.
//!
//! Commands render their output to a `String` so the binary only prints.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use formforge_builder::BuilderConfig;
use formforge_engine::{ComparisonPolicy, EngineConfig};
use formforge_foundation::{Error, FieldId, FieldValue, Result};
use formforge_model::{FormSchema, FormSchemaPayload};
use tracing::debug;

use crate::logging::LogArgs;
use crate::serialize::{load_from_file, save_to_file, to_json};
use crate::session::FormSession;

/// Inspect form schemas and run their rules and validation.
#[derive(Debug, Parser)]
#[command(name = "formforge", version, about)]
pub struct Cli {
    /// Logging controls
    #[command(flatten)]
    pub log: LogArgs,

    /// Builder/engine config file (JSON or `MessagePack`)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summarize a schema's fields and rules.
    Inspect {
        /// Schema file (`.json`, `.msgpack`)
        schema: PathBuf,
        /// Print the save payload the builder would send instead
        #[arg(long)]
        payload: bool,
    },
    /// Apply values and show each control's resulting state.
    Eval {
        #[command(flatten)]
        input: ValueInput,
    },
    /// Apply values and attempt a submission.
    Validate {
        #[command(flatten)]
        input: ValueInput,
    },
    /// Re-encode a schema, choosing formats from the file extensions.
    Convert {
        /// Source schema file
        input: PathBuf,
        /// Destination file
        output: PathBuf,
    },
}

/// A schema plus the values to enter into it.
#[derive(Debug, Clone, clap::Args)]
pub struct ValueInput {
    /// Schema file (`.json`, `.msgpack`)
    pub schema: PathBuf,
    /// File holding a JSON object of field id to value
    #[arg(long, value_name = "PATH")]
    pub values: Option<PathBuf>,
    /// Set one value: `field=value`, where value is JSON or bare text
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub assignments: Vec<String>,
    /// Coerce text to numbers and booleans when comparing
    #[arg(long)]
    pub lenient: bool,
}

/// Parses `field=value`. The value is read as JSON, falling back to text.
///
/// # Errors
///
/// Returns an error if there is no `=` or the field id is empty.
pub fn parse_assignment(text: &str) -> Result<(FieldId, FieldValue)> {
    let Some((field, raw)) = text.split_once('=') else {
        return Err(Error::invalid_input(format!("expected FIELD=VALUE, got '{text}'")));
    };
    let field = field.trim();
    if field.is_empty() {
        return Err(Error::invalid_input(format!("missing field id in '{text}'")));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| FieldValue::from(raw));
    Ok((FieldId::new(field), value))
}

/// Loads the config file, or the defaults without one.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: Option<&PathBuf>) -> Result<BuilderConfig> {
    match path {
        Some(path) => load_from_file(path),
        None => Ok(BuilderConfig::default()),
    }
}

/// Runs a parsed command line and returns what to print.
///
/// # Errors
///
/// Returns any load, parse, or validation failure.
pub fn run(cli: &Cli) -> Result<String> {
    let config = load_config(cli.config.as_ref())?;
    match &cli.command {
        Command::Inspect { schema, payload } => {
            let schema: FormSchema = load_from_file(schema)?;
            if *payload {
                let fields = schema.fields_with_rules();
                to_json(&FormSchemaPayload::from_fields(
                    schema.name.clone(),
                    config.save_description.clone(),
                    &fields,
                    schema.theme.clone(),
                ))
            } else {
                Ok(inspect(&schema))
            }
        }
        Command::Eval { input } => {
            let session = open_with_values(input, &config.engine)?;
            Ok(control_table(&session))
        }
        Command::Validate { input } => {
            let mut session = open_with_values(input, &config.engine)?;
            let report = control_table(&session);
            match session.submit() {
                Ok(payload) => to_json(&payload),
                Err(e) => {
                    debug!("{report}");
                    Err(e)
                }
            }
        }
        Command::Convert { input, output } => {
            let schema: FormSchema = load_from_file(input)?;
            save_to_file(&schema, output)?;
            Ok(format!("wrote {}", output.display()))
        }
    }
}

fn open_with_values(input: &ValueInput, engine: &EngineConfig) -> Result<FormSession> {
    let schema: FormSchema = load_from_file(&input.schema)?;
    let mut engine = engine.clone();
    if input.lenient {
        engine = engine.with_comparison(ComparisonPolicy::Lenient);
    }

    let mut values: Vec<(FieldId, FieldValue)> = match &input.values {
        Some(path) => load_from_file::<BTreeMap<FieldId, FieldValue>, _>(path)?
            .into_iter()
            .collect(),
        None => Vec::new(),
    };
    for assignment in &input.assignments {
        values.push(parse_assignment(assignment)?);
    }

    let mut session = FormSession::open(schema, engine)?;
    for (id, value) in values {
        session.set_value(&id, value)?;
    }
    Ok(session)
}

/// One line per field: id, type, label, required flag, rule count.
#[must_use]
pub fn inspect(schema: &FormSchema) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", schema.name, schema.id);
    if let Some(description) = &schema.description {
        let _ = writeln!(out, "  {description}");
    }
    let fields = schema.fields_with_rules();
    let _ = writeln!(out, "fields: {}", fields.len());
    for field in &fields {
        let _ = writeln!(
            out,
            "  {:<16} {:<13} {:<24} {}{}",
            field.id.as_str(),
            field.field_type.wire_name(),
            field.label,
            if field.required { "required " } else { "" },
            match field.rules.len() {
                0 => String::new(),
                n => format!("rules={n}"),
            }
        );
    }
    let rules = schema.all_rules();
    let _ = writeln!(out, "rules: {}", rules.len());
    for rule in &rules {
        let _ = writeln!(
            out,
            "  {:<16} {} action(s){}",
            rule.id.as_str(),
            rule.actions.len(),
            rule.description
                .as_deref()
                .map(|d| format!("  {d}"))
                .unwrap_or_default()
        );
    }
    out
}

/// One line per control: id, enabled, required, valid, value.
#[must_use]
pub fn control_table(session: &FormSession) -> String {
    let mut out = String::new();
    for (id, control) in session.group().controls().iter() {
        let _ = writeln!(
            out,
            "{:<16} {:<8} {:<8} {:<7} {}",
            id.as_str(),
            if control.is_enabled() { "enabled" } else { "disabled" },
            if control.is_required() { "required" } else { "optional" },
            if control.is_valid() { "valid" } else { "invalid" },
            control.value()
        );
    }
    out
}
