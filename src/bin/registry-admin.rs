//! Terminal admin for the youth organization registry
//!
//! Drives the registry admin surface against a running endpoint.
//!
//! Usage:
//!   registry-admin [--endpoint <url>] [--verbose] <command>
//!
//! Commands:
//!   list                          Show the registry
//!   add <field>=<value>...        Add a record
//!   edit <id> <field>=<value>...  Change fields of a record
//!   delete <id> [--yes]           Delete a record (asks for --yes to confirm)

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use youth_registry::admin::{DeleteOutcome, FormField, RegistryController, SubmitOutcome};
use youth_registry::services::{ConsoleNotifier, RegistryClient};
use youth_registry::{logging, AppConfig};

#[derive(Debug, PartialEq, Eq)]
enum Command {
    List,
    Add(Vec<(FormField, String)>),
    Edit(i64, Vec<(FormField, String)>),
    Delete { id: i64, confirmed: bool },
    Help,
}

#[derive(Debug, PartialEq, Eq)]
struct Options {
    endpoint: Option<String>,
    verbose: bool,
    command: Command,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{:#}", e);
            print_help();
            return ExitCode::FAILURE;
        }
    };

    if options.command == Command::Help {
        print_help();
        return ExitCode::SUCCESS;
    }

    logging::init_cli_logging(if options.verbose { "debug" } else { "warn" });

    match run(options).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Execute a command; `Ok(false)` when the action failed and was reported
async fn run(options: Options) -> Result<bool> {
    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(endpoint) = options.endpoint {
        config.registry.endpoint_url = endpoint;
        config.validate()?;
    }

    let client = RegistryClient::new(&config.registry)?;
    let mut controller = RegistryController::new(Arc::new(client), Arc::new(ConsoleNotifier));

    if !controller.load().await {
        return Ok(false);
    }

    let succeeded = match options.command {
        Command::List => true,
        Command::Add(assignments) => {
            let form = controller.begin_add();
            for (field, value) in &assignments {
                form.set(*field, value);
            }
            report_submission(controller.submit_form().await)
        }
        Command::Edit(id, assignments) => {
            let Some(form) = controller.begin_edit(id) else {
                bail!("No organization with id {} in the registry", id);
            };
            for (field, value) in &assignments {
                form.set(*field, value);
            }
            report_submission(controller.submit_form().await)
        }
        Command::Delete { id, confirmed } => {
            let Some(org) = controller.find(id) else {
                bail!("No organization with id {} in the registry", id);
            };
            println!(
                "Delete \"{}\" (id {})? This cannot be undone.",
                org.fields.organization_name, id
            );
            controller.request_delete(id);

            if confirmed {
                controller.confirm_delete().await == DeleteOutcome::Deleted
            } else {
                println!("Not confirmed, pass --yes to delete.");
                controller.cancel_delete();
                true
            }
        }
        Command::Help => unreachable!("help is handled before connecting"),
    };

    println!("{}", controller.view().render());
    Ok(succeeded)
}

fn report_submission(outcome: Option<SubmitOutcome>) -> bool {
    match outcome {
        Some(SubmitOutcome::Saved) => true,
        Some(SubmitOutcome::Invalid(e)) => {
            eprintln!("[!] {}", e);
            false
        }
        Some(SubmitOutcome::Failed) | Some(SubmitOutcome::Busy) | None => false,
    }
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut endpoint = None;
    let mut verbose = false;
    let mut confirmed = false;
    let mut positional = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--endpoint" => {
                let Some(url) = args.get(i + 1) else {
                    bail!("--endpoint requires a URL");
                };
                endpoint = Some(url.clone());
                i += 1;
            }
            "--verbose" | "-v" => verbose = true,
            "--yes" | "-y" => confirmed = true,
            "--help" | "-h" => {
                return Ok(Options {
                    endpoint,
                    verbose,
                    command: Command::Help,
                })
            }
            other => positional.push(other.to_string()),
        }
        i += 1;
    }

    let command = match positional.split_first() {
        None => Command::Help,
        Some((name, rest)) => match name.as_str() {
            "list" => Command::List,
            "add" => Command::Add(parse_assignments(rest)?),
            "edit" => {
                let Some((id, rest)) = rest.split_first() else {
                    bail!("edit requires a record id");
                };
                Command::Edit(parse_id(id)?, parse_assignments(rest)?)
            }
            "delete" => {
                let [id] = rest else {
                    bail!("delete requires exactly one record id");
                };
                Command::Delete {
                    id: parse_id(id)?,
                    confirmed,
                }
            }
            other => bail!("Unknown command: {}", other),
        },
    };

    Ok(Options {
        endpoint,
        verbose,
        command,
    })
}

fn parse_id(raw: &str) -> Result<i64> {
    raw.parse()
        .with_context(|| format!("Invalid record id: {}", raw))
}

fn parse_assignments(args: &[String]) -> Result<Vec<(FormField, String)>> {
    args.iter()
        .map(|arg| {
            let Some((name, value)) = arg.split_once('=') else {
                bail!("Expected <field>=<value>, got {:?}", arg);
            };
            let field: FormField = name.parse()?;
            Ok((field, value.replace("\\n", "\n")))
        })
        .collect()
}

fn print_help() {
    println!(
        r#"Youth Registry admin

USAGE:
    registry-admin [OPTIONS] <COMMAND>

COMMANDS:
    list                            Show the registry
    add <field>=<value>...          Add a record
    edit <id> <field>=<value>...    Change fields of a record
    delete <id> [--yes]             Delete a record

OPTIONS:
    --endpoint <URL>    Registry endpoint (default: registry.endpoint_url)
    -y, --yes           Confirm deletion
    -v, --verbose       Enable verbose output
    -h, --help          Print this help message

FIELDS:
    number, municipality, educational_institution, organization_name,
    contact_details, participants_count, activity_direction,
    local_act_details, website_url

Use \n inside a value for a line break."#
    );
}
