//! # Loadcalc CLI Application
//!
//! Terminal driver for the residential service load form. A form snapshot
//! (JSON) stands in for the page: `template` writes a blank one, `request`
//! shows the payload it would produce and `submit` sends it to the
//! calculation service and prints the rendered outcome.
//!
//! Set `RUST_LOG=debug` to see extraction and dispatch details.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use loadcalc_core::config::ClientConfig;
use loadcalc_core::errors::{LoadCalcError, LoadCalcResult};
use loadcalc_core::form::FormState;
use loadcalc_core::page::Page;
use loadcalc_core::units::UnitTag;
use loadcalc_core::HttpCalculationClient;

#[derive(Parser)]
#[command(name = "loadcalc_cli", version, about = "Residential service load form driver")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a blank form snapshot
    Template {
        /// Unit tags to offer, comma separated (default: SFD,SS,LWH)
        #[arg(long)]
        units: Option<String>,
    },
    /// Print the request a form snapshot would submit
    Request {
        #[arg(long)]
        form: PathBuf,
    },
    /// Submit a form snapshot and print the result
    Submit {
        #[arg(long)]
        form: PathBuf,
        /// Calculation endpoint (overrides the config file)
        #[arg(long)]
        endpoint: Option<String>,
        /// JSON client config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the HTML fragment instead of text
        #[arg(long)]
        html: bool,
    },
}

fn read_file(path: &Path) -> LoadCalcResult<String> {
    fs::read_to_string(path)
        .map_err(|e| LoadCalcError::file_error("read", path.display().to_string(), e.to_string()))
}

fn load_form(path: &Path) -> LoadCalcResult<FormState> {
    let json = read_file(path)?;
    let form: FormState = serde_json::from_str(&json)?;
    log::debug!("Loaded form with {} unit selector(s) from {}", form.unit_selectors.len(), path.display());
    Ok(form)
}

fn load_config(path: Option<&Path>, endpoint: Option<String>) -> LoadCalcResult<ClientConfig> {
    let mut config = match path {
        Some(path) => ClientConfig::from_json(&read_file(path)?)?,
        None => ClientConfig::default(),
    };
    if let Some(endpoint) = endpoint {
        config = config.with_endpoint(endpoint);
    }
    config.validate()?;
    Ok(config)
}

async fn run(command: Command) -> LoadCalcResult<()> {
    match command {
        Command::Template { units } => {
            let units = units.unwrap_or_else(|| UnitTag::STANDARD.join(","));
            let tags: Vec<UnitTag> = units
                .split(',')
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(UnitTag::new)
                .collect();
            println!("{}", serde_json::to_string_pretty(&FormState::standard(&tags))?);
        }
        Command::Request { form } => {
            let page = Page::from_form(load_form(&form)?);
            println!("{}", page.prepare_submission().to_json()?);
        }
        Command::Submit {
            form,
            endpoint,
            config,
            html,
        } => {
            let config = load_config(config.as_deref(), endpoint)?;
            let client = HttpCalculationClient::new(&config)?;
            let mut page = Page::from_form(load_form(&form)?);

            let selected: Vec<String> = page
                .form()
                .selected_units()
                .iter()
                .map(|tag| format!("{} ({})", tag, tag.display_name()))
                .collect();
            println!("Loadcalc - Residential Service Load");
            println!("===================================");
            println!("Units:     {}", if selected.is_empty() { "(none)".to_string() } else { selected.join(", ") });
            println!("Conductor: {}", page.form().conductor_type);
            println!("Service:   {}", client.endpoint());
            println!();

            let region = page.submit(&client).await;
            if let Some(content) = &region.content {
                if html {
                    println!("{}", content.render_html());
                } else {
                    print!("{}", content.render_text());
                }
            }
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}
