//! medibook CLI
//!
//! Mounts a page description and drives it with scripted or live events,
//! printing the rendered view as JSON on stdout. Logs are written to stderr.

use clap::{Parser, Subcommand};
use medibook::booking::parse_picker_date;
use medibook::config::{generate_default_config, Config};
use medibook::directory::{ScheduleProvider, SpecialtyCode};
use medibook::events::UiEvent;
use medibook::page::{parse_script, replay, Page, PageElements, ScriptStep};
use medibook::telemetry;
use std::path::{Path, PathBuf};
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "medibook")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Headless state engine for the hospital front end")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: standard locations, then environment)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a JSON-lines event script against a page and print the view
    Replay {
        /// Page description (.toml or .json)
        page: PathBuf,
        /// Script file (default: stdin)
        script: Option<PathBuf>,
    },

    /// Read events from stdin in real time until EOF or Ctrl-C
    Serve {
        /// Page description (.toml or .json)
        page: PathBuf,
    },

    /// List specialties and doctors from the configured directory
    Doctors {
        /// Only this specialty
        specialty: Option<String>,
    },

    /// Show bookable times for a doctor on a date
    Slots {
        doctor: String,
        /// YYYY-MM-DD
        date: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    telemetry::init(&config.logging)?;

    match cli.command {
        Commands::Replay { page, script } => {
            let mut page = Page::from_config(load_page(&page)?, &config)?;
            let content = match script {
                Some(path) => std::fs::read_to_string(path)?,
                None => std::io::read_to_string(std::io::stdin())?,
            };
            let steps = parse_script(&content)?;
            let report = replay(&mut page, &steps);
            if report.dropped > 0 {
                eprintln!("{} events dropped at the cascade limit", report.dropped);
            }
            println!("{}", serde_json::to_string_pretty(&page.render())?);
        }

        Commands::Serve { page } => {
            let mut page = Page::from_config(load_page(&page)?, &config)?;
            let (tx, rx) = mpsc::unbounded_channel();
            tokio::spawn(read_stdin_events(tx));

            let shutdown = async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!(error = %e, "Failed to listen for Ctrl-C");
                    std::future::pending::<()>().await;
                }
            };
            let stats = page.run(rx, shutdown).await;
            tracing::info!(events = stats.events, timer_wakeups = stats.timer_wakeups, "Stopped");
            println!("{}", serde_json::to_string_pretty(&page.render())?);
        }

        Commands::Doctors { specialty } => {
            let directory = config.booking.directory()?;
            let codes = match specialty {
                Some(code) => vec![SpecialtyCode::new(code)],
                None => directory.specialties(),
            };
            for code in codes {
                println!("{}", code);
                for doctor in directory.doctors_by_specialty(&code) {
                    println!("  {:<6} {}", doctor.id, doctor.name);
                }
            }
        }

        Commands::Slots { doctor, date } => {
            let directory = config.booking.directory()?;
            let date = parse_picker_date(&date)?;
            let Some(found) = directory.find_doctor(&doctor) else {
                eprintln!("Unknown doctor: {}", doctor);
                std::process::exit(1);
            };
            println!("{} on {}", found.name, date);
            for slot in directory.available_slots(&doctor, date) {
                println!("  {}", slot);
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn load_page(path: &Path) -> Result<PageElements, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let elements = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => PageElements::from_json(&content)?,
        _ => PageElements::from_toml(&content)?,
    };
    Ok(elements)
}

/// Forward stdin events to the driver; clock steps are ignored in live mode
async fn read_stdin_events(tx: mpsc::UnboundedSender<UiEvent>) {
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read stdin");
                break;
            }
        };
        let steps = match parse_script(&line) {
            Ok(steps) => steps,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping bad event line");
                continue;
            }
        };
        for step in steps {
            match step {
                ScriptStep::Event(event) => {
                    if tx.send(event).is_err() {
                        return;
                    }
                }
                ScriptStep::Advance { .. } => {
                    tracing::debug!("Clock steps are ignored in live mode");
                }
            }
        }
    }
}
