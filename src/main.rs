use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use life_ride::{
    geometry::SurfaceGeometry,
    script::ScriptLoader,
    session::ControlEvent,
    web::{self, WebServerConfig},
    ConfigLoader, JourneyConfig, JourneySession, RawInput, Sex,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Life ride journey engine")]
struct Cli {
    /// Path to a journey config YAML file (built-in defaults when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute one frame and print it as JSON
    Compute {
        #[arg(long, default_value = "male")]
        sex: Sex,

        /// Age as typed by the user; unparseable values count as 0
        #[arg(long, default_value = "0")]
        age: String,

        /// Life expectancy override; enables the override when present
        #[arg(long)]
        life: Option<String>,

        /// Left offset of the bike image in pixels
        #[arg(long, requires = "width")]
        offset: Option<f64>,

        /// Width of the bike image in pixels
        #[arg(long, requires = "offset")]
        width: Option<f64>,

        /// Render as if the prime band is hovered
        #[arg(long)]
        hover: bool,
    },

    /// Replay a YAML script of control events
    Replay {
        #[arg(long)]
        script: PathBuf,

        /// Print the final frame as JSON after the step summary
        #[arg(long)]
        json: bool,
    },

    /// Serve the interactive page
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ConfigLoader::new(".").load(path)?,
        None => JourneyConfig::default(),
    };
    init_tracing(&config.logging.level);
    let settings = config.settings()?;

    match cli.command {
        Command::Compute {
            sex,
            age,
            life,
            offset,
            width,
            hover,
        } => {
            let override_enabled = life.is_some();
            let mut session = JourneySession::with_inputs(
                settings,
                sex,
                RawInput::Text(age),
                override_enabled,
                life.map(RawInput::Text),
            );
            if let (Some(offset), Some(width)) = (offset, width) {
                session.apply(ControlEvent::Resized(SurfaceGeometry { offset, width }));
            }
            session.apply(ControlEvent::BandHover(hover));
            println!("{}", serde_json::to_string_pretty(&session.render())?);
        }
        Command::Replay { script, json } => {
            let script = ScriptLoader::new(".").load(&script)?;
            let session = script.replay_with_hook(settings, |step| {
                let state = step.frame.state;
                println!(
                    "#{:02} {:<16} {} age {:>3} / {:>3}  remaining {:>3}  {:>3}%{}",
                    step.index,
                    step.event.name(),
                    if step.accepted { "applied" } else { "ignored" },
                    state.age,
                    state.effective_life_expectancy,
                    state.years_remaining,
                    state.journey_percent,
                    if step.frame.tooltip.visible {
                        format!("  [{}]", step.frame.tooltip.text)
                    } else {
                        String::new()
                    },
                );
            });
            if json {
                println!("{}", serde_json::to_string_pretty(&session.render())?);
            }
        }
        Command::Serve { host, port } => {
            web::run(WebServerConfig { config, host, port }).await?;
        }
    }

    Ok(())
}
