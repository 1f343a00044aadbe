use clap::{Parser, Subcommand};
use dial::DialView;
use knob::config;
use knob::export;
use knob::gui::app::AppModel;
use knob::sys::{runtime, server::SOCKET_PATH};
use relm4::prelude::*;
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "knob", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Initial value (overrides the config file)
    #[arg(short = 'v', long, allow_negative_numbers = true)]
    value: Option<f64>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Set the value of a running knob.
    Set {
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Clear the value of a running knob
    Clear,
    /// Print the configured dial as SVG
    Svg {
        #[arg(short = 'v', long, allow_negative_numbers = true)]
        value: Option<f64>,
    },
    /// Write the default config file and print its path
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Set { value }) => send_command(&format!("set {value}")),
        Some(Commands::Clear) => send_command("clear"),
        Some(Commands::Svg { value }) => {
            let config = config::load_config()?;
            let value = value.or(config.value).unwrap_or(config.dial.min);
            print!(
                "{}",
                export::svg_document(&DialView::new(&config.dial, value), &config.colors)
            );
            Ok(())
        }
        Some(Commands::InitConfig) => {
            println!("{}", config::write_default_config()?.display());
            Ok(())
        }
        None => run_app(cli.value),
    }
}

fn run_app(value: Option<f64>) -> anyhow::Result<()> {
    let mut config = config::load_or_default();
    if value.is_some() {
        config.value = value;
    }

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.knob.Knob").with_args(Vec::new());
    app.run::<AppModel>((config, rx));
    Ok(())
}

fn send_command(cmd: &str) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to knob at {}: {}. Is knob running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}
