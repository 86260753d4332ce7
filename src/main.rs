//! celebrate - open the birthday surprise window

use std::path::PathBuf;
use std::process::ExitCode;

use celebrate::SceneConfig;
use clap::Parser;

/// Exit code for a scene that failed at runtime (GPU, window).
const EXIT_ERROR: u8 = 1;
/// Exit code for an unreadable or invalid config file.
const EXIT_INVALID_CONFIG: u8 = 2;

#[derive(Parser)]
#[command(name = "celebrate")]
#[command(about = "A one-off celebratory 3D scene with hearts, confetti and a thank-you link")]
#[command(version)]
struct Cli {
    /// TOML file overriding any of the default settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for confetti and heart placement (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info,wgpu_core=warn,wgpu_hal=warn,naga=warn"),
    )
    .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match SceneConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}: {}", path.display(), e);
                return ExitCode::from(EXIT_INVALID_CONFIG);
            }
        },
        None => SceneConfig::default(),
    };

    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    if cli.print_config {
        return match config.to_toml() {
            Ok(text) => {
                print!("{}", text);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(EXIT_INVALID_CONFIG)
            }
        };
    }

    match celebrate::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
