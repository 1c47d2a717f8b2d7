use anyhow::Result;
use clap::Parser;
use reefwright_core::init_logging;
use reefwright_data::FoldingInput;
use reefwright_lib::app::{build_provider, load_config, run_campaign, App};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "reefwright.toml")]
    config: PathBuf,

    /// RNG seed for both the simulation and the simulated ocean feed
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON endpoint serving ocean observations
    #[arg(long)]
    endpoint: Option<String>,

    /// Fixed folding for every mission as "x,y" (default: advisor picks)
    #[arg(long, value_parser = parse_fold, allow_hyphen_values = true)]
    fold: Option<FoldingInput>,

    /// Tick on the configured period instead of as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn parse_fold(raw: &str) -> Result<FoldingInput, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got {raw:?}"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y: {e}"))?;
    Ok(FoldingInput::new(x, y))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = load_config(&args.config)?;
    if let Some(seed) = args.seed {
        config.simulation.seed = Some(seed);
        config.provider.seed = Some(seed);
    }
    if args.endpoint.is_some() {
        config.provider.endpoint = args.endpoint.clone();
    }
    let pacing = args
        .realtime
        .then(|| Duration::from_millis(config.simulation.tick_period_ms));

    let provider = build_provider(&config);
    let mut app = App::start(config, provider.as_ref()).await?;
    let report = run_campaign(&mut app.session, args.fold, pacing).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if app.fallback {
            println!("(ocean data unavailable, playing the built-in missions)");
        }
        println!("{report}");
    }
    Ok(())
}
