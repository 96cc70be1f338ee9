use std::path::PathBuf;

use anyhow::Context;
use churnlens_ai::{ArtifactPaths, Artifacts, ChurnPredictor, Prediction};
use churnlens_core::encode_raw;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod display;
mod input;

#[derive(Parser)]
#[command(name = "churnlens", version, about = "Telco customer churn prediction")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Predict churn for one profile or a JSON array of profiles.
    Predict {
        /// Profile JSON file, or `-` for stdin.
        #[arg(long, default_value = "-")]
        profile: PathBuf,

        #[command(flatten)]
        artifacts: ArtifactArgs,

        /// Print one JSON object per profile instead of a verdict line.
        #[arg(long)]
        json: bool,
    },
    /// Print the encoded feature vector for each profile.
    Encode {
        /// Profile JSON file, or `-` for stdin.
        #[arg(long, default_value = "-")]
        profile: PathBuf,
    },
    /// List profile fields and their allowed values.
    Fields,
}

#[derive(Args)]
struct ArtifactArgs {
    /// Fitted scaler (JSON).
    #[arg(long, env = "CHURNLENS_SCALER", default_value = "scaler.json")]
    scaler: PathBuf,

    /// Trained classifier (`.json` coefficients or `.onnx`).
    #[arg(long, env = "CHURNLENS_MODEL", default_value = "model.json")]
    model: PathBuf,
}

impl From<ArtifactArgs> for ArtifactPaths {
    fn from(args: ArtifactArgs) -> Self {
        Self {
            scaler: args.scaler,
            model: args.model,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("churnlens v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match cli.command {
        Command::Predict {
            profile,
            artifacts,
            json,
        } => {
            let profiles = input::read_profiles(&profile)?;

            let paths = ArtifactPaths::from(artifacts);
            let artifacts = Artifacts::load(&paths).context("loading model artifacts")?;
            let predictor = ChurnPredictor::from_artifacts(&artifacts);

            let results: Vec<anyhow::Result<Prediction>> = profiles
                .into_iter()
                .map(|raw| Ok(predictor.predict_profile(&raw?)?))
                .collect();
            let failed = display::print_predictions(&results, json)?;
            info!(profiles = results.len(), failed, "prediction run complete");
            anyhow::ensure!(failed == 0, "{failed} of {} profiles failed", results.len());
        }
        Command::Encode { profile } => {
            let profiles = input::read_profiles(&profile)?;
            for (i, raw) in profiles.into_iter().enumerate() {
                let features =
                    encode_raw(&raw?).with_context(|| format!("encoding profile {}", i + 1))?;
                display::print_features(i + 1, &features);
            }
        }
        Command::Fields => display::print_fields(),
    }

    Ok(())
}
