use skyburst::error::RunError;
use skyburst::export::{export_frames, ExportSettings};
use skyburst::SkyburstConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: skyburst [--config FILE] [--seed N] [--export DIR [--frames N]]";

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    export: Option<PathBuf>,
    frames: Option<u32>,
    seed: Option<u64>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, RunError> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| RunError::Args(format!("{name} needs a value\n{USAGE}")))
        };
        match arg.as_str() {
            "--config" => parsed.config = Some(value("--config")?.into()),
            "--export" => parsed.export = Some(value("--export")?.into()),
            "--frames" => {
                let v = value("--frames")?;
                parsed.frames = Some(
                    v.parse()
                        .map_err(|_| RunError::Args(format!("bad frame count {v:?}")))?,
                );
            }
            "--seed" => {
                let v = value("--seed")?;
                parsed.seed = Some(
                    v.parse()
                        .map_err(|_| RunError::Args(format!("bad seed {v:?}")))?,
                );
            }
            "-h" | "--help" => return Err(RunError::Args(USAGE.into())),
            other => return Err(RunError::Args(format!("unknown argument {other:?}\n{USAGE}"))),
        }
    }
    Ok(parsed)
}

fn run() -> Result<(), RunError> {
    let args = parse_args(std::env::args().skip(1))?;

    let config = match &args.config {
        Some(path) => SkyburstConfig::load(path)?,
        None => {
            tracing::info!("using built-in config");
            SkyburstConfig::default()
        }
    };
    let seed = args.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    });

    match args.export {
        Some(dir) => {
            let mut settings = ExportSettings::new(dir, &config);
            settings.seed = seed;
            if let Some(frames) = args.frames {
                settings.frames = frames;
            }
            export_frames(&config, &settings)?;
            Ok(())
        }
        None => skyburst::window::run(config, seed),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skyburst=info")),
        )
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
