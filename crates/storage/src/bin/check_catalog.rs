use std::fmt;
use std::path::PathBuf;

use storage::{json, sample};

#[derive(Debug, Clone)]
enum Args {
    Check { path: PathBuf },
    PrintSample,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingPath,
    UnknownArg(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingPath => write!(f, "a catalog path is required"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut path = std::env::var("LAZY_ALGO_CONTENT").ok().map(PathBuf::from);

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--content" => {
                    path = Some(PathBuf::from(require_value(&mut args, "--content")?));
                }
                "--print-sample" => return Ok(Self::PrintSample),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        path.map(|path| Self::Check { path })
            .ok_or(ArgsError::MissingPath)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin check-catalog -- --content <catalog.json>");
    eprintln!("  cargo run -p storage --bin check-catalog -- --print-sample");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  LAZY_ALGO_CONTENT");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    match args {
        Args::PrintSample => {
            println!("{}", sample::demo_json());
        }
        Args::Check { path } => {
            let catalog = json::read_catalog(&path).await?;
            let total = catalog
                .stages
                .iter()
                .fold(0_u32, |acc, stage| acc.saturating_add(stage.total_lessons()));
            println!(
                "{}: {} lessons, {} stages ({} planned lessons), current stage {}",
                path.display(),
                catalog.lessons.len(),
                catalog.stages.len(),
                total,
                catalog.current_stage
            );
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
