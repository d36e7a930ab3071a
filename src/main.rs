use clap::Parser;
use pngcrc::{list_candidate_files, repair_file, FileOutcome, RepairOptions, TruncatedPolicy};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pngcrc", about = "Find PNG files and rewrite corrupted chunk CRCs in place")]
struct Cli {
    /// Directory to search recursively
    root: PathBuf,
    /// Report bad CRCs without writing anything
    #[arg(short = 'n', long)]
    dry_run: bool,
    /// Do not touch files whose chunk stream is truncated
    #[arg(long)]
    skip_truncated: bool,
    /// Print every decoded chunk of each PNG
    #[arg(short, long)]
    list: bool,
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let opts = RepairOptions {
        truncated: if cli.skip_truncated { TruncatedPolicy::Skip } else { TruncatedPolicy::RepairReadable },
        dry_run:   cli.dry_run,
    };

    for path in list_candidate_files(&cli.root)? {
        let path = path?;
        let outcome = repair_file(&path, &opts)?;

        let report = match &outcome {
            FileOutcome::Processed(r) => r,
            FileOutcome::NotCandidate => continue,
        };

        if cli.list {
            println!("{}:", path.display());
            for chunk in &report.decoded.chunks {
                println!("  {chunk}");
            }
            if !report.completed() {
                println!("  ({})", report.decoded.stop);
            }
        }

        if report.corrected() {
            println!("Corrected CRC in {}", path.display());
        } else if opts.dry_run && !report.mismatches.is_empty() {
            println!("CRC mismatch in {}", path.display());
        }
    }

    Ok(())
}
