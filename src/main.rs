use clap::Parser;
use env_logger::Env;
use photo500::batch::BatchSummary;
use photo500::imaging::{Quality, WebpBackend};
use photo500::options::RunOptions;
use photo500::report::RunReport;
use photo500::{batch, output, scan};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "photo500")]
#[command(version)]
#[command(about = "Batch-convert a directory of images into resized WebP files")]
#[command(long_about = "\
Batch-convert a directory of images into resized WebP files

Walks the input directory for JPEG, PNG, TIFF, and WebP files, downsizes
each one to the target width (never enlarging), and encodes it as lossy
WebP under the output directory. Output names are the input file names
with a .webp extension; nested input files land flat in the output
directory.

Each file gets one line on stdout as it completes, then a summary:

  OK /photos/trip/b.jpg -> /photos/output/b.webp
  SKIP /photos/a.jpg (exists)
  FAIL /photos/c.jpg Failed to decode /photos/c.jpg: bad header
  converted=1 skipped=1 failed=1 outDir=/photos/output

Files whose output already exists are skipped unless --force is given.
Per-file failures are reported and counted but never abort the run or
change the exit code; only startup problems (bad flags, missing input
directory, invalid exclude patterns) exit non-zero.

Set RUST_LOG=debug for per-file decision logging.")]
struct Cli {
    /// Directory to scan for images
    #[arg(long = "in", value_name = "DIR", default_value = ".")]
    in_dir: PathBuf,

    /// Directory for converted files
    #[arg(long = "out", value_name = "DIR", default_value = "output")]
    out_dir: PathBuf,

    /// Target width in pixels; smaller images keep their size
    #[arg(
        long,
        value_name = "PIXELS",
        default_value_t = 500,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    width: u32,

    /// WebP quality, 1-100
    #[arg(
        long,
        value_name = "N",
        default_value_t = 75,
        value_parser = clap::value_parser!(u32).range(1..=100)
    )]
    quality: u32,

    /// Re-convert files whose outputs already exist
    #[arg(long)]
    force: bool,

    /// Print what a run would do without writing any files
    #[arg(long)]
    dry_run: bool,

    /// Worker threads (defaults to all cores; capped at core count)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    jobs: Option<u32>,

    /// Glob pattern to exclude, relative to the input directory (repeatable)
    #[arg(long, value_name = "GLOB")]
    exclude: Vec<String>,

    /// Write a JSON run report to this path
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = RunOptions {
        in_dir: cli.in_dir,
        out_dir: cli.out_dir,
        width: cli.width,
        quality: Quality::new(cli.quality),
        force: cli.force,
        dry_run: cli.dry_run,
        jobs: cli.jobs.map(|n| n as usize),
        excludes: cli.exclude,
    }
    .resolve()?;

    init_thread_pool(&options);

    let candidates = scan::discover(&options)?;
    log::debug!(
        "{} candidate(s) under {}",
        candidates.len(),
        options.in_dir.display()
    );

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for result in rx {
            output::print_file_line(&result);
        }
    });

    let backend = WebpBackend::new();
    let results = batch::run(&backend, &candidates, &options, Some(tx));
    printer.join().unwrap();

    let summary = BatchSummary::tally(&results, &options.out_dir);
    output::print_summary_line(&summary);

    if let Some(report_path) = &cli.report {
        RunReport::build(&options, &results, &summary).write(report_path)?;
    }

    Ok(())
}

/// Initialize the rayon thread pool from the resolved options.
///
/// Caps at the number of available CPU cores — `--jobs` can constrain down,
/// not up.
fn init_thread_pool(options: &RunOptions) {
    rayon::ThreadPoolBuilder::new()
        .num_threads(options.effective_jobs())
        .build_global()
        .ok();
}
