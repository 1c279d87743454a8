use std::path::PathBuf;

use ls8::{Console, Cpu, program};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

/// Exit status when the program image cannot be loaded
const LOAD_FAILURE: i32 = 2;

/// LS-8 runner
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Program image to load and execute
    program: PathBuf,

    /// Log every instruction as it is executed
    #[clap(long)]
    trace: bool,

    /// Stop after executing this many instructions
    #[clap(long)]
    limit: Option<usize>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let env = env_logger::Env::default()
        .filter_or("LS8_LOG", if args.trace { "trace" } else { "info" })
        .write_style_or("LS8_LOG_STYLE", "always");
    env_logger::init_from_env(env);

    let image = match program::load(&args.program) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("error: {:#}", anyhow::Error::new(e));
            std::process::exit(LOAD_FAILURE);
        }
    };
    let mut cpu = Cpu::with_image(&image).context("failed to load image")?;

    let mut console = Console::new(std::io::stdout().lock());
    let start = std::time::Instant::now();
    let limit = args.limit.unwrap_or(usize::MAX);
    let r = cpu.run_until(&mut console, |_cpu, i| i >= limit);

    // Flush whatever the program printed before reporting any error
    console.flush().context("failed to flush stdout")?;

    match r.with_context(|| format!("execution failed at {:#04x}", cpu.pc()))? {
        Some(n) => info!("halted after {n} instructions in {:?}", start.elapsed()),
        None => warn!("stopped after {limit} instructions"),
    }
    Ok(())
}
