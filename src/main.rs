use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use pxforge::{format_file_size, BatchDriver, Cli, ConversionJob, ConversionPipeline, PxError};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .init();

    let job = cli.into_job()?;

    if job.batch {
        run_batch(job)
    } else {
        run_single(job)
    }
}

fn run_single(job: ConversionJob) -> anyhow::Result<()> {
    println!("Converting {} -> {}", job.input.display(), job.output.display());

    let pipeline = ConversionPipeline::new(&job);
    let report = pipeline
        .convert(&job.input, &job.output)
        .with_context(|| format!("failed to convert {}", job.input.display()))?;

    println!(
        "Conversion complete ({} -> {})",
        format_file_size(report.bytes_in),
        format_file_size(report.bytes_out)
    );
    Ok(())
}

fn run_batch(job: ConversionJob) -> anyhow::Result<()> {
    let driver = BatchDriver::new(job)?;
    let result = driver.run()?;

    println!(
        "Batch complete: {} converted, {} failed ({} -> {})",
        result.succeeded,
        result.failed,
        format_file_size(result.bytes_in),
        format_file_size(result.bytes_out)
    );

    // Per-file failures are tolerated as long as something succeeded; the
    // exit code only goes non-zero when the whole batch produced nothing.
    if result.attempted() > 0 && result.succeeded == 0 {
        return Err(PxError::PartialBatchFailure {
            succeeded: result.succeeded,
            failed: result.failed,
        }
        .into());
    }

    Ok(())
}
