use crate::core::{ConversionJob, ConversionPipeline, FileReport, PxError, Result};
use crate::utils::{derive_output_path, is_image_file};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub outcome: std::result::Result<FileReport, String>,
}

impl FileOutcome {
    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }
}

#[derive(Debug, Default)]
pub struct BatchResult {
    /// One entry per enumerated file, in enumeration (sorted path) order
    /// regardless of which worker finished first.
    pub outcomes: Vec<FileOutcome>,
    pub succeeded: usize,
    pub failed: usize,
    pub bytes_in: u64,
    pub bytes_out: u64,
}

impl BatchResult {
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }
}

pub struct BatchDriver {
    job: ConversionJob,
    pool: Option<rayon::ThreadPool>,
}

impl BatchDriver {
    pub fn new(job: ConversionJob) -> Result<Self> {
        let pool = if job.threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(job.threads)
                .build()
                .map_err(|e| {
                    PxError::ProcessingError(format!("failed to create thread pool: {e}"))
                })?;
            Some(pool)
        } else {
            None
        };

        Ok(Self { job, pool })
    }

    pub fn run(&self) -> Result<BatchResult> {
        let input_dir = &self.job.input;
        let output_dir = &self.job.output;
        self.validate_dirs(input_dir, output_dir)?;

        let files = self.collect_image_files(input_dir)?;
        if files.is_empty() {
            log::warn!("no image files found in {}", input_dir.display());
            return Ok(BatchResult::default());
        }

        println!("Found {} images to convert", files.len());
        std::fs::create_dir_all(output_dir)?;

        let pb = self.create_progress_bar(files.len());
        let pipeline = ConversionPipeline::new(&self.job);
        let done = AtomicUsize::new(0);
        let total = files.len();

        let convert_all = || -> Vec<FileOutcome> {
            files
                .par_iter()
                .map(|input| {
                    let output =
                        derive_output_path(input, input_dir, output_dir, self.job.format);
                    let outcome = match pipeline.convert(input, &output) {
                        Ok(report) => {
                            let finished = done.fetch_add(1, Ordering::SeqCst) + 1;
                            println!(
                                "[{}/{}] {} -> {}",
                                finished,
                                total,
                                input.display(),
                                output.display()
                            );
                            Ok(report)
                        }
                        Err(e) => {
                            eprintln!("{}: {e}", input.display());
                            Err(e.to_string())
                        }
                    };
                    pb.inc(1);
                    FileOutcome {
                        input: input.clone(),
                        output,
                        outcome,
                    }
                })
                .collect()
        };

        let outcomes = match &self.pool {
            Some(pool) => pool.install(convert_all),
            None => convert_all(),
        };
        pb.finish_and_clear();

        let mut result = BatchResult {
            outcomes,
            ..Default::default()
        };
        for outcome in &result.outcomes {
            match &outcome.outcome {
                Ok(report) => {
                    result.succeeded += 1;
                    result.bytes_in += report.bytes_in;
                    result.bytes_out += report.bytes_out;
                }
                Err(_) => result.failed += 1,
            }
        }

        Ok(result)
    }

    fn collect_image_files(&self, input_dir: &Path) -> Result<Vec<PathBuf>> {
        let walker = if self.job.recursive {
            WalkDir::new(input_dir)
        } else {
            WalkDir::new(input_dir).max_depth(1)
        };

        let mut files = Vec::new();
        for entry in walker {
            // Unlike per-file conversion failures, a failed enumeration is fatal.
            let entry = entry.map_err(|e| {
                let message = e.to_string();
                PxError::Io(
                    e.into_io_error()
                        .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, message)),
                )
            })?;
            if entry.file_type().is_file() && is_image_file(entry.path()) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }

    fn create_progress_bar(&self, total: usize) -> ProgressBar {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb
    }

    fn validate_dirs(&self, input_dir: &Path, output_dir: &Path) -> Result<()> {
        if !input_dir.is_dir() {
            return Err(PxError::InvalidParameter(format!(
                "input is not a directory: {}",
                input_dir.display()
            )));
        }

        if output_dir.exists() && !output_dir.is_dir() {
            return Err(PxError::InvalidParameter(format!(
                "output path exists but is not a directory: {}",
                output_dir.display()
            )));
        }

        if input_dir == output_dir {
            return Err(PxError::InvalidParameter(
                "input and output directories cannot be the same".to_string(),
            ));
        }

        Ok(())
    }
}
