//! Job discovery and the sequential conversion loop.

use std::ffi::OsStr;
use std::path::PathBuf;

use tracing::debug;
use walkdir::WalkDir;

use crate::config::{Config, OutputFormat};
use crate::error::ConvertError;
use crate::ffmpeg::FFMPEG;
use crate::runner::CommandRunner;

/// Directory scans only pick up files with this extension, matched
/// case-sensitively.
pub const INPUT_EXTENSION: &str = "heic";

/// One (input file, output file) pair handed to the converter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl ConversionJob {
    fn new(input: PathBuf, format: OutputFormat) -> Self {
        // photo.heic -> photo.png; an extensionless input gets the
        // extension appended instead
        let output = input.with_extension(format.extension());
        Self { input, output }
    }
}

/// Map the validated input path to an ordered list of jobs.
///
/// A directory contributes its immediate `.heic` files in lexical order;
/// anything else (subdirectories, other extensions) is skipped. A single
/// file is one job no matter what its extension is.
pub fn plan_jobs(config: &Config) -> Result<Vec<ConversionJob>, ConvertError> {
    if !config.input_is_dir {
        return Ok(vec![ConversionJob::new(config.input.clone(), config.format)]);
    }

    let mut jobs = Vec::new();
    for entry in WalkDir::new(&config.input)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ConvertError::DirectoryList {
            path: config.input.clone(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension() == Some(OsStr::new(INPUT_EXTENSION)) {
            jobs.push(ConversionJob::new(entry.into_path(), config.format));
        } else {
            debug!(path = %entry.path().display(), "skipping non-heic entry");
        }
    }
    Ok(jobs)
}

/// Convert each job in order, one ffmpeg process at a time. The first
/// failure aborts the batch; outputs already written stay on disk.
pub fn run_jobs(runner: &dyn CommandRunner, jobs: &[ConversionJob]) -> Result<(), ConvertError> {
    for job in jobs {
        convert_one(runner, job)?;
        println!(
            "Converted {} to {} OK.",
            job.input.display(),
            job.output.display()
        );
    }
    Ok(())
}

fn convert_one(runner: &dyn CommandRunner, job: &ConversionJob) -> Result<(), ConvertError> {
    // -y: a rerun overwrites the previous output instead of prompting
    let args: [&OsStr; 4] = [
        "-y".as_ref(),
        "-i".as_ref(),
        job.input.as_os_str(),
        job.output.as_os_str(),
    ];
    let status = runner
        .stream(FFMPEG, &args)
        .map_err(|err| ConvertError::ConversionFailed {
            file: job.input.clone(),
            detail: format!("could not invoke {FFMPEG}: {err}"),
        })?;
    if !status.success() {
        return Err(ConvertError::ConversionFailed {
            file: job.input.clone(),
            detail: format!("{FFMPEG} exited with {status}"),
        });
    }
    Ok(())
}
