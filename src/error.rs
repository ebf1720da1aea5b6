use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a run. There is no recovery anywhere: the
/// first error propagates straight to `main`, which prints it and exits.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("invalid output format '{0}': use 'png', 'jpg' or 'jpeg'")]
    InvalidFormat(String),

    #[error("input path '{}' not found", path.display())]
    PathNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not resolve '{}' to an absolute path", path.display())]
    PathResolution {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{0}' was not found on PATH; install ffmpeg to convert HEIC/HEIF files")]
    ConverterNotFound(&'static str),

    #[error("could not query '{converter} -decoders': {detail}")]
    CapabilityQuery {
        converter: &'static str,
        detail: String,
    },

    #[error("'{converter}' has no '{codec}' decoder, so it cannot read HEIC/HEIF input")]
    UnsupportedCodec {
        converter: &'static str,
        codec: &'static str,
    },

    #[error("could not list directory '{}'", path.display())]
    DirectoryList {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to convert '{}': {detail}", file.display())]
    ConversionFailed { file: PathBuf, detail: String },
}
