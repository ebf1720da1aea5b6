use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::error::ConvertError;

/// Target image format, fixed to the three ffmpeg output names we accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpg,
    Jpeg,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<Self, ConvertError> {
        match value {
            "png" => Ok(Self::Png),
            "jpg" => Ok(Self::Jpg),
            "jpeg" => Ok(Self::Jpeg),
            _ => Err(ConvertError::InvalidFormat(value.to_string())),
        }
    }

    /// Extension used for derived output paths, identical to the flag value.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Immutable run configuration, built once from the raw flag values and
/// passed by reference to every later stage.
#[derive(Debug, Clone)]
pub struct Config {
    pub format: OutputFormat,
    pub input: PathBuf,
    pub input_is_dir: bool,
}

impl Config {
    /// Validate the raw `--output` and `--input` values.
    ///
    /// The format is checked first so that a bad format never touches the
    /// filesystem. The input path must stat, then canonicalize.
    pub fn resolve(output: &str, input: &str) -> Result<Self, ConvertError> {
        let format = OutputFormat::parse(output)?;

        let metadata = fs::metadata(input).map_err(|source| ConvertError::PathNotFound {
            path: PathBuf::from(input),
            source,
        })?;
        let input = fs::canonicalize(input).map_err(|source| ConvertError::PathResolution {
            path: PathBuf::from(input),
            source,
        })?;

        println!("Input path: {}", input.display());
        println!("Output format: {format}");

        Ok(Self {
            format,
            input,
            input_is_dir: metadata.is_dir(),
        })
    }
}
