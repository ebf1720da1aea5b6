//! Startup check that the system ffmpeg exists and can read HEIC/HEIF.

use std::ffi::OsStr;

use tracing::debug;

use crate::error::ConvertError;
use crate::runner::CommandRunner;

pub const FFMPEG: &str = "ffmpeg";

/// HEIC/HEIF containers carry HEVC-encoded images, so this decoder must be
/// present in the ffmpeg build for conversion to work at all.
pub const REQUIRED_DECODER: &str = "hevc";

/// Fail fast if ffmpeg is missing from PATH or was built without the HEVC
/// decoder. Reads the environment only; nothing is converted here.
pub fn verify_requirements(runner: &dyn CommandRunner) -> Result<(), ConvertError> {
    let binary = runner
        .locate(FFMPEG)
        .ok_or(ConvertError::ConverterNotFound(FFMPEG))?;
    debug!(path = %binary.display(), "found converter binary");

    let args: [&OsStr; 2] = ["-hide_banner".as_ref(), "-decoders".as_ref()];
    let output = runner
        .capture(FFMPEG, &args)
        .map_err(|err| ConvertError::CapabilityQuery {
            converter: FFMPEG,
            detail: err.to_string(),
        })?;
    if !output.status.success() {
        return Err(ConvertError::CapabilityQuery {
            converter: FFMPEG,
            detail: format!("{FFMPEG} exited with {}", output.status),
        });
    }

    let listing = String::from_utf8_lossy(&output.stdout);
    if !decoder_listed(&listing, REQUIRED_DECODER) {
        return Err(ConvertError::UnsupportedCodec {
            converter: FFMPEG,
            codec: REQUIRED_DECODER,
        });
    }

    println!("Converter requirements are met.");
    Ok(())
}

/// `ffmpeg -decoders` prints one decoder per line after a header, e.g.
/// ` V....D hevc                 HEVC (High Efficiency Video Coding)`.
/// The name is the second whitespace-separated column and must match
/// exactly; `hevc_cuvid` and friends do not count.
fn decoder_listed(listing: &str, name: &str) -> bool {
    listing
        .lines()
        .any(|line| line.split_whitespace().nth(1) == Some(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::fake::{exit_status, FakeRunner};
    use std::io;
    use std::process::Output;

    const DECODERS_WITH_HEVC: &str = "\
Decoders:
 V..... = Video
 ------
 V....D h264                 H.264 / AVC / MPEG-4 AVC
 V....D hevc                 HEVC (High Efficiency Video Coding)
 V....D hevc_cuvid           Nvidia CUVID HEVC decoder (codec hevc)
 A....D aac                  AAC (Advanced Audio Coding)
";

    const DECODERS_WITHOUT_HEVC: &str = "\
Decoders:
 V..... = Video
 ------
 V....D h264                 H.264 / AVC / MPEG-4 AVC
 A....D aac                  AAC (Advanced Audio Coding)
";

    fn capture_output(status_code: i32, stdout: &str) -> Output {
        Output {
            status: exit_status(status_code),
            stdout: stdout.as_bytes().to_vec(),
            stderr: Vec::new(),
        }
    }

    #[test]
    fn passes_when_hevc_is_listed() {
        let runner = FakeRunner::located_at("/usr/bin/ffmpeg");
        runner.push_capture(Ok(capture_output(0, DECODERS_WITH_HEVC)));

        verify_requirements(&runner).unwrap();

        let calls = runner.recorded_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "ffmpeg");
        assert_eq!(calls[0].args, ["-hide_banner", "-decoders"]);
    }

    #[test]
    fn missing_binary_fails_before_any_query() {
        let runner = FakeRunner::default();

        let err = verify_requirements(&runner).unwrap_err();
        assert!(matches!(err, ConvertError::ConverterNotFound("ffmpeg")));
        assert!(runner.recorded_calls().is_empty());
    }

    #[test]
    fn failed_query_spawn_is_capability_query() {
        let runner = FakeRunner::located_at("/usr/bin/ffmpeg");
        runner.push_capture(Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")));

        let err = verify_requirements(&runner).unwrap_err();
        assert!(matches!(err, ConvertError::CapabilityQuery { .. }));
    }

    #[test]
    fn nonzero_query_exit_is_capability_query() {
        let runner = FakeRunner::located_at("/usr/bin/ffmpeg");
        runner.push_capture(Ok(capture_output(1, "")));

        let err = verify_requirements(&runner).unwrap_err();
        assert!(matches!(err, ConvertError::CapabilityQuery { .. }));
    }

    #[test]
    fn listing_without_hevc_is_unsupported_codec() {
        let runner = FakeRunner::located_at("/usr/bin/ffmpeg");
        runner.push_capture(Ok(capture_output(0, DECODERS_WITHOUT_HEVC)));

        let err = verify_requirements(&runner).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::UnsupportedCodec { codec: "hevc", .. }
        ));
    }

    #[test]
    fn decoder_match_is_exact_on_the_name_column() {
        // hevc_cuvid alone must not satisfy the plain hevc requirement
        let only_cuvid = " V....D hevc_cuvid           Nvidia CUVID HEVC decoder\n";
        assert!(!decoder_listed(only_cuvid, REQUIRED_DECODER));
        assert!(decoder_listed(DECODERS_WITH_HEVC, REQUIRED_DECODER));
    }
}
