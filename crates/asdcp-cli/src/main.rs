//! asdcp CLI - wrap, unwrap and inspect AS-DCP track files.
//!
//! Essence inputs are pre-sliced frames (one file per picture frame, a raw
//! PCM payload for sound); bytestream parsing belongs to the upstream
//! tools that produce them.

mod info;
mod unwrap;
mod wrap;

use std::env;
use std::process::ExitCode;

use anyhow::Result;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit code for malformed command lines.
const EXIT_BAD_OPTIONS: u8 = 3;
/// Exit code for files of an unsupported essence type.
const EXIT_UNSUPPORTED: u8 = 5;

const HELP: &str = r#"
asdcp - AS-DCP track file wrap/unwrap tool

USAGE:
    asdcp wrap [OPTIONS] <inputs>... <output.mxf>
    asdcp unwrap [OPTIONS] <input.mxf> <prefix>
    asdcp info [--json] <input.mxf>

WRAP:
    asdcp wrap frame0.j2c frame1.j2c out.mxf     # JPEG 2000 picture
    asdcp wrap -3 left/ right/ out.mxf           # stereoscopic JPEG 2000
    asdcp wrap -p 24 audio.pcm out.mxf           # 24-bit PCM at 24 fps
    asdcp wrap -e -k <hex16> video.ves out.mxf   # encrypted MPEG-2

WRAP OPTIONS:
    -e                  Encrypt essence (requires -k)
    -E                  Do not encrypt essence (default)
    -k <HEX>            AES-128 key, 32 hex digits
    -j <HEX>            Cryptographic key id (UUID hex)
    -a <HEX>            Asset UUID (default: random)
    -L                  Use SMPTE labels (default: MXF Interop)
    -M                  Do not create HMAC values
    -d <N>              Wrap at most N frames
    -p <RATE>           Picture rate for PCM muxing (default: 24)
    -3                  Stereoscopic JPEG 2000: inputs are L and R dirs
    -l <FMT>            PCM channel format: 5.1, 6.1, 7.1, 7.1DS, WTF

UNWRAP:
    asdcp unwrap movie.mxf frames/pic_           # frames/pic_000000.j2c ...

UNWRAP OPTIONS:
    -k <HEX>            AES-128 key for encrypted files
    -f <N>              First frame to extract (default: 0)
    -d <N>              Number of frames to extract (default: all)

EXIT CODES:
    0  success
    1  internal error
    3  bad options
    5  unsupported file type
"#;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    let first = args.first().map(String::as_str);
    if args.is_empty() || matches!(first, Some("-h" | "--help" | "help")) {
        print!("{}", HELP.trim_start());
        return ExitCode::SUCCESS;
    }
    if matches!(first, Some("-v" | "--version" | "-V")) {
        println!("asdcp {VERSION}");
        return ExitCode::SUCCESS;
    }

    let result = match args[0].as_str() {
        "wrap" => wrap::run(&args[1..]),
        "unwrap" => unwrap::run(&args[1..]),
        "info" => info::run(&args[1..]),
        other => Err(CliError::BadOptions(format!("unknown command {other:?}")).into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            match err.downcast_ref::<CliError>() {
                Some(CliError::BadOptions(_)) => ExitCode::from(EXIT_BAD_OPTIONS),
                Some(CliError::Unsupported(_)) => ExitCode::from(EXIT_UNSUPPORTED),
                None => ExitCode::FAILURE,
            }
        }
    }
}

/// Errors with a dedicated exit code.
#[derive(Debug)]
pub enum CliError {
    BadOptions(String),
    Unsupported(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::BadOptions(msg) => write!(f, "{msg}"),
            CliError::Unsupported(msg) => write!(f, "unsupported file type: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Take the value following a flag, or fail with a bad-options error.
pub fn flag_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| CliError::BadOptions(format!("{flag} requires a value")).into())
}

pub fn parse_count(text: &str, flag: &str) -> Result<u32> {
    text.parse()
        .map_err(|_| CliError::BadOptions(format!("{flag} expects a number, got {text:?}")).into())
}
