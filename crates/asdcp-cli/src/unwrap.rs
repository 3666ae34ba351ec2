//! `asdcp unwrap`: extract essence frames to per-frame files.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use asdcp_core::hex;
use asdcp_mxf::frame::FrameBuffer;
use asdcp_mxf::jp2k::{self, StereoscopicPhase};
use asdcp_mxf::{essence_type, mpeg2, pcm, EssenceType};

use crate::{flag_value, parse_count, CliError};

#[derive(Debug, Default)]
struct Options {
    key: Option<[u8; 16]>,
    start_frame: u32,
    frame_count: Option<u32>,
    input: PathBuf,
    prefix: String,
}

fn parse(args: &[String]) -> Result<Options> {
    let mut opts = Options::default();
    let mut positional = Vec::new();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "-k" => opts.key = Some(hex::hex2bin(flag_value(args, &mut i, "-k")?)?),
            "-f" => opts.start_frame = parse_count(flag_value(args, &mut i, "-f")?, "-f")?,
            "-d" => opts.frame_count = Some(parse_count(flag_value(args, &mut i, "-d")?, "-d")?),
            flag if flag.starts_with('-') => {
                return Err(CliError::BadOptions(format!("unknown option {flag}")).into());
            }
            path => positional.push(path.to_string()),
        }
        i += 1;
    }

    let [input, prefix] = positional.as_slice() else {
        return Err(CliError::BadOptions("unwrap needs <input.mxf> <prefix>".into()).into());
    };
    opts.input = PathBuf::from(input);
    opts.prefix = prefix.clone();
    Ok(opts)
}

fn frame_range(opts: &Options, total: i64) -> Result<std::ops::Range<u32>> {
    let total = total.max(0) as u32;
    if opts.start_frame >= total {
        return Err(asdcp_core::Error::OutOfRange(opts.start_frame).into());
    }
    let end = match opts.frame_count {
        Some(count) => (opts.start_frame + count).min(total),
        None => total,
    };
    Ok(opts.start_frame..end)
}

fn write_frame(prefix: &str, n: u32, suffix: &str, frame: &FrameBuffer) -> Result<()> {
    let path = format!("{prefix}{n:06}.{suffix}");
    fs::write(&path, frame.as_slice()).with_context(|| format!("writing {path}"))
}

/// Unwrap produces plaintext; an encrypted file without a key cannot be
/// decrypted.
fn require_key(info: &asdcp_mxf::WriterInfo, opts: &Options) -> Result<()> {
    if info.encrypted_essence && opts.key.is_none() {
        return Err(asdcp_core::Error::CryptoCtx.into());
    }
    Ok(())
}

pub fn run(args: &[String]) -> Result<()> {
    let opts = parse(args)?;

    match essence_type(&opts.input)? {
        EssenceType::Mpeg2Ves => unwrap_mpeg2(&opts),
        EssenceType::Jpeg2000 => unwrap_jp2k(&opts),
        EssenceType::Jpeg2000Stereo => unwrap_stereo(&opts),
        EssenceType::Pcm24bit48k | EssenceType::Pcm24bit96k => unwrap_pcm(&opts),
        EssenceType::DcData | EssenceType::Unknown => {
            Err(CliError::Unsupported(opts.input.display().to_string()).into())
        }
    }
}

fn unwrap_mpeg2(opts: &Options) -> Result<()> {
    let mut reader = mpeg2::MxfReader::open_read(&opts.input)?;
    if let Some(key) = &opts.key {
        reader.load_key(key);
    }
    require_key(reader.info(), opts)?;

    let mut frame = FrameBuffer::new();
    let range = frame_range(opts, reader.frames())?;
    let count = range.len();
    for n in range {
        reader.read_frame(n, &mut frame)?;
        write_frame(&opts.prefix, n, "ves", &frame)?;
    }
    println!("{}: {count} frames", opts.input.display());
    Ok(())
}

fn unwrap_jp2k(opts: &Options) -> Result<()> {
    let mut reader = jp2k::MxfReader::open_read(&opts.input)?;
    if let Some(key) = &opts.key {
        reader.load_key(key);
    }
    require_key(reader.info(), opts)?;

    let mut frame = FrameBuffer::new();
    let range = frame_range(opts, reader.frames())?;
    let count = range.len();
    for n in range {
        reader.read_frame(n, &mut frame)?;
        write_frame(&opts.prefix, n, "j2c", &frame)?;
    }
    println!("{}: {count} frames", opts.input.display());
    Ok(())
}

fn unwrap_stereo(opts: &Options) -> Result<()> {
    let mut reader = jp2k::MxfStereoReader::open_read(&opts.input)?;
    if let Some(key) = &opts.key {
        reader.load_key(key);
    }
    require_key(reader.info(), opts)?;

    let mut frame = FrameBuffer::new();
    let range = frame_range(opts, reader.frame_pairs())?;
    let count = range.len();
    for n in range {
        for (phase, eye) in [(StereoscopicPhase::Left, "L"), (StereoscopicPhase::Right, "R")] {
            reader.read_frame(n, phase, &mut frame)?;
            let path = format!("{}{eye}{n:06}.j2c", opts.prefix);
            fs::write(&path, frame.as_slice()).with_context(|| format!("writing {path}"))?;
        }
    }
    println!("{}: {count} stereoscopic frame pairs", opts.input.display());
    Ok(())
}

fn unwrap_pcm(opts: &Options) -> Result<()> {
    use std::io::Write;

    let mut reader = pcm::MxfReader::open_read(&opts.input)?;
    if let Some(key) = &opts.key {
        reader.load_key(key);
    }
    require_key(reader.info(), opts)?;

    // a single raw interleaved payload; WAV re-packaging is left to the
    // tools downstream
    let path = format!("{}.pcm", opts.prefix.trim_end_matches('.'));
    let mut out = fs::File::create(&path).with_context(|| format!("creating {path}"))?;

    let mut frame = FrameBuffer::new();
    let range = frame_range(opts, reader.frames())?;
    let count = range.len();
    for n in range {
        reader.read_frame(n, &mut frame)?;
        out.write_all(frame.as_slice())?;
    }
    println!("{}: {count} frames -> {path}", opts.input.display());
    Ok(())
}
