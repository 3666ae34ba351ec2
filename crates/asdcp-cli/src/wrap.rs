//! `asdcp wrap`: package pre-sliced essence frames into a track file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use asdcp_core::hex;
use asdcp_mxf::frame::{FrameBuffer, FrameType};
use asdcp_mxf::info::{LabelSet, WriterInfo};
use asdcp_mxf::jp2k::{self, StereoscopicPhase};
use asdcp_mxf::writer::DEFAULT_HEADER_SIZE;
use asdcp_mxf::{mpeg2, pcm};
use tracing::warn;
use uuid::Uuid;

use crate::{flag_value, parse_count, CliError};

#[derive(Debug, Default)]
struct Options {
    encrypt: bool,
    key: Option<[u8; 16]>,
    key_id: Option<Uuid>,
    asset_id: Option<Uuid>,
    smpte_labels: bool,
    no_hmac: bool,
    frame_limit: Option<u32>,
    picture_rate: u32,
    stereoscopic: bool,
    channel_format: Option<String>,
    inputs: Vec<PathBuf>,
}

fn parse(args: &[String]) -> Result<Options> {
    let mut opts = Options { picture_rate: 24, ..Options::default() };
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "-e" => opts.encrypt = true,
            "-E" => opts.encrypt = false,
            "-k" => opts.key = Some(hex::hex2bin(flag_value(args, &mut i, "-k")?)?),
            "-j" => {
                opts.key_id =
                    Some(Uuid::from_bytes(hex::hex2bin(flag_value(args, &mut i, "-j")?)?));
            }
            "-a" => {
                opts.asset_id =
                    Some(Uuid::from_bytes(hex::hex2bin(flag_value(args, &mut i, "-a")?)?));
            }
            "-L" => opts.smpte_labels = true,
            "-M" => opts.no_hmac = true,
            "-d" => opts.frame_limit = Some(parse_count(flag_value(args, &mut i, "-d")?, "-d")?),
            "-p" => opts.picture_rate = parse_count(flag_value(args, &mut i, "-p")?, "-p")?,
            "-3" => opts.stereoscopic = true,
            "-l" => opts.channel_format = Some(flag_value(args, &mut i, "-l")?.to_string()),
            flag if flag.starts_with('-') => {
                return Err(CliError::BadOptions(format!("unknown option {flag}")).into());
            }
            path => opts.inputs.push(PathBuf::from(path)),
        }
        i += 1;
    }

    if opts.inputs.len() < 2 {
        return Err(CliError::BadOptions("wrap needs at least one input and an output".into()).into());
    }
    if opts.encrypt && opts.key.is_none() {
        return Err(CliError::BadOptions("-e requires -k <hex key>".into()).into());
    }
    Ok(opts)
}

fn writer_info(opts: &Options) -> WriterInfo {
    WriterInfo {
        asset_uuid: opts.asset_id.unwrap_or_else(Uuid::nil),
        label_set: if opts.smpte_labels { LabelSet::Smpte } else { LabelSet::Interop },
        encrypted_essence: opts.encrypt,
        cryptographic_key_id: opts.key_id.unwrap_or_else(Uuid::nil),
        uses_hmac: !opts.no_hmac,
        ..WriterInfo::for_this_toolkit()
    }
}

fn channel_count(format: Option<&str>) -> Result<u32> {
    match format {
        None => Ok(2),
        Some("5.1") => Ok(6),
        Some("6.1") => Ok(7),
        Some("7.1") | Some("7.1DS") => Ok(8),
        Some("WTF") => Ok(1),
        Some(other) => Err(CliError::BadOptions(format!("unknown channel format {other:?}")).into()),
    }
}

/// Essence kind guessed from an input path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputKind {
    Jpeg2000,
    Mpeg2,
    Pcm,
}

fn input_kind(path: &Path) -> Result<InputKind> {
    if path.is_dir() {
        return Ok(InputKind::Jpeg2000);
    }
    match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
        Some("j2c" | "j2k" | "jp2") => Ok(InputKind::Jpeg2000),
        Some("ves" | "m2v" | "mpg") => Ok(InputKind::Mpeg2),
        Some("pcm" | "raw" | "wav") => Ok(InputKind::Pcm),
        _ => Err(CliError::Unsupported(path.display().to_string()).into()),
    }
}

/// Frame files inside a directory, sorted by name.
fn dir_frames(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut frames: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("reading {}", dir.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && !p.file_name().is_some_and(|n| n.to_string_lossy().starts_with('.')))
        .collect();
    frames.sort();
    Ok(frames)
}

pub fn run(args: &[String]) -> Result<()> {
    let opts = parse(args)?;
    let output = opts.inputs.last().expect("checked in parse").clone();
    let inputs = &opts.inputs[..opts.inputs.len() - 1];

    if opts.stereoscopic {
        return wrap_stereo(&opts, inputs, &output);
    }

    match input_kind(&inputs[0])? {
        InputKind::Jpeg2000 => wrap_jp2k(&opts, inputs, &output),
        InputKind::Mpeg2 => wrap_mpeg2(&opts, inputs, &output),
        InputKind::Pcm => wrap_pcm(&opts, inputs, &output),
    }
}

/// Expand inputs into one path per frame: directories are enumerated,
/// files pass through.
fn frame_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            paths.extend(dir_frames(input)?);
        } else {
            paths.push(input.clone());
        }
    }
    Ok(paths)
}

fn apply_limit<T>(mut frames: Vec<T>, limit: Option<u32>) -> Vec<T> {
    if let Some(limit) = limit {
        frames.truncate(limit as usize);
    }
    frames
}

fn wrap_jp2k(opts: &Options, inputs: &[PathBuf], output: &Path) -> Result<()> {
    let paths = apply_limit(frame_paths(inputs)?, opts.frame_limit);
    let desc = jp2k::PictureDescriptor {
        edit_rate: asdcp_mxf::types::Rational::new(opts.picture_rate as i32, 1),
        ..jp2k::PictureDescriptor::default()
    };

    let mut writer =
        jp2k::MxfWriter::open_write(output, writer_info(opts), &desc, DEFAULT_HEADER_SIZE, opts.key)?;

    for path in &paths {
        let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        writer.write_frame(&FrameBuffer::from_slice(&data))?;
    }
    writer.finalize()?;
    println!("{}: {} frames", output.display(), writer.frames_written());
    Ok(())
}

fn wrap_stereo(opts: &Options, inputs: &[PathBuf], output: &Path) -> Result<()> {
    if inputs.len() != 2 || !inputs[0].is_dir() || !inputs[1].is_dir() {
        return Err(
            CliError::BadOptions("-3 expects a left directory and a right directory".into()).into()
        );
    }
    let left = apply_limit(dir_frames(&inputs[0])?, opts.frame_limit);
    let right = apply_limit(dir_frames(&inputs[1])?, opts.frame_limit);
    if left.len() != right.len() {
        return Err(CliError::BadOptions(format!(
            "left eye has {} frames, right eye has {}",
            left.len(),
            right.len()
        ))
        .into());
    }

    let desc = jp2k::PictureDescriptor::default();
    let mut writer = jp2k::MxfStereoWriter::open_write(
        output,
        writer_info(opts),
        &desc,
        DEFAULT_HEADER_SIZE,
        opts.key,
    )?;

    for (l, r) in left.iter().zip(&right) {
        writer.write_frame(&FrameBuffer::from_slice(&fs::read(l)?), StereoscopicPhase::Left)?;
        writer.write_frame(&FrameBuffer::from_slice(&fs::read(r)?), StereoscopicPhase::Right)?;
    }
    writer.finalize()?;
    println!("{}: {} stereoscopic frame pairs", output.display(), left.len());
    Ok(())
}

fn wrap_mpeg2(opts: &Options, inputs: &[PathBuf], output: &Path) -> Result<()> {
    let paths = apply_limit(frame_paths(inputs)?, opts.frame_limit);
    let desc = mpeg2::VideoDescriptor::default();

    let mut writer = mpeg2::MxfWriter::open_write(
        output,
        writer_info(opts),
        &desc,
        DEFAULT_HEADER_SIZE,
        opts.key,
    )?;

    for path in &paths {
        let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let mut frame = FrameBuffer::from_slice(&data);
        // pre-sliced inputs carry no picture-type metadata; treat each
        // frame as an independent closed GOP
        frame.frame_type = FrameType::I;
        frame.gop_start = true;
        frame.closed_gop = true;
        writer.write_frame(&frame)?;
    }
    writer.finalize()?;
    println!("{}: {} frames", output.display(), writer.frames_written());
    Ok(())
}

fn wrap_pcm(opts: &Options, inputs: &[PathBuf], output: &Path) -> Result<()> {
    let desc = pcm::AudioDescriptor {
        edit_rate: asdcp_mxf::types::Rational::new(opts.picture_rate as i32, 1),
        channel_count: channel_count(opts.channel_format.as_deref())?,
        ..pcm::AudioDescriptor::default()
    };
    let desc = pcm::AudioDescriptor {
        block_align: (desc.channel_count * 3) as u16,
        avg_bps: 48_000 * desc.channel_count * 3,
        ..desc
    };

    let mut writer =
        pcm::MxfWriter::open_write(output, writer_info(opts), &desc, DEFAULT_HEADER_SIZE, opts.key)?;
    let frame_size = writer.frame_size() as usize;

    let mut written = 0u32;
    'inputs: for input in inputs {
        let data = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
        for chunk in data.chunks(frame_size) {
            if opts.frame_limit.is_some_and(|limit| written >= limit) {
                break 'inputs;
            }
            if chunk.len() < frame_size {
                warn!(got = chunk.len(), want = frame_size, "short last PCM frame, truncating");
                break;
            }
            writer.write_frame(&FrameBuffer::from_slice(chunk))?;
            written += 1;
        }
    }
    writer.finalize()?;
    println!("{}: {} frames", output.display(), written);
    Ok(())
}
