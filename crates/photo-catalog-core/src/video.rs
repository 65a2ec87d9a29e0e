//! Video first-frame extraction.
//!
//! Delegates to the `ffprobe`/`ffmpeg` binaries rather than linking native
//! decoders. Frames land in the configured first-frame output directory as
//! `{video base name}.jpg`; an existing frame is never overwritten.

use log::{debug, info};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};
use crate::fsops;

/// Duration of the video in seconds, via ffprobe
pub fn probe_duration(video_path: &Path) -> Result<f32> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(video_path)
        .output()
        .map_err(|e| Error::Video(format!("failed to run ffprobe: {}", e)))?;

    if !output.status.success() {
        return Err(Error::Video(format!(
            "ffprobe failed for {}",
            video_path.display()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .trim()
        .parse::<f32>()
        .map_err(|_| Error::Video(format!("unparseable duration for {}", video_path.display())))
}

/// Extract the first frame of `video_path` into `output_dir` as a JPEG.
///
/// Returns `Ok(None)` without touching the filesystem when the frame file
/// already exists or the video is shorter than `min_duration_secs`; the frame
/// is never itself catalogued here.
pub fn extract_first_frame(
    video_path: &Path,
    output_dir: &Path,
    min_duration_secs: f32,
) -> Result<Option<PathBuf>> {
    if !fsops::file_exists(video_path) {
        return Err(Error::FileNotFound(video_path.to_path_buf()));
    }

    let base_name = video_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let frame_path = output_dir.join(format!("{}.jpg", base_name));

    if fsops::file_exists(&frame_path) {
        debug!("First frame already extracted: {}", frame_path.display());
        return Ok(None);
    }

    let duration = probe_duration(video_path)?;
    if duration < min_duration_secs {
        debug!(
            "Video {} is {:.2}s, below the {:.2}s threshold; no frame extracted",
            video_path.display(),
            duration,
            min_duration_secs
        );
        return Ok(None);
    }

    fsops::create_directory(output_dir)?;

    let output = Command::new("ffmpeg")
        .args(["-nostdin", "-loglevel", "error", "-i"])
        .arg(video_path)
        .args(["-frames:v", "1", "-q:v", "2"])
        .arg(&frame_path)
        .output()
        .map_err(|e| Error::Video(format!("failed to run ffmpeg: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Video(format!(
            "ffmpeg frame extraction failed for {}: {}",
            video_path.display(),
            stderr.trim()
        )));
    }

    info!("Extracted first frame {}", frame_path.display());
    Ok(Some(frame_path))
}

// -- Tests --
