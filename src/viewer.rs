//! Local walk-through of every crawled profile.
//!
//! Prints a short summary per profile, decodes its portrait and optionally
//! writes the portrait files out. With the `window` feature the decoded
//! portraits are also shown one after another in a desktop window.

use crate::error::Result;
use crate::results::{ProfileRecord, Snapshot};
use crate::utils::sanitize_filename;
use image::RgbaImage;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Outcome of a walk-through
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ShowSummary {
    pub profiles: usize,
    pub portraits_decoded: usize,
    pub portraits_written: Vec<PathBuf>,
}

fn write_stats<W: Write>(record: &ProfileRecord, out: &mut W) -> std::io::Result<()> {
    let name = record.name();
    writeln!(out, "{name} has {} events", record.events().len())?;
    writeln!(out, "{name} has {} related people", record.related_names().len())?;
    writeln!(out, "{name} has {} apartments", record.organizations().len())?;
    writeln!(out, "{name} has {} subjects", record.subjects().len())?;
    Ok(())
}

/// A decoded portrait and whose it is
#[derive(Debug, Clone)]
pub struct Portrait {
    pub name: String,
    pub image: RgbaImage,
}

/// Decodes a record's portrait; undecodable bytes are logged and skipped
pub fn decode_portrait(record: &ProfileRecord) -> Option<RgbaImage> {
    match image::load_from_memory(record.portrait()) {
        Ok(img) => {
            ::log::info!("{}: portrait {}x{}", record.name(), img.width(), img.height());
            Some(img.to_rgba8())
        }
        Err(e) => {
            ::log::warn!("{}: portrait could not be decoded: {}", record.name(), e);
            None
        }
    }
}

/// Every decodable portrait, in crawl order
pub fn portraits(snapshot: &Snapshot) -> Vec<Portrait> {
    snapshot
        .records()
        .filter_map(|record| {
            decode_portrait(record).map(|image| Portrait {
                name: record.name().to_string(),
                image,
            })
        })
        .collect()
}

/// `<dir>/<name>.jpg`, or `<name>-2.jpg` and so on when two names sanitize alike
fn portrait_path(dir: &Path, name: &str, taken: &mut HashSet<PathBuf>) -> PathBuf {
    let stem = sanitize_filename(name);
    let mut path = dir.join(format!("{stem}.jpg"));
    let mut n = 2;
    while !taken.insert(path.clone()) {
        path = dir.join(format!("{stem}-{n}.jpg"));
        n += 1;
    }
    path
}

/// Goes through the profiles in crawl order
pub fn show_all<W: Write>(snapshot: &Snapshot, out: &mut W, portrait_dir: Option<&Path>) -> Result<ShowSummary> {
    if let Some(dir) = portrait_dir {
        fs::create_dir_all(dir)?;
    }

    let mut summary = ShowSummary::default();
    let mut taken = HashSet::new();
    for record in snapshot.records() {
        summary.profiles += 1;
        write_stats(record, out)?;

        if decode_portrait(record).is_none() {
            continue;
        }
        summary.portraits_decoded += 1;

        if let Some(dir) = portrait_dir {
            let path = portrait_path(dir, record.name(), &mut taken);
            fs::write(&path, record.portrait())?;
            ::log::debug!("Wrote {}", path.display());
            summary.portraits_written.push(path);
        }
    }

    out.flush()?;
    Ok(summary)
}

/// Shows the decoded portraits in a desktop window, in crawl order
#[cfg(feature = "window")]
pub fn show_window(snapshot: &Snapshot, delay: std::time::Duration) -> Result<()> {
    crate::window::show_portraits(portraits(snapshot), delay)
}

#[cfg(not(feature = "window"))]
pub fn show_window(_snapshot: &Snapshot, _delay: std::time::Duration) -> Result<()> {
    Err(crate::error::CrawlError::Viewer(
        "built without the `window` feature".to_string(),
    ))
}
