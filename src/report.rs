//! Duplicate-filename report generation
//!
//! Three-stage pipeline: fetch all keys under a prefix, group them by final
//! path segment, then write the groups that occur at two or more paths as a
//! CSV report with a dynamically sized header.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::cloud::S3Lister;
//! use dupescan::progress::ConsoleProgress;
//! use dupescan::report::generate_duplicate_report;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let lister = S3Lister::builder().build().await?;
//!
//!     let outcome = generate_duplicate_report(
//!         &lister,
//!         "my-bucket",
//!         "datasets/",
//!         "data/duplicate_filenames.csv",
//!         &ConsoleProgress,
//!     )
//!     .await?;
//!
//!     match outcome {
//!         Some(path) => println!("Report: {}", path.display()),
//!         None => println!("No duplicate filenames found."),
//!     }
//!     Ok(())
//! }
//! ```

use crate::error::Result;
use crate::lister::{list_keys, ObjectLister};
use crate::progress::ProgressObserver;
use indexmap::IndexMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Extract the filename from an object key
///
/// The filename is everything after the last `/`. A key without a separator
/// is its own filename; an empty key or a trailing-slash key (directory
/// marker) yields the empty string.
pub fn filename_of(key: &str) -> &str {
    match key.rfind('/') {
        Some(idx) => &key[idx + 1..],
        None => key,
    }
}

/// Group object keys by filename, preserving first-seen order
///
/// Every key lands in exactly one group. Keys whose filename extracts to the
/// empty string (empty keys, directory markers) group together under `""`
/// rather than being dropped, so the grouping stays a partition of the input.
pub fn group_by_filename(
    keys: Vec<String>,
    progress: &dyn ProgressObserver,
) -> IndexMap<String, Vec<String>> {
    let total = keys.len();
    let mut groups: IndexMap<String, Vec<String>> = IndexMap::new();

    for (done, key) in keys.into_iter().enumerate() {
        let filename = filename_of(&key).to_string();
        groups.entry(filename).or_default().push(key);
        progress.keys_grouped(done + 1, total);
    }

    groups
}

/// Retain only filenames that occur at two or more paths
pub fn filter_duplicates(
    mut groups: IndexMap<String, Vec<String>>,
) -> IndexMap<String, Vec<String>> {
    groups.retain(|_, paths| paths.len() >= 2);
    groups
}

/// Write one CSV row with RFC 4180 quoting
///
/// Fields containing a comma, quote, or line break are quoted, with embedded
/// quotes doubled. Everything else is written verbatim.
fn write_csv_row<W: Write>(out: &mut W, fields: &[&str]) -> io::Result<()> {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.write_all(b",")?;
        }
        if field.contains([',', '"', '\n', '\r']) {
            out.write_all(b"\"")?;
            out.write_all(field.replace('"', "\"\"").as_bytes())?;
            out.write_all(b"\"")?;
        } else {
            out.write_all(field.as_bytes())?;
        }
    }
    out.write_all(b"\n")
}

/// Build the header row: `Filename, File Path 1, ..., File Path max_paths`
fn header_columns(max_paths: usize) -> Vec<String> {
    let mut buffer = itoa::Buffer::new();
    let mut columns = Vec::with_capacity(max_paths + 1);
    columns.push("Filename".to_string());
    for i in 1..=max_paths {
        let mut column = String::from("File Path ");
        column.push_str(buffer.format(i));
        columns.push(column);
    }
    columns
}

/// Write the duplicate groups to a CSV file at `output_path`
///
/// Creates the parent directory if missing. Rows are ragged: a group with
/// fewer paths than the widest group writes a shorter row, with no padding
/// fields.
fn write_report(
    duplicates: &IndexMap<String, Vec<String>>,
    output_path: &Path,
    progress: &dyn ProgressObserver,
) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let max_paths = duplicates.values().map(Vec::len).max().unwrap_or(2);
    let header = header_columns(max_paths);

    let mut out = BufWriter::new(File::create(output_path)?);
    let header_refs: Vec<&str> = header.iter().map(String::as_str).collect();
    write_csv_row(&mut out, &header_refs)?;

    let total = duplicates.len();
    for (done, (filename, paths)) in duplicates.iter().enumerate() {
        let mut fields: Vec<&str> = Vec::with_capacity(paths.len() + 1);
        fields.push(filename);
        fields.extend(paths.iter().map(String::as_str));
        write_csv_row(&mut out, &fields)?;
        progress.rows_written(done + 1, total);
    }

    out.flush()?;
    Ok(())
}

/// Scan a bucket prefix and write a CSV report of duplicate filenames
///
/// Returns `Ok(Some(path))` when a report was written, or `Ok(None)` when no
/// filename occurred more than once — in that case no file is created and
/// any existing file at `output_path` is left untouched.
///
/// Listing and filesystem errors propagate unchanged; a failed run restarts
/// from scratch.
pub async fn generate_duplicate_report<L: ObjectLister>(
    lister: &L,
    bucket: &str,
    prefix: &str,
    output_path: impl AsRef<Path>,
    progress: &dyn ProgressObserver,
) -> Result<Option<PathBuf>> {
    let keys = list_keys(prefix, lister, bucket, progress).await?;

    let groups = group_by_filename(keys, progress);
    let duplicates = filter_duplicates(groups);

    if duplicates.is_empty() {
        return Ok(None);
    }

    let output_path = output_path.as_ref();
    write_report(&duplicates, output_path, progress)?;
    Ok(Some(output_path.to_path_buf()))
}
