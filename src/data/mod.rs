//! Loading points from the two-line record format:
//!
//! ```text
//! Zurich
//! 47.3769, 8.5417
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

use crate::store::PointStore;
use crate::Point;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read line: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse coordinates on line {line}: {text:?}")]
    MalformedCoordinates { line: usize, text: String },
    #[error("record for {name:?} on line {line} has no coordinate line")]
    TruncatedRecord { line: usize, name: String },
}

/// Parses `"<north>, <east>"`. Falls back to whitespace separation when the
/// line has no comma. Both values must be finite.
pub fn parse_coordinates(text: &str) -> Option<(f64, f64)> {
    let (north, east) = match text.split_once(',') {
        Some(pair) => pair,
        None => {
            let mut tokens = text.split_whitespace();
            let pair = (tokens.next()?, tokens.next()?);
            if tokens.next().is_some() {
                return None;
            }
            pair
        }
    };
    let north: f64 = north.trim().parse().ok()?;
    let east: f64 = east.trim().parse().ok()?;
    (north.is_finite() && east.is_finite()).then_some((north, east))
}

/// Reads every record from `reader` into a new store. Later records with an
/// already seen name replace the earlier coordinates.
pub fn read_points<R: BufRead>(reader: R) -> Result<PointStore, DataError> {
    let mut store = PointStore::new();
    let mut lines = numbered_lines(reader);

    while let Some(next) = lines.next() {
        let (name_line, name) = next?;
        if name.trim().is_empty() {
            continue;
        }

        let (coord_line, text) = match lines.next() {
            Some(next) => next?,
            None => {
                return Err(DataError::TruncatedRecord {
                    line: name_line,
                    name,
                })
            }
        };
        let (north, east) =
            parse_coordinates(&text).ok_or_else(|| DataError::MalformedCoordinates {
                line: coord_line,
                text: text.clone(),
            })?;

        if let Some(previous) = store.insert(Point::new(name, north, east)) {
            warn!(
                "duplicate point {:?} on line {}, replacing ({}, {})",
                previous.name, name_line, previous.north, previous.east
            );
        }
    }

    Ok(store)
}

pub fn read_store_from_file<P: AsRef<Path>>(path: P) -> Result<PointStore, DataError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DataError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let store = read_points(BufReader::new(file))?;
    info!("Loaded {} point(s) from {}", store.len(), path.display());
    Ok(store)
}

/// Lines numbered from 1, without `\n` or `\r\n` terminators. A line that
/// is not valid UTF-8 is decoded as Latin-1.
fn numbered_lines<R: BufRead>(
    mut reader: R,
) -> impl Iterator<Item = io::Result<(usize, String)>> {
    let mut number = 0;
    std::iter::from_fn(move || {
        let mut buf = Vec::new();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                number += 1;
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                }
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
                Some(Ok((number, decode_line(buf))))
            }
            Err(err) => Some(Err(err)),
        }
    })
}

fn decode_line(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|err| err.into_bytes().into_iter().map(char::from).collect())
}
