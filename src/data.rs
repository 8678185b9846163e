use std::io::{Cursor, Read};

use anyhow::Result;
use csv::ReaderBuilder;
use flate2::read::GzDecoder;
use serde::Deserialize;

use crate::types::{parse_or, SphericalCoord, Star};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

// Star and track files may arrive gzipped; dispatch on the signature
// instead of the file name.
fn maybe_gunzip(bytes: Vec<u8>) -> Box<dyn Read> {
    if bytes.starts_with(&GZIP_MAGIC) {
        Box::new(GzDecoder::new(Cursor::new(bytes)))
    } else {
        Box::new(Cursor::new(bytes))
    }
}

#[derive(Debug, Deserialize)]
struct StarRow {
    id: String,
    ra: String,
    dec: String,
    mag: String,
}

#[derive(Debug, Deserialize)]
struct TrackRow {
    ra: String,
    dec: String,
}

fn parse_stars<R: Read>(reader: R) -> Result<Vec<Star>> {
    let mut rdr = ReaderBuilder::new().from_reader(reader);
    let mut out = Vec::new();
    for rec in rdr.deserialize() {
        let row: StarRow = rec?;
        let ra_deg: f64 = parse_or(&row.ra, 0.0);
        let dec_deg: f64 = parse_or(&row.dec, 0.0);
        out.push(Star {
            id: row.id,
            pos: SphericalCoord::from_degrees(ra_deg, dec_deg),
            mag: parse_or(&row.mag, 99.0),
        });
    }
    Ok(out)
}

fn parse_track<R: Read>(reader: R) -> Result<Vec<SphericalCoord>> {
    let mut rdr = ReaderBuilder::new().from_reader(reader);
    let mut out = Vec::new();
    for rec in rdr.deserialize() {
        let row: TrackRow = rec?;
        out.push(SphericalCoord::from_degrees(
            parse_or(&row.ra, 0.0),
            parse_or(&row.dec, 0.0),
        ));
    }
    Ok(out)
}

/// Load a star list (`id,ra,dec,mag`, degrees), optionally gzipped.
pub fn load_stars(path: &str) -> Result<Vec<Star>> {
    let bytes = std::fs::read(path)?;
    parse_stars(maybe_gunzip(bytes))
}

/// Load an ordered track (`ra,dec`, degrees), optionally gzipped.
pub fn load_track(path: &str) -> Result<Vec<SphericalCoord>> {
    let bytes = std::fs::read(path)?;
    parse_track(maybe_gunzip(bytes))
}
