//! Encoding of histogram rows as columnar JSON and MessagePack.
//!
//! The wire shape mirrors the three output columns of the histogram
//! table: `counts`, `bin_min` and `bin_max`. JSON has no literal for NaN,
//! so the endpoints of empty bins are encoded as `null` and restored as
//! NaN on the way back.

extern crate serde;

use crate::bins::HistogramBin;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::io::{Read, Write};
use std::iter::zip;

#[derive(Serialize, Deserialize, Debug)]
struct RowsJson {
    counts: Vec<u64>,
    bin_min: Vec<Option<f64>>,
    bin_max: Vec<Option<f64>>,
}

impl From<&[HistogramBin]> for RowsJson {
    fn from(bins: &[HistogramBin]) -> Self {
        RowsJson {
            counts: bins.iter().map(|bin| bin.count).collect(),
            bin_min: bins.iter().map(|bin| keep_finite(bin.min)).collect(),
            bin_max: bins.iter().map(|bin| keep_finite(bin.max)).collect(),
        }
    }
}

impl From<RowsJson> for Vec<HistogramBin> {
    fn from(rows: RowsJson) -> Self {
        zip(rows.counts, zip(rows.bin_min, rows.bin_max))
            .enumerate()
            .map(|(index, (count, (min, max)))| HistogramBin {
                index,
                count,
                min: min.unwrap_or(f64::NAN),
                max: max.unwrap_or(f64::NAN),
            })
            .collect()
    }
}

#[inline]
fn keep_finite(value: f64) -> Option<f64> {
    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}

/// Transform histogram rows to a JSON string.
///
/// # Examples
///
/// ```
/// use colhist::HistogramBin;
/// use colhist::serde::to_json;
///
/// let bins = vec![HistogramBin::new(0, 2, 1.0, 2.0), HistogramBin::empty(1)];
/// assert_eq!(
///     to_json(&bins),
///     r#"{"counts":[2,0],"bin_min":[1.0,null],"bin_max":[2.0,null]}"#
/// );
/// ```
pub fn to_json(bins: &[HistogramBin]) -> String {
    // a plain struct of vectors cannot fail to serialize
    serde_json::to_string(&RowsJson::from(bins)).unwrap()
}

/// Read histogram rows from a JSON string.
///
/// The JSON needs a numeric `"counts"` array and `"bin_min"`/`"bin_max"`
/// arrays of the same length, where `null` marks the endpoints of an
/// empty bin. Bin indexes are assigned by position.
///
/// # Panics
///
/// Panics when the string is not valid JSON of this shape; use
/// [`read_json`] for a fallible variant.
///
/// # Examples
///
/// ```
/// use colhist::HistogramBin;
/// use colhist::serde::from_json;
///
/// let bins = from_json(
///     r#"{
///         "counts":  [2, 0],
///         "bin_min": [1.0, null],
///         "bin_max": [2.0, null]
///     }"#,
/// );
/// assert_eq!(bins, vec![HistogramBin::new(0, 2, 1.0, 2.0), HistogramBin::empty(1)]);
/// ```
pub fn from_json(json: &str) -> Vec<HistogramBin> {
    let rows: RowsJson = serde_json::from_str(json).unwrap();
    rows.into()
}

/// Read histogram rows as JSON using a reader.
///
/// See [`from_json`] for the expected shape.
pub fn read_json<R>(reader: R) -> Result<Vec<HistogramBin>, Box<dyn Error>>
where
    R: Read,
{
    let rows: RowsJson = serde_json::from_reader(reader).map_err(Box::new)?;
    Ok(rows.into())
}

/// Write histogram rows as JSON using a writer.
///
/// See [`from_json`] for the shape that is produced.
pub fn write_json<W>(bins: &[HistogramBin], writer: &mut W) -> Result<(), Box<dyn Error>>
where
    W: Write,
{
    write!(writer, "{}", to_json(bins)).map_err(Box::new)?;
    Ok(())
}

/// Read histogram rows from a [MessagePack] format using a reader.
///
/// [MessagePack]: https://msgpack.org/
///
/// # Examples
/// ```
/// extern crate tempdir;
/// use std::fs::File;
/// use tempdir::TempDir;
/// use colhist::{compute_histogram, HistogramConfig};
/// use colhist::serde::{read_msgpack, write_msgpack};
///
/// // initialize a temporary directory
/// let temp_dir = TempDir::new("example").unwrap();
/// let file_path = temp_dir.path().join("rows.msgpack");
///
/// // compute some rows and save them
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let bins = compute_histogram(&data, &HistogramConfig::fixed_width(2.0)).unwrap();
/// let mut file = File::create(&file_path).unwrap();
/// write_msgpack(&bins, &mut file).unwrap();
///
/// // read them back
/// let file = File::open(&file_path).unwrap();
/// assert_eq!(read_msgpack(file).unwrap(), bins);
/// ```
pub fn read_msgpack<R>(reader: R) -> Result<Vec<HistogramBin>, Box<dyn Error>>
where
    R: Read,
{
    let rows: RowsJson = rmp_serde::decode::from_read(reader).map_err(Box::new)?;
    Ok(rows.into())
}

/// Write histogram rows to a [MessagePack] format using a writer.
///
/// [MessagePack]: https://msgpack.org/
pub fn write_msgpack<W>(bins: &[HistogramBin], writer: &mut W) -> Result<(), Box<dyn Error>>
where
    W: Write,
{
    rmp_serde::encode::write(writer, &RowsJson::from(bins)).map_err(Box::new)?;
    Ok(())
}
