//! Shared plumbing for the flat-file stores: the per-entity record codec and
//! the strict-load / atomic-replace cycle that every store operation goes
//! through.

use std::{
    fs::{self, File},
    io::Write,
    path::Path,
};

use crate::{Error, models::DatabaseID};

/// A domain model that can be encoded as one row of a delimited backing
/// file.
///
/// Implementers fix the header and the field order; `decode` validates and
/// converts every field, so a row is either accepted in full or rejected
/// with a reason.
pub(crate) trait FileRecord: Sized {
    /// The header row naming each field, in encoding order.
    const HEADER: &'static [&'static str];

    /// The record's ID, used to assign the next free ID on append.
    fn record_id(&self) -> DatabaseID;

    /// The record's fields in `HEADER` order. Values go through the CSV
    /// writer, which quotes any field containing the delimiter, a quote, or
    /// a line break, so free text round-trips without corrupting its
    /// neighbours.
    fn encode(&self) -> Vec<String>;

    /// Decode one row into a record. Returns the reason decoding failed; the
    /// caller attaches the file and line context.
    fn decode(row: &csv::StringRecord) -> Result<Self, String>;
}

/// The ID an appended record should get: one greater than the largest ID in
/// `records`, or 1 when the store is empty.
pub(crate) fn next_id<R: FileRecord>(records: &[R]) -> DatabaseID {
    records
        .iter()
        .map(|record| record.record_id())
        .max()
        .unwrap_or(0)
        + 1
}

/// Parse the entire backing file at `path` into memory.
///
/// A file that does not exist yet reads as zero records, the first-run case
/// is not an error. A row with the wrong field count, an unexpected header,
/// or a field that fails to decode aborts the whole load with
/// [Error::CorruptRecord] naming the offending line; rows are never silently
/// skipped.
pub(crate) fn load_all<R: FileRecord>(path: &Path) -> Result<Vec<R>, Error> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader.headers().map_err(|error| corrupt(path, &error))?;
    if !headers.iter().eq(R::HEADER.iter().copied()) {
        return Err(Error::CorruptRecord {
            path: path.display().to_string(),
            line: 1,
            reason: format!(
                "expected header \"{}\", found \"{}\"",
                R::HEADER.join(","),
                headers.iter().collect::<Vec<_>>().join(",")
            ),
        });
    }

    let mut records = Vec::new();

    for row in reader.records() {
        let row = row.map_err(|error| corrupt(path, &error))?;
        let line = row
            .position()
            .map(|position| position.line())
            .unwrap_or_default();

        let record = R::decode(&row).map_err(|reason| Error::CorruptRecord {
            path: path.display().to_string(),
            line,
            reason,
        })?;

        records.push(record);
    }

    Ok(records)
}

/// Replace the backing file at `path` with one containing exactly `records`.
///
/// The new contents are fully written and synced to a temporary file in the
/// same directory, then renamed over the original in a single filesystem
/// operation. A crash mid-write leaves the original untouched, and a reader
/// running concurrently with a writer never observes a torn file.
pub(crate) fn replace_all<R: FileRecord>(path: &Path, records: &[R]) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    // The temp file must share the target's directory: rename is only atomic
    // within one filesystem.
    let temp_path = path.with_extension("csv.tmp");

    if let Err(error) = write_to_temp(&temp_path, records) {
        let _ = fs::remove_file(&temp_path);
        return Err(error);
    }

    fs::rename(&temp_path, path).map_err(|error| {
        let _ = fs::remove_file(&temp_path);
        Error::from(error)
    })?;

    tracing::debug!("rewrote {} records to {}", records.len(), path.display());

    Ok(())
}

fn write_to_temp<R: FileRecord>(temp_path: &Path, records: &[R]) -> Result<(), Error> {
    let file = File::create(temp_path)?;
    let mut writer = csv::Writer::from_writer(file);

    write_into(&mut writer, records)?;

    let file = writer
        .into_inner()
        .map_err(|error| Error::Io(error.to_string()))?;

    // The data must be on disk before the rename swaps it in.
    file.sync_all()?;

    Ok(())
}

/// Write `records` to `writer` in the backing-file encoding, header first.
pub(crate) fn write_csv<R: FileRecord, W: Write>(writer: W, records: &[R]) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(writer);

    write_into(&mut writer, records)
}

fn write_into<R: FileRecord, W: Write>(
    writer: &mut csv::Writer<W>,
    records: &[R],
) -> Result<(), Error> {
    writer.write_record(R::HEADER)?;

    for record in records {
        writer.write_record(record.encode())?;
    }

    writer.flush()?;

    Ok(())
}

fn corrupt(path: &Path, error: &csv::Error) -> Error {
    let line = error
        .position()
        .map(|position| position.line())
        .unwrap_or_default();

    Error::CorruptRecord {
        path: path.display().to_string(),
        line,
        reason: error.to_string(),
    }
}
