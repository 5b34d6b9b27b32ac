use std::{io::Write, path::Path};

use kdam::tqdm;
use serde::{de::DeserializeOwned, Serialize};

use crate::app::VdfAppError;

/// reads every row of a CSV file with a header into `T`. columns not named
/// by `T` are ignored.
pub fn read_csv<T>(path: &Path) -> Result<Vec<T>, VdfAppError>
where
    T: DeserializeOwned,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| VdfAppError::ReadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    let rows = reader
        .deserialize::<T>()
        .enumerate()
        .map(|(idx, row)| {
            row.map_err(|e| VdfAppError::ReadError {
                path: path.to_path_buf(),
                message: format!("row {idx}: {e}"),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    log::info!("read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// writes rows to a CSV file, creating parent directories as needed.
pub fn write_csv_file<I>(iterable: I, path: &Path, desc: &str) -> Result<(), VdfAppError>
where
    I: IntoIterator,
    I::IntoIter: ExactSizeIterator,
    I::Item: Serialize,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| VdfAppError::WriteError {
            path: parent.to_path_buf(),
            message: format!("error building output directory: {e}"),
        })?;
    }
    let file = std::fs::File::create(path).map_err(|e| VdfAppError::WriteError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let filename = path.display().to_string();
    write_csv(iterable, file, &filename, desc)?;
    log::info!("wrote {filename}");
    Ok(())
}

/// writes rows to any writer, with a progress bar on stderr.
pub fn write_csv<I, W>(iterable: I, sink: W, filename: &str, desc: &str) -> Result<(), VdfAppError>
where
    I: IntoIterator,
    I::IntoIter: ExactSizeIterator,
    I::Item: Serialize,
    W: Write,
{
    let mut writer = csv::Writer::from_writer(sink);
    let iter = iterable.into_iter();
    let total = iter.len();
    let bar_iter = tqdm!(iter, total = total, desc = desc);
    for element in bar_iter {
        writer.serialize(element).map_err(|e| {
            VdfAppError::CsvWriteError(format!("Failed to write to {filename}: {e}"))
        })?;
    }
    eprintln!();
    writer
        .flush()
        .map_err(|e| VdfAppError::CsvWriteError(format!("Failed to flush {filename}: {e}")))?;
    Ok(())
}
