//! Archive Packager: one downloadable artifact per batch.

use crate::batch::Batch;
use crate::constants::ARCHIVE_FILE_NAME;
use crate::error::{CompressionError, Result};
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// A packaged batch, ready to write out. The buffer is owned and released
/// when the artifact drops.
#[derive(Debug, Clone)]
pub enum Artifact {
    /// Exactly one result: the compressed file itself, no archive wrapper.
    Single { name: String, data: Vec<u8> },
    /// Two or more results bundled into one zip.
    Archive { name: String, data: Vec<u8> },
}

impl Artifact {
    pub fn name(&self) -> &str {
        match self {
            Artifact::Single { name, .. } | Artifact::Archive { name, .. } => name,
        }
    }

    pub fn data(&self) -> &[u8] {
        match self {
            Artifact::Single { data, .. } | Artifact::Archive { data, .. } => data,
        }
    }
}

/// Package a batch for download.
///
/// Zero results is a no-op (`Ok(None)`); one result is offered directly
/// under its `compressed-` name; two or more become one zip named
/// `compressed-images.zip` with one entry per result.
pub fn package(batch: &Batch) -> Result<Option<Artifact>> {
    match batch.results() {
        [] => Ok(None),
        [only] => Ok(Some(Artifact::Single {
            name: only.output_name.clone(),
            data: only.data.clone(),
        })),
        results => {
            let uncompressed: usize = results.iter().map(|r| r.data.len()).sum();
            let mut buf = Vec::with_capacity(uncompressed);
            {
                let mut writer = ZipWriter::new(Cursor::new(&mut buf));

                for result in results {
                    let options = SimpleFileOptions::default()
                        .compression_method(CompressionMethod::Deflated);
                    writer.start_file(result.output_name.as_str(), options)?;
                    writer.write_all(&result.data)?;
                }
                writer.finish()?;
            }
            Ok(Some(Artifact::Archive {
                name: ARCHIVE_FILE_NAME.to_string(),
                data: buf,
            }))
        }
    }
}

/// Write an artifact into `dir`, creating the directory if needed.
pub fn write_artifact(artifact: &Artifact, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .map_err(|_| CompressionError::DirectoryCreationFailed(dir.to_path_buf()))?;

    let path = dir.join(artifact.name());
    fs::write(&path, artifact.data())?;
    Ok(path)
}
