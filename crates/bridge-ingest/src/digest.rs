//! Input fingerprints for the run report.

use std::path::Path;

use bridge_model::{SourceDigest, SourceKind};
use sha2::Digest;
use tracing::debug;

use crate::discovery::list_csv_files;
use crate::error::{IngestError, Result};

pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    hex::encode(digest)
}

pub fn digest_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(sha256_hex(&bytes))
}

/// Digest a source file, or every CSV file of a source directory.
///
/// Unreadable inputs are left out; the loaders report them separately.
pub fn digest_source(source: SourceKind, path: &Path) -> Vec<SourceDigest> {
    let files = if path.is_dir() {
        list_csv_files(path).unwrap_or_default()
    } else {
        vec![path.to_path_buf()]
    };
    files
        .into_iter()
        .filter_map(|file| match digest_file(&file) {
            Ok(sha256) => Some(SourceDigest {
                source,
                path: file,
                sha256,
            }),
            Err(err) => {
                debug!(error = %err, "skipping digest");
                None
            }
        })
        .collect()
}
