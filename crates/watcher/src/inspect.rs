//! Derive a file's qualification state from disk

use std::path::Path;
use typelog_session::{FileKind, FileState};

/// Bytes scanned for NUL when sniffing binary content
const BINARY_SNIFF_LEN: usize = 8000;

/// A file's state plus its text, when it is worth reading
#[derive(Debug, Clone)]
pub struct Inspected {
    pub state: FileState,
    /// Empty unless the file is a readable text file of the target type
    pub text: String,
}

/// Inspect `path`, treating files with `extension` (case-insensitive) as targets
///
/// Never fails: files that vanish or cannot be read come back invalid.
pub fn inspect(path: &Path, extension: &str) -> Inspected {
    let kind = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case(extension) => FileKind::Target,
        _ => FileKind::Other,
    };

    let mut state = FileState {
        kind,
        physical: false,
        read_only: false,
        binary: false,
        valid: false,
    };

    let Ok(metadata) = std::fs::metadata(path) else {
        return Inspected {
            state,
            text: String::new(),
        };
    };

    state.valid = true;
    state.physical = metadata.is_file();
    state.read_only = metadata.permissions().readonly();

    if kind != FileKind::Target || !state.physical {
        return Inspected {
            state,
            text: String::new(),
        };
    }

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("Cannot read {}: {}", path.display(), e);
            state.valid = false;
            return Inspected {
                state,
                text: String::new(),
            };
        }
    };

    let sniff = &bytes[..bytes.len().min(BINARY_SNIFF_LEN)];
    if sniff.contains(&0) {
        state.binary = true;
        return Inspected {
            state,
            text: String::new(),
        };
    }

    match String::from_utf8(bytes) {
        Ok(text) => Inspected { state, text },
        Err(_) => {
            state.binary = true;
            Inspected {
                state,
                text: String::new(),
            }
        }
    }
}
