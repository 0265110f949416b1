//! Loading IGC text from files or stdin.

use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Path argument that selects stdin.
pub const STDIN_PATH: &str = "-";

/// Read an IGC file, or stdin when `path` is `-`.
///
/// IGC files are nominally ASCII, but some loggers write Latin-1 pilot names,
/// so invalid UTF-8 is replaced rather than rejected.
///
/// # Errors
///
/// Returns an error if the file or stdin cannot be read.
pub fn read_input(path: &Path) -> Result<String> {
    let bytes = if path == Path::new(STDIN_PATH) {
        let mut buffer = Vec::new();
        std::io::stdin().read_to_end(&mut buffer)?;
        buffer
    } else {
        std::fs::read(path).map_err(|source| Error::read_input(path, source))?
    };

    debug!(path = %path.display(), bytes = bytes.len(), "Read IGC input");
    Ok(decode_text(&bytes, path))
}

fn decode_text(bytes: &[u8], path: &Path) -> String {
    match String::from_utf8_lossy(bytes) {
        std::borrow::Cow::Borrowed(text) => text.to_string(),
        std::borrow::Cow::Owned(text) => {
            warn!(path = %path.display(), "Input is not valid UTF-8, replacing invalid bytes");
            text
        }
    }
}
