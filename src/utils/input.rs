use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Maximum accepted size of a raw message: 64KB
pub const MAX_MESSAGE_BYTES: u64 = 64 * 1024;

const STDIN_MARKER: &str = "-";

/// Read a raw message from `path`, or from stdin when `path` is `None` or `-`.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or read
/// - The input is larger than [`MAX_MESSAGE_BYTES`]
/// - The input is not valid UTF-8
pub fn read_message(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new(STDIN_MARKER) => {
            // Check the size on the open handle so the file can't be swapped in between
            let file = File::open(path)
                .with_context(|| format!("Failed to open message file: {}", path.display()))?;
            validate_file_size(&file, path)?;
            read_bounded(file, &path.display().to_string())
        }
        _ => read_bounded(io::stdin().lock(), "stdin"),
    }
}

fn validate_file_size(file: &File, path: &Path) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let file_size = metadata.len();
    if file_size > MAX_MESSAGE_BYTES {
        bail!(
            "Message too large: {} ({} bytes, max {} bytes)",
            path.display(),
            file_size,
            MAX_MESSAGE_BYTES
        );
    }

    Ok(())
}

/// Read at most `MAX_MESSAGE_BYTES`, failing rather than truncating.
fn read_bounded<R: Read>(reader: R, source: &str) -> Result<String> {
    let mut buffer = Vec::new();
    reader
        .take(MAX_MESSAGE_BYTES + 1)
        .read_to_end(&mut buffer)
        .with_context(|| format!("Failed to read message from {}", source))?;

    if buffer.len() as u64 > MAX_MESSAGE_BYTES {
        bail!("Message too large: {} (max {} bytes)", source, MAX_MESSAGE_BYTES);
    }

    String::from_utf8(buffer).with_context(|| format!("Message from {} is not valid UTF-8", source))
}
