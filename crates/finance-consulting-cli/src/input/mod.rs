pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

use file::InputFormat;

/// Resolve a typed input from `--input <file>` or piped stdin (JSON), in that
/// order. `Ok(None)` means neither was supplied and the caller uses its flags.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_document(path)?));
    }
    match stdin::read_piped()? {
        Some(text) => Ok(Some(file::parse_document(text.trim(), InputFormat::Json)?)),
        None => Ok(None),
    }
}
