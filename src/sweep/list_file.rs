use std::fs;
use std::path::Path;

use crate::error::{BatchError, Result};

/// Read a sweep list file: one token per line, in file order.
///     Matches how the fan-out utility consumes `::::` inputs:
///         - lines are split on `\n` only; a `\r` before it stays part of the token
///         - every line is one token, blank lines included
///         - a trailing newline does not add an empty token
///         - tokens are not trimmed
pub fn read_tokens(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|source| BatchError::ListFile {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(split_tokens(&text))
}

fn split_tokens(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let body = text.strip_suffix('\n').unwrap_or(text);
    body.split('\n').map(str::to_owned).collect()
}
