use crate::CharacterPage;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("response body is empty")]
    Empty,
    #[error("invalid page json at line {line}, column {column}: {message}")]
    Json {
        line: usize,
        column: usize,
        message: String,
    },
}

/// Decode a character page from a JSON body. A leading UTF-8 BOM is tolerated.
pub fn decode_page(bytes: &[u8]) -> Result<CharacterPage, DecodeError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(DecodeError::Empty);
    }
    serde_json::from_slice(bytes).map_err(|err| DecodeError::Json {
        line: err.line(),
        column: err.column(),
        message: err.to_string(),
    })
}
