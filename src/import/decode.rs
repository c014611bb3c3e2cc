/// Decodes an uploaded byte stream of unknown encoding.
///
/// Attempts UTF-8 first, then falls back to Latin-1. Latin-1 assigns a
/// character to every byte value, so the fallback cannot fail and the
/// Windows-1252 attempt from the original ordered list never gets a turn.
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_owned(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
