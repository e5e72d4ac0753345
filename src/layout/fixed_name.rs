// Names live in fixed width, null padded fields.

use crate::error_types::filesystem::FilesystemError;

/// Pack a name into a field of `N` bytes. The last byte is always left null.
///
/// Callers check the length first, anything too long is cut off here.
pub(crate) fn encode_name<const N: usize>(name: &str) -> [u8; N] {
    let mut field = [0u8; N];
    let bytes = name.as_bytes();
    let length = bytes.len().min(N - 1);
    field[..length].copy_from_slice(&bytes[..length]);
    field
}

/// Everything up to the first null byte.
pub(crate) fn decode_name(field: &[u8]) -> String {
    let end = field.iter().position(|byte| *byte == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}

/// Make sure a name fits in a field that holds `max` characters.
/// Lengths are in bytes, that is what the field stores.
pub(crate) fn check_length(name: &str, max: usize) -> Result<(), FilesystemError> {
    if name.len() > max {
        return Err(FilesystemError::NameTooLong);
    }
    Ok(())
}
