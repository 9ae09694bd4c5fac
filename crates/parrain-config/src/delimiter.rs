use crate::error::ConfigError;

/// Interpret a configured delimiter string as a single ASCII byte.
pub(crate) fn single_byte(field: &str, value: &str) -> Result<u8, ConfigError> {
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("expected a single ASCII character, got {value:?}"),
        }),
    }
}
