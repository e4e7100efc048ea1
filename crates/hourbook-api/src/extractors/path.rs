//! Typed path parameter helpers.

use std::str::FromStr;

use hourbook_core::error::AppError;

/// Parses an identifier from a path segment, reporting a 400 on garbage.
pub fn parse_id<T: FromStr>(raw: &str) -> Result<T, AppError> {
    raw.parse()
        .map_err(|_| AppError::validation(format!("Invalid identifier: {raw}")))
}

#[cfg(test)]
mod tests {
    use hourbook_core::types::HoursRequestId;

    use super::*;

    #[test]
    fn test_parse_id() {
        let id = HoursRequestId::new();
        let parsed: HoursRequestId = parse_id(&id.to_string()).unwrap();
        assert_eq!(parsed, id);

        let err = parse_id::<HoursRequestId>("not-a-uuid").unwrap_err();
        assert_eq!(err.kind, hourbook_core::ErrorKind::Validation);
    }
}
