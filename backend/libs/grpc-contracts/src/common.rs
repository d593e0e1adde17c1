//! Messages shared across services.

/// Outcome of a handler that completed without a transport error.
///
/// Authentication failures never appear here; they are returned as
/// `Status::unauthenticated` before any handler runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ResultCode {
    Unspecified = 0,
    Ok = 1,
    /// Valid credential, but the caller does not own the target resource
    Forbidden = 2,
    NotFound = 3,
    /// Request was understood but refused by a business rule
    Rejected = 4,
}

impl ResultCode {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            ResultCode::Unspecified => "RESULT_CODE_UNSPECIFIED",
            ResultCode::Ok => "OK",
            ResultCode::Forbidden => "FORBIDDEN",
            ResultCode::NotFound => "NOT_FOUND",
            ResultCode::Rejected => "REJECTED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_code_is_rejected() {
        assert_eq!(ResultCode::try_from(2), Ok(ResultCode::Forbidden));
        assert!(ResultCode::try_from(42).is_err());
    }

    #[test]
    fn test_default_is_unspecified() {
        assert_eq!(ResultCode::default(), ResultCode::Unspecified);
        assert_eq!(ResultCode::NotFound.as_str_name(), "NOT_FOUND");
    }
}
