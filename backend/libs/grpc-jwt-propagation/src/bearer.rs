//! `Authorization: Bearer <credential>` parsing shared by HTTP and gRPC edges.

/// Metadata key carrying the credential on every internal call
pub const AUTHORIZATION: &str = "authorization";

pub const BEARER_PREFIX: &str = "Bearer ";

/// Return the credential from a bearer header value.
///
/// `None` when the prefix is missing or nothing follows it. The credential
/// itself is not inspected here.
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(bearer_token("Bearer  abc.def "), Some("abc.def"));
    }

    #[test]
    fn test_bearer_token_rejects_bad_prefix() {
        for header in ["", "Bearer", "Bearer ", "Bearer    ", "Basic abc", "bearer abc", "abc.def"] {
            assert_eq!(bearer_token(header), None, "header {:?}", header);
        }
    }
}
