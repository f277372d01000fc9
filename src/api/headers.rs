//! Headers attached to requests sent to the API.
use std::collections::BTreeMap;

/// Name of the header carrying the bearer token.
pub const AUTHORIZATION: &str = "Authorization";
/// Name of the content type header.
pub const CONTENT_TYPE: &str = "Content-Type";
/// Name of the header Todoist uses to deduplicate mutating requests.
pub const X_REQUEST_ID: &str = "X-Request-Id";
/// Content type of every JSON body sent to the API.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Builds the headers for a single request.
///
/// * `token` - adds `Authorization: Bearer <token>` if set and not empty.
/// * `with_content` - adds the JSON content type, which must only be sent along with a body.
/// * `request_id` - adds `X-Request-Id` if set and not empty.
pub fn create_headers(
    token: Option<&str>,
    with_content: bool,
    request_id: Option<&str>,
) -> BTreeMap<&'static str, String> {
    let mut headers = BTreeMap::new();
    if let Some(token) = token.filter(|t| !t.is_empty()) {
        headers.insert(AUTHORIZATION, format!("Bearer {token}"));
    }
    if with_content {
        headers.insert(CONTENT_TYPE, JSON_CONTENT_TYPE.to_string());
    }
    if let Some(id) = request_id.filter(|id| !id.is_empty()) {
        headers.insert(X_REQUEST_ID, id.to_string());
    }
    headers
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn no_headers() {
        assert!(create_headers(None, false, None).is_empty());
    }

    #[test]
    fn every_combination() {
        for token in [None, Some("A TOKEN")] {
            for with_content in [false, true] {
                for request_id in [None, Some("REQUEST12345")] {
                    let headers = create_headers(token, with_content, request_id);
                    let expected = [token.is_some(), with_content, request_id.is_some()]
                        .iter()
                        .filter(|set| **set)
                        .count();
                    assert_eq!(headers.len(), expected);
                    assert_eq!(
                        headers.get(AUTHORIZATION).map(String::as_str),
                        token.map(|_| "Bearer A TOKEN")
                    );
                    assert_eq!(
                        headers.get(CONTENT_TYPE).map(String::as_str),
                        with_content.then_some("application/json; charset=utf-8")
                    );
                    assert_eq!(
                        headers.get(X_REQUEST_ID).map(String::as_str),
                        request_id
                    );
                }
            }
        }
    }

    #[test]
    fn empty_token_is_ignored() {
        assert!(create_headers(Some(""), false, Some("")).is_empty());
    }
}
