//! The OAuth flow used by third party applications to obtain a token on behalf of a user.
//!
//! See the [authorization guide](https://developer.todoist.com/guides/#authorization).
use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};
use url::Url;

use super::endpoints::{ACCESS_TOKEN_PATH, ACCESS_TOKENS_PATH, AUTHORIZE_PATH, api_path};
use super::http;
use crate::error::{Error, Result};

/// The outcome of exchanging an authorization code.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AuthResult {
    /// Token to use with [`super::rest::Gateway`].
    pub access_token: String,
    /// The `state` that was passed to [`OAuth::authorization_url`].
    #[serde(default)]
    pub state: Option<String>,
}

/// Talks to the OAuth endpoints. None of these calls send a bearer token.
#[derive(Debug, Clone)]
pub struct OAuth {
    client: ClientWithMiddleware,
    oauth_url: Url,
    api_url: Url,
}

impl OAuth {
    /// * `oauth_url` - host running the authorization pages, see [`struct@super::endpoints::TODOIST_OAUTH_URL`].
    /// * `api_url` - host of the REST API, used to revoke tokens.
    pub fn new(oauth_url: &Url, api_url: &Url) -> Result<OAuth> {
        Ok(OAuth::with_client(oauth_url, api_url, http::default_client()?))
    }

    /// Same as [`OAuth::new`] with a custom client.
    pub fn with_client(oauth_url: &Url, api_url: &Url, client: ClientWithMiddleware) -> OAuth {
        OAuth {
            client,
            oauth_url: oauth_url.clone(),
            api_url: api_url.clone(),
        }
    }

    /// Link to send the user to so they can grant access.
    ///
    /// * `scopes` - permissions to request, e.g. `data:read_write`. At least one is needed.
    /// * `state` - opaque value that is handed back along with the code.
    pub fn authorization_url(&self, client_id: &str, scopes: &[&str], state: &str) -> Result<Url> {
        if scopes.is_empty() {
            return Err(Error::validation("at least one scope must be requested"));
        }
        let mut url = self.oauth_url.join(AUTHORIZE_PATH)?;
        url.query_pairs_mut()
            .append_pair("client_id", client_id)
            .append_pair("scope", &scopes.join(","))
            .append_pair("state", state);
        Ok(url)
    }

    /// Exchanges the code from the redirect for an access token.
    pub async fn access_token(
        &self,
        client_id: &str,
        client_secret: &str,
        code: &str,
    ) -> Result<AuthResult> {
        #[derive(Serialize)]
        struct Request<'a> {
            client_id: &'a str,
            client_secret: &'a str,
            code: &'a str,
        }
        http::post::<(), _, AuthResult>(
            &self.client,
            self.oauth_url.join(ACCESS_TOKEN_PATH)?,
            None,
            None,
            None,
            Some(&Request {
                client_id,
                client_secret,
                code,
            }),
        )
        .await?
        .ok_or_else(|| Error::unexpected_response("empty response"))
    }

    /// Invalidates an access token.
    pub async fn revoke_access_token(
        &self,
        client_id: &str,
        client_secret: &str,
        token: &str,
    ) -> Result<bool> {
        http::delete(
            &self.client,
            self.api_url.join(&api_path(&[ACCESS_TOKENS_PATH]))?,
            None,
            None,
            Some(&[
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("access_token", token),
            ]),
        )
        .await
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, method, path, query_param},
    };

    use super::*;
    use crate::api::endpoints::{TODOIST_API_URL, TODOIST_OAUTH_URL};

    fn oauth(ms: &MockServer) -> OAuth {
        let url: Url = ms.uri().parse().unwrap();
        OAuth::new(&url, &url).unwrap()
    }

    #[test]
    fn auth_result_round_trip() {
        let body = json!({"access_token": "0123456789abcdef", "state": "abc"});
        let result: AuthResult = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(result.access_token, "0123456789abcdef");
        assert_eq!(serde_json::to_value(&result).unwrap(), body);
    }

    #[test]
    fn authorization_url() {
        let oauth = OAuth::new(&TODOIST_OAUTH_URL, &TODOIST_API_URL).unwrap();
        let url = oauth
            .authorization_url("123", &["task:add", "data:read"], "abc")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://todoist.com/oauth/authorize?client_id=123&scope=task%3Aadd%2Cdata%3Aread&state=abc"
        );
        assert!(matches!(
            oauth.authorization_url("123", &[], "abc"),
            Err(Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn access_token() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/access_token"))
            .and(body_json(json!({
                "client_id": "123",
                "client_secret": "456",
                "code": "789"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "1234",
                "token_type": "Bearer"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        let result = oauth(&mock_server)
            .access_token("123", "456", "789")
            .await
            .unwrap();
        mock_server.verify().await;
        assert_eq!(result.access_token, "1234");
        assert!(result.state.is_none());
        let requests = mock_server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("Authorization").is_none());
    }

    #[tokio::test]
    async fn revoke_access_token() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/access_tokens"))
            .and(query_param("client_id", "123"))
            .and(query_param("client_secret", "456"))
            .and(query_param("access_token", "1234"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;
        let revoked = oauth(&mock_server)
            .revoke_access_token("123", "456", "1234")
            .await
            .unwrap();
        mock_server.verify().await;
        assert!(revoked);
    }

    #[tokio::test]
    async fn rejected_code() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Bad code"))
            .mount(&mock_server)
            .await;
        let err = oauth(&mock_server)
            .access_token("123", "456", "789")
            .await
            .unwrap_err();
        assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
    }
}
