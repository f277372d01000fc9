//! The three HTTP calls everything else funnels through.
//!
//! Each function performs exactly one request: there are no retries, so a failed call surfaces
//! immediately as [`Error::Http`] (non-2xx status) or [`Error::Transport`] (no response at all).
use std::collections::BTreeMap;
use std::time::Duration;

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use url::Url;

use super::headers::create_headers;
use crate::error::{Error, Result};

/// Time allowed for establishing a connection.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Longest a read may stall. Todoist terminates requests after 60 seconds itself.
pub const READ_TIMEOUT: Duration = Duration::from_secs(60);

/// Builds the HTTP client used when the caller doesn't bring their own.
pub fn default_client() -> Result<ClientWithMiddleware> {
    client_with_timeouts(CONNECT_TIMEOUT, READ_TIMEOUT)
}

/// Builds a client that gives up on connecting after `connect` and on a stalled read after
/// `read`.
pub fn client_with_timeouts(connect: Duration, read: Duration) -> Result<ClientWithMiddleware> {
    let client = reqwest::Client::builder()
        .connect_timeout(connect)
        .read_timeout(read)
        .build()?;
    Ok(ClientBuilder::new(client).build())
}

/// Sends a GET request and decodes the JSON response.
///
/// Returns `None` if the API answered successfully without a body.
pub async fn get<P, R>(
    client: &ClientWithMiddleware,
    url: Url,
    token: Option<&str>,
    request_id: Option<&str>,
    params: Option<&P>,
) -> Result<Option<R>>
where
    P: Serialize + ?Sized,
    R: DeserializeOwned,
{
    tracing::debug!(%url, "GET");
    let mut req = with_headers(client.get(url), create_headers(token, false, request_id));
    if let Some(params) = params {
        req = req.query(params);
    }
    decode(&send(req).await?)
}

/// Sends a POST request with `data` encoded as JSON and decodes the JSON response.
///
/// A missing or empty `data` sends no body and no content type at all. Returns `None` if the
/// API answered successfully without a body.
pub async fn post<P, D, R>(
    client: &ClientWithMiddleware,
    url: Url,
    token: Option<&str>,
    request_id: Option<&str>,
    params: Option<&P>,
    data: Option<&D>,
) -> Result<Option<R>>
where
    P: Serialize + ?Sized,
    D: Serialize + ?Sized,
    R: DeserializeOwned,
{
    tracing::debug!(%url, "POST");
    let body = match data {
        Some(data) => encode_body(data)?,
        None => None,
    };
    let mut req = with_headers(
        client.post(url),
        create_headers(token, body.is_some(), request_id),
    );
    if let Some(params) = params {
        req = req.query(params);
    }
    if let Some(body) = body {
        req = req.body(body);
    }
    decode(&send(req).await?)
}

/// Sends a DELETE request. Any 2xx status is a success.
pub async fn delete<P>(
    client: &ClientWithMiddleware,
    url: Url,
    token: Option<&str>,
    request_id: Option<&str>,
    params: Option<&P>,
) -> Result<bool>
where
    P: Serialize + ?Sized,
{
    tracing::debug!(%url, "DELETE");
    let mut req = with_headers(client.delete(url), create_headers(token, false, request_id));
    if let Some(params) = params {
        req = req.query(params);
    }
    send(req).await?;
    Ok(true)
}

fn with_headers(req: RequestBuilder, headers: BTreeMap<&'static str, String>) -> RequestBuilder {
    headers
        .into_iter()
        .fold(req, |req, (name, value)| req.header(name, value))
}

/// Encodes a payload, treating `null` and `{}` as "no body".
fn encode_body<D: Serialize + ?Sized>(data: &D) -> Result<Option<String>> {
    let value = serde_json::to_value(data)?;
    let empty = match &value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    };
    if empty {
        return Ok(None);
    }
    Ok(Some(serde_json::to_string(&value)?))
}

/// Does the actual call to the Todoist API and returns the body of a successful response.
async fn send(req: RequestBuilder) -> Result<String> {
    let resp = req.send().await?;
    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        tracing::debug!(%status, "request failed");
        return Err(Error::Http { status, body: text });
    }
    Ok(text)
}

fn decode<R: DeserializeOwned>(text: &str) -> Result<Option<R>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(text)?))
}
