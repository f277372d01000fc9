//! Cursor based pagination over the list endpoints of the API.
use futures::Stream;
use reqwest_middleware::ClientWithMiddleware;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use url::Url;

use super::http;
use crate::error::{Error, Result};

/// Turns one raw JSON record into the element type of a page.
pub type Decoder<T> = fn(Value) -> serde_json::Result<T>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
    /// Nothing was fetched yet, the first request is sent without a cursor.
    First,
    /// Resume token handed out by the previous response.
    Next(String),
    /// The API reported no further pages, or a request failed.
    Exhausted,
}

/// Walks through a paginated listing one page at a time.
///
/// Nothing is requested until [`ResultsPaginator::next_page`] is called, and every call fetches
/// exactly one page using the cursor of the previous response. The query parameters given at
/// construction are sent unchanged with every request. After the last page, or after any
/// error, the paginator is exhausted and never touches the network again.
#[derive(Debug)]
pub struct ResultsPaginator<T> {
    client: ClientWithMiddleware,
    url: Url,
    token: String,
    params: Vec<(String, String)>,
    results_field: &'static str,
    decode: Decoder<T>,
    cursor: Cursor,
}

impl<T: DeserializeOwned> ResultsPaginator<T> {
    pub(crate) fn new(
        client: ClientWithMiddleware,
        url: Url,
        token: &str,
        results_field: &'static str,
        params: Vec<(String, String)>,
    ) -> ResultsPaginator<T> {
        Self::with_decoder(
            client,
            url,
            token,
            results_field,
            params,
            serde_json::from_value::<T>,
        )
    }
}

impl<T> ResultsPaginator<T> {
    pub(crate) fn with_decoder(
        client: ClientWithMiddleware,
        url: Url,
        token: &str,
        results_field: &'static str,
        params: Vec<(String, String)>,
        decode: Decoder<T>,
    ) -> ResultsPaginator<T> {
        ResultsPaginator {
            client,
            url,
            token: token.to_string(),
            params,
            results_field,
            decode,
            cursor: Cursor::First,
        }
    }

    /// True once no further page will be fetched.
    pub fn is_exhausted(&self) -> bool {
        self.cursor == Cursor::Exhausted
    }

    /// Fetches the next page, or returns `None` once the listing is exhausted.
    pub async fn next_page(&mut self) -> Option<Result<Vec<T>>> {
        let mut params = self.params.clone();
        match &self.cursor {
            Cursor::Exhausted => return None,
            Cursor::First => {}
            Cursor::Next(cursor) => params.push(("cursor".to_string(), cursor.clone())),
        }
        let page = self.fetch(&params).await;
        if page.is_err() {
            self.cursor = Cursor::Exhausted;
        }
        Some(page)
    }

    async fn fetch(&mut self, params: &[(String, String)]) -> Result<Vec<T>> {
        let data: Option<Value> = http::get(
            &self.client,
            self.url.clone(),
            Some(self.token.as_str()),
            None,
            Some(params),
        )
        .await?;
        let Some(Value::Object(mut data)) = data else {
            return Err(Error::unexpected_response(
                "expected a JSON object with paginated results",
            ));
        };

        self.cursor = match data.remove("next_cursor") {
            Some(Value::String(cursor)) if !cursor.is_empty() => Cursor::Next(cursor),
            Some(Value::String(_)) | Some(Value::Null) | None => Cursor::Exhausted,
            Some(_) => {
                return Err(Error::unexpected_response(
                    "`next_cursor` must be a string or null",
                ));
            }
        };
        tracing::trace!(url = %self.url, cursor = ?self.cursor, "fetched page");

        let results = match data.remove(self.results_field) {
            Some(Value::Array(results)) => results,
            Some(Value::Null) | None => Vec::new(),
            Some(_) => {
                return Err(Error::unexpected_response(&format!(
                    "`{}` must be a list of results",
                    self.results_field
                )));
            }
        };
        results
            .into_iter()
            .map(|result| (self.decode)(result).map_err(Error::from))
            .collect()
    }

    /// Fetches every remaining page and concatenates them.
    pub async fn collect_all(mut self) -> Result<Vec<T>> {
        let mut all = Vec::new();
        while let Some(page) = self.next_page().await {
            all.extend(page?);
        }
        Ok(all)
    }

    /// Adapts the paginator into a [`Stream`] of pages.
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<T>>> {
        futures::stream::unfold(self, |mut pages| async move {
            let page = pages.next_page().await?;
            Some((page, pages))
        })
    }
}

/// Flattens a query struct into key/value pairs, dropping unset fields.
///
/// Lists are joined with commas, which is how the API expects several IDs in one parameter.
pub(crate) fn query_pairs<Q: Serialize + ?Sized>(query: &Q) -> Result<Vec<(String, String)>> {
    let Value::Object(map) = serde_json::to_value(query)? else {
        return Err(Error::unexpected_response(
            "query parameters must serialize to an object",
        ));
    };
    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        let value = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
            other => other.to_string(),
        };
        pairs.push((key, value));
    }
    Ok(pairs)
}
