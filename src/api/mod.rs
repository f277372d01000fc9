//! Everything needed to talk to Todoist: the typed REST surface in [`rest`], its blocking
//! counterpart in [`blocking`], the OAuth flow in [`auth`] and the transport underneath.
pub mod auth;
pub mod blocking;
pub mod endpoints;
pub mod headers;
pub mod http;
pub mod paginator;
pub mod rest;
pub mod serialize;
pub mod validate;

pub use paginator::ResultsPaginator;
pub use validate::Validate;
