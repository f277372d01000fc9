//! A typed client for the [Todoist API v1](https://developer.todoist.com/api/v1/).
//!
//! ```no_run
//! # async fn run() -> todoist_client::Result<()> {
//! use todoist_client::api::rest::{CreateTask, Gateway, TaskFilter, TaskDue};
//! use todoist_client::api::endpoints::TODOIST_API_URL;
//!
//! let mut gw = Gateway::new("0123456789abcdef", &TODOIST_API_URL)?;
//! gw.create_task(&CreateTask {
//!     content: "Buy milk".to_string(),
//!     due: Some(TaskDue::String("tomorrow".to_string())),
//!     ..Default::default()
//! })
//! .await?;
//! let tasks = gw.tasks(&TaskFilter::default())?.collect_all().await?;
//! println!("{} active tasks", tasks.len());
//! gw.close();
//! # Ok(())
//! # }
//! ```
//!
//! Listings are returned as a [`api::ResultsPaginator`] that fetches one page per call. Code
//! without an async runtime can use [`api::blocking::Gateway`] instead.
pub mod api;
pub mod config;
pub mod error;

pub use config::Config;
pub use error::{Error, Result};
