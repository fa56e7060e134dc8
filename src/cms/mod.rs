//! Content manager API interaction module
//!
//! # Module Structure
//!
//! - [`http`] - Single-shot HTTP transport
//! - [`client`] - Client bound to a server's `/content_manager_json` endpoints
//!
//! # Example
//!
//! ```ignore
//! use cmedit::cms::client::ContentManagerClient;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = ContentManagerClient::new("http://localhost:8080")?;
//!     let completion = client.fetch("/index.html").await;
//!     println!("{}", completion.body);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;

pub use client::{path_from_location, ContentManagerClient, EDITOR_PREFIX, JSON_PREFIX};
pub use http::{Completion, HttpTransport};
