//! buscape - Client library for the BuscaPé comparison-shopping API
//!
//! Wraps the service's HTTP endpoints (category, product, and offer search,
//! top products, product/seller details, user ratings, affiliate source-id
//! creation). Parameters are validated locally, the endpoint URL is built,
//! and the raw response body is returned untouched.
//!
//! ```no_run
//! use buscape::{BuscapeClient, Config, SearchFilter};
//!
//! # async fn run() -> buscape::Result<()> {
//! let mut client = BuscapeClient::new(Config::new("your-application-id")?)?;
//! client.set_sandbox();
//!
//! let resp = client
//!     .find_product_list(Some("celular"), None, false, &SearchFilter::new())
//!     .await?;
//! println!("{} {}", resp.status_code, resp.body);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod country;
pub mod error;
pub mod filter;
pub mod models;
pub mod request;
pub mod transport;

pub use client::BuscapeClient;
pub use config::{Config, Environment, ResponseFormat};
pub use country::Country;
pub use error::{Error, Result, TransportError};
pub use filter::{Medal, SearchFilter, Sort};
pub use models::{CampaignList, NewSource, OfferQuery, ServiceResponse};
pub use request::EndpointRequest;
pub use transport::{FetchResponse, HttpTransport, Transport};
