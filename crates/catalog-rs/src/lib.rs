//! catalog-rs: Rust SDK for the product catalog REST API
//!
//! This crate provides a small client for the product catalog service used by
//! product-viewer, along with the validated [`Product`] record type.
//!
//! # Example
//!
//! ```no_run
//! use catalog_rs::{ClientConfig, ProductClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ProductClient::new(ClientConfig::default())?;
//!
//!     let payload = client.fetch_products().await?;
//!     for product in &payload.products {
//!         println!("{}: {}", product.product_name, product.rate);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod product;

pub use client::ProductClient;
pub use config::ClientConfig;
pub use error::CatalogError;
pub use product::{CatalogPayload, Product, ProductId, RejectedRecord, decode_catalog};
