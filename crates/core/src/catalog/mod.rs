//! Read-only access to the external product catalogue.

mod format;
mod http;
pub mod worker;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use format::{StarKind, format_price, rating_stars, rating_summary, truncate_text};
pub use http::{DEFAULT_API_BASE, HttpCatalog};
pub use worker::{CatalogCommand, CatalogResult, CatalogRuntime};

/// Number of products the home view requests.
pub const DEFAULT_PRODUCT_LIMIT: usize = 6;

/// Aggregate review score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
	/// Average score out of five.
	pub rate: f64,
	/// Number of reviews.
	pub count: u64,
}

/// A product as served by the catalogue API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
	/// Catalogue identifier.
	pub id: u64,
	/// Product title.
	pub title: String,
	/// Unit price in US dollars.
	pub price: f64,
	/// Long-form description.
	pub description: String,
	/// Category name.
	pub category: String,
	/// Image URL.
	pub image: String,
	/// Review score.
	pub rating: Rating,
}

/// Failures while talking to the catalogue.
#[derive(Debug, Error)]
pub enum CatalogError {
	/// The server answered with a non-success status.
	#[error("HTTP error! status: {status}")]
	Status {
		/// Status code returned.
		status: u16,
	},
	/// The request never produced a response.
	#[error("request to {url} failed: {message}")]
	Transport {
		/// Requested URL.
		url: String,
		/// Transport-level description.
		message: String,
	},
	/// The response body did not match the expected shape.
	#[error("failed to decode response from {url}")]
	Decode {
		/// Requested URL.
		url: String,
		/// Decoder error.
		#[source]
		source: std::io::Error,
	},
}

/// Source of product data.
pub trait CatalogClient: Send + Sync {
	/// Up to `limit` products.
	fn products(&self, limit: usize) -> Result<Vec<Product>, CatalogError>;
	/// A single product.
	fn product(&self, id: u64) -> Result<Product, CatalogError>;
	/// Every product in `category`.
	fn products_in_category(&self, category: &str) -> Result<Vec<Product>, CatalogError>;
	/// Known category names.
	fn categories(&self) -> Result<Vec<String>, CatalogError>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn product_json_matches_api_shape() {
		let json = r#"{
			"id": 1,
			"title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
			"price": 109.95,
			"description": "Your perfect pack for everyday use",
			"category": "men's clothing",
			"image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
			"rating": { "rate": 3.9, "count": 120 }
		}"#;
		let product: Product = serde_json::from_str(json).unwrap();
		assert_eq!(product.id, 1);
		assert_eq!(product.rating.count, 120);
		assert_eq!(product.category, "men's clothing");
	}

	#[test]
	fn status_error_message_names_the_code() {
		let err = CatalogError::Status { status: 500 };
		assert_eq!(err.to_string(), "HTTP error! status: 500");
	}
}
