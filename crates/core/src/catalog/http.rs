use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, error};
use ureq::{Agent, AgentBuilder};

use super::{CatalogClient, CatalogError, Product};

/// Public fake store API the catalogue is served from.
pub const DEFAULT_API_BASE: &str = "https://fakestoreapi.com";

/// [`CatalogClient`] speaking HTTP to a fake-store compatible API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
	agent: Agent,
	base: String,
}

impl HttpCatalog {
	/// Client for `base` (without trailing `/products`) with a request timeout.
	pub fn new(base: impl Into<String>, timeout: Duration) -> Self {
		let base = base.into().trim_end_matches('/').to_string();
		let agent = AgentBuilder::new().timeout(timeout).build();
		Self { agent, base }
	}

	/// Base URL requests are issued against.
	#[must_use]
	pub fn base(&self) -> &str {
		&self.base
	}

	fn products_url(&self) -> String {
		format!("{}/products", self.base)
	}

	fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
		debug!(url, "catalog request");
		let response = self.agent.get(url).call().map_err(|err| {
			let mapped = match err {
				ureq::Error::Status(status, _) => CatalogError::Status { status },
				ureq::Error::Transport(transport) => CatalogError::Transport {
					url: url.to_string(),
					message: transport.to_string(),
				},
			};
			error!(url, error = %mapped, "API fetch error");
			mapped
		})?;

		response.into_json::<T>().map_err(|source| {
			error!(url, error = %source, "API decode error");
			CatalogError::Decode {
				url: url.to_string(),
				source,
			}
		})
	}
}

impl Default for HttpCatalog {
	fn default() -> Self {
		Self::new(DEFAULT_API_BASE, Duration::from_secs(10))
	}
}

impl CatalogClient for HttpCatalog {
	fn products(&self, limit: usize) -> Result<Vec<Product>, CatalogError> {
		self.fetch(&format!("{}?limit={limit}", self.products_url()))
	}

	fn product(&self, id: u64) -> Result<Product, CatalogError> {
		self.fetch(&format!("{}/{id}", self.products_url()))
	}

	fn products_in_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
		let encoded = urlencoding::encode(category);
		self.fetch(&format!("{}/category/{encoded}", self.products_url()))
	}

	fn categories(&self) -> Result<Vec<String>, CatalogError> {
		self.fetch(&format!("{}/categories", self.products_url()))
	}
}
