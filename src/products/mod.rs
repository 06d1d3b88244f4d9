//! Products
//!
//! The kurti (garment) product model and the lookup collaborator seam.

pub mod errors;
pub mod models;
pub mod service;

pub use errors::LookupError;
pub use models::{Image, Kurti, KurtiCode, SizeLabel, SizeStock};
pub use service::{InMemoryCatalogue, MockProductLookup, ProductLookup};
