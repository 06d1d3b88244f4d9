//! Fixtures
//!
//! YAML-backed product catalogues for tests and the demo.

use std::{fs, path::PathBuf};

use thiserror::Error;

use crate::products::{InMemoryCatalogue, Kurti, KurtiCode, LookupError};

pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid product code in a fixture record
    #[error(transparent)]
    Code(#[from] LookupError),

    /// A product declares the same size twice
    #[error("Duplicate size {size} for product {code}")]
    DuplicateSize {
        /// Product code.
        code: String,

        /// Duplicated size label.
        size: String,
    },

    /// Two records share a product code
    #[error("Duplicate product code: {0}")]
    DuplicateCode(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),
}

/// A loaded product catalogue fixture.
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    kurtis: Vec<Kurti>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a new empty fixture with default base path
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            kurtis: Vec::new(),
        }
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if records
    /// carry invalid codes, duplicate codes or duplicate sizes.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: products::ProductsFixture = serde_norway::from_str(&contents)?;

        for record in fixture.products {
            let kurti: Kurti = record.try_into()?;

            if self.kurtis.iter().any(|existing| existing.code == kurti.code) {
                return Err(FixtureError::DuplicateCode(kurti.code.to_string()));
            }

            self.kurtis.push(kurti);
        }

        Ok(self)
    }

    /// Load a complete fixture set by name
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture file cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_products(name)?;

        Ok(fixture)
    }

    /// Get a kurti by its (case-insensitive) product code
    ///
    /// # Errors
    ///
    /// Returns an error if the code is invalid or the product is not found.
    pub fn kurti(&self, code: &str) -> Result<&Kurti, FixtureError> {
        let code = KurtiCode::parse(code)?;

        self.kurtis
            .iter()
            .find(|kurti| kurti.code == code)
            .ok_or_else(|| FixtureError::ProductNotFound(code.to_string()))
    }

    /// All loaded kurtis, in file order.
    #[must_use]
    pub fn kurtis(&self) -> &[Kurti] {
        &self.kurtis
    }

    /// Build an in-memory lookup catalogue over the loaded kurtis.
    #[must_use]
    pub fn catalogue(&self) -> InMemoryCatalogue {
        InMemoryCatalogue::from_kurtis(self.kurtis.iter().cloned())
    }
}
