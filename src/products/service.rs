//! Product lookup.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;

use crate::products::{
    errors::LookupError,
    models::{Kurti, KurtiCode},
};

/// Lookup collaborator: resolves a product code to the current kurti record.
///
/// The backing store (database, HTTP API) is out of scope; callers only see
/// this seam.
#[automock]
#[async_trait]
pub trait ProductLookup: Send + Sync {
    /// Find a kurti by its product code.
    ///
    /// # Errors
    ///
    /// Returns a [`LookupError`] when the code is unknown or the backing
    /// store cannot be reached.
    async fn find(&self, code: KurtiCode) -> Result<Kurti, LookupError>;
}

/// In-memory catalogue keyed by product code.
///
/// Used by the demo and by tests that want a lookup collaborator without
/// mock plumbing.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalogue {
    kurtis: FxHashMap<KurtiCode, Kurti>,
}

impl InMemoryCatalogue {
    /// Create an empty catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalogue from an iterator of kurtis.
    pub fn from_kurtis(kurtis: impl IntoIterator<Item = Kurti>) -> Self {
        let mut catalogue = Self::new();

        for kurti in kurtis {
            catalogue.insert(kurti);
        }

        catalogue
    }

    /// Insert a kurti, replacing any previous record with the same code.
    pub fn insert(&mut self, kurti: Kurti) -> Option<Kurti> {
        self.kurtis.insert(kurti.code.clone(), kurti)
    }

    /// Get a kurti by code.
    #[must_use]
    pub fn get(&self, code: &KurtiCode) -> Option<&Kurti> {
        self.kurtis.get(code)
    }

    /// Number of kurtis in the catalogue.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kurtis.len()
    }

    /// Whether the catalogue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kurtis.is_empty()
    }
}

#[async_trait]
impl ProductLookup for InMemoryCatalogue {
    async fn find(&self, code: KurtiCode) -> Result<Kurti, LookupError> {
        self.kurtis
            .get(&code)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(code.to_string()))
    }
}
