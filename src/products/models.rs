//! Product Models

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::products::errors::LookupError;

/// Product code, unique per kurti.
///
/// Codes are case-insensitive; the stored form is always uppercase, so two
/// codes compare equal regardless of how they were entered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KurtiCode(String);

impl KurtiCode {
    /// Shortest accepted product code.
    pub const MIN_LEN: usize = 6;

    /// Parse a raw code, trimming whitespace and normalizing to uppercase.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidCode`] if the trimmed code is shorter
    /// than [`KurtiCode::MIN_LEN`].
    pub fn parse(code: &str) -> Result<Self, LookupError> {
        let trimmed = code.trim();

        if trimmed.chars().count() < Self::MIN_LEN {
            return Err(LookupError::InvalidCode {
                code: trimmed.to_owned(),
                min: Self::MIN_LEN,
            });
        }

        Ok(Self(trimmed.to_uppercase()))
    }

    /// The normalized (uppercase) code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KurtiCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Size label ("M", "XL", ...), case-insensitive, stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizeLabel(String);

impl SizeLabel {
    /// Normalize a raw size label.
    #[must_use]
    pub fn new(label: &str) -> Self {
        Self(label.trim().to_uppercase())
    }

    /// The normalized (uppercase) label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stock count for one size of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeStock {
    /// Size label, unique within a product.
    pub size: SizeLabel,

    /// Units in stock for this size.
    pub quantity: u32,
}

/// Product image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Image URL in the object store.
    pub url: String,
}

/// Kurti Model
///
/// A product record as returned by the lookup collaborator. The cart captures
/// a clone of this at add time; prices and stock counts are snapshots, never
/// live pointers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kurti {
    /// Product code.
    pub code: KurtiCode,

    /// Category name.
    pub category: String,

    /// List selling price in whole rupees.
    pub selling_price: u64,

    /// Ordered product images.
    pub images: Vec<Image>,

    /// Per-size stock counts; size labels are unique.
    pub sizes: Vec<SizeStock>,
}

impl Kurti {
    /// Stock count for the given size, or `None` if the product does not
    /// declare that size.
    #[must_use]
    pub fn stock_for(&self, size: &SizeLabel) -> Option<u32> {
        self.sizes
            .iter()
            .find(|stock| stock.size == *size)
            .map(|stock| stock.quantity)
    }

    /// Whether the product declares the given size at all.
    #[must_use]
    pub fn has_size(&self, size: &SizeLabel) -> bool {
        self.stock_for(size).is_some()
    }

    /// Sizes that currently have stock.
    pub fn available_sizes(&self) -> impl Iterator<Item = &SizeStock> {
        self.sizes.iter().filter(|stock| stock.quantity > 0)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn kurti() -> Kurti {
        Kurti {
            code: KurtiCode(String::from("ABC0001")),
            category: String::from("Anarkali"),
            selling_price: 500,
            images: vec![],
            sizes: vec![
                SizeStock {
                    size: SizeLabel::new("S"),
                    quantity: 0,
                },
                SizeStock {
                    size: SizeLabel::new("M"),
                    quantity: 5,
                },
                SizeStock {
                    size: SizeLabel::new("XL"),
                    quantity: 2,
                },
            ],
        }
    }

    #[test]
    fn code_parse_normalizes_to_uppercase() -> TestResult {
        let code = KurtiCode::parse("  abc0001 ")?;

        assert_eq!(code.as_str(), "ABC0001");
        assert_eq!(code, KurtiCode::parse("ABC0001")?);

        Ok(())
    }

    #[test]
    fn code_parse_rejects_short_codes() {
        let result = KurtiCode::parse("ab1");

        assert!(
            matches!(result, Err(LookupError::InvalidCode { min: 6, .. })),
            "expected InvalidCode, got {result:?}"
        );
    }

    #[test]
    fn stock_for_is_case_insensitive() {
        let kurti = kurti();

        assert_eq!(kurti.stock_for(&SizeLabel::new("m")), Some(5));
        assert_eq!(kurti.stock_for(&SizeLabel::new("XXL")), None);
    }

    #[test]
    fn available_sizes_skips_sold_out_sizes() {
        let kurti = kurti();

        let available: Vec<&str> = kurti
            .available_sizes()
            .map(|stock| stock.size.as_str())
            .collect();

        assert_eq!(available, ["M", "XL"]);
    }
}
