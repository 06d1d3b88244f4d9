//! Product fixture records.

use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    products::{Image, Kurti, KurtiCode, SizeLabel, SizeStock},
};

/// Top-level products fixture file.
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Product records, in file order.
    pub products: Vec<KurtiFixture>,
}

/// One kurti record as written in YAML.
#[derive(Debug, Deserialize)]
pub struct KurtiFixture {
    /// Raw product code.
    pub code: String,

    /// Category name.
    pub category: String,

    /// List selling price in whole rupees.
    pub price: u64,

    /// Image URLs, in order.
    #[serde(default)]
    pub images: Vec<String>,

    /// Per-size stock counts.
    pub sizes: Vec<SizeFixture>,
}

/// One size entry of a kurti fixture.
#[derive(Debug, Deserialize)]
pub struct SizeFixture {
    /// Raw size label.
    pub size: String,

    /// Units in stock.
    pub quantity: u32,
}

impl TryFrom<KurtiFixture> for Kurti {
    type Error = FixtureError;

    fn try_from(fixture: KurtiFixture) -> Result<Self, FixtureError> {
        let code = KurtiCode::parse(&fixture.code)?;
        let mut sizes: Vec<SizeStock> = Vec::with_capacity(fixture.sizes.len());

        for size_fixture in fixture.sizes {
            let size = SizeLabel::new(&size_fixture.size);

            if sizes.iter().any(|stock| stock.size == size) {
                return Err(FixtureError::DuplicateSize {
                    code: code.to_string(),
                    size: size.to_string(),
                });
            }

            sizes.push(SizeStock {
                size,
                quantity: size_fixture.quantity,
            });
        }

        Ok(Kurti {
            code,
            category: fixture.category,
            selling_price: fixture.price,
            images: fixture
                .images
                .into_iter()
                .map(|url| Image { url })
                .collect(),
            sizes,
        })
    }
}
