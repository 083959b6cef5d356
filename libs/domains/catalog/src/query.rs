//! Query-string parsing and MongoDB filter construction for product
//! listings.
//!
//! [`ProductQuery`] is an immutable filter specification: parse it from the
//! raw query-string map (or assemble it with the `with_*` builders), then
//! render it as a filter document plus optional sort document. Building and
//! rendering never touch the database.

use mongodb::bson::{doc, Document};
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{CatalogError, CatalogResult};
use crate::models::Size;
use crate::validation::{collapse_whitespace, is_valid_string, parse_number};

/// The query parameters the listing endpoint understands.
pub const RECOGNIZED_PARAMS: [&str; 5] = [
    "size",
    "name",
    "priceGreaterThan",
    "priceLessThan",
    "priceSort",
];

/// Sort direction for the price field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSort {
    Ascending,
    Descending,
}

/// An immutable filter specification for listing products.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    sizes: Option<Vec<Size>>,
    title_contains: Option<String>,
    price_above: Option<f64>,
    price_below: Option<f64>,
    price_sort: Option<PriceSort>,
}

impl ProductQuery {
    /// The unfiltered listing: matches every active product.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to products offered in at least one of the given sizes.
    pub fn with_sizes(mut self, sizes: Vec<Size>) -> Self {
        self.sizes = Some(sizes);
        self
    }

    /// Restrict to titles containing the given text, case-insensitively.
    pub fn with_title_contains(mut self, text: impl Into<String>) -> Self {
        self.title_contains = Some(text.into());
        self
    }

    /// Restrict to prices strictly above the bound.
    pub fn with_price_above(mut self, bound: f64) -> Self {
        self.price_above = Some(bound);
        self
    }

    /// Restrict to prices strictly below the bound.
    pub fn with_price_below(mut self, bound: f64) -> Self {
        self.price_below = Some(bound);
        self
    }

    /// Sort the result by price.
    pub fn with_price_sort(mut self, sort: PriceSort) -> Self {
        self.price_sort = Some(sort);
        self
    }

    pub fn sizes(&self) -> Option<&[Size]> {
        self.sizes.as_deref()
    }

    pub fn title_contains(&self) -> Option<&str> {
        self.title_contains.as_deref()
    }

    pub fn price_above(&self) -> Option<f64> {
        self.price_above
    }

    pub fn price_below(&self) -> Option<f64> {
        self.price_below
    }

    pub fn price_sort(&self) -> Option<PriceSort> {
        self.price_sort
    }

    /// Parse the raw query-string map of a listing request.
    ///
    /// A non-empty map without any recognized key is rejected with a message
    /// listing the recognized names; unrecognized keys alongside recognized
    /// ones are ignored. Size tokens are matched case-sensitively and
    /// untrimmed, exactly as they appear in the query string.
    pub fn from_params(params: &HashMap<String, String>) -> CatalogResult<Self> {
        if !RECOGNIZED_PARAMS.iter().any(|key| params.contains_key(*key)) {
            return Err(CatalogError::Validation(format!(
                "Cannot provide keys other than {}",
                RECOGNIZED_PARAMS.join(", ")
            )));
        }

        let mut query = Self::new();

        if let Some(raw) = params.get("size") {
            let sizes = raw
                .split(',')
                .map(|token| {
                    Size::from_str(token).map_err(|_| {
                        CatalogError::Validation(
                            "size must be a comma-separated list of S, XS, M, X, L, XXL, XL"
                                .to_string(),
                        )
                    })
                })
                .collect::<CatalogResult<Vec<_>>>()?;
            query = query.with_sizes(sizes);
        }

        if let Some(raw) = params.get("name") {
            if !is_valid_string(raw) {
                return Err(CatalogError::Validation(
                    "name must not be blank".to_string(),
                ));
            }
            query = query.with_title_contains(collapse_whitespace(raw));
        }

        if let Some(raw) = params.get("priceGreaterThan") {
            let bound = parse_number(raw).ok_or_else(|| {
                CatalogError::Validation("priceGreaterThan must be a number".to_string())
            })?;
            query = query.with_price_above(bound);
        }

        if let Some(raw) = params.get("priceLessThan") {
            let bound = parse_number(raw).ok_or_else(|| {
                CatalogError::Validation("priceLessThan must be a number".to_string())
            })?;
            query = query.with_price_below(bound);
        }

        if let Some(raw) = params.get("priceSort") {
            let sort = match raw.as_str() {
                "1" => PriceSort::Ascending,
                "-1" => PriceSort::Descending,
                _ => {
                    return Err(CatalogError::Validation(
                        "priceSort must be 1 or -1".to_string(),
                    ));
                }
            };
            query = query.with_price_sort(sort);
        }

        Ok(query)
    }

    /// Render the MongoDB filter document.
    ///
    /// Always anchored on `isDeleted: false`, so soft-deleted products can
    /// never match. Title text is regex-escaped before it reaches the
    /// `$regex` clause.
    pub fn filter_document(&self) -> Document {
        let mut filter = doc! { "isDeleted": false };

        if let Some(sizes) = &self.sizes {
            let codes: Vec<String> = sizes.iter().map(|size| size.to_string()).collect();
            filter.insert("availableSizes", doc! { "$in": codes });
        }

        if let Some(text) = &self.title_contains {
            filter.insert(
                "title",
                doc! { "$regex": regex::escape(text), "$options": "i" },
            );
        }

        let mut price = Document::new();
        if let Some(bound) = self.price_above {
            price.insert("$gt", bound);
        }
        if let Some(bound) = self.price_below {
            price.insert("$lt", bound);
        }
        if !price.is_empty() {
            filter.insert("price", price);
        }

        filter
    }

    /// Render the sort document, if a price sort was requested.
    pub fn sort_document(&self) -> Option<Document> {
        self.price_sort.map(|sort| match sort {
            PriceSort::Ascending => doc! { "price": 1 },
            PriceSort::Descending => doc! { "price": -1 },
        })
    }
}
