//! Shared filter for the listing endpoints.
//!
//! Every listing-style operation (product list, offer list, top products)
//! accepts the same optional filter parameters. Validation happens here,
//! before any request is built.

use crate::config::ResponseFormat;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Sort orders accepted by the listing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    Price,
    PriceDesc,
    Rate,
    RateDesc,
    Seller,
    SellerDesc,
    Installment,
    InstallmentDesc,
    NumberOfInstallments,
    NumberOfInstallmentsDesc,
    TrustedStore,
}

impl Sort {
    /// Returns the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sort::Price => "price",
            Sort::PriceDesc => "dprice",
            Sort::Rate => "rate",
            Sort::RateDesc => "drate",
            Sort::Seller => "seller",
            Sort::SellerDesc => "dseller",
            Sort::Installment => "installment",
            Sort::InstallmentDesc => "dinstallment",
            Sort::NumberOfInstallments => "numberofinstallments",
            Sort::NumberOfInstallmentsDesc => "dnumberofinstallments",
            Sort::TrustedStore => "trustedStore",
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sort {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "price" => Ok(Sort::Price),
            "dprice" => Ok(Sort::PriceDesc),
            "rate" => Ok(Sort::Rate),
            "drate" => Ok(Sort::RateDesc),
            "seller" => Ok(Sort::Seller),
            "dseller" => Ok(Sort::SellerDesc),
            "installment" => Ok(Sort::Installment),
            "dinstallment" => Ok(Sort::InstallmentDesc),
            "numberofinstallments" => Ok(Sort::NumberOfInstallments),
            "dnumberofinstallments" => Ok(Sort::NumberOfInstallmentsDesc),
            "trustedStore" => Ok(Sort::TrustedStore),
            _ => Err(Error::InvalidArgument(
                "the value in the sort parameter is not valid".to_string(),
            )),
        }
    }
}

/// Seller trust-tier filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medal {
    All,
    Diamond,
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    /// Returns the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Medal::All => "all",
            Medal::Diamond => "diamond",
            Medal::Gold => "gold",
            Medal::Silver => "silver",
            Medal::Bronze => "bronze",
        }
    }
}

impl fmt::Display for Medal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Medal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(Medal::All),
            "diamond" => Ok(Medal::Diamond),
            "gold" => Ok(Medal::Gold),
            "silver" => Ok(Medal::Silver),
            "bronze" => Ok(Medal::Bronze),
            _ => Err(Error::InvalidArgument(
                "the value in the medal parameter is not valid".to_string(),
            )),
        }
    }
}

const DEFAULT_RESULTS: u16 = 10;
const DEFAULT_PAGE: u16 = 1;

/// Optional filter parameters shared by the listing endpoints.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    /// Overrides the client's default response format
    pub format: Option<ResponseFormat>,
    /// Results per page, 1-998 (service default 10)
    pub results: Option<u16>,
    /// Page number, 1-998 (service default 1)
    pub page: Option<u16>,
    /// Minimum price, non-negative
    pub price_min: Option<f64>,
    /// Maximum price, non-negative, not below `price_min`
    pub price_max: Option<f64>,
    /// Sort order
    pub sort: Option<Sort>,
    /// Seller trust-tier filter
    pub medal: Option<Medal>,
}

impl SearchFilter {
    /// Creates an empty filter; every parameter falls back to its default.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format(mut self, format: ResponseFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn results(mut self, results: u16) -> Self {
        self.results = Some(results);
        self
    }

    pub fn page(mut self, page: u16) -> Self {
        self.page = Some(page);
        self
    }

    pub fn price_min(mut self, price: f64) -> Self {
        self.price_min = Some(price);
        self
    }

    pub fn price_max(mut self, price: f64) -> Self {
        self.price_max = Some(price);
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn medal(mut self, medal: Medal) -> Self {
        self.medal = Some(medal);
        self
    }

    /// Validates the filter and serializes it to query parameters.
    ///
    /// `format`, `results`, and `page` are always present in the output;
    /// the remaining parameters appear only when supplied. Order is fixed
    /// so built URLs are reproducible.
    pub fn to_params(&self, default_format: ResponseFormat) -> Result<Vec<(String, String)>> {
        if let Some(results) = self.results {
            if !(1..=998).contains(&results) {
                return Err(Error::InvalidArgument(
                    "results must be an integer between 1 and 998".to_string(),
                ));
            }
        }

        if let Some(page) = self.page {
            if !(1..=998).contains(&page) {
                return Err(Error::InvalidArgument(
                    "page must be an integer between 1 and 998".to_string(),
                ));
            }
        }

        if let Some(min) = self.price_min {
            if !min.is_finite() {
                return Err(Error::InvalidArgument(
                    "priceMin must be a number".to_string(),
                ));
            }
            if min < 0.0 {
                return Err(Error::InvalidArgument(
                    "priceMin cannot be negative".to_string(),
                ));
            }
        }

        if let Some(max) = self.price_max {
            if !max.is_finite() {
                return Err(Error::InvalidArgument(
                    "priceMax must be a number".to_string(),
                ));
            }
            if max < 0.0 {
                return Err(Error::InvalidArgument(
                    "priceMax cannot be negative".to_string(),
                ));
            }
        }

        if let (Some(min), Some(max)) = (self.price_min, self.price_max) {
            if max < min {
                return Err(Error::InvalidArgument(
                    "priceMax must be greater than priceMin".to_string(),
                ));
            }
        }

        let format = self.format.unwrap_or(default_format);
        let results = self.results.unwrap_or(DEFAULT_RESULTS);
        let page = self.page.unwrap_or(DEFAULT_PAGE);

        let mut params = vec![
            ("format".to_string(), format.as_str().to_string()),
            ("results".to_string(), results.to_string()),
            ("page".to_string(), page.to_string()),
        ];

        if let Some(min) = self.price_min {
            params.push(("priceMin".to_string(), min.to_string()));
        }

        if let Some(max) = self.price_max {
            params.push(("priceMax".to_string(), max.to_string()));
        }

        if let Some(sort) = self.sort {
            params.push(("sort".to_string(), sort.as_str().to_string()));
        }

        if let Some(medal) = self.medal {
            params.push(("medal".to_string(), medal.as_str().to_string()));
        }

        Ok(params)
    }
}

/// Checks a caller-supplied category identifier.
pub fn validate_category_id(category_id: i64) -> Result<()> {
    if category_id < 0 {
        return Err(Error::InvalidArgument(
            "categoryId must be non-negative".to_string(),
        ));
    }
    Ok(())
}
