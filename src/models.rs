//! Data models for requests and responses.

use crate::error::{Error, Result};
use crate::filter::validate_category_id;

/// Raw response handed back to the caller. The body is never interpreted.
#[derive(Debug, Clone)]
pub struct ServiceResponse {
    /// HTTP status code
    pub status_code: u16,
    /// Raw response body (XML or JSON, as requested)
    pub body: String,
    /// The URL the request was sent to
    pub request_url: String,
}

/// Identifies what an offer search is looking for.
///
/// At least one of the fields must be set. When several are set, the first
/// matching case wins, in this order: keyword with category, category,
/// product, barcode, keyword.
#[derive(Debug, Clone, Default)]
pub struct OfferQuery {
    pub keyword: Option<String>,
    pub category_id: Option<i64>,
    pub product_id: Option<i64>,
    pub barcode: Option<String>,
}

impl OfferQuery {
    /// Creates an empty query. At least one selector must be added before use.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn category_id(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn product_id(mut self, product_id: i64) -> Self {
        self.product_id = Some(product_id);
        self
    }

    pub fn barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    /// Resolves the query to its selector parameters.
    pub fn selector_params(&self) -> Result<Vec<(String, String)>> {
        if let Some(category_id) = self.category_id {
            validate_category_id(category_id)?;
        }

        // The offer endpoint spells the product id parameter "productID".
        match (&self.keyword, self.category_id, self.product_id, &self.barcode) {
            (Some(keyword), Some(category_id), _, _) => Ok(vec![
                ("keyword".to_string(), keyword.clone()),
                ("categoryId".to_string(), category_id.to_string()),
            ]),
            (_, Some(category_id), _, _) => {
                Ok(vec![("categoryId".to_string(), category_id.to_string())])
            }
            (_, _, Some(product_id), _) => {
                Ok(vec![("productID".to_string(), product_id.to_string())])
            }
            (_, _, _, Some(barcode)) => Ok(vec![("barcode".to_string(), barcode.clone())]),
            (Some(keyword), _, _, _) => Ok(vec![("keyword".to_string(), keyword.clone())]),
            _ => Err(Error::InvalidArgument(
                "one of keyword, categoryId, productId, or barcode must be specified".to_string(),
            )),
        }
    }
}

/// Campaign identifiers attached to a new affiliate source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampaignList {
    /// Identifiers joined by comma on the wire
    Ids(Vec<i64>),
    /// A preformatted value transmitted as-is
    Raw(String),
}

impl CampaignList {
    /// Returns the wire value.
    pub fn as_param(&self) -> String {
        match self {
            CampaignList::Ids(ids) => ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(","),
            CampaignList::Raw(s) => s.clone(),
        }
    }
}

impl From<Vec<i64>> for CampaignList {
    fn from(ids: Vec<i64>) -> Self {
        CampaignList::Ids(ids)
    }
}

impl From<&[i64]> for CampaignList {
    fn from(ids: &[i64]) -> Self {
        CampaignList::Ids(ids.to_vec())
    }
}

impl From<String> for CampaignList {
    fn from(s: String) -> Self {
        CampaignList::Raw(s)
    }
}

impl From<&str> for CampaignList {
    fn from(s: &str) -> Self {
        CampaignList::Raw(s.to_string())
    }
}

/// Parameters for registering an affiliate source id. The values come from
/// the affiliate program itself; in the sandbox they may be fictitious.
#[derive(Debug, Clone)]
pub struct NewSource {
    pub source_name: String,
    pub publisher_id: i64,
    pub site_id: i64,
    pub token: String,
    pub campaign_list: Option<CampaignList>,
}

impl NewSource {
    pub fn new(
        source_name: impl Into<String>,
        publisher_id: i64,
        site_id: i64,
        token: impl Into<String>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            publisher_id,
            site_id,
            token: token.into(),
            campaign_list: None,
        }
    }

    pub fn campaign_list(mut self, campaigns: impl Into<CampaignList>) -> Self {
        self.campaign_list = Some(campaigns.into());
        self
    }

    /// Validates the fields in a fixed order and serializes them.
    pub fn to_params(&self) -> Result<Vec<(String, String)>> {
        if self.source_name.is_empty() {
            return Err(Error::InvalidArgument(
                "sourceName must be specified".to_string(),
            ));
        }

        if self.token.is_empty() {
            return Err(Error::InvalidArgument(
                "token must be specified".to_string(),
            ));
        }

        let mut params = vec![
            ("sourceName".to_string(), self.source_name.clone()),
            ("publisherId".to_string(), self.publisher_id.to_string()),
            ("siteId".to_string(), self.site_id.to_string()),
            ("token".to_string(), self.token.clone()),
        ];

        if let Some(campaigns) = &self.campaign_list {
            params.push(("campaignList".to_string(), campaigns.as_param()));
        }

        Ok(params)
    }
}
