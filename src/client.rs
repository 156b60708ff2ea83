//! The BuscaPé API client.

use crate::config::{Config, Environment, ResponseFormat};
use crate::country::Country;
use crate::error::{Error, Result};
use crate::filter::{validate_category_id, SearchFilter};
use crate::models::{NewSource, OfferQuery, ServiceResponse};
use crate::request::EndpointRequest;
use crate::transport::{HttpTransport, Transport};
use std::net::Ipv4Addr;
use tracing::{debug, info, warn};

const SERVICE_DOMAIN: &str = "buscape.com";

/// Client for the BuscaPé comparison-shopping API.
///
/// Each operation validates its parameters, builds the endpoint URL, and
/// issues a single GET through the configured transport. Response bodies
/// are returned verbatim.
pub struct BuscapeClient {
    config: Config,
    transport: Box<dyn Transport>,
    base_url: Option<String>,
}

impl std::fmt::Debug for BuscapeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuscapeClient")
            .field("config", &self.config)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl BuscapeClient {
    /// Creates a client with the default HTTP transport.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::with_proxy(config.proxy.as_deref())?;
        Ok(Self {
            config,
            transport: Box::new(transport),
            base_url: None,
        })
    }

    /// Creates a client with an injected transport.
    pub fn with_transport(config: Config, transport: Box<dyn Transport>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            transport,
            base_url: None,
        })
    }

    /// Creates a client with a custom base URL replacing
    /// `http://{host}.buscape.com` (for testing).
    pub fn with_base_url(config: Config, base_url: Option<String>) -> Result<Self> {
        let mut client = Self::new(config)?;
        client.base_url = base_url;
        Ok(client)
    }

    /// Switches the client to the sandbox environment. There is no way back;
    /// build a new client to reach production again.
    pub fn set_sandbox(&mut self) {
        self.config.environment = Environment::Sandbox;
    }

    /// Changes the default response format used when a call does not
    /// override it.
    pub fn set_default_format(&mut self, format: ResponseFormat) {
        self.config.format = format;
    }

    /// Sets the originating client IP forwarded with every request.
    pub fn set_client_ip(&mut self, ip: &str) -> Result<()> {
        let parsed: Ipv4Addr = ip.parse().map_err(|_| {
            Error::InvalidArgument("clientIp must be a valid IPv4 address".to_string())
        })?;
        self.config.client_ip = Some(parsed);
        Ok(())
    }

    pub fn country(&self) -> Country {
        self.config.country
    }

    pub fn environment(&self) -> Environment {
        self.config.environment
    }

    pub fn default_format(&self) -> ResponseFormat {
        self.config.format
    }

    /// Searches categories by keyword or category id. Exactly one of the
    /// two must be given.
    pub async fn find_category_list(
        &self,
        keyword: Option<&str>,
        category_id: Option<i64>,
        format: Option<ResponseFormat>,
    ) -> Result<ServiceResponse> {
        let keyword = keyword.filter(|k| !k.is_empty());

        match (keyword, category_id) {
            (None, None) => {
                return Err(Error::InvalidArgument(
                    "keyword or categoryId must be specified".to_string(),
                ))
            }
            (Some(_), Some(_)) => {
                return Err(Error::InvalidArgument(
                    "only one of keyword or categoryId is accepted".to_string(),
                ))
            }
            _ => {}
        }

        if let Some(category_id) = category_id {
            validate_category_id(category_id)?;
        }

        let filter = SearchFilter {
            format,
            ..SearchFilter::default()
        };
        let mut req = EndpointRequest::new("findCategoryList", filter.to_params(self.config.format)?);

        if let Some(keyword) = keyword {
            req.push("keyword", keyword);
        } else if let Some(category_id) = category_id {
            req.push("categoryId", category_id.to_string());
        }

        info!("Searching categories");
        self.execute(req).await
    }

    /// Searches products by keyword, category id, or both.
    pub async fn find_product_list(
        &self,
        keyword: Option<&str>,
        category_id: Option<i64>,
        affiliate: bool,
        filter: &SearchFilter,
    ) -> Result<ServiceResponse> {
        let keyword = keyword.filter(|k| !k.is_empty());

        if keyword.is_none() && category_id.is_none() {
            return Err(Error::InvalidArgument(
                "keyword or categoryId must be specified".to_string(),
            ));
        }

        if let Some(category_id) = category_id {
            validate_category_id(category_id)?;
        }

        let method = if affiliate {
            "findProductList/lomadee"
        } else {
            "findProductList"
        };

        let mut req = EndpointRequest::new(method, filter.to_params(self.config.format)?);

        if let Some(keyword) = keyword {
            req.push("keyword", keyword);
        }
        if let Some(category_id) = category_id {
            req.push("categoryId", category_id.to_string());
        }

        info!("Searching products");
        self.execute(req).await
    }

    /// Searches offers. The query must name at least one selector; see
    /// [`OfferQuery`] for the priority when several are set.
    pub async fn find_offer_list(
        &self,
        query: &OfferQuery,
        affiliate: bool,
        filter: &SearchFilter,
    ) -> Result<ServiceResponse> {
        let selectors = query.selector_params()?;

        let method = if affiliate {
            "findOfferList/lomadee"
        } else {
            "findOfferList"
        };

        let mut req = EndpointRequest::new(method, filter.to_params(self.config.format)?);
        for (key, value) in selectors {
            req.push(key, value);
        }

        info!("Searching offers");
        self.execute(req).await
    }

    /// Returns the most popular products.
    pub async fn top_products(&self, filter: &SearchFilter) -> Result<ServiceResponse> {
        let req = EndpointRequest::new("topProducts", filter.to_params(self.config.format)?);

        info!("Fetching top products");
        self.execute(req).await
    }

    /// Returns the technical details of a product.
    pub async fn view_product_details(
        &self,
        product_id: i64,
        format: Option<ResponseFormat>,
    ) -> Result<ServiceResponse> {
        let filter = SearchFilter {
            format,
            ..SearchFilter::default()
        };
        let mut req =
            EndpointRequest::new("viewProductDetails", filter.to_params(self.config.format)?);
        req.push("productId", product_id.to_string());

        info!("Fetching product details: {}", product_id);
        self.execute(req).await
    }

    /// Returns the details of a seller or store.
    pub async fn view_seller_details(
        &self,
        seller_id: i64,
        format: Option<ResponseFormat>,
    ) -> Result<ServiceResponse> {
        let format = format.unwrap_or(self.config.format);
        let req = EndpointRequest::new(
            "viewSellerDetails",
            vec![
                ("sellerId".to_string(), seller_id.to_string()),
                ("format".to_string(), format.as_str().to_string()),
            ],
        );

        info!("Fetching seller details: {}", seller_id);
        self.execute(req).await
    }

    /// Returns the user ratings of a product.
    pub async fn view_user_ratings(
        &self,
        product_id: i64,
        format: Option<ResponseFormat>,
    ) -> Result<ServiceResponse> {
        let format = format.unwrap_or(self.config.format);
        let req = EndpointRequest::new(
            "viewUserRatings",
            vec![
                ("productId".to_string(), product_id.to_string()),
                ("format".to_string(), format.as_str().to_string()),
            ],
        );

        info!("Fetching user ratings: {}", product_id);
        self.execute(req).await
    }

    /// Registers an affiliate source id. Only used in the Lomadee
    /// integration flow; the sandbox always answers with the same id.
    pub async fn create_source_id(
        &self,
        source: &NewSource,
        format: Option<ResponseFormat>,
    ) -> Result<ServiceResponse> {
        let source_params = source.to_params()?;

        let filter = SearchFilter {
            format,
            ..SearchFilter::default()
        };
        let mut req =
            EndpointRequest::new("createSource/lomadee", filter.to_params(self.config.format)?);
        for (key, value) in source_params {
            req.push(key, value);
        }

        info!("Creating affiliate source id");
        self.execute(req).await
    }

    fn endpoint_url(&self, req: &EndpointRequest) -> String {
        let base = match &self.base_url {
            Some(base) => base.clone(),
            None => format!("http://{}.{}", self.config.environment.host(), SERVICE_DOMAIN),
        };

        format!(
            "{}/service/{}/{}/{}/?{}",
            base,
            req.method_path(),
            self.config.application_id,
            self.config.country.code(),
            req.query_string()
        )
    }

    async fn execute(&self, mut req: EndpointRequest) -> Result<ServiceResponse> {
        if let Some(ip) = self.config.client_ip {
            req.push("clientIp", ip.to_string());
        }

        let url = self.endpoint_url(&req);
        debug!("GET {}", url);

        let response = self.transport.fetch(&url).await?;

        if response.status == 401 {
            let message = match self.config.environment {
                Environment::Sandbox => "Your application is not approved yet",
                Environment::Production => "The request requires user authentication",
            };
            return Err(Error::Authorization {
                message: message.to_string(),
                url,
            });
        }

        if response.status >= 400 {
            warn!("Request failed with status {}", response.status);
        }

        Ok(ServiceResponse {
            status_code: response.status,
            body: response.body,
            request_url: url,
        })
    }
}
