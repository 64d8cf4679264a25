// Toast API client: owns the bearer token, the shared request headers and
// the single-retry dispatcher every endpoint goes through.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, warn};

use crate::auth::authenticate;
use crate::config::ClientConfig;
use crate::dates::format_range_bound;
use crate::endpoint::Endpoint;
use crate::error::{Result, ToastError};
use crate::token::TokenStore;
use crate::transport::{HttpTransport, Transport};

pub const RESTAURANT_HEADER: &str = "toast-restaurant-external-id";

/// Sentinel the API puts in `message` when the bearer token is rejected.
pub const INVALID_TOKEN_MESSAGE: &str = "invalid_token";

/// Blocking client for the Toast REST API.
///
/// A restaurant GUID passed to any operation replaces the current
/// `Toast-Restaurant-External-ID` header for that call and every later call
/// on this instance until another override is given (last one wins).
pub struct ToastClient<T: Transport = HttpTransport> {
    transport: T,
    config: ClientConfig,
    store: TokenStore,
    token: String,
    headers: HeaderMap,
}

impl ToastClient<HttpTransport> {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_transport(config, HttpTransport::new()?)
    }

    /// Create a client configured by the `TOAST_*` environment variables.
    /// See `ClientConfig::from_env`.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<T: Transport> ToastClient<T> {
    /// Build a client over `transport`. Uses the persisted token if one
    /// exists; otherwise authenticates once and persists the new token.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        let store = TokenStore::new(config.token_path.clone());

        let token = match store.load()? {
            Some(token) => token,
            None => {
                let token = authenticate(&transport, config.base_url(), &config.credentials)?;
                store.save(&token)?;
                token
            }
        };

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut client = ToastClient {
            transport,
            config,
            store,
            token: String::new(),
            headers,
        };
        client.set_token(token)?;
        if let Some(guid) = client.config.restaurant_guid.clone() {
            client.set_restaurant(&guid)?;
        }
        Ok(client)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The bearer token currently sent with requests.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The restaurant GUID currently sent with requests, if any.
    pub fn restaurant_guid(&self) -> Option<&str> {
        self.headers
            .get(RESTAURANT_HEADER)
            .and_then(|v| v.to_str().ok())
    }

    fn set_token(&mut self, token: String) -> Result<()> {
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ToastError::InvalidHeader("Authorization"))?;
        self.headers.insert(AUTHORIZATION, value);
        self.token = token;
        Ok(())
    }

    fn set_restaurant(&mut self, guid: &str) -> Result<()> {
        let value = HeaderValue::from_str(guid)
            .map_err(|_| ToastError::InvalidHeader("Toast-Restaurant-External-ID"))?;
        self.headers
            .insert(HeaderName::from_static(RESTAURANT_HEADER), value);
        Ok(())
    }

    /// Re-authenticate and swap in the new token. The token file is
    /// rewritten too; failing to write it is logged, not fatal.
    fn refresh_token(&mut self) -> Result<()> {
        let token = authenticate(
            &self.transport,
            self.config.base_url(),
            &self.config.credentials,
        )?;
        if let Err(e) = self.store.save(&token) {
            warn!(error = %e, path = %self.store.path().display(), "Failed to persist refreshed token");
        }
        self.set_token(token)
    }

    fn fetch(&self, url: &str) -> Result<Value> {
        let body = self.transport.get(url, &self.headers)?;
        Ok(serde_json::from_str(&body)?)
    }

    /// GET `endpoint` and return the decoded body.
    ///
    /// If the body signals `invalid_token`, authenticates once and repeats
    /// the request once; the second body is returned whatever it contains.
    pub fn get(&mut self, endpoint: &Endpoint, restaurant_guid: Option<&str>) -> Result<Value> {
        let url = format!("{}{}", self.config.base_url(), endpoint.path());

        if let Some(guid) = restaurant_guid {
            self.set_restaurant(guid)?;
        }

        debug!(%url, "Dispatching request");
        let body = self.fetch(&url)?;
        if !is_token_expired(&body) {
            return Ok(body);
        }

        warn!("Token is expired/invalid. Generating new token ...");
        self.refresh_token()?;
        self.fetch(&url)
    }

    /// All data for one order.
    pub fn get_order(&mut self, order_guid: &str, restaurant_guid: Option<&str>) -> Result<Value> {
        self.get(&Endpoint::Order { guid: order_guid.to_string() }, restaurant_guid)
    }

    /// Orders modified between `start` and `end`. Both accept any format
    /// `dates::parse_flexible` understands.
    pub fn get_orders_in_range(
        &mut self,
        start: &str,
        end: &str,
        restaurant_guid: Option<&str>,
    ) -> Result<Value> {
        let endpoint = Endpoint::OrdersInRange {
            start: format_range_bound(start)?,
            end: format_range_bound(end)?,
        };
        self.get(&endpoint, restaurant_guid)
    }

    pub fn get_orders_by_business_date(
        &mut self,
        business_date: &str,
        restaurant_guid: Option<&str>,
    ) -> Result<Value> {
        self.get(
            &Endpoint::OrdersByBusinessDate { date: business_date.to_string() },
            restaurant_guid,
        )
    }

    pub fn get_jobs(&mut self, restaurant_guid: Option<&str>) -> Result<Value> {
        self.get(&Endpoint::Jobs, restaurant_guid)
    }

    pub fn get_employee(&mut self, employee_guid: &str, restaurant_guid: Option<&str>) -> Result<Value> {
        self.get(&Endpoint::Employee { guid: employee_guid.to_string() }, restaurant_guid)
    }

    /// Every employee of the current restaurant.
    pub fn get_employees(&mut self, restaurant_guid: Option<&str>) -> Result<Value> {
        self.get(&Endpoint::Employees, restaurant_guid)
    }
}

/// True only for a JSON object whose `message` is the string `invalid_token`.
pub fn is_token_expired(body: &Value) -> bool {
    body.as_object()
        .and_then(|map| map.get("message"))
        .and_then(Value::as_str)
        == Some(INVALID_TOKEN_MESSAGE)
}
