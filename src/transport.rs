// HTTP transport seam. The client only needs "GET with headers" and
// "POST a form", both returning the raw body text; status codes are not
// inspected anywhere.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use tracing::debug;

use crate::error::Result;

pub trait Transport {
    /// Issue a GET and return the response body.
    fn get(&self, url: &str, headers: &HeaderMap) -> Result<String>;

    /// POST `form` as `application/x-www-form-urlencoded` and return the body.
    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<String>;
}

/// Blocking `reqwest` transport using the client's default timeouts.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, headers: &HeaderMap) -> Result<String> {
        debug!(%url, "GET request");
        let res = self.client.get(url).headers(headers.clone()).send()?;
        debug!(status = %res.status(), "Response received");
        Ok(res.text()?)
    }

    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<String> {
        debug!(%url, "POST form");
        let res = self
            .client
            .post(url)
            .header(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            )
            .form(form)
            .send()?;
        debug!(status = %res.status(), "Response received");
        Ok(res.text()?)
    }
}
