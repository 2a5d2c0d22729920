//! The company backend: products, contact requests and image storage.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client,
    Method,
    RequestBuilder,
    Response,
    Url,
    multipart::{Form as MultipartForm, Part},
};
use serde::{Deserialize, Serialize};

use crate::{
    api::client,
    catalog::{Product, ProductFeed, ProductList},
    forms::{ContactForm, ContactKind, Form, InquiryForm, TaggedForm},
    images::{ImageUploader, ProductImage},
    prelude::*,
    submission::{Endpoint, RequestError},
};

/// Placeholder base URL: the backend is treated as not configured while it is in use.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Timeout of the requests which have a fallback.
pub const SHORT_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Api {
    client: Client,
    base_url: String,
}

impl Api {
    pub fn new(base_url: &Url) -> Result<Self> {
        Ok(Self {
            client: client::try_new()?,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn prepare(&self, method: Method, path: &str, timeout: Option<Duration>) -> RequestBuilder {
        let request = self.client.request(method, self.url(path));
        match timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        }
    }

    #[instrument(skip_all, level = Level::DEBUG, fields(path = path))]
    pub async fn get(
        &self,
        path: &str,
        timeout: Option<Duration>,
    ) -> Result<Response, RequestError> {
        Ok(self.prepare(Method::GET, path, timeout).send().await?)
    }

    #[instrument(skip_all, level = Level::DEBUG, fields(path = path))]
    pub async fn post<B>(
        &self,
        path: &str,
        body: &B,
        timeout: Option<Duration>,
    ) -> Result<Response, RequestError>
    where
        B: Serialize + Sync + ?Sized,
    {
        Ok(self.prepare(Method::POST, path, timeout).json(body).send().await?)
    }

    #[instrument(skip_all, fields(kind = ?kind))]
    async fn post_contact<F: Form>(
        &self,
        fields: &F,
        kind: ContactKind,
    ) -> Result<(), RequestError> {
        info!("sending…");
        let body = TaggedForm { fields, kind };
        let response = self.post("api/contact", &body, contact_timeout(kind)).await?;
        RequestError::check(response)?;
        Ok(())
    }
}

/// Inquiries have a fallback and give up early, general messages wait for the backend.
const fn contact_timeout(kind: ContactKind) -> Option<Duration> {
    match kind {
        ContactKind::ProductInquiry => Some(SHORT_TIMEOUT),
        ContactKind::GeneralContact => None,
    }
}

#[async_trait]
impl ProductFeed for Api {
    fn is_configured(&self) -> bool {
        self.base_url != DEFAULT_BASE_URL
    }

    #[instrument(skip_all)]
    async fn get_products(&self) -> Result<Vec<Product>, RequestError> {
        info!("fetching products…");
        let response = self.get("api/products", Some(SHORT_TIMEOUT)).await?;
        let ProductList(products) = RequestError::check(response)?.json().await?;
        info!(n_products = products.len(), "fetched");
        Ok(products)
    }
}

#[async_trait]
impl Endpoint<ContactForm> for Api {
    async fn send(&self, fields: &ContactForm) -> Result<(), RequestError> {
        self.post_contact(fields, ContactKind::GeneralContact).await
    }
}

#[async_trait]
impl Endpoint<InquiryForm> for Api {
    async fn send(&self, fields: &InquiryForm) -> Result<(), RequestError> {
        if !self.is_configured() {
            return Err(RequestError::Unconfigured);
        }
        self.post_contact(fields, ContactKind::ProductInquiry).await
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    url: Option<String>,
}

#[async_trait]
impl ImageUploader for Api {
    #[instrument(skip_all, fields(file_name = image.file_name))]
    async fn upload(&self, image: &ProductImage) -> Result<Option<String>> {
        let bytes = self
            .client
            .get(image.source_url)
            .send()
            .await
            .context("failed to fetch the image")?
            .error_for_status()
            .context("failed to fetch the image")?
            .bytes()
            .await
            .context("failed to read the image")?;
        debug!(n_bytes = bytes.len(), "fetched the image");

        let form = MultipartForm::new()
            .part("image", Part::bytes(bytes.to_vec()).file_name(image.file_name))
            .text("category", image.category)
            .text("name", image.name);
        let response = self
            .client
            .post(self.url("api/upload/image"))
            .multipart(form)
            .send()
            .await
            .context("failed to call the upload endpoint")?
            .error_for_status()
            .context("upload failed")?
            .json::<UploadResponse>()
            .await
            .context("failed to deserialize the upload response")?;
        Ok(response.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_url_is_not_configured() -> Result {
        assert!(!Api::new(&Url::parse(DEFAULT_BASE_URL)?)?.is_configured());
        assert!(!Api::new(&Url::parse("http://localhost:3001/")?)?.is_configured());
        assert!(Api::new(&Url::parse("https://dec-tech.onrender.com")?)?.is_configured());
        Ok(())
    }

    #[test]
    fn url_ok() -> Result {
        let api = Api::new(&Url::parse("https://dec-tech.onrender.com/")?)?;
        assert_eq!(api.url("api/products"), "https://dec-tech.onrender.com/api/products");
        Ok(())
    }

    #[test]
    fn only_requests_with_fallback_time_out() -> Result {
        let api = Api::new(&Url::parse("https://dec-tech.onrender.com")?)?;

        let products = api.prepare(Method::GET, "api/products", Some(SHORT_TIMEOUT)).build()?;
        assert_eq!(products.timeout(), Some(&SHORT_TIMEOUT));

        let contact = api
            .prepare(Method::POST, "api/contact", contact_timeout(ContactKind::GeneralContact))
            .build()?;
        assert_eq!(contact.timeout(), None);
        assert_eq!(contact.url().as_str(), "https://dec-tech.onrender.com/api/contact");

        assert_eq!(contact_timeout(ContactKind::ProductInquiry), Some(SHORT_TIMEOUT));
        Ok(())
    }

    #[tokio::test]
    async fn unconfigured_inquiry_is_not_sent() -> Result {
        let api = Api::new(&Url::parse(DEFAULT_BASE_URL)?)?;
        let result = Endpoint::<InquiryForm>::send(&api, &InquiryForm::default()).await;
        assert_eq!(result, Err(RequestError::Unconfigured));
        Ok(())
    }

    #[tokio::test]
    #[ignore = "makes the API request"]
    async fn get_products_ok() -> Result {
        let api = Api::new(&Url::parse("https://dec-tech.onrender.com")?)?;
        let products = api.get_products().await?;
        assert!(!products.is_empty());
        Ok(())
    }
}
