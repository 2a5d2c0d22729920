use async_trait::async_trait;
use reqwest::{Client, Response, Url};

use crate::{
    api::client,
    forms::ConsultationForm,
    prelude::*,
    submission::{Endpoint, RequestError},
};

/// Consultation requests live on their own host, apart from the rest of the backend.
pub const DEFAULT_URL: &str = "https://dec-tech.onrender.com/consults";

pub struct Api {
    client: Client,
    url: Url,
}

impl Api {
    pub fn new(url: Url) -> Result<Self> {
        Ok(Self { client: client::try_new()?, url })
    }

    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Post the form as is, whatever the response status.
    pub async fn post_raw(&self, fields: &ConsultationForm) -> Result<Response, RequestError> {
        Ok(self.client.post(self.url.clone()).json(fields).send().await?)
    }
}

#[async_trait]
impl Endpoint<ConsultationForm> for Api {
    #[instrument(skip_all, fields(url = %self.url))]
    async fn send(&self, fields: &ConsultationForm) -> Result<(), RequestError> {
        info!("requesting a consultation…");
        RequestError::check(self.post_raw(fields).await?)?;
        Ok(())
    }
}
