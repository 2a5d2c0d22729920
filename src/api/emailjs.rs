//! [EmailJS](https://www.emailjs.com/docs/rest-api/send/) notifications.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::{api::client, forms::Form, prelude::*, submission::Notifier};

const SEND_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

pub struct Api {
    client: Client,
    service_id: String,
    template_id: String,
    public_key: String,
}

impl Api {
    pub fn new(service_id: String, template_id: String, public_key: String) -> Result<Self> {
        Ok(Self { client: client::try_new()?, service_id, template_id, public_key })
    }
}

#[derive(Serialize)]
struct SendRequest<'a, P> {
    service_id: &'a str,
    template_id: &'a str,

    /// EmailJS still calls the public key «user ID».
    user_id: &'a str,

    template_params: &'a P,
}

#[async_trait]
impl<F: Form> Notifier<F> for Api {
    #[instrument(skip_all, fields(service_id = %self.service_id, template_id = %self.template_id))]
    async fn notify(&self, fields: &F) -> Result {
        info!("sending the email…");
        let request = SendRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            template_params: fields,
        };
        let reply = self
            .client
            .post(SEND_URL)
            .json(&request)
            .send()
            .await
            .context("failed to call EmailJS")?
            .error_for_status()
            .context("EmailJS rejected the email")?
            .text()
            .await?;
        info!(%reply, "sent");
        Ok(())
    }
}
