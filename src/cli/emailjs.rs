use clap::Parser;

use crate::{api::emailjs, prelude::*};

#[derive(Parser)]
pub struct EmailJsArgs {
    #[clap(long = "emailjs-service-id", env = "EMAILJS_SERVICE_ID")]
    pub service_id: Option<String>,

    #[clap(long = "emailjs-template-id", env = "EMAILJS_TEMPLATE_ID")]
    pub template_id: Option<String>,

    /// EmailJS public key, safe to share.
    #[clap(long = "emailjs-public-key", env = "EMAILJS_PUBLIC_KEY")]
    pub public_key: Option<String>,
}

impl EmailJsArgs {
    /// Build the client if EmailJS is fully configured.
    pub fn new_client(&self) -> Result<Option<emailjs::Api>> {
        match (&self.service_id, &self.template_id, &self.public_key) {
            (Some(service_id), Some(template_id), Some(public_key)) => Ok(Some(
                emailjs::Api::new(service_id.clone(), template_id.clone(), public_key.clone())?,
            )),
            (None, None, None) => {
                info!("EmailJS is not configured, no notification will be sent");
                Ok(None)
            }
            _ => bail!("EmailJS service ID, template ID and public key must be set together"),
        }
    }
}
