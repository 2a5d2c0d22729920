use clap::Parser;
use reqwest::Url;

use crate::{
    api::{backend, consultation},
    prelude::*,
};

#[derive(Parser)]
pub struct BackendArgs {
    /// Backend base URL. The default one means «not configured».
    #[clap(long = "api-base-url", env = "API_BASE_URL", default_value = backend::DEFAULT_BASE_URL)]
    pub base_url: Url,
}

impl BackendArgs {
    pub fn new_client(&self) -> Result<backend::Api> {
        backend::Api::new(&self.base_url)
    }
}

#[derive(Parser)]
pub struct ConsultationArgs {
    /// Consultation request endpoint.
    #[clap(
        long = "consultation-url",
        env = "CONSULTATION_URL",
        default_value = consultation::DEFAULT_URL
    )]
    pub url: Url,
}

impl ConsultationArgs {
    pub fn new_client(&self) -> Result<consultation::Api> {
        consultation::Api::new(self.url.clone())
    }
}
