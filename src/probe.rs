//! Backend connectivity check.

use std::fmt::{Display, Formatter};

use http::StatusCode;
use serde::Deserialize;
use serde_json::json;

use crate::{
    api::{backend, consultation},
    forms::ConsultationForm,
    prelude::*,
    submission::RequestError,
};

pub enum CheckStatus {
    Ok(String),
    Status(StatusCode),
    Unavailable(RequestError),
}

impl CheckStatus {
    fn from_response(response: Result<reqwest::Response, RequestError>) -> Self {
        match response {
            Ok(response) if response.status().is_success() => Self::Ok(String::new()),
            Ok(response) => Self::Status(response.status()),
            Err(error) => Self::Unavailable(error),
        }
    }

    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}

impl Display for CheckStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok(details) if details.is_empty() => f.write_str("ok"),
            Self::Ok(details) => write!(f, "ok: {details}"),
            Self::Status(status) => write!(f, "responded with {status}"),
            Self::Unavailable(error) => write!(f, "{error}"),
        }
    }
}

pub struct Check {
    pub name: &'static str,
    pub status: CheckStatus,
}

/// Check the endpoints one by one. Only an unreachable backend is fatal.
#[instrument(skip_all, fields(base_url = backend.base_url()))]
pub async fn run(backend: &backend::Api, consultation: &consultation::Api) -> Result<Vec<Check>> {
    info!("checking connectivity…");
    let response = backend.get("", None).await.context("the backend is unreachable")?;
    let mut checks = vec![Check {
        name: "Connectivity",
        status: CheckStatus::Ok(response.status().to_string()),
    }];

    info!("checking the products API…");
    checks.push(Check { name: "Products API", status: check_products(backend).await });

    info!("checking the contact API…");
    let contact = json!({
        "name": "Test User",
        "email": "test@example.com",
        "phone": "+1234567890",
        "subject": "API Test",
        "message": "This is a test message",
        "type": "general_contact",
    });
    let status = CheckStatus::from_response(backend.post("api/contact", &contact, None).await);
    checks.push(Check { name: "Contact API", status });

    info!(url = %consultation.url(), "checking the consultation API…");
    let test_consultation = ConsultationForm {
        name: "Test User".to_string(),
        phone: "+1234567890".to_string(),
        location: "Test City".to_string(),
        message: "This is a test consultation request".to_string(),
    };
    let status = CheckStatus::from_response(consultation.post_raw(&test_consultation).await);
    checks.push(Check { name: "Consultation API", status });

    info!("checking the image upload API…");
    let upload = json!({ "test": true, "filename": "test-image.jpg" });
    let status = CheckStatus::from_response(backend.post("api/upload", &upload, None).await);
    checks.push(Check { name: "Image upload API", status });

    for check in &checks {
        if check.status.is_ok() {
            info!(check.name, status = %check.status);
        } else {
            warn!(check.name, status = %check.status);
        }
    }
    Ok(checks)
}

async fn check_products(backend: &backend::Api) -> CheckStatus {
    #[derive(Deserialize)]
    struct NamedItem {
        name: Option<String>,
    }

    let response = match backend.get("api/products", None).await {
        Ok(response) if response.status().is_success() => response,
        response => return CheckStatus::from_response(response),
    };
    match response.json::<Vec<NamedItem>>().await {
        Ok(items) => {
            let first = items.first().and_then(|item| item.name.as_deref()).unwrap_or("none");
            CheckStatus::Ok(format!("{} products, first: {first}", items.len()))
        }
        Err(error) => CheckStatus::Unavailable(error.into()),
    }
}
