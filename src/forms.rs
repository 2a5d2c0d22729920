//! Lead form records.

use serde::{Deserialize, Serialize};

/// A form which can be pushed through [`crate::submission::FormSubmission`].
pub trait Form: Serialize + Default + Send + Sync {
    /// Shown to the visitor when the request fails.
    const FAILURE_MESSAGE: &'static str;

    /// Reset every field to empty.
    fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl Form for ContactForm {
    const FAILURE_MESSAGE: &'static str =
        "Failed to send your message. Please try again or contact us directly.";
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationForm {
    pub name: String,
    pub phone: String,
    pub location: String,
    pub message: String,
}

impl Form for ConsultationForm {
    const FAILURE_MESSAGE: &'static str = "Failed to submit your request. Please try again.";
}

/// Question about a specific catalogue product.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquiryForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub product: String,
    pub message: String,
}

impl InquiryForm {
    pub fn for_product(product: impl Into<String>) -> Self {
        Self { product: product.into(), ..Self::default() }
    }
}

impl Form for InquiryForm {
    const FAILURE_MESSAGE: &'static str =
        "Failed to send your inquiry. Please try again or call us directly.";
}

/// Contact request kind, as the backend distinguishes them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    GeneralContact,
    ProductInquiry,
}

/// Contact form body with the request kind appended.
#[derive(Serialize)]
pub struct TaggedForm<'a, F> {
    #[serde(flatten)]
    pub fields: &'a F,

    #[serde(rename = "type")]
    pub kind: ContactKind,
}
