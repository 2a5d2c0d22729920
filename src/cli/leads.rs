//! Contact and consultation requests.

use clap::Parser;

use crate::{
    cli::{
        backend::{BackendArgs, ConsultationArgs},
        emailjs::EmailJsArgs,
        policy::ErrorPolicyArgs,
    },
    forms::{ConsultationForm, ContactForm, Form},
    prelude::*,
    submission::{Endpoint, ErrorPolicy, FormSubmission, Notifier, Outcome},
};

#[derive(Parser)]
pub struct ContactArgs {
    #[clap(long)]
    name: String,

    #[clap(long)]
    email: String,

    #[clap(long)]
    phone: String,

    #[clap(long)]
    subject: String,

    #[clap(long)]
    message: String,

    #[clap(flatten)]
    backend: BackendArgs,

    #[clap(flatten)]
    error_policy: ErrorPolicyArgs,
}

impl ContactArgs {
    pub async fn run(self) -> Result {
        let backend = self.backend.new_client()?;
        let form = ContactForm {
            name: self.name,
            email: self.email,
            phone: self.phone,
            subject: self.subject,
            message: self.message,
        };
        submit(
            form,
            self.error_policy.policy(),
            &backend,
            None,
            "Message sent! Thank you for contacting DEC Tech. We'll get back to you within 24 hours.",
        )
        .await
    }
}

#[derive(Parser)]
pub struct ConsultArgs {
    #[clap(long)]
    name: String,

    #[clap(long)]
    phone: String,

    #[clap(long)]
    location: String,

    /// Energy needs, roof details, budget and so on.
    #[clap(long, default_value = "")]
    message: String,

    #[clap(flatten)]
    consultation: ConsultationArgs,

    #[clap(flatten)]
    emailjs: EmailJsArgs,

    #[clap(flatten)]
    error_policy: ErrorPolicyArgs,
}

impl ConsultArgs {
    pub async fn run(self) -> Result {
        let endpoint = self.consultation.new_client()?;
        let notifier = self.emailjs.new_client()?;
        let form = ConsultationForm {
            name: self.name,
            phone: self.phone,
            location: self.location,
            message: self.message,
        };
        submit(
            form,
            self.error_policy.policy(),
            &endpoint,
            notifier.as_ref().map(|notifier| notifier as &dyn Notifier<ConsultationForm>),
            "Thank you! Your consultation request has been submitted successfully. Our team will contact you within 24 hours.",
        )
        .await
    }
}

/// Submit the form once and tell the visitor how it went.
pub async fn submit<F, E>(
    fields: F,
    policy: ErrorPolicy,
    endpoint: &E,
    notifier: Option<&dyn Notifier<F>>,
    acknowledgement: &str,
) -> Result
where
    F: Form,
    E: Endpoint<F>,
{
    let mut submission = FormSubmission::new(fields, policy);
    match submission.submit(endpoint, notifier).await {
        Some(Outcome::Acknowledged) => {
            println!("{acknowledgement}");
            Ok(())
        }
        Some(Outcome::FailedReportedAsAcknowledged(error)) => {
            if let Some(message) = submission.error() {
                eprintln!("{message}");
            }
            warn!(%error, "the submission is lost but reported as sent");
            println!("{acknowledgement}");
            Ok(())
        }
        Some(Outcome::Failed(error)) => {
            Err(error).context(submission.error().unwrap_or(F::FAILURE_MESSAGE))
        }
        None => bail!("the form is not ready for submission"),
    }
}
