//! Product listing and product inquiries.

use clap::Parser;

use crate::{
    catalog::{Category, filter, load_products},
    cli::{backend::BackendArgs, leads::submit, policy::ErrorPolicyArgs},
    forms::InquiryForm,
    prelude::*,
    tables::build_products_table,
};

#[derive(Parser)]
pub struct ProductsArgs {
    /// Show only this category.
    #[clap(long)]
    category: Option<Category>,

    /// Case-insensitive search in the product names and descriptions.
    #[clap(long, default_value = "")]
    search: String,

    #[clap(flatten)]
    backend: BackendArgs,
}

impl ProductsArgs {
    #[instrument(skip_all)]
    pub async fn run(self) -> Result {
        let backend = self.backend.new_client()?;
        let (products, source) = load_products(&backend).await;
        info!(n_products = products.len(), %source, "loaded");

        let filtered: Vec<_> = filter(&products, self.category, &self.search).collect();
        if filtered.is_empty() {
            println!("No products found. Try adjusting your search or filter criteria.");
        } else {
            println!("{}", build_products_table(filtered));
        }
        Ok(())
    }
}

#[derive(Parser)]
pub struct InquireArgs {
    /// Product name the inquiry is about.
    #[clap(long)]
    product: String,

    #[clap(long)]
    name: String,

    #[clap(long)]
    email: String,

    #[clap(long)]
    phone: String,

    #[clap(long, default_value = "")]
    message: String,

    #[clap(flatten)]
    backend: BackendArgs,

    #[clap(flatten)]
    error_policy: ErrorPolicyArgs,
}

impl InquireArgs {
    pub async fn run(self) -> Result {
        let backend = self.backend.new_client()?;
        let form = InquiryForm {
            name: self.name,
            email: self.email,
            phone: self.phone,
            message: self.message,
            ..InquiryForm::for_product(self.product)
        };
        submit(
            form,
            self.error_policy.policy(),
            &backend,
            None,
            "Message sent! We'll get back to you within 24 hours.",
        )
        .await
    }
}
