mod backend;
mod calculate;
mod catalog;
mod emailjs;
mod images;
mod leads;
mod policy;
mod probe;

use clap::{Parser, Subcommand};

use crate::{
    cli::{
        calculate::CalculateArgs,
        catalog::{InquireArgs, ProductsArgs},
        images::ImagesArgs,
        leads::{ConsultArgs, ContactArgs},
        probe::ProbeArgs,
    },
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Size a battery bank for the load and the backup duration.
    #[clap(name = "calculate")]
    Calculate(CalculateArgs),

    /// List the products, falling back to the built-in catalogue.
    #[clap(name = "products")]
    Products(ProductsArgs),

    /// Send a general contact message.
    #[clap(name = "contact")]
    Contact(Box<ContactArgs>),

    /// Request a solar consultation.
    #[clap(name = "consult")]
    Consult(Box<ConsultArgs>),

    /// Ask about a specific product.
    #[clap(name = "inquire")]
    Inquire(Box<InquireArgs>),

    /// Copy the product images to the backend storage.
    #[clap(name = "images")]
    Images(ImagesArgs),

    /// Check connectivity of every backend endpoint.
    #[clap(name = "probe")]
    Probe(ProbeArgs),
}

impl Command {
    pub async fn run(self) -> Result {
        match self {
            Self::Calculate(args) => {
                args.run();
                Ok(())
            }
            Self::Products(args) => args.run().await,
            Self::Contact(args) => args.run().await,
            Self::Consult(args) => args.run().await,
            Self::Inquire(args) => args.run().await,
            Self::Images(args) => args.run().await,
            Self::Probe(args) => args.run().await,
        }
    }
}
