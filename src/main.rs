#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod api;
mod battery;
mod catalog;
mod cli;
mod forms;
mod images;
mod prelude;
mod probe;
mod quantity;
mod submission;
mod tables;

use clap::{Parser, crate_version};

use crate::{cli::Args, prelude::*};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    Args::parse().command.run().await?;

    info!("done!");
    Ok(())
}
