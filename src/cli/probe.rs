use clap::Parser;

use crate::{
    cli::backend::{BackendArgs, ConsultationArgs},
    prelude::*,
    probe,
    tables::build_probe_table,
};

#[derive(Parser)]
pub struct ProbeArgs {
    #[clap(flatten)]
    backend: BackendArgs,

    #[clap(flatten)]
    consultation: ConsultationArgs,
}

impl ProbeArgs {
    pub async fn run(self) -> Result {
        let checks =
            probe::run(&self.backend.new_client()?, &self.consultation.new_client()?).await?;
        println!("{}", build_probe_table(&checks));
        Ok(())
    }
}
