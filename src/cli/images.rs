use std::time::Duration;

use clap::Parser;

use crate::{
    cli::backend::BackendArgs,
    images::{PRODUCT_IMAGES, upload_all},
    prelude::*,
    tables::build_upload_table,
};

#[derive(Parser)]
pub struct ImagesArgs {
    /// Pause between the uploads.
    #[clap(long, env = "UPLOAD_PAUSE", default_value = "500ms")]
    pause: humantime::Duration,

    #[clap(flatten)]
    backend: BackendArgs,
}

impl ImagesArgs {
    pub async fn run(self) -> Result {
        let backend = self.backend.new_client()?;
        let pause: Duration = self.pause.into();
        let results = upload_all(&backend, &PRODUCT_IMAGES, pause).await;
        println!("{}", build_upload_table(&results));
        let n_failed = results.iter().filter(|result| !result.is_uploaded()).count();
        ensure!(n_failed == 0, "{n_failed} of {} uploads failed", results.len());
        Ok(())
    }
}
