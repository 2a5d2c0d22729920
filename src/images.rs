//! Copy the product images over to the backend storage.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::prelude::*;

pub struct ProductImage {
    pub name: &'static str,
    pub file_name: &'static str,
    pub source_url: &'static str,

    /// Storage folder slug on the backend.
    pub category: &'static str,
}

pub const PRODUCT_IMAGES: [ProductImage; 4] = [
    ProductImage {
        name: "Solar Panel",
        file_name: "solar-panel.png",
        source_url: "https://hebbkx1anhila5yf.public.blob.vercel-storage.com/image-QpzSjLckUKNYZawGbRyix2kiakkEmV.png",
        category: "solar-panels",
    },
    ProductImage {
        name: "Inverter",
        file_name: "inverter.png",
        source_url: "https://hebbkx1anhila5yf.public.blob.vercel-storage.com/image-IPmgY5WNS2fjcCqfmvE1gugeFxpyHr.png",
        category: "inverters",
    },
    ProductImage {
        name: "Charge Controller",
        file_name: "charge-controller.png",
        source_url: "https://hebbkx1anhila5yf.public.blob.vercel-storage.com/image-49ZEn1LsDsuxffq5Qr7coqgplD1FT1.png",
        category: "controllers",
    },
    ProductImage {
        name: "Lithium Battery",
        file_name: "lithium-battery.png",
        source_url: "https://hebbkx1anhila5yf.public.blob.vercel-storage.com/image-4Mif3pHJObZgqAuBHoaoqovAZ2ksvU.png",
        category: "batteries",
    },
];

#[async_trait]
pub trait ImageUploader: Sync {
    /// Download the image from its source and store it on the backend.
    ///
    /// Returns the stored image URL, if the backend tells it.
    async fn upload(&self, image: &ProductImage) -> Result<Option<String>>;
}

pub enum UploadOutcome {
    Uploaded { url: Option<String> },
    Failed { error: String },
}

pub struct UploadResult<'a> {
    pub image: &'a ProductImage,
    pub outcome: UploadOutcome,
}

impl UploadResult<'_> {
    pub const fn is_uploaded(&self) -> bool {
        matches!(self.outcome, UploadOutcome::Uploaded { .. })
    }
}

/// Upload the images one by one, pausing in between to spare the backend.
///
/// A failed image does not stop the batch.
#[instrument(skip_all, fields(n_images = images.len()))]
pub async fn upload_all<'a>(
    uploader: &dyn ImageUploader,
    images: &'a [ProductImage],
    pause: Duration,
) -> Vec<UploadResult<'a>> {
    let mut results = Vec::with_capacity(images.len());
    for (index, image) in images.iter().enumerate() {
        if index != 0 {
            sleep(pause).await;
        }
        info!(image.file_name, "uploading…");
        let outcome = match uploader.upload(image).await {
            Ok(url) => {
                info!(image.file_name, ?url, "uploaded");
                UploadOutcome::Uploaded { url }
            }
            Err(error) => {
                warn!(image.file_name, "failed to upload: {error:#}");
                UploadOutcome::Failed { error: format!("{error:#}") }
            }
        };
        results.push(UploadResult { image, outcome });
    }
    let n_uploaded = results.iter().filter(|result| result.is_uploaded()).count();
    info!(n_uploaded, n_failed = results.len() - n_uploaded, "done");
    results
}
