//! Product catalogue with the built-in fallback.

use std::fmt::{Display, Formatter};

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_with::{DefaultOnError, DefaultOnNull, VecSkipError, serde_as};

use crate::{prelude::*, submission::RequestError};

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Zero when the backend keeps its own kind of identifier.
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub id: u64,

    pub name: String,

    /// Supported system voltages, for example `12/24/48V`.
    #[serde(default, deserialize_with = "Product::deserialize_voltage")]
    pub voltage: String,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub category: String,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub description: String,

    /// Image URL.
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub image: String,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub features: Vec<String>,
}

impl Product {
    /// Older backend records store the voltage as a bare number.
    fn deserialize_voltage<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Voltage {
            Text(String),
            Number(u16),
        }

        Ok(match Option::<Voltage>::deserialize(deserializer)? {
            Some(Voltage::Text(text)) => text,
            Some(Voltage::Number(volts)) => format!("{volts}V"),
            None => String::new(),
        })
    }

    fn matches(&self, category: Option<Category>, search: &str) -> bool {
        let matches_category = category.is_none_or(|category| self.category == category.label());
        let search = search.to_lowercase();
        let matches_search = self.name.to_lowercase().contains(&search)
            || self.description.to_lowercase().contains(&search);
        matches_category && matches_search
    }
}

/// Backend product list: a record which cannot be read is dropped on its own.
#[must_use]
#[serde_as]
#[derive(Deserialize, derive_more::IntoIterator)]
pub struct ProductList(#[serde_as(as = "VecSkipError<_>")] pub Vec<Product>);

#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum Category {
    SolarPanels,
    Batteries,
    Controllers,
    Inverters,
}

impl Category {
    pub const ALL: [Self; 4] =
        [Self::SolarPanels, Self::Batteries, Self::Controllers, Self::Inverters];

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.label() == label)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SolarPanels => "Solar Panels",
            Self::Batteries => "Batteries",
            Self::Controllers => "Controllers",
            Self::Inverters => "Inverters",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Keep the products of the category (all of them for [`None`]) whose name or description
/// contains the search term, ignoring case.
pub fn filter<'a>(
    products: &'a [Product],
    category: Option<Category>,
    search: &'a str,
) -> impl Iterator<Item = &'a Product> {
    products.iter().filter(move |product| product.matches(category, search))
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ProductSource {
    Backend,
    Sample,
}

impl Display for ProductSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Backend => "backend",
            Self::Sample => "built-in sample",
        })
    }
}

/// Something that lists products.
#[async_trait]
pub trait ProductFeed: Sync {
    /// Whether there is any point in calling the feed.
    fn is_configured(&self) -> bool;

    async fn get_products(&self) -> Result<Vec<Product>, RequestError>;
}

/// Fetch the products, falling back to [`sample_products`] whenever the feed is not configured,
/// fails, or returns nothing.
#[instrument(skip_all)]
pub async fn load_products(feed: &dyn ProductFeed) -> (Vec<Product>, ProductSource) {
    if !feed.is_configured() {
        info!("the backend is not configured, using the sample products");
        return (sample_products(), ProductSource::Sample);
    }
    match feed.get_products().await {
        Ok(products) if !products.is_empty() => (products, ProductSource::Backend),
        Ok(_) => {
            info!("the backend has no products, using the sample products");
            (sample_products(), ProductSource::Sample)
        }
        Err(error) => {
            info!(%error, "using the sample products");
            (sample_products(), ProductSource::Sample)
        }
    }
}

/// Products shown while the backend is unavailable.
pub fn sample_products() -> Vec<Product> {
    const UNIVERSAL_VOLTAGE: &str = "12/24/48V";

    [
        (
            1,
            "Monocrystalline Solar Panel",
            Category::SolarPanels,
            "High-efficiency monocrystalline solar panel with 21% efficiency rating. Perfect for residential and commercial installations.",
            "https://hebbkx1anhila5yf.public.blob.vercel-storage.com/image-QpzSjLckUKNYZawGbRyix2kiakkEmV.png",
            ["21% Efficiency", "25-Year Warranty", "Weather Resistant", "Easy Installation"],
        ),
        (
            2,
            "Pure Sine Wave Inverter",
            Category::Inverters,
            "High-quality pure sine wave inverter with low THD and high efficiency for sensitive electronics.",
            "https://hebbkx1anhila5yf.public.blob.vercel-storage.com/image-IPmgY5WNS2fjcCqfmvE1gugeFxpyHr.png",
            ["Pure Sine Wave", "95% Efficiency", "Low THD", "Digital Display"],
        ),
        (
            3,
            "MPPT Charge Controller",
            Category::Controllers,
            "Advanced MPPT charge controller with LCD display and multiple protection features.",
            "https://hebbkx1anhila5yf.public.blob.vercel-storage.com/image-49ZEn1LsDsuxffq5Qr7coqgplD1FT1.png",
            ["MPPT Technology", "LCD Display", "Multiple Protections", "High Efficiency"],
        ),
        (
            4,
            "Lithium Battery",
            Category::Batteries,
            "Premium lithium iron phosphate battery with 6000+ cycle life and built-in BMS protection.",
            "https://hebbkx1anhila5yf.public.blob.vercel-storage.com/image-4Mif3pHJObZgqAuBHoaoqovAZ2ksvU.png",
            ["6000+ Cycles", "Built-in BMS", "Lightweight", "Fast Charging"],
        ),
    ]
    .into_iter()
    .map(|(id, name, category, description, image, features)| Product {
        id,
        name: name.to_string(),
        voltage: UNIVERSAL_VOLTAGE.to_string(),
        category: category.label().to_string(),
        description: description.to_string(),
        image: image.to_string(),
        features: features.map(str::to_string).to_vec(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    struct FakeFeed {
        is_configured: bool,
        response: Result<Vec<Product>, RequestError>,
    }

    #[async_trait]
    impl ProductFeed for FakeFeed {
        fn is_configured(&self) -> bool {
            self.is_configured
        }

        async fn get_products(&self) -> Result<Vec<Product>, RequestError> {
            self.response.clone()
        }
    }

    fn names<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<&'a str> {
        products.into_iter().map(|product| product.name.as_str()).collect_vec()
    }

    #[tokio::test]
    async fn falls_back_on_failure() {
        let feed = FakeFeed { is_configured: true, response: Err(RequestError::Timeout) };
        let (products, source) = load_products(&feed).await;
        assert_eq!(source, ProductSource::Sample);
        assert_eq!(products, sample_products());
        assert_eq!(
            names(&products),
            [
                "Monocrystalline Solar Panel",
                "Pure Sine Wave Inverter",
                "MPPT Charge Controller",
                "Lithium Battery",
            ]
        );
    }

    #[tokio::test]
    async fn falls_back_on_empty_list() {
        let feed = FakeFeed { is_configured: true, response: Ok(Vec::new()) };
        let (products, source) = load_products(&feed).await;
        assert_eq!(source, ProductSource::Sample);
        assert_eq!(products.len(), 4);
    }

    #[tokio::test]
    async fn skips_unconfigured_feed() {
        let feed = FakeFeed { is_configured: false, response: Ok(sample_products()[..1].to_vec()) };
        let (products, source) = load_products(&feed).await;
        assert_eq!(source, ProductSource::Sample);
        assert_eq!(products.len(), 4);
    }

    #[tokio::test]
    async fn uses_backend_products() {
        let feed = FakeFeed { is_configured: true, response: Ok(sample_products()[1..2].to_vec()) };
        let (products, source) = load_products(&feed).await;
        assert_eq!(source, ProductSource::Backend);
        assert_eq!(names(&products), ["Pure Sine Wave Inverter"]);
    }

    #[test]
    fn category_from_label_ok() {
        assert_eq!(Category::from_label("Solar Panels"), Some(Category::SolarPanels));
        assert_eq!(Category::from_label("solar panels"), None);
    }

    #[test]
    fn filter_by_category_ok() {
        let products = sample_products();
        assert_eq!(
            names(filter(&products, Some(Category::Batteries), "")),
            ["Lithium Battery"]
        );
        assert_eq!(filter(&products, None, "").count(), 4);
    }

    #[test]
    fn search_is_case_insensitive_and_covers_description() {
        let products = sample_products();
        assert_eq!(names(filter(&products, None, "mppt")), ["MPPT Charge Controller"]);
        assert_eq!(names(filter(&products, None, "THD")), ["Pure Sine Wave Inverter"]);
        assert_eq!(filter(&products, Some(Category::Inverters), "battery").count(), 0);
    }

    #[test]
    fn deserialize_product_ok() -> Result {
        // language=json
        let body = r#"[
            {
                "id": 7,
                "name": "Solar Panel 300W",
                "voltage": 24,
                "category": "Solar Panels",
                "description": null,
                "features": null
            },
            {
                "id": 8,
                "name": "Lithium Battery 100Ah",
                "voltage": "12V",
                "category": "Batteries",
                "description": "LiFePO4",
                "image": "https://example.com/battery.png",
                "features": ["Built-in BMS"]
            }
        ]"#;
        let products: Vec<Product> = serde_json::from_str(body)?;
        assert_eq!(products[0].voltage, "24V");
        assert_eq!(products[0].description, "");
        assert!(products[0].features.is_empty());
        assert_eq!(products[1].voltage, "12V");
        assert_eq!(products[1].features, ["Built-in BMS"]);
        Ok(())
    }

    #[tokio::test]
    async fn partial_backend_records_are_kept() -> Result {
        // language=json
        let body = r#"[
            {
                "id": 1,
                "name": "Tubular Battery 200Ah",
                "category": "Batteries",
                "description": "Deep cycle"
            },
            {
                "_id": "65a1",
                "name": "Hybrid Inverter 5kVA",
                "voltage": "48V",
                "category": "Inverters"
            },
            {
                "id": "not-a-number",
                "name": "Charge Controller 60A"
            },
            {
                "id": 9,
                "description": "No name, cannot be shown"
            }
        ]"#;
        let ProductList(products) = serde_json::from_str(body)?;
        assert_eq!(
            names(&products),
            ["Tubular Battery 200Ah", "Hybrid Inverter 5kVA", "Charge Controller 60A"]
        );
        assert_eq!(products[0].voltage, "");
        assert_eq!(products[1].id, 0);
        assert_eq!(products[1].voltage, "48V");
        assert_eq!(products[2].id, 0);
        assert_eq!(products[2].category, "");

        let feed = FakeFeed { is_configured: true, response: Ok(products) };
        let (products, source) = load_products(&feed).await;
        assert_eq!(source, ProductSource::Backend);
        assert_eq!(products.len(), 3);
        Ok(())
    }
}
