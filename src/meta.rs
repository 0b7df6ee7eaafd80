//! Per-item SEO metadata: current values, rule-based recommendations,
//! and the apply operation.
//!
//! Recommendations are static product copy keyed off the item title,
//! not AI output; the improvement/source captions are carried as data
//! for the admin UI.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{OptimizerError, OptimizerResult};
use crate::store::{ContentStore, Item};

/// Storage keys for the three metadata fields.
pub const META_TITLE_KEY: &str = "_seo_title";
pub const META_DESCRIPTION_KEY: &str = "_seo_description";
pub const META_KEYWORDS_KEY: &str = "_seo_keywords";

/// The three per-item SEO metadata values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeoMeta {
    pub title: String,
    pub description: String,
    pub keywords: String,
}

/// Which metadata field a recommendation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaField {
    Title,
    Description,
    Keywords,
}

impl MetaField {
    #[must_use]
    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::Title => META_TITLE_KEY,
            Self::Description => META_DESCRIPTION_KEY,
            Self::Keywords => META_KEYWORDS_KEY,
        }
    }
}

impl std::str::FromStr for MetaField {
    type Err = OptimizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "keywords" => Ok(Self::Keywords),
            other => Err(OptimizerError::UnknownMetaType(other.to_owned())),
        }
    }
}

/// A suggested title/description/keywords set with its UI captions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaRecommendation {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub title_improvement: String,
    pub description_improvement: String,
    pub title_source: String,
    pub description_source: String,
}

/// The item's current metadata, falling back to the item title when
/// no explicit SEO title is stored.
#[must_use]
pub fn current_meta(item: &Item) -> SeoMeta {
    let get = |key: &str| {
        item.meta
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned()
    };
    let stored_title = get(META_TITLE_KEY);
    SeoMeta {
        title: if stored_title.is_empty() {
            item.title.clone()
        } else {
            stored_title
        },
        description: get(META_DESCRIPTION_KEY),
        keywords: get(META_KEYWORDS_KEY),
    }
}

/// Rule-based recommendation selection: canned variants for contact
/// and home pages, a generic title-derived fallback for everything
/// else.
#[must_use]
pub fn generate_recommendations(item: &Item) -> MetaRecommendation {
    let title_lower = item.title.to_lowercase();

    if title_lower.contains("contact") {
        return MetaRecommendation {
            title: "Contact ExampleStore - Expert Electronics Support & Customer Service"
                .to_owned(),
            description: "Get instant help from our electronics experts. Live chat, phone \
                          support, and email assistance available 24/7. Contact us for \
                          product advice and technical support."
                .to_owned(),
            keywords: to_keywords(
                "contact, customer service, electronics support, help, phone support, live chat",
            ),
            title_improvement: "+35% ranking".to_owned(),
            description_improvement: "+45% CTR".to_owned(),
            title_source: "Based on AI Platforms".to_owned(),
            description_source: "Based on Google Trends".to_owned(),
        };
    }

    if title_lower.contains("home") || title_lower.contains("welcome") {
        return MetaRecommendation {
            title: "Premium Electronics & Gadgets Store - Best Deals Online | ExampleStore"
                .to_owned(),
            description: "Discover top-quality electronics, gadgets, and accessories at \
                          unbeatable prices. Free shipping on orders over $50. Shop now \
                          and save big on premium tech products."
                .to_owned(),
            keywords: to_keywords("electronics, gadgets, online store, deals, tech products, premium"),
            title_improvement: "+25% ranking".to_owned(),
            description_improvement: "+18% CTR".to_owned(),
            title_source: "Based on Google Trends".to_owned(),
            description_source: "Based on AI Platforms".to_owned(),
        };
    }

    MetaRecommendation {
        title: format!("{} - Professional Services & Solutions", item.title),
        description: "Discover professional services and solutions tailored to your needs. \
                      Contact us today for expert assistance and personalized support."
            .to_owned(),
        keywords: to_keywords(&format!("{title_lower}, services, solutions, professional")),
        title_improvement: "+20% ranking".to_owned(),
        description_improvement: "+15% CTR".to_owned(),
        title_source: "Based on AI Platforms".to_owned(),
        description_source: "Based on Google Trends".to_owned(),
    }
}

/// Persist one chosen recommendation value into item metadata.
pub fn apply_recommendation(
    store: &dyn ContentStore,
    id: u64,
    field: MetaField,
    value: &str,
) -> OptimizerResult<()> {
    if value.trim().is_empty() {
        return Err(OptimizerError::InvalidArgument(
            "recommendation value must be non-empty".to_owned(),
        ));
    }
    store.set_meta(id, field.storage_key(), value)
}

fn to_keywords(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(|k| k.trim().to_owned())
        .filter(|k| !k.is_empty())
        .collect()
}
