//! Field inspection: dump every stored field of an item, grouped into
//! labeled sections for the admin UI.

use serde::Serialize;
use serde_json::{json, Value};

use crate::store::Item;

/// Private meta keys (leading underscore) that are still worth showing.
const VISIBLE_PRIVATE_KEYS: &[&str] = &[
    "_edit_last",
    "_edit_lock",
    "_page_template",
    "_thumbnail_id",
    "_attached_file",
    "_attachment_metadata",
];

/// One named group of fields.
#[derive(Debug, Serialize)]
pub struct FieldSection {
    pub key: String,
    pub title: String,
    pub fields: Vec<Field>,
}

/// One field: display name plus its stored value, shape preserved.
#[derive(Debug, Serialize)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

impl Field {
    fn new(name: &str, value: Value) -> Self {
        Self {
            name: name.to_owned(),
            value,
        }
    }
}

/// Gather every stored field of `item` into ordered sections: basic
/// info, then custom fields (private keys filtered), then taxonomies
/// and featured image when present.
#[must_use]
pub fn collect_sections(item: &Item) -> Vec<FieldSection> {
    let mut sections = vec![basic_info(item)];

    if let Some(custom) = custom_fields(item) {
        sections.push(custom);
    }
    if let Some(tax) = taxonomies(item) {
        sections.push(tax);
    }
    if let Some(image) = featured_image(item) {
        sections.push(image);
    }

    sections
}

fn basic_info(item: &Item) -> FieldSection {
    FieldSection {
        key: "basic_info".to_owned(),
        title: "Basic Item Information".to_owned(),
        fields: vec![
            Field::new("ID", json!(item.id)),
            Field::new("Title", json!(item.title)),
            Field::new("Content", json!(item.content)),
            Field::new("Excerpt", json!(item.excerpt)),
            Field::new("Status", json!(item.status)),
            Field::new("Type", json!(item.kind)),
            Field::new("Date Created", json!(item.created)),
            Field::new("Date Modified", json!(item.modified)),
            Field::new("Author", json!(item.author)),
            Field::new("Slug", json!(item.slug)),
            Field::new("Parent ID", json!(item.parent_id)),
            Field::new("Menu Order", json!(item.menu_order)),
        ],
    }
}

fn custom_fields(item: &Item) -> Option<FieldSection> {
    let fields: Vec<Field> = item
        .meta
        .iter()
        .filter(|(key, _)| {
            !key.starts_with('_') || VISIBLE_PRIVATE_KEYS.contains(&key.as_str())
        })
        .map(|(key, value)| Field::new(key, value.clone()))
        .collect();

    (!fields.is_empty()).then(|| FieldSection {
        key: "meta_fields".to_owned(),
        title: "Custom Fields".to_owned(),
        fields,
    })
}

fn taxonomies(item: &Item) -> Option<FieldSection> {
    let fields: Vec<Field> = item
        .taxonomies
        .iter()
        .filter(|(_, terms)| !terms.is_empty())
        .map(|(label, terms)| Field::new(label, json!(terms.join(", "))))
        .collect();

    (!fields.is_empty()).then(|| FieldSection {
        key: "taxonomies".to_owned(),
        title: "Taxonomies".to_owned(),
        fields,
    })
}

fn featured_image(item: &Item) -> Option<FieldSection> {
    let thumbnail_id = item.meta.get("_thumbnail_id")?;
    let mut fields = vec![Field::new("Thumbnail ID", thumbnail_id.clone())];
    if let Some(alt) = item.meta.get("_thumbnail_alt") {
        fields.push(Field::new("Alt Text", alt.clone()));
    }
    Some(FieldSection {
        key: "featured_image".to_owned(),
        title: "Featured Image".to_owned(),
        fields,
    })
}
