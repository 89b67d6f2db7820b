//! Wallabag JSON shapes and their conversion into store types.

use serde::{Deserialize, Deserializer, Serialize};

use crate::store::{Item, ItemDetail, ItemId, ItemUpdate};

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct EntryPage {
    #[serde(rename = "_embedded")]
    pub embedded: Embedded,
}

#[derive(Debug, Deserialize)]
pub(super) struct Embedded {
    #[serde(default)]
    pub items: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Entry {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "int_or_bool")]
    pub is_archived: bool,
    #[serde(default, deserialize_with = "int_or_bool")]
    pub is_starred: bool,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub reading_time: Option<u32>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub domain_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Tag {
    pub label: String,
}

/// Wallabag encodes flags as `0`/`1` but some versions send booleans.
fn int_or_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Bool(bool),
        Int(i64),
    }

    Ok(match Option::<Repr>::deserialize(deserializer)? {
        Some(Repr::Bool(b)) => b,
        Some(Repr::Int(n)) => n != 0,
        None => false,
    })
}

impl Entry {
    pub fn into_item(self) -> Item {
        Item {
            id: ItemId(self.id),
            title: self.title.unwrap_or_default(),
            url: self.url.unwrap_or_default(),
            read: self.is_archived,
            starred: self.is_starred,
            tags: self.tags.into_iter().map(|t| t.label).collect(),
            reading_time: self.reading_time.filter(|&m| m > 0),
        }
    }

    pub fn into_detail(mut self) -> ItemDetail {
        let content = self.content.take().unwrap_or_default();
        let domain_name = self.domain_name.take();
        ItemDetail {
            item: self.into_item(),
            content,
            domain_name,
        }
    }
}

/// PATCH body. Wallabag calls the read flag `archive`.
#[derive(Debug, Serialize)]
pub(super) struct UpdateBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starred: Option<u8>,
}

impl From<&ItemUpdate> for UpdateBody {
    fn from(update: &ItemUpdate) -> Self {
        Self {
            archive: update.read.map(u8::from),
            starred: update.starred.map(u8::from),
        }
    }
}
