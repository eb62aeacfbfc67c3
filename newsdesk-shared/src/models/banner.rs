use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use strum::EnumIter;

/// Placement shape of an advertising banner.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum BannerKind {
    #[default]
    Horizontal,
    Vertical,
    Square,
}

impl BannerKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Square => "square",
        }
    }
}

impl fmt::Display for BannerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A banner as returned by `GET /banners/admin`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Banner {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: BannerKind,
    pub image_url: String,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default, deserialize_with = "active_flag")]
    pub is_active: bool,
}

/// Payload for `POST /banners` and `PUT /banners/:id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BannerDraft {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: BannerKind,
    pub image_url: String,
    #[serde(default)]
    pub link_url: String,
    #[serde(default)]
    pub display_order: i32,
    /// Sent as `0`/`1`.
    #[serde(serialize_with = "flag_as_int", deserialize_with = "active_flag")]
    pub is_active: bool,
}

impl Default for BannerDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            kind: BannerKind::default(),
            image_url: String::new(),
            link_url: String::new(),
            display_order: 0,
            is_active: true,
        }
    }
}

impl BannerDraft {
    /// A banner needs a title and an uploaded image before it can be saved.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() || self.image_url.trim().is_empty() {
            return Err("title and image are required");
        }
        Ok(())
    }
}

impl From<&Banner> for BannerDraft {
    fn from(banner: &Banner) -> Self {
        Self {
            title: banner.title.clone(),
            kind: banner.kind,
            image_url: banner.image_url.clone(),
            link_url: banner.link_url.clone().unwrap_or_default(),
            display_order: banner.display_order,
            is_active: banner.is_active,
        }
    }
}

fn flag_as_int<S: serde::Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}

fn active_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Int(value) => value != 0,
    })
}
