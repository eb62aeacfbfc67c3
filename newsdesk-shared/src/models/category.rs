use serde::{Deserialize, Serialize};

/// A section of the site that articles are filed under.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Payload for `POST /categories` and `PUT /categories/:id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

impl CategoryDraft {
    /// Builds a draft from a display name, deriving the slug.
    pub fn from_name(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            slug: slugify(name),
            description: String::new(),
        }
    }

    /// Trims every field; fails when name or slug end up empty.
    pub fn normalized(self) -> Result<Self, &'static str> {
        let draft = Self {
            name: self.name.trim().to_string(),
            slug: self.slug.trim().to_string(),
            description: self.description.trim().to_string(),
        };
        if draft.name.is_empty() || draft.slug.is_empty() {
            return Err("name and slug are required");
        }
        Ok(draft)
    }
}

impl From<&Category> for CategoryDraft {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone().unwrap_or_default(),
        }
    }
}

/// URL slug for a category name: lowercase ASCII letters, digits and single dashes.
pub fn slugify(name: &str) -> String {
    let kept: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();

    let mut slug = String::with_capacity(kept.len());
    for word in kept.split_whitespace() {
        if !slug.is_empty() {
            slug.push('-');
        }
        slug.push_str(word);
    }

    let mut collapsed = String::with_capacity(slug.len());
    for c in slug.chars() {
        if c == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(c);
    }
    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("World News"), "world-news");
        assert_eq!(slugify("  Sports  &  Health "), "sports-health");
        assert_eq!(slugify("Tech -- Science"), "tech-science");
        assert_eq!(slugify("2024 Elections"), "2024-elections");
    }

    #[test]
    fn slugify_drops_non_ascii() {
        assert_eq!(slugify("Улс төр"), "");
        assert_eq!(slugify("Economy Эдийн"), "economy");
    }

    #[test]
    fn normalized_requires_name_and_slug() {
        let draft = CategoryDraft {
            name: "  Culture ".into(),
            slug: " culture ".into(),
            description: " arts ".into(),
        };
        let draft = draft.normalized().unwrap();
        assert_eq!(draft.name, "Culture");
        assert_eq!(draft.slug, "culture");
        assert_eq!(draft.description, "arts");

        assert!(CategoryDraft::from_name("Улс").normalized().is_err());
    }
}
