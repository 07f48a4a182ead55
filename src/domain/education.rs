//! Educational content catalog.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentCategory {
    Basics,
    Exercise,
    Nutrition,
    Management,
}

impl std::str::FromStr for ContentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basics" => Ok(Self::Basics),
            "exercise" => Ok(Self::Exercise),
            "nutrition" => Ok(Self::Nutrition),
            "management" => Ok(Self::Management),
            other => Err(format!("unknown content category: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Article,
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EducationItem {
    pub id: u32,
    pub title: &'static str,
    pub category: ContentCategory,
    pub kind: ContentKind,
    pub description: &'static str,
    pub duration: &'static str,
}

pub const CATALOG: &[EducationItem] = &[
    EducationItem {
        id: 1,
        title: "Understanding Vascular Health",
        category: ContentCategory::Basics,
        kind: ContentKind::Article,
        description: "Learn the fundamentals of vascular health and why it matters.",
        duration: "5 min read",
    },
    EducationItem {
        id: 2,
        title: "Exercise for Better Circulation",
        category: ContentCategory::Exercise,
        kind: ContentKind::Video,
        description: "Simple exercises to improve your vascular health.",
        duration: "10 min watch",
    },
    EducationItem {
        id: 3,
        title: "Heart-Healthy Diet Tips",
        category: ContentCategory::Nutrition,
        kind: ContentKind::Article,
        description: "Nutritional guidelines for optimal vascular health.",
        duration: "7 min read",
    },
    EducationItem {
        id: 4,
        title: "Managing High Blood Pressure",
        category: ContentCategory::Management,
        kind: ContentKind::Article,
        description: "Strategies for controlling blood pressure naturally.",
        duration: "8 min read",
    },
];

/// Filter the catalog by a case-insensitive text query and an optional category.
///
/// An empty query matches everything.
#[must_use]
pub fn search_catalog(
    query: &str,
    category: Option<ContentCategory>,
) -> Vec<&'static EducationItem> {
    let needle = query.trim().to_lowercase();
    CATALOG
        .iter()
        .filter(|item| category.map_or(true, |c| item.category == c))
        .filter(|item| {
            item.title.to_lowercase().contains(&needle)
                || item.description.to_lowercase().contains(&needle)
        })
        .collect()
}
