//! Static artwork table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::GalleryError;

/// Whether a work can still be bought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    Available,
    Sold,
}

/// One artwork.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryEntry {
    pub thumb: &'static str,
    pub full: &'static str,
    pub title: &'static str,
    pub alt: &'static str,
    pub status: SaleStatus,
    /// Only set for available works.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<&'static str>,
}

impl GalleryEntry {
    const fn available(
        thumb: &'static str,
        full: &'static str,
        title: &'static str,
        price: &'static str,
    ) -> Self {
        Self {
            thumb,
            full,
            title,
            alt: title,
            status: SaleStatus::Available,
            price: Some(price),
        }
    }

    const fn sold(thumb: &'static str, full: &'static str, title: &'static str) -> Self {
        Self {
            thumb,
            full,
            title,
            alt: title,
            status: SaleStatus::Sold,
            price: None,
        }
    }

    pub fn is_sold(&self) -> bool {
        self.status == SaleStatus::Sold
    }
}

/// Gallery categories, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[default]
    Portraits,
    StillLife,
    Landscape,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Portraits, Category::StillLife, Category::Landscape];

    pub fn slug(self) -> &'static str {
        match self {
            Self::Portraits => "portraits",
            Self::StillLife => "still-life",
            Self::Landscape => "landscape",
        }
    }

    /// Translation key of the category heading.
    pub fn title_key(self) -> String {
        format!("paintings.categories.{}", self.slug())
    }

    /// Entries in declaration order.
    pub fn entries(self) -> &'static [GalleryEntry] {
        match self {
            Self::Portraits => PORTRAITS,
            Self::StillLife => STILL_LIFE,
            Self::Landscape => LANDSCAPE,
        }
    }

    /// Entries as shown: available first, sold last, otherwise in
    /// declaration order.
    pub fn sorted_entries(self) -> Vec<&'static GalleryEntry> {
        display_order(self.entries())
    }

    pub fn len(self) -> usize {
        self.entries().len()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = GalleryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.slug() == s)
            .ok_or_else(|| GalleryError::UnknownCategory(s.to_string()))
    }
}

/// Sold works after available ones; the sort is stable.
pub fn display_order(entries: &[GalleryEntry]) -> Vec<&GalleryEntry> {
    let mut sorted: Vec<_> = entries.iter().collect();
    sorted.sort_by_key(|e| e.is_sold());
    sorted
}

static PORTRAITS: &[GalleryEntry] = &[
    GalleryEntry::available(
        "/images/paintings/portraits/thumbs/work-1thumb.svg",
        "/images/paintings/portraits/full/work-1.svg",
        "Portrait 1",
        "$550",
    ),
    GalleryEntry::sold(
        "/images/paintings/portraits/thumbs/work-2thumb.svg",
        "/images/paintings/portraits/full/work-2.svg",
        "Portrait 2",
    ),
];

static STILL_LIFE: &[GalleryEntry] = &[
    GalleryEntry::available(
        "/images/paintings/still-life/thumbs/work-3thumb.svg",
        "/images/paintings/still-life/full/work-3.svg",
        "Still Life 1",
        "$600",
    ),
    GalleryEntry::available(
        "/images/paintings/still-life/thumbs/work-4thumb.svg",
        "/images/paintings/still-life/full/work-4.svg",
        "Still Life 2",
        "$650",
    ),
];

static LANDSCAPE: &[GalleryEntry] = &[
    GalleryEntry::available(
        "/images/paintings/landscape/thumbs/work-5thumb.svg",
        "/images/paintings/landscape/full/work-5.svg",
        "Landscape 1",
        "$700",
    ),
    GalleryEntry::sold(
        "/images/paintings/landscape/thumbs/work-6thumb.svg",
        "/images/paintings/landscape/full/work-6.svg",
        "Landscape 2",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED: &[GalleryEntry] = &[
        GalleryEntry::sold("/t/c.svg", "/f/c.svg", "C"),
        GalleryEntry::available("/t/a.svg", "/f/a.svg", "A", "$1"),
        GalleryEntry::sold("/t/d.svg", "/f/d.svg", "D"),
        GalleryEntry::available("/t/b.svg", "/f/b.svg", "B", "$2"),
    ];

    fn titles(entries: &[&GalleryEntry]) -> Vec<&'static str> {
        entries.iter().map(|e| e.title).collect()
    }

    #[test]
    fn test_sold_sorted_last_stable() {
        assert_eq!(titles(&display_order(MIXED)), vec!["A", "B", "C", "D"]);
        assert_eq!(titles(&display_order(&MIXED[..2])), vec!["A", "C"]);
        assert!(display_order(&[]).is_empty());
    }

    #[test]
    fn test_wraparound_over_sorted_view() {
        use crate::gallery::{next_index, prev_index};

        // [A, B, C(sold)]
        let view = display_order(&MIXED[..3]);
        assert_eq!(titles(&view), vec!["A", "C", "D"]);
        let view = display_order(&MIXED[1..]);
        assert_eq!(titles(&view), vec!["A", "B", "D"]);

        let n = view.len();
        assert_eq!(view[prev_index(0, n)].title, "D");
        assert!(view[prev_index(0, n)].is_sold());
        assert_eq!(view[next_index(n - 1, n)].title, "A");
        assert_eq!(view[next_index(0, n)].title, "B");
    }

    #[test]
    fn test_catalog_order() {
        assert_eq!(
            titles(&Category::Landscape.sorted_entries()),
            vec!["Landscape 1", "Landscape 2"]
        );
        assert_eq!(
            titles(&Category::Portraits.sorted_entries()),
            vec!["Portrait 1", "Portrait 2"]
        );
    }

    #[test]
    fn test_price_only_when_available() {
        for cat in Category::ALL {
            for entry in cat.entries() {
                assert_eq!(entry.price.is_some(), !entry.is_sold(), "{}", entry.title);
            }
        }
    }

    #[test]
    fn test_category_slugs() {
        assert_eq!("still-life".parse::<Category>().unwrap(), Category::StillLife);
        assert!("stilllife".parse::<Category>().is_err());
        assert_eq!(Category::default(), Category::Portraits);
        assert_eq!(Category::Landscape.title_key(), "paintings.categories.landscape");
    }

    #[test]
    fn test_categories_not_empty() {
        for cat in Category::ALL {
            assert!(cat.len() > 0);
        }
    }
}
