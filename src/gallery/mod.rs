//! Gallery module - Artwork catalog and lightbox viewer.
//!
//! - `catalog` - Static categories and entries
//! - `keyboard` - Key listener registry with scoped guards
//! - `navigator` - Category tabs + viewer state machine

mod catalog;
mod keyboard;
mod navigator;

use thiserror::Error;

use crate::i18n::{Bundle, translate, translate_with};

pub use catalog::{Category, GalleryEntry, SaleStatus, display_order};
pub use keyboard::{Key, KeyListeners, ListenerGuard};
pub use navigator::{GalleryNavigator, ViewerSelection, next_index, prev_index};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GalleryError {
    #[error("unknown category: {0:?}")]
    UnknownCategory(String),

    #[error("index {index} out of range for {category} ({len} entries)")]
    IndexOutOfRange {
        category: Category,
        index: usize,
        len: usize,
    },
}

/// Localized sale badge for an entry.
pub fn status_label(bundle: &Bundle, entry: &GalleryEntry) -> String {
    match (entry.status, entry.price) {
        (SaleStatus::Sold, _) => translate(bundle, "paintings.sold"),
        (SaleStatus::Available, Some(price)) => {
            translate_with(bundle, "paintings.availableWithPrice", &[("price", &price)])
        }
        (SaleStatus::Available, None) => translate(bundle, "paintings.available"),
    }
}
