//! Gallery endpoints.

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use super::{ApiError, AppState, RequestLocale};
use crate::gallery::{
    Category, GalleryEntry, GalleryNavigator, SaleStatus, next_index, prev_index, status_label,
};
use crate::i18n::{Bundle, bundle, translate};
use crate::inquiry::{InquirySession, absolute_url};

#[derive(Debug, Deserialize)]
pub struct GalleryQuery {
    category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EntryView {
    index: usize,
    thumb: &'static str,
    full: &'static str,
    title: &'static str,
    alt: &'static str,
    status: SaleStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<&'static str>,
    label: String,
}

impl EntryView {
    fn new(bundle: &Bundle, index: usize, entry: &'static GalleryEntry) -> Self {
        Self {
            index,
            thumb: entry.thumb,
            full: entry.full,
            title: entry.title,
            alt: entry.alt,
            status: entry.status,
            price: entry.price,
            label: status_label(bundle, entry),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryTab {
    slug: Category,
    title: String,
}

#[derive(Debug, Serialize)]
pub struct GalleryResponse {
    categories: Vec<CategoryTab>,
    active: Category,
    title: String,
    entries: Vec<EntryView>,
}

/// `GET /api/gallery?category=` - tabs plus the sorted entries of the
/// active category.
pub async fn list_gallery(
    Extension(RequestLocale(locale)): Extension<RequestLocale>,
    Query(query): Query<GalleryQuery>,
) -> Json<GalleryResponse> {
    let bundle = bundle(locale);

    let mut navigator = GalleryNavigator::default();
    navigator.sync_category_param(query.category.as_deref());
    let active = navigator.active_category();

    let categories = Category::ALL
        .into_iter()
        .map(|slug| CategoryTab {
            slug,
            title: translate(bundle, &slug.title_key()),
        })
        .collect();

    let entries = active
        .sorted_entries()
        .into_iter()
        .enumerate()
        .map(|(i, entry)| EntryView::new(bundle, i, entry))
        .collect();

    Json(GalleryResponse {
        categories,
        active,
        title: translate(bundle, &active.title_key()),
        entries,
    })
}

#[derive(Debug, Serialize)]
pub struct ViewerResponse {
    category: Category,
    index: usize,
    prev: usize,
    next: usize,
    entry: EntryView,
    /// Absolute link handed to the contact form; only for available works.
    #[serde(skip_serializing_if = "Option::is_none")]
    inquiry_url: Option<String>,
}

/// `GET /api/gallery/:category/:index` - one entry as shown in the viewer.
pub async fn viewer(
    State(state): State<AppState>,
    Extension(RequestLocale(locale)): Extension<RequestLocale>,
    Path((category, index)): Path<(String, usize)>,
) -> Result<Json<ViewerResponse>, ApiError> {
    let category = category.parse::<Category>()?;

    let mut navigator = GalleryNavigator::default();
    navigator.open_viewer(category, index)?;
    let entry = navigator
        .current_entry()
        .ok_or_else(|| ApiError::NotFound(format!("no entry at {}/{}", category, index)))?;

    let mut inquiry = InquirySession::new();
    navigator.inquire(&mut inquiry);
    let inquiry_url = inquiry.take().map(|url| absolute_url(&state.site_origin, &url));

    let len = category.len();
    Ok(Json(ViewerResponse {
        category,
        index,
        prev: prev_index(index, len),
        next: next_index(index, len),
        entry: EntryView::new(bundle(locale), index, entry),
        inquiry_url,
    }))
}
