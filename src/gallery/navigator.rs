//! Gallery viewer state.

use tracing::debug;

use super::{Category, GalleryEntry, GalleryError, Key, KeyListeners, ListenerGuard};
use crate::inquiry::InquirySession;

/// Which entry is enlarged: an index into the category's sorted list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerSelection {
    pub category: Category,
    pub index: usize,
}

/// Index before `index` in a list of `len`, wrapping to the end.
pub fn prev_index(index: usize, len: usize) -> usize {
    (index + len - 1) % len
}

/// Index after `index` in a list of `len`, wrapping to the start.
pub fn next_index(index: usize, len: usize) -> usize {
    (index + 1) % len
}

/// Category tabs plus the lightbox viewer.
///
/// The keyboard listener is attached only while the viewer is open;
/// closing the viewer or dropping the navigator detaches it.
#[derive(Debug)]
pub struct GalleryNavigator {
    active_category: Category,
    selection: Option<ViewerSelection>,
    listeners: KeyListeners,
    key_listener: Option<ListenerGuard>,
}

impl GalleryNavigator {
    pub fn new(listeners: KeyListeners) -> Self {
        Self {
            active_category: Category::default(),
            selection: None,
            listeners,
            key_listener: None,
        }
    }

    pub fn active_category(&self) -> Category {
        self.active_category
    }

    pub fn selection(&self) -> Option<ViewerSelection> {
        self.selection
    }

    pub fn is_open(&self) -> bool {
        self.selection.is_some()
    }

    /// Switch tabs. Leaves the viewer alone.
    pub fn select_category(&mut self, category: Category) {
        self.active_category = category;
    }

    /// Apply a `?category=` parameter. Unknown values are ignored.
    pub fn sync_category_param(&mut self, param: Option<&str>) {
        if let Some(category) = param.and_then(|p| p.parse::<Category>().ok()) {
            self.select_category(category);
        }
    }

    pub fn open_viewer(&mut self, category: Category, index: usize) -> Result<(), GalleryError> {
        let len = category.len();
        if index >= len {
            return Err(GalleryError::IndexOutOfRange { category, index, len });
        }

        self.selection = Some(ViewerSelection { category, index });
        if self.key_listener.is_none() {
            self.key_listener = Some(self.listeners.attach());
        }
        debug!("Viewer opened at {}/{}", category, index);
        Ok(())
    }

    pub fn close_viewer(&mut self) {
        self.selection = None;
        self.key_listener = None;
    }

    pub fn go_prev(&mut self) {
        if let Some(sel) = self.selection.as_mut() {
            sel.index = prev_index(sel.index, sel.category.len());
        }
    }

    pub fn go_next(&mut self) {
        if let Some(sel) = self.selection.as_mut() {
            sel.index = next_index(sel.index, sel.category.len());
        }
    }

    /// Handle a keydown. Returns `true` if the key was consumed.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if self.key_listener.is_none() {
            return false;
        }
        match key {
            Key::Escape => self.close_viewer(),
            Key::ArrowLeft => self.go_prev(),
            Key::ArrowRight => self.go_next(),
        }
        true
    }

    /// The enlarged entry, if any.
    pub fn current_entry(&self) -> Option<&'static GalleryEntry> {
        let sel = self.selection?;
        sel.category.sorted_entries().get(sel.index).copied()
    }

    /// Remember the enlarged work for the contact form.
    ///
    /// Returns `false` (and stores nothing) when the viewer is closed or
    /// the work is sold.
    pub fn inquire(&self, inquiry: &mut InquirySession) -> bool {
        match self.current_entry() {
            Some(entry) if !entry.is_sold() => {
                inquiry.set(entry.full);
                true
            }
            _ => false,
        }
    }
}

impl Default for GalleryNavigator {
    fn default() -> Self {
        Self::new(KeyListeners::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let nav = GalleryNavigator::default();
        assert_eq!(nav.active_category(), Category::Portraits);
        assert_eq!(nav.selection(), None);
    }

    #[test]
    fn test_prev_wraps_to_last() {
        // Landscape sorts as [available, sold].
        let mut nav = GalleryNavigator::default();
        nav.open_viewer(Category::Landscape, 0).unwrap();
        nav.go_prev();
        assert_eq!(nav.selection().unwrap().index, 1);
        assert!(nav.current_entry().unwrap().is_sold());
    }

    #[test]
    fn test_next_wraps_to_first() {
        let mut nav = GalleryNavigator::default();
        nav.open_viewer(Category::Landscape, 1).unwrap();
        nav.go_next();
        assert_eq!(nav.selection().unwrap().index, 0);
        assert_eq!(nav.current_entry().unwrap().title, "Landscape 1");
    }

    #[test]
    fn test_navigation_noop_when_closed() {
        let mut nav = GalleryNavigator::default();
        nav.open_viewer(Category::StillLife, 1).unwrap();
        nav.close_viewer();
        nav.go_next();
        nav.go_prev();
        assert_eq!(nav.selection(), None);
    }

    #[test]
    fn test_open_out_of_range_rejected() {
        let mut nav = GalleryNavigator::default();
        assert!(nav.open_viewer(Category::Portraits, 2).is_err());
        assert!(!nav.is_open());
    }

    #[test]
    fn test_select_category_keeps_viewer() {
        let mut nav = GalleryNavigator::default();
        nav.open_viewer(Category::Portraits, 1).unwrap();
        nav.select_category(Category::Landscape);
        assert_eq!(
            nav.selection(),
            Some(ViewerSelection { category: Category::Portraits, index: 1 })
        );
        nav.go_next();
        assert_eq!(nav.selection().unwrap().index, 0);
    }

    #[test]
    fn test_category_param() {
        let mut nav = GalleryNavigator::default();
        nav.sync_category_param(Some("landscape"));
        assert_eq!(nav.active_category(), Category::Landscape);
        nav.sync_category_param(Some("sculpture"));
        assert_eq!(nav.active_category(), Category::Landscape);
        nav.sync_category_param(None);
        assert_eq!(nav.active_category(), Category::Landscape);
        assert!(!nav.is_open());
    }

    #[test]
    fn test_keys_only_while_open() {
        let listeners = KeyListeners::new();
        let mut nav = GalleryNavigator::new(listeners.clone());

        assert!(!nav.handle_key(Key::ArrowRight));
        assert_eq!(listeners.active_count(), 0);

        nav.open_viewer(Category::StillLife, 0).unwrap();
        assert_eq!(listeners.active_count(), 1);

        assert!(nav.handle_key(Key::ArrowRight));
        assert_eq!(nav.selection().unwrap().index, 1);
        assert!(nav.handle_key(Key::ArrowLeft));
        assert_eq!(nav.selection().unwrap().index, 0);

        assert!(nav.handle_key(Key::Escape));
        assert!(!nav.is_open());
        assert_eq!(listeners.active_count(), 0);
    }

    #[test]
    fn test_reopen_keeps_single_listener() {
        let listeners = KeyListeners::new();
        let mut nav = GalleryNavigator::new(listeners.clone());
        nav.open_viewer(Category::StillLife, 0).unwrap();
        nav.open_viewer(Category::Portraits, 1).unwrap();
        assert_eq!(listeners.active_count(), 1);
    }

    #[test]
    fn test_drop_detaches_listener() {
        let listeners = KeyListeners::new();
        {
            let mut nav = GalleryNavigator::new(listeners.clone());
            nav.open_viewer(Category::Portraits, 0).unwrap();
            assert_eq!(listeners.active_count(), 1);
        }
        assert_eq!(listeners.active_count(), 0);
    }

    #[test]
    fn test_inquire_available_only() {
        let mut nav = GalleryNavigator::default();
        let mut inquiry = InquirySession::new();

        assert!(!nav.inquire(&mut inquiry));

        // Portraits sort as [available, sold].
        nav.open_viewer(Category::Portraits, 1).unwrap();
        assert!(!nav.inquire(&mut inquiry));
        assert_eq!(inquiry.image_url(), None);

        nav.go_next();
        assert!(nav.inquire(&mut inquiry));
        assert_eq!(inquiry.image_url(), Some("/images/paintings/portraits/full/work-1.svg"));
    }

    #[test]
    fn test_wrap_helpers() {
        assert_eq!(prev_index(0, 1), 0);
        assert_eq!(next_index(0, 1), 0);
        assert_eq!(prev_index(1, 3), 0);
        assert_eq!(next_index(1, 3), 2);
    }
}
