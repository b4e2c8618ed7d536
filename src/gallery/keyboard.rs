//! Keyboard listener registry.
//!
//! A listener is registered by [`KeyListeners::attach`] and stays
//! registered exactly as long as the returned [`ListenerGuard`] lives.

use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

/// Keys the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "Escape" => Some(Self::Escape),
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    active: BTreeSet<u64>,
}

/// Set of currently attached key listeners (the document's `keydown`).
///
/// Cloning is cheap and shares the same registry.
#[derive(Debug, Clone, Default)]
pub struct KeyListeners {
    inner: Arc<Mutex<Registry>>,
}

impl KeyListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener; it is detached when the guard is dropped.
    pub fn attach(&self) -> ListenerGuard {
        let mut registry = self.inner.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.active.insert(id);
        debug!("Key listener {} attached", id);

        ListenerGuard {
            id,
            registry: Arc::clone(&self.inner),
        }
    }

    /// Number of attached listeners.
    pub fn active_count(&self) -> usize {
        self.inner.lock().active.len()
    }
}

/// Keeps one listener attached.
#[derive(Debug)]
pub struct ListenerGuard {
    id: u64,
    registry: Arc<Mutex<Registry>>,
}

impl ListenerGuard {
    pub fn is_attached(&self) -> bool {
        self.registry.lock().active.contains(&self.id)
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.registry.lock().active.remove(&self.id);
        debug!("Key listener {} detached", self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_detaches_on_drop() {
        let listeners = KeyListeners::new();
        let a = listeners.attach();
        let b = listeners.attach();
        assert_eq!(listeners.active_count(), 2);
        assert!(a.is_attached());

        drop(a);
        assert_eq!(listeners.active_count(), 1);
        assert!(b.is_attached());

        drop(b);
        assert_eq!(listeners.active_count(), 0);
    }

    #[test]
    fn test_dom_keys() {
        assert_eq!(Key::from_dom_key("Escape"), Some(Key::Escape));
        assert_eq!(Key::from_dom_key("ArrowRight"), Some(Key::ArrowRight));
        assert_eq!(Key::from_dom_key("Enter"), None);
    }
}
