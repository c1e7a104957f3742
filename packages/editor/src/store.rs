//! # Document Store
//!
//! Single source of truth for the block tree and selection.
//!
//! One store is constructed per embedding instance; nothing here is
//! process-global, so multiple editors on one page cannot cross-talk.
//! Subscribers are notified synchronously before the mutating call
//! returns. Document-content and selection subscribers are independent
//! channels.
//!
//! The store performs no structural validation. Callers validate shapes
//! at the panel and import boundaries; a dangling child reference is a
//! caller bug, surfaced later by the resolver as a fatal lookup error.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use emailbuilder_blocks::{BlockId, Document};

use crate::mutations::{Mutation, MutationError};

/// Who initiated a mutation
///
/// Threaded explicitly through every mutating call so change events can be
/// attributed without a mutable flag and its reset races.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditOrigin {
    User,
    Programmatic,
}

/// Payload delivered to document subscribers
#[derive(Debug, Clone)]
pub struct DocumentChange {
    pub document: Document,
    pub origin: EditOrigin,
}

/// Handle for cancelling a subscription
pub type SubscriptionId = u64;

type DocumentSubscriber = Rc<dyn Fn(&DocumentChange)>;
type SelectionSubscriber = Rc<dyn Fn(Option<&str>)>;

/// Mutable editing state for one embedded editor
pub struct EditorStore {
    document: RefCell<Document>,
    selected_block_id: RefCell<Option<BlockId>>,
    preview_mode: Cell<bool>,
    document_subscribers: RefCell<Vec<(SubscriptionId, DocumentSubscriber)>>,
    selection_subscribers: RefCell<Vec<(SubscriptionId, SelectionSubscriber)>>,
    next_subscription_id: Cell<SubscriptionId>,
}

impl EditorStore {
    /// Store holding the empty layout (root `EmailLayout`, no children)
    pub fn new() -> Self {
        Self::with_document(Document::empty_layout())
    }

    pub fn with_document(document: Document) -> Self {
        Self {
            document: RefCell::new(document),
            selected_block_id: RefCell::new(None),
            preview_mode: Cell::new(false),
            document_subscribers: RefCell::new(Vec::new()),
            selection_subscribers: RefCell::new(Vec::new()),
            next_subscription_id: Cell::new(0),
        }
    }

    /// Current document snapshot
    pub fn document(&self) -> Document {
        self.document.borrow().clone()
    }

    /// Shallow-merge the given id → block entries (user origin)
    pub fn set_document(&self, partial: Document) {
        self.set_document_with(EditOrigin::User, partial);
    }

    /// Shallow-merge with an explicit origin
    pub fn set_document_with(&self, origin: EditOrigin, partial: Document) {
        self.document.borrow_mut().merge(partial);
        self.notify_document(origin);
    }

    /// Replace the document wholesale (user origin)
    pub fn reset_document(&self, document: Document) {
        self.reset_document_with(EditOrigin::User, document);
    }

    /// Replace the document wholesale with an explicit origin
    pub fn reset_document_with(&self, origin: EditOrigin, document: Document) {
        *self.document.borrow_mut() = document;
        self.notify_document(origin);
    }

    /// Apply a semantic mutation: validate, install, notify, repair selection
    pub fn apply(&self, origin: EditOrigin, mutation: &Mutation) -> Result<(), MutationError> {
        let mut document = self.document.borrow().clone();
        mutation.apply(&mut document)?;

        let selection_dangling = {
            let selected = self.selected_block_id.borrow();
            matches!(selected.as_deref(), Some(id) if !document.contains(id))
        };

        *self.document.borrow_mut() = document;
        self.notify_document(origin);

        // A removed subtree may have carried the selection with it
        if selection_dangling {
            self.set_selected_block_id(None);
        }

        Ok(())
    }

    pub fn selected_block_id(&self) -> Option<BlockId> {
        self.selected_block_id.borrow().clone()
    }

    pub fn set_selected_block_id(&self, id: Option<BlockId>) {
        *self.selected_block_id.borrow_mut() = id;
        self.notify_selection();
    }

    pub fn is_preview(&self) -> bool {
        self.preview_mode.get()
    }

    pub fn set_preview(&self, preview: bool) {
        self.preview_mode.set(preview);
    }

    /// Resolver mode implied by the ambient preview flag
    pub fn render_mode(&self) -> crate::resolver::RenderMode {
        if self.is_preview() {
            crate::resolver::RenderMode::Preview
        } else {
            crate::resolver::RenderMode::Edit
        }
    }

    /// Subscribe to document-content changes
    pub fn subscribe_document(
        &self,
        subscriber: impl Fn(&DocumentChange) + 'static,
    ) -> SubscriptionId {
        let id = self.allocate_subscription_id();
        self.document_subscribers
            .borrow_mut()
            .push((id, Rc::new(subscriber)));
        id
    }

    pub fn unsubscribe_document(&self, id: SubscriptionId) {
        self.document_subscribers
            .borrow_mut()
            .retain(|(subscription_id, _)| *subscription_id != id);
    }

    /// Subscribe to selection changes (independent of document content)
    pub fn subscribe_selection(
        &self,
        subscriber: impl Fn(Option<&str>) + 'static,
    ) -> SubscriptionId {
        let id = self.allocate_subscription_id();
        self.selection_subscribers
            .borrow_mut()
            .push((id, Rc::new(subscriber)));
        id
    }

    pub fn unsubscribe_selection(&self, id: SubscriptionId) {
        self.selection_subscribers
            .borrow_mut()
            .retain(|(subscription_id, _)| *subscription_id != id);
    }

    fn allocate_subscription_id(&self) -> SubscriptionId {
        let id = self.next_subscription_id.get();
        self.next_subscription_id.set(id + 1);
        id
    }

    fn notify_document(&self, origin: EditOrigin) {
        let change = DocumentChange {
            document: self.document.borrow().clone(),
            origin,
        };
        // Clone handles out of the borrow so subscribers may reenter getters
        // or subscribe/unsubscribe without panicking.
        let subscribers: Vec<DocumentSubscriber> = self
            .document_subscribers
            .borrow()
            .iter()
            .map(|(_, subscriber)| Rc::clone(subscriber))
            .collect();
        for subscriber in subscribers {
            subscriber(&change);
        }
    }

    fn notify_selection(&self) {
        let selected = self.selected_block_id.borrow().clone();
        let subscribers: Vec<SelectionSubscriber> = self
            .selection_subscribers
            .borrow()
            .iter()
            .map(|(_, subscriber)| Rc::clone(subscriber))
            .collect();
        for subscriber in subscribers {
            subscriber(selected.as_deref());
        }
    }
}

impl Default for EditorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell as StdCell;

    #[test]
    fn test_new_store_holds_empty_layout() {
        let store = EditorStore::new();
        let document = store.document();
        assert!(document.root().is_some());
        assert_eq!(document.children_of("root"), Some(&[][..]));
    }

    #[test]
    fn test_notification_is_synchronous() {
        let store = Rc::new(EditorStore::new());
        let seen = Rc::new(StdCell::new(0));

        let seen_clone = Rc::clone(&seen);
        store.subscribe_document(move |change| {
            assert_eq!(change.origin, EditOrigin::Programmatic);
            seen_clone.set(seen_clone.get() + 1);
        });

        store.reset_document_with(EditOrigin::Programmatic, Document::empty_layout());
        // Delivered before the call returned
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn test_selection_channel_is_decoupled() {
        let store = EditorStore::new();
        let document_events = Rc::new(StdCell::new(0));
        let selection_events = Rc::new(StdCell::new(0));

        let d = Rc::clone(&document_events);
        store.subscribe_document(move |_| d.set(d.get() + 1));
        let s = Rc::clone(&selection_events);
        store.subscribe_selection(move |_| s.set(s.get() + 1));

        store.set_selected_block_id(Some("root".to_string()));
        assert_eq!(document_events.get(), 0);
        assert_eq!(selection_events.get(), 1);

        store.reset_document(Document::empty_layout());
        assert_eq!(document_events.get(), 1);
        assert_eq!(selection_events.get(), 1);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let store = EditorStore::new();
        let seen = Rc::new(StdCell::new(0));

        let seen_clone = Rc::clone(&seen);
        let id = store.subscribe_document(move |_| seen_clone.set(seen_clone.get() + 1));

        store.reset_document(Document::empty_layout());
        store.unsubscribe_document(id);
        store.reset_document(Document::empty_layout());

        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn test_subscriber_may_reenter_store() {
        let store = Rc::new(EditorStore::new());
        let store_clone = Rc::clone(&store);
        store.subscribe_document(move |change| {
            // Reading back during notification must not panic
            assert_eq!(store_clone.document(), change.document);
        });
        store.reset_document(Document::empty_layout());
    }
}
