//! # Editor Host
//!
//! Bridge between an embedding page and the document store.
//!
//! ## Lifecycle
//!
//! ```text
//! new → (imports queue) → mount → ready event
//!                           ↓
//!              flush queued import / install empty
//!                           ↓
//!        store change → recompute export → content-change event
//! ```
//!
//! Imports are tagged `Programmatic`; anything applied through the store's
//! user-facing paths is tagged `User`. The tag rides the change event, so
//! hosts can tell an echo of their own import apart from a real edit.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use serde_json::Value;
use tracing::{debug, error, warn};

use emailbuilder_blocks::{BlockRegistry, Document};
use emailbuilder_compiler_html::{render_to_static_markup, CompileOptions};
use emailbuilder_editor::{DocumentChange, EditOrigin, EditorStore, SubscriptionId};

use crate::config::{empty_document, parse_configuration, synthetic_html_document};

/// Events emitted to the embedding page
#[derive(Debug, Clone)]
pub enum HostEvent {
    /// Emitted once, on mount
    Ready,

    /// Emitted on every document change
    ContentChange {
        html: String,
        document: Document,
        origin: EditOrigin,
    },
}

/// What became of an import call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Installed into the store
    Applied,
    /// Held until mount
    Queued,
    /// Identical to the previous import; skipped
    Suppressed,
    /// Failed the structural check; ignored
    Rejected,
}

pub type ListenerId = u64;

type Listener = Rc<dyn Fn(&HostEvent)>;

/// Host-facing editor instance
pub struct EditorHost {
    // Handed to the store subscription without creating an Rc cycle
    weak_self: Weak<EditorHost>,

    store: Rc<EditorStore>,
    registry: Rc<BlockRegistry>,
    compile_options: CompileOptions,

    mounted: Cell<bool>,
    subscription: Cell<Option<SubscriptionId>>,

    // Cached export values for readback
    latest_html: RefCell<String>,
    latest_document: RefCell<Option<Document>>,

    // Imports issued before mount
    pending_html: RefCell<Option<String>>,
    pending_config: RefCell<Option<Document>>,

    // Feedback-loop guards: identity of the last import in each format
    last_imported_html: RefCell<Option<String>>,
    last_imported_config: RefCell<Option<String>>,

    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_listener_id: Cell<ListenerId>,
}

impl EditorHost {
    pub fn new(store: Rc<EditorStore>, registry: Rc<BlockRegistry>) -> Rc<Self> {
        Rc::new_cyclic(|weak_self| Self {
            weak_self: weak_self.clone(),
            store,
            registry,
            compile_options: CompileOptions::default(),
            mounted: Cell::new(false),
            subscription: Cell::new(None),
            latest_html: RefCell::new(String::new()),
            latest_document: RefCell::new(None),
            pending_html: RefCell::new(None),
            pending_config: RefCell::new(None),
            last_imported_html: RefCell::new(None),
            last_imported_config: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            next_listener_id: Cell::new(0),
        })
    }

    /// Store backing this host (shared with resolver/inspector layers)
    pub fn store(&self) -> &Rc<EditorStore> {
        &self.store
    }

    /// Register an event listener
    pub fn on_event(&self, listener: impl Fn(&HostEvent) + 'static) -> ListenerId {
        let id = self.next_listener_id.get();
        self.next_listener_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    pub fn remove_listener(&self, id: ListenerId) {
        self.listeners
            .borrow_mut()
            .retain(|(listener_id, _)| *listener_id != id);
    }

    /// First connection: wire the export pipeline, emit ready, then flush
    /// any queued import (or install the empty document).
    pub fn mount(&self) {
        if self.mounted.get() {
            return;
        }
        self.mounted.set(true);

        let weak = self.weak_self.clone();
        let subscription = self.store.subscribe_document(move |change| {
            if let Some(host) = weak.upgrade() {
                host.handle_document_change(change);
            }
        });
        self.subscription.set(Some(subscription));

        self.emit(&HostEvent::Ready);

        let pending_config = self.pending_config.borrow_mut().take();
        let pending_html = self.pending_html.borrow_mut().take();
        if let Some(config) = pending_config {
            self.store
                .reset_document_with(EditOrigin::Programmatic, config);
        } else if let Some(markup) = pending_html {
            self.apply_html(&markup);
        } else {
            self.store
                .reset_document_with(EditOrigin::Programmatic, empty_document());
        }
    }

    /// Disconnect from the store; queued imports survive a remount
    pub fn unmount(&self) {
        if let Some(subscription) = self.subscription.take() {
            self.store.unsubscribe_document(subscription);
        }
        self.mounted.set(false);
    }

    /// Cached markup of the most recent export
    pub fn get_html(&self) -> String {
        self.latest_html.borrow().clone()
    }

    /// Cached document of the most recent export (`None` before mount)
    pub fn get_document(&self) -> Option<Document> {
        self.latest_document.borrow().clone()
    }

    /// Replace editor content with raw markup.
    ///
    /// The markup lands in a single `Html` block under a fixed synthetic
    /// id, so successive imports replace rather than append. An empty
    /// string resets to the empty document and clears the import guards.
    pub fn set_html(&self, markup: &str) -> ImportOutcome {
        if markup.is_empty() {
            if !self.mounted.get() {
                *self.pending_config.borrow_mut() = Some(empty_document());
                *self.pending_html.borrow_mut() = None;
                return ImportOutcome::Queued;
            }
            self.store
                .reset_document_with(EditOrigin::Programmatic, empty_document());
            *self.last_imported_html.borrow_mut() = None;
            *self.last_imported_config.borrow_mut() = None;
            return ImportOutcome::Applied;
        }

        if self.last_imported_html.borrow().as_deref() == Some(markup) {
            debug!("suppressed re-import of identical markup");
            return ImportOutcome::Suppressed;
        }
        *self.last_imported_html.borrow_mut() = Some(markup.to_string());
        *self.last_imported_config.borrow_mut() = None;

        if !self.mounted.get() {
            *self.pending_html.borrow_mut() = Some(markup.to_string());
            *self.pending_config.borrow_mut() = None;
            return ImportOutcome::Queued;
        }

        self.apply_html(markup);
        ImportOutcome::Applied
    }

    /// Replace editor content with a full configuration object.
    ///
    /// Invalid configurations are ignored (diagnostic only); nothing
    /// reaches the store.
    pub fn set_document_config(&self, config: &Value) -> ImportOutcome {
        let Some(document) = parse_configuration(config) else {
            return ImportOutcome::Rejected;
        };

        let digest = config.to_string();
        if self.last_imported_config.borrow().as_deref() == Some(digest.as_str()) {
            debug!("suppressed re-import of identical configuration");
            return ImportOutcome::Suppressed;
        }
        *self.last_imported_config.borrow_mut() = Some(digest);
        *self.last_imported_html.borrow_mut() = None;

        if !self.mounted.get() {
            *self.pending_config.borrow_mut() = Some(document);
            *self.pending_html.borrow_mut() = None;
            return ImportOutcome::Queued;
        }

        self.store
            .reset_document_with(EditOrigin::Programmatic, document);
        ImportOutcome::Applied
    }

    /// Smart import: a string is first tried as a JSON configuration, then
    /// treated as raw markup; a non-string value must be a configuration.
    pub fn import_template(&self, template: &Value) -> ImportOutcome {
        if let Some(text) = template.as_str() {
            if let Ok(parsed) = serde_json::from_str::<Value>(text) {
                if crate::config::is_valid_configuration(&parsed) {
                    return self.set_document_config(&parsed);
                }
            }
            return self.set_html(text);
        }

        if template.is_object() {
            return self.set_document_config(template);
        }

        warn!("ignored template import: neither markup nor configuration");
        ImportOutcome::Rejected
    }

    fn apply_html(&self, markup: &str) {
        self.store.reset_document_with(
            EditOrigin::Programmatic,
            synthetic_html_document(markup),
        );
    }

    fn handle_document_change(&self, change: &DocumentChange) {
        *self.latest_document.borrow_mut() = Some(change.document.clone());

        let html = match render_to_static_markup(
            &change.document,
            &self.registry,
            &self.compile_options,
        ) {
            Ok(html) => html,
            Err(compile_error) => {
                // Only reachable with a broken document (dangling refs);
                // keep the previous export rather than publish garbage.
                error!(%compile_error, "static markup export failed");
                return;
            }
        };
        *self.latest_html.borrow_mut() = html.clone();

        self.emit(&HostEvent::ContentChange {
            html,
            document: change.document.clone(),
            origin: change.origin,
        });
    }

    fn emit(&self, event: &HostEvent) {
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(event);
        }
    }
}

impl Drop for EditorHost {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.store.unsubscribe_document(subscription);
        }
    }
}
