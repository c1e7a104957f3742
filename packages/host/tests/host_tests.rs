//! Host bridge integration: import/export, events, guards

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{json, Value};

use emailbuilder_blocks::{BlockRegistry, Document};
use emailbuilder_editor::{EditOrigin, EditorStore, Mutation};
use emailbuilder_host::{EditorHost, HostEvent, ImportOutcome, IMPORTED_HTML_BLOCK_ID};

fn mounted_host() -> Rc<EditorHost> {
    let store = Rc::new(EditorStore::new());
    let registry = Rc::new(BlockRegistry::standard());
    let host = EditorHost::new(store, registry);
    host.mount();
    host
}

#[derive(Default)]
struct EventLog {
    ready: usize,
    changes: Vec<(EditOrigin, String)>,
}

fn record_events(host: &Rc<EditorHost>) -> Rc<RefCell<EventLog>> {
    let log = Rc::new(RefCell::new(EventLog::default()));
    let log_clone = Rc::clone(&log);
    host.on_event(move |event| match event {
        HostEvent::Ready => log_clone.borrow_mut().ready += 1,
        HostEvent::ContentChange { origin, html, .. } => {
            log_clone.borrow_mut().changes.push((*origin, html.clone()));
        }
    });
    log
}

#[test]
fn test_mount_installs_empty_document() {
    let store = Rc::new(EditorStore::new());
    let registry = Rc::new(BlockRegistry::standard());
    let host = EditorHost::new(store, registry);
    let log = record_events(&host);

    host.mount();

    let log = log.borrow();
    assert_eq!(log.ready, 1);
    assert_eq!(log.changes.len(), 1);
    assert_eq!(log.changes[0].0, EditOrigin::Programmatic);

    let document = host.get_document().unwrap();
    assert_eq!(document.children_of("root"), Some(&[][..]));
}

#[test]
fn test_mount_is_idempotent() {
    let store = Rc::new(EditorStore::new());
    let registry = Rc::new(BlockRegistry::standard());
    let host = EditorHost::new(store, registry);
    let log = record_events(&host);

    host.mount();
    host.mount();

    assert_eq!(log.borrow().ready, 1);
}

#[test]
fn test_config_import_round_trips() {
    let host = mounted_host();
    let config = json!({
        "root": {
            "type": "EmailLayout",
            "data": { "childrenIds": ["b1"] }
        },
        "b1": { "type": "Text", "data": { "props": { "text": "hi" } } }
    });

    assert_eq!(host.set_document_config(&config), ImportOutcome::Applied);

    let document = host.get_document().unwrap();
    let expected: Document = serde_json::from_value(config).unwrap();
    assert_eq!(document, expected);

    // The text prop survives the trip
    let props = document.get("b1").unwrap().data.props.as_ref().unwrap();
    assert_eq!(props["text"], "hi");
}

#[test]
fn test_invalid_config_is_silently_ignored() {
    let host = mounted_host();
    let before = host.get_document();

    let config = json!({
        "root": {
            "type": "EmailLayout",
            "data": { "childrenIds": ["missing"] }
        }
    });
    assert_eq!(host.set_document_config(&config), ImportOutcome::Rejected);
    assert_eq!(host.get_document(), before);
}

#[test]
fn test_set_html_empty_yields_empty_layout() {
    let host = mounted_host();
    host.set_html("<h1>something</h1>");

    assert_eq!(host.set_html(""), ImportOutcome::Applied);
    let document = host.get_document().unwrap();
    assert_eq!(document.children_of("root"), Some(&[][..]));
}

#[test]
fn test_set_html_replaces_previous_import() {
    let host = mounted_host();

    host.set_html("<p>first</p>");
    let first = host.get_document().unwrap();
    assert!(first.contains(IMPORTED_HTML_BLOCK_ID));

    host.set_html("<p>second</p>");
    let second = host.get_document().unwrap();

    // Same synthetic id reused: fully replaced, not appended
    assert_eq!(
        second.children_of("root"),
        Some(&[IMPORTED_HTML_BLOCK_ID.to_string()][..])
    );
    let props = second
        .get(IMPORTED_HTML_BLOCK_ID)
        .unwrap()
        .data
        .props
        .as_ref()
        .unwrap()
        .clone();
    assert_eq!(props["contents"], "<p>second</p>");
    assert!(host.get_html().contains("<p>second</p>"));
    assert!(!host.get_html().contains("<p>first</p>"));
}

#[test]
fn test_identical_markup_reimport_suppressed() {
    let host = mounted_host();
    let log = record_events(&host);

    assert_eq!(host.set_html("<p>same</p>"), ImportOutcome::Applied);
    let changes_after_first = log.borrow().changes.len();

    assert_eq!(host.set_html("<p>same</p>"), ImportOutcome::Suppressed);
    assert_eq!(log.borrow().changes.len(), changes_after_first);

    // Clearing via empty string re-arms the guard
    host.set_html("");
    assert_eq!(host.set_html("<p>same</p>"), ImportOutcome::Applied);
}

#[test]
fn test_import_template_routes_json_config() {
    let host = mounted_host();
    let config = json!({
        "root": {
            "type": "EmailLayout",
            "data": { "childrenIds": ["b1"] }
        },
        "b1": { "type": "Text", "data": { "props": { "text": "routed" } } }
    });
    let encoded = Value::String(config.to_string());

    assert_eq!(host.import_template(&encoded), ImportOutcome::Applied);
    let document = host.get_document().unwrap();
    assert!(document.contains("b1"));
    assert!(!document.contains(IMPORTED_HTML_BLOCK_ID));
}

#[test]
fn test_import_template_routes_plain_markup() {
    let host = mounted_host();
    let markup = Value::String("<table><tr><td>legacy</td></tr></table>".to_string());

    assert_eq!(host.import_template(&markup), ImportOutcome::Applied);
    let document = host.get_document().unwrap();
    assert!(document.contains(IMPORTED_HTML_BLOCK_ID));
}

#[test]
fn test_import_template_accepts_config_object() {
    let host = mounted_host();
    let config = json!({
        "root": {
            "type": "EmailLayout",
            "data": { "childrenIds": [] }
        }
    });
    assert_eq!(host.import_template(&config), ImportOutcome::Applied);
}

#[test]
fn test_import_template_rejects_other_values() {
    let host = mounted_host();
    assert_eq!(host.import_template(&json!(42)), ImportOutcome::Rejected);
    assert_eq!(
        host.import_template(&json!(["not", "a", "config"])),
        ImportOutcome::Rejected
    );
}

#[test]
fn test_imports_queue_before_mount_and_flush() {
    let store = Rc::new(EditorStore::new());
    let registry = Rc::new(BlockRegistry::standard());
    let host = EditorHost::new(store, registry);

    assert_eq!(host.set_html("<p>early</p>"), ImportOutcome::Queued);
    assert_eq!(host.get_document(), None);

    let log = record_events(&host);
    host.mount();

    let document = host.get_document().unwrap();
    assert!(document.contains(IMPORTED_HTML_BLOCK_ID));
    // Ready precedes the flushed import's change event
    let log = log.borrow();
    assert_eq!(log.ready, 1);
    assert_eq!(log.changes.len(), 1);
    assert_eq!(log.changes[0].0, EditOrigin::Programmatic);
}

#[test]
fn test_later_queued_import_supersedes_earlier() {
    let store = Rc::new(EditorStore::new());
    let registry = Rc::new(BlockRegistry::standard());
    let host = EditorHost::new(store, registry);

    host.set_html("");
    host.set_html("<p>late</p>");
    host.mount();

    let document = host.get_document().unwrap();
    assert!(document.contains(IMPORTED_HTML_BLOCK_ID));
}

#[test]
fn test_user_edit_emits_user_origin() {
    let host = mounted_host();
    let log = record_events(&host);

    host.store()
        .apply(
            EditOrigin::User,
            &Mutation::InsertBlock {
                parent_id: "root".to_string(),
                index: 0,
                block_id: "b1".to_string(),
                block: serde_json::from_value(
                    json!({ "type": "Text", "data": { "props": { "text": "typed" } } }),
                )
                .unwrap(),
            },
        )
        .unwrap();

    let log = log.borrow();
    let (origin, html) = log.changes.last().unwrap();
    assert_eq!(*origin, EditOrigin::User);
    assert!(html.contains("typed"));
}

#[test]
fn test_readback_is_cached_not_recomputed() {
    let host = mounted_host();
    host.set_html("<p>cache me</p>");

    let first = host.get_html();
    let second = host.get_html();
    assert_eq!(first, second);
    assert!(first.contains("cache me"));
}
