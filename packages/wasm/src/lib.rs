//! WebAssembly bindings for the embeddable editor surface
//!
//! Exposes the host bridge to JS with the same method names the custom
//! element carries: `getHtml`, `getDocument`, `setHtml`, `importTemplate`,
//! `setDocumentConfig`, plus callback registration for the ready and
//! content-change events. A thin JS shim registers the actual
//! `<emailbuilder-editor>` element and delegates here.

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use emailbuilder_blocks::BlockRegistry;
use emailbuilder_editor::EditorStore;
use emailbuilder_host::{EditorHost, HostEvent, ImportOutcome};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn outcome_label(outcome: ImportOutcome) -> String {
    match outcome {
        ImportOutcome::Applied => "applied",
        ImportOutcome::Queued => "queued",
        ImportOutcome::Suppressed => "suppressed",
        ImportOutcome::Rejected => "rejected",
    }
    .to_string()
}

fn to_js_value(json: &str) -> Result<JsValue, JsValue> {
    js_sys::JSON::parse(json)
}

/// One embedded editor instance
#[wasm_bindgen]
pub struct EmailBuilderElement {
    host: Rc<EditorHost>,
}

#[wasm_bindgen]
impl EmailBuilderElement {
    #[wasm_bindgen(constructor)]
    pub fn new() -> EmailBuilderElement {
        let store = Rc::new(EditorStore::new());
        let registry = Rc::new(BlockRegistry::standard());
        EmailBuilderElement {
            host: EditorHost::new(store, registry),
        }
    }

    /// Mount: installs the empty document (or a queued import) and fires
    /// the ready event. Register callbacks before calling this.
    pub fn connect(&self) {
        self.host.mount();
    }

    pub fn disconnect(&self) {
        self.host.unmount();
    }

    /// Markup of the most recent export (cached)
    #[wasm_bindgen(js_name = getHtml)]
    pub fn get_html(&self) -> String {
        self.host.get_html()
    }

    /// Document of the most recent export (cached); `null` before mount
    #[wasm_bindgen(js_name = getDocument)]
    pub fn get_document(&self) -> Result<JsValue, JsValue> {
        match self.host.get_document() {
            None => Ok(JsValue::NULL),
            Some(document) => {
                let json = serde_json::to_string(&document)
                    .map_err(|error| JsValue::from_str(&format!("Serialization error: {error}")))?;
                to_js_value(&json)
            }
        }
    }

    /// Replace editor content with raw markup
    #[wasm_bindgen(js_name = setHtml)]
    pub fn set_html(&self, markup: &str) -> String {
        outcome_label(self.host.set_html(markup))
    }

    /// Replace editor content with a configuration object
    #[wasm_bindgen(js_name = setDocumentConfig)]
    pub fn set_document_config(&self, config: JsValue) -> String {
        match js_value_to_json(&config) {
            Some(value) => outcome_label(self.host.set_document_config(&value)),
            None => outcome_label(ImportOutcome::Rejected),
        }
    }

    /// Smart import: raw markup string, JSON string, or configuration object
    #[wasm_bindgen(js_name = importTemplate)]
    pub fn import_template(&self, template: JsValue) -> String {
        if let Some(text) = template.as_string() {
            return outcome_label(self.host.import_template(&serde_json::Value::String(text)));
        }
        match js_value_to_json(&template) {
            Some(value) => outcome_label(self.host.import_template(&value)),
            None => outcome_label(ImportOutcome::Rejected),
        }
    }

    /// Callback for the ready event (fires once, on connect)
    #[wasm_bindgen(js_name = onReady)]
    pub fn on_ready(&self, callback: js_sys::Function) {
        self.host.on_event(move |event| {
            if matches!(event, HostEvent::Ready) {
                let _ = callback.call0(&JsValue::NULL);
            }
        });
    }

    /// Callback for content changes; receives `{ html, document, origin }`
    #[wasm_bindgen(js_name = onContentChange)]
    pub fn on_content_change(&self, callback: js_sys::Function) {
        self.host.on_event(move |event| {
            let HostEvent::ContentChange {
                html,
                document,
                origin,
            } = event
            else {
                return;
            };

            let Ok(document_json) = serde_json::to_string(document) else {
                return;
            };
            let Ok(document_value) = to_js_value(&document_json) else {
                return;
            };

            let detail = js_sys::Object::new();
            let _ = js_sys::Reflect::set(&detail, &"html".into(), &JsValue::from_str(html));
            let _ = js_sys::Reflect::set(&detail, &"document".into(), &document_value);
            let origin_label = match origin {
                emailbuilder_editor::EditOrigin::User => "user",
                emailbuilder_editor::EditOrigin::Programmatic => "programmatic",
            };
            let _ = js_sys::Reflect::set(&detail, &"origin".into(), &JsValue::from_str(origin_label));

            let _ = callback.call1(&JsValue::NULL, &detail);
        });
    }
}

impl Default for EmailBuilderElement {
    fn default() -> Self {
        Self::new()
    }
}

fn js_value_to_json(value: &JsValue) -> Option<serde_json::Value> {
    let json = js_sys::JSON::stringify(value).ok()?;
    let json = json.as_string()?;
    serde_json::from_str(&json).ok()
}
