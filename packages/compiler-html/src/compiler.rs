use thiserror::Error;

use emailbuilder_blocks::{
    BlockError, BlockId, BlockRegistry, Document, StyleBuilder, ROOT_BLOCK_ID,
};

/// Errors that can occur during markup compilation
#[derive(Error, Debug)]
pub enum CompileError {
    /// Dangling child reference; a data-consistency bug upstream
    #[error("Could not find block: {0}")]
    MissingBlock(String),

    #[error(transparent)]
    Block(#[from] BlockError),
}

/// Options for markup compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Id of the block to render as the document root
    pub root_block_id: String,
    /// Title of the emitted page
    pub title: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            root_block_id: ROOT_BLOCK_ID.to_string(),
            title: "Email".to_string(),
        }
    }
}

struct Context {
    buffer: String,
}

impl Context {
    fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        self.add(text);
        self.add("\n");
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Render a document to a full static HTML page
///
/// Deterministic for a given document: the same tree always produces the
/// same markup, so hosts can diff exports cheaply.
pub fn render_to_static_markup(
    document: &Document,
    registry: &BlockRegistry,
    options: &CompileOptions,
) -> Result<String, CompileError> {
    let mut ctx = Context::new();

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");

    compile_head(options, &mut ctx);

    ctx.add_line("<body style=\"margin:0;padding:0\">");
    ctx.add(&render_block(document, registry, &options.root_block_id)?);
    ctx.add("\n");
    ctx.add_line("</body>");

    ctx.add_line("</html>");

    Ok(ctx.get_output())
}

fn compile_head(options: &CompileOptions, ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!(
        "<title>{}</title>",
        emailbuilder_blocks::escape_text(&options.title)
    ));
    ctx.add_line("</head>");
}

/// Render one block, recursing through container children
fn render_block(
    document: &Document,
    registry: &BlockRegistry,
    block_id: &str,
) -> Result<String, CompileError> {
    let block = document
        .get(block_id)
        .ok_or_else(|| CompileError::MissingBlock(block_id.to_string()))?;

    let children = match block.data.children_ids.as_deref() {
        Some(child_ids) => {
            let root_radius = root_border_radius(document);
            let mut rendered = Vec::with_capacity(child_ids.len());
            for child_id in child_ids {
                let inner = render_block(document, registry, child_id)?;
                rendered.push(wrap_reader_child(document, child_id, root_radius, inner));
            }
            rendered
        }
        None => Vec::new(),
    };

    Ok(registry.render(block, &children)?)
}

fn root_border_radius(document: &Document) -> u32 {
    document
        .root()
        .and_then(|root| root.data.extra.get("borderRadius"))
        .and_then(|value| value.as_u64())
        .unwrap_or(0) as u32
}

/// Layout-only wrapper: max-width clamp plus canvas corner rounding for the
/// first/last root children.
fn wrap_reader_child(
    document: &Document,
    child_id: &BlockId,
    root_radius: u32,
    inner: String,
) -> String {
    let mut style = StyleBuilder::new();
    style.push("position", "relative").push("max-width", "100%");

    if root_radius > 0 {
        if let Some(root_children) = document.children_of(ROOT_BLOCK_ID) {
            let is_first = root_children.first() == Some(child_id);
            let is_last = root_children.last() == Some(child_id);
            let radius = format!("{root_radius}px");
            if is_first {
                style.push("border-top-left-radius", &radius);
                style.push("border-top-right-radius", &radius);
            }
            if is_last {
                style.push("border-bottom-left-radius", &radius);
                style.push("border-bottom-right-radius", &radius);
            }
            if is_first || is_last {
                style.push("overflow", "hidden");
            }
        }
    }

    format!("<div{}>{inner}</div>", style.to_attr())
}
