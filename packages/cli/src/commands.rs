//! Subcommand implementations

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{anyhow, bail, Context};
use clap::Args;
use colored::Colorize;
use serde_json::Value;

use emailbuilder_blocks::BlockRegistry;
use emailbuilder_compiler_html::{render_to_static_markup, CompileOptions};
use emailbuilder_editor::EditorStore;
use emailbuilder_host::{is_valid_configuration, parse_configuration, EditorHost, ImportOutcome};
use emailbuilder_uploader::{UploadRequest, Uploader};

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Document JSON file
    pub input: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Page title of the emitted HTML
    #[arg(long, default_value = "Email")]
    pub title: String,
}

pub fn render(args: RenderArgs) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("parsing {}", args.input.display()))?;

    let document = parse_configuration(&value)
        .ok_or_else(|| anyhow!("{} is not a valid document configuration", args.input.display()))?;

    let registry = BlockRegistry::standard();
    let options = CompileOptions {
        title: args.title,
        ..Default::default()
    };
    let html = render_to_static_markup(&document, &registry, &options)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &html).with_context(|| format!("writing {}", path.display()))?;
            println!("{} {} → {}", "✓".green(), args.input.display(), path.display());
        }
        None => print!("{html}"),
    }
    Ok(())
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Document JSON file
    pub input: PathBuf,
}

pub fn validate(args: ValidateArgs) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("parsing {}", args.input.display()))?;

    if !is_valid_configuration(&value) {
        println!("{} {}: structural check failed", "✗".red(), args.input.display());
        bail!("invalid document configuration");
    }
    if parse_configuration(&value).is_none() {
        println!("{} {}: block schema check failed", "✗".red(), args.input.display());
        bail!("invalid block data");
    }

    println!("{} {}", "✓".green(), args.input.display());
    Ok(())
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Template file: configuration JSON or raw markup
    pub input: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn import(args: ImportArgs) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    // Run the import through the host bridge so the CLI and the embedded
    // editor disambiguate templates identically.
    let store = Rc::new(EditorStore::new());
    let registry = Rc::new(BlockRegistry::standard());
    let host = EditorHost::new(store, registry);
    host.mount();

    match host.import_template(&Value::String(contents)) {
        ImportOutcome::Applied => {}
        outcome => bail!("import not applied: {outcome:?}"),
    }

    let document = host
        .get_document()
        .ok_or_else(|| anyhow!("no document after import"))?;
    let json = serde_json::to_string_pretty(&document)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &json).with_context(|| format!("writing {}", path.display()))?;
            println!("{} {} → {}", "✓".green(), args.input.display(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// File to upload
    pub input: PathBuf,

    /// Base URL of the document-storage service
    #[arg(long)]
    pub api_base_url: String,

    /// Identifier field of the upload form
    #[arg(long, default_value = "image-block")]
    pub identifier: String,
}

pub fn upload(args: UploadArgs) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(&args.input).with_context(|| format!("reading {}", args.input.display()))?;
    let file_name = args
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.bin".to_string());

    let uploader = Uploader::new(args.api_base_url);
    let runtime = tokio::runtime::Runtime::new()?;
    let url = runtime.block_on(uploader.upload(UploadRequest {
        identifier: args.identifier,
        file_name,
        bytes,
    }))?;

    println!("{} {url}", "✓".green());
    Ok(())
}
