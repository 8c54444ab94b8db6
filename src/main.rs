// src/main.rs

use anyhow::{bail, Context};
use bitmap_text::config::CONFIG;
use bitmap_text::{FileLoader, MemorySurface, TextOptions, TextRenderer};
use log::{error, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

const DEFAULT_OUTPUT: &str = "out.ppm";

const USAGE: &str = "usage: bitmap-text <font-file> <text> [--out <path>] [--options <json>] [--name <font-name>]";

/// Parsed command line.
#[derive(Debug)]
struct Args {
    font: String,
    text: String,
    out: PathBuf,
    options: Option<PathBuf>,
    name: Option<String>,
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> anyhow::Result<Args> {
    let mut positional = Vec::new();
    let mut out = PathBuf::from(DEFAULT_OUTPUT);
    let mut options = None;
    let mut name = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" | "-o" => {
                out = args.next().context("--out needs a path")?.into();
            }
            "--options" => {
                options = Some(args.next().context("--options needs a path")?.into());
            }
            "--name" => {
                name = Some(args.next().context("--name needs a value")?);
            }
            "--help" | "-h" => bail!("{}", USAGE),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let (Some(font), Some(text), None) = (positional.next(), positional.next(), positional.next())
    else {
        bail!("{}", USAGE);
    };
    Ok(Args {
        font,
        text,
        out,
        options,
        name,
    })
}

fn load_options(path: Option<&PathBuf>) -> anyhow::Result<TextOptions> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read options file {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse options file {}", path.display()))
        }
        None => Ok(CONFIG.text.clone()),
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let options = load_options(args.options.as_ref())?;
    let loader = match &CONFIG.fonts.root {
        Some(root) => FileLoader::with_root(root),
        None => FileLoader::new(),
    };

    let canvas = &CONFIG.canvas;
    let mut renderer = TextRenderer::new(MemorySurface::new(canvas.width, canvas.height));
    let font_name = renderer
        .load_font(&loader, &args.font, args.name.as_deref())
        .await
        .with_context(|| format!("Failed to load font '{}'", args.font))?;
    info!("Font '{}' loaded from {}", font_name, args.font);

    let (width, height) = renderer.measure_text(&args.text, &options);
    info!(
        "Drawing {:?} ({}x{} px) at ({}, {})",
        args.text, width, height, canvas.origin_x, canvas.origin_y
    );
    renderer
        .draw_text(&args.text, canvas.origin_x, canvas.origin_y, &options)
        .context("Failed to draw text")?;

    let file = File::create(&args.out)
        .with_context(|| format!("Failed to create {}", args.out.display()))?;
    renderer
        .surface()
        .write_ppm(BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", args.out.display()))?;
    info!("Wrote {}", args.out.display());
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    if let Err(e) = run(args).await {
        error!("{:#}. Root cause: {:?}", e, e.root_cause());
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_positional_and_flags() {
        let parsed = parse_args(args(&["font.fnt", "HELLO", "--out", "x.ppm", "--name", "big"]))
            .unwrap();
        assert_eq!(parsed.font, "font.fnt");
        assert_eq!(parsed.text, "HELLO");
        assert_eq!(parsed.out, PathBuf::from("x.ppm"));
        assert_eq!(parsed.name.as_deref(), Some("big"));
        assert!(parsed.options.is_none());
    }

    #[test]
    fn test_default_output_path() {
        let parsed = parse_args(args(&["f", "t"])).unwrap();
        assert_eq!(parsed.out, PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn test_missing_text_is_usage_error() {
        assert!(parse_args(args(&["font.fnt"])).is_err());
        assert!(parse_args(args(&["a", "b", "c"])).is_err());
        assert!(parse_args(args(&["a", "b", "--out"])).is_err());
    }
}
