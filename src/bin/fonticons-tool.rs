//! fonticons-tool: turns icon font metadata into `icon_font!` declarations.
//!
//! Supported inputs:
//!   icons.json        Font Awesome metadata, needs LICENSE and STYLE
//!   selection.json    IcoMoon selection
//!   *.codepoints      Material Symbols codepoints

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fonticons::metadata::{Declaration, IconEntry, convert_file, make_enum_key};

#[derive(Parser)]
#[command(name = "fonticons-tool", about = "Generate icon font declarations from metadata")]
struct Cli {
    /// Metadata file
    file: PathBuf,
    /// License filter for Font Awesome metadata: free or pro
    license: Option<String>,
    /// Style filter for Font Awesome metadata, e.g. solid
    style: Option<String>,
    /// Name of the generated enum, defaults to the family as a key
    #[arg(long)]
    enum_name: Option<String>,
    /// Font tag index
    #[arg(long, default_value_t = 1)]
    tag: u32,
    /// Display name of the font
    #[arg(long, default_value = "Icons")]
    font_name: String,
    /// Font family, defaults to the display name
    #[arg(long)]
    family: Option<String>,
    /// Font file relative to the resource directory; omit for a system font
    #[arg(long)]
    font_file: Option<String>,
    /// License file relative to the resource directory
    #[arg(long)]
    license_file: Option<String>,
    /// Print the converted entries as JSON instead of a declaration
    #[arg(long)]
    json: bool,
}

fn run(cli: Cli) -> fonticons::Result<String> {
    let filter = cli.license.as_deref().zip(cli.style.as_deref());
    let icons: Vec<IconEntry> = convert_file(&cli.file, filter)?;
    log::info!(target: "fonticons", "Converted {} icons from {}", icons.len(), cli.file.display());

    if cli.json {
        return Ok(serde_json::to_string_pretty(&icons)?);
    }

    let family = cli.family.unwrap_or_else(|| cli.font_name.clone());
    let enum_name = match cli.enum_name {
        Some(name) => name,
        None => make_enum_key(&family)?,
    };
    let declaration = Declaration {
        enum_name,
        tag: cli.tag,
        font_name: cli.font_name,
        family,
        file: cli.font_file,
        license: cli.license_file,
    };

    fonticons::metadata::render_declaration(&declaration, &icons)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("fonticons-tool: {e}");
            ExitCode::from(2)
        }
    }
}
