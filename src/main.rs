//! asmdoc — generate a single-page HTML API reference from compiled-library
//! metadata and an optional XML doc-comments file.
//!
//! One invocation performs one complete generation pass: load everything,
//! validate, render in memory, write the output file once. Editor
//! integrations shell out to this binary and show captured stdout/stderr.

mod anchor;
mod error;
mod index;
mod mapper;
mod metadata;
mod model;
mod parser;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use error::Error;
use index::CommentIndex;
use metadata::Assembly;
use render::{OutputFormat, RenderOptions};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "asmdoc",
    about = "Generate a single-page HTML API reference from compiled-library metadata and XML doc comments"
)]
struct Cli {
    /// Assembly metadata snapshot (JSON)
    assembly: PathBuf,

    /// Output file path
    output: PathBuf,

    /// Include diagnostic markers for missing documentation
    #[arg(short = 'd', long)]
    debug: bool,

    /// Permit overwriting an existing output file
    #[arg(short = 'o', long)]
    overwrite: bool,

    /// XML comments document. Omitting it documents the bare API surface.
    #[arg(short = 'c', long)]
    comments: Option<PathBuf>,

    /// HTML fragment included at the top of the page
    #[arg(short = 'r', long)]
    readme: Option<PathBuf>,

    /// CSS file replacing the built-in stylesheet
    #[arg(short = 's', long)]
    styles: Option<PathBuf>,

    /// Output format: html
    #[arg(short = 't', long = "type", default_value = "html")]
    format: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let format = OutputFormat::from_name(&cli.format)?;
    validate(cli)?;

    let assembly = Assembly::load(&cli.assembly)?;

    let index = match &cli.comments {
        Some(path) => {
            let xml = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let doc = parser::xml::parse_comments(&xml)?;
            if !doc.assembly.is_empty() && doc.assembly != assembly.name {
                eprintln!(
                    "warning: comments document is for {} but the assembly is {}",
                    doc.assembly, assembly.name
                );
            }
            CommentIndex::build(doc)
        }
        // No comments file is not an error: every lookup misses and the
        // page renders with empty descriptions.
        None => CommentIndex::default(),
    };
    if cli.comments.is_some() && index.is_empty() {
        eprintln!("warning: comments document contained no usable entries");
    }

    let opts = RenderOptions {
        debug: cli.debug,
        readme: read_optional(cli.readme.as_deref())?,
        styles: read_optional(cli.styles.as_deref())?,
    };

    let output = render::render(format, &assembly, &index, &opts);
    fs::write(&cli.output, output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    Ok(())
}

/// Path checks, all performed before anything is written so a failed run
/// never leaves a partial or truncated output file behind.
fn validate(cli: &Cli) -> std::result::Result<(), Error> {
    if !cli.assembly.is_file() {
        return Err(Error::AssemblyNotFound(cli.assembly.clone()));
    }
    // A supplied-but-missing optional input is fatal, same as a required
    // path; only omitting the option entirely is fine.
    for path in [&cli.comments, &cli.readme, &cli.styles]
        .into_iter()
        .flatten()
    {
        if !path.is_file() {
            return Err(Error::OptionalInputNotFound(path.clone()));
        }
    }
    if cli.output.exists() && !cli.overwrite {
        return Err(Error::OutputExists(cli.output.clone()));
    }
    Ok(())
}

fn read_optional(path: Option<&Path>) -> Result<Option<String>> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(Some(text))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn cli(assembly: &Path, output: &Path) -> Cli {
        Cli::parse_from([
            "asmdoc",
            assembly.to_str().unwrap(),
            output.to_str().unwrap(),
        ])
    }

    #[test]
    fn missing_assembly_fails_validation() {
        let err = validate(&cli(
            Path::new("/nonexistent/meta.json"),
            Path::new("/tmp/out.html"),
        ))
        .unwrap_err();
        assert!(matches!(err, Error::AssemblyNotFound(_)));
    }

    #[test]
    fn existing_output_without_overwrite_fails() {
        let mut assembly = NamedTempFile::new().unwrap();
        assembly.write_all(b"{\"name\":\"X\"}").unwrap();
        let output = NamedTempFile::new().unwrap();

        let err = validate(&cli(assembly.path(), output.path())).unwrap_err();
        assert!(matches!(err, Error::OutputExists(_)));
    }

    #[test]
    fn overwrite_flag_permits_existing_output() {
        let mut assembly = NamedTempFile::new().unwrap();
        assembly.write_all(b"{\"name\":\"X\"}").unwrap();
        let output = NamedTempFile::new().unwrap();

        let mut cli = cli(assembly.path(), output.path());
        cli.overwrite = true;
        assert!(validate(&cli).is_ok());
    }

    #[test]
    fn supplied_missing_comments_path_fails() {
        let mut assembly = NamedTempFile::new().unwrap();
        assembly.write_all(b"{\"name\":\"X\"}").unwrap();

        let mut cli = cli(assembly.path(), Path::new("/tmp/asmdoc-test-out.html"));
        cli.comments = Some(PathBuf::from("/nonexistent/comments.xml"));
        let err = validate(&cli).unwrap_err();
        assert!(matches!(err, Error::OptionalInputNotFound(_)));
    }
}
