//! Command-line interface for the converter.

use std::path::{Path, PathBuf};

use clap::Parser;
use console::style;

use crate::config::{validate_input_path, ConversionMode, ConvertOptions};
use crate::converter::convert_file;
use crate::error::Result;

/// Convert Doxygen XML output into AsciiDoc.
#[derive(Parser)]
#[command(name = "doxygen-asciidoc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Doxygen XML file: an index.xml, or a single compound with --child
    pub file: PathBuf,

    /// Write the AsciiDoc to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Treat the input as a single compound document rather than an index
    #[arg(short, long)]
    pub child: bool,

    /// Heading depth to start from (default: 0 for an index, 1 with --child)
    #[arg(short, long)]
    pub depth: Option<usize>,
}

impl Cli {
    /// Conversion options selected by the flags.
    #[must_use]
    pub fn options(&self) -> ConvertOptions {
        let mode = if self.child {
            ConversionMode::Fragment
        } else {
            ConversionMode::Index
        };
        let options = ConvertOptions::new(mode);
        match self.depth {
            Some(depth) => options.with_depth(depth),
            None => options,
        }
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    convert_command(&cli.file, cli.output.as_deref(), cli.options())
}

/// Execute a conversion and write the result.
///
/// Nothing is written unless the whole conversion succeeds.
fn convert_command(file: &Path, output: Option<&Path>, options: ConvertOptions) -> Result<()> {
    // Validate input before doing any work
    validate_input_path(file)?;

    let asciidoc = convert_file(file, options)?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{asciidoc}\n"))?;
            eprintln!(
                "{} {}",
                style("Saved to:").green().bold(),
                path.display()
            );
        }
        None => println!("{asciidoc}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_parse_index() {
        let cli = Cli::parse_from(["doxygen-asciidoc", "xml/index.xml"]);

        assert_eq!(cli.file, PathBuf::from("xml/index.xml"));
        assert!(cli.output.is_none());
        assert!(!cli.child);
        assert_eq!(cli.options(), ConvertOptions::new(ConversionMode::Index));
        assert_eq!(cli.options().depth, 0);
    }

    #[test]
    fn test_cli_parse_child_with_output() {
        let cli = Cli::parse_from([
            "doxygen-asciidoc",
            "xml/group__gpio.xml",
            "--child",
            "--output",
            "gpio.adoc",
        ]);

        assert_eq!(cli.output, Some(PathBuf::from("gpio.adoc")));
        assert_eq!(cli.options().mode, ConversionMode::Fragment);
        assert_eq!(cli.options().depth, 1);
    }

    #[test]
    fn test_cli_parse_depth_override() {
        let cli = Cli::parse_from(["doxygen-asciidoc", "-c", "-d", "3", "page.xml"]);

        assert_eq!(cli.options().mode, ConversionMode::Fragment);
        assert_eq!(cli.options().depth, 3);
    }

    #[test]
    fn test_cli_rejects_negative_depth() {
        assert!(Cli::try_parse_from(["doxygen-asciidoc", "-d", "-1", "index.xml"]).is_err());
    }
}
