use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Sum the floor area of rooms given as `feet-inches,feet-inches` lines.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Input file, one room per line (stdin when omitted or `-`)
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Only print the total, not every accepted room
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

impl Cli {
    /// `None` means stdin.
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|p| p.as_os_str() != "-")
    }
}
