use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use quince_package::PackageKind;

#[derive(Parser)]
#[command(author, version, about, arg_required_else_help = true)]
pub struct Args {
    /// Set output verbosity
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress outputs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Provide custom config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

/// Package type as passed on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum KindArg {
    SingleFile,
    Archive,
}

impl From<KindArg> for PackageKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::SingleFile => PackageKind::SingleFile,
            KindArg::Archive => PackageKind::Archive,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload a package file into the archive
    #[command(arg_required_else_help = true)]
    Upload {
        /// Package file (.el source or .tar archive)
        file: PathBuf,

        /// Package type; inferred from the file extension when omitted
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,

        /// Move the file into the store instead of copying it (archives only)
        #[arg(long)]
        relocate: bool,
    },

    /// Fetch a stored package's content
    #[command(arg_required_else_help = true)]
    Fetch {
        /// Package name
        name: String,

        /// Exact stored version, e.g. 1.2.3
        version: String,

        /// Package type
        #[arg(short, long, value_enum, default_value = "single-file")]
        kind: KindArg,

        /// Write the content here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a stored package's metadata response
    #[command(arg_required_else_help = true)]
    Show {
        /// Package name
        name: String,

        /// Exact stored version, e.g. 1.2.3
        version: String,

        /// Package type
        #[arg(short, long, value_enum, default_value = "single-file")]
        kind: KindArg,
    },

    /// Print the archive contents listing
    List,
}
