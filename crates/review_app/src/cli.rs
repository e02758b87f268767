use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lmreview")]
#[command(version, about = "Tag reference documents, build review prompts and export replies to Word", long_about = None)]
pub struct Cli {
    /// Config file (default: lmreview.ron next to the executable).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Overrides the configured base path.
    #[arg(long, global = true)]
    pub base: Option<PathBuf>,

    /// Project folder, e.g. 【雲端案】 (default: first configured project).
    #[arg(short, long, global = true)]
    pub project: Option<String>,

    /// Delivery folder, e.g. 【契約交付】 (default: first configured delivery).
    #[arg(short, long, global = true)]
    pub delivery: Option<String>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the untagged files and the tagged files grouped by tag.
    List,
    /// Rename a file in the input folder to carry a tag prefix.
    Tag {
        file: String,
        /// 標準 / 範本 / 待審, the full prefix, or standard / template / review.
        tag: String,
    },
    /// Print the review prompt.
    Prompt {
        /// 【待審】 file to review (default: first one).
        #[arg(long)]
        target: Option<String>,
    },
    /// Write a Word report from a reply.
    Export(ExportArgs),
    /// Interactive session with folder watching (default).
    Run,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ExportArgs {
    /// 【待審】 file the reply belongs to (default: first one).
    #[arg(long)]
    pub target: Option<String>,

    /// Read the reply from a text file.
    #[arg(long, conflicts_with = "clipboard", required_unless_present = "clipboard")]
    pub file: Option<PathBuf>,

    /// Read the reply from the clipboard.
    #[arg(long)]
    pub clipboard: bool,
}
