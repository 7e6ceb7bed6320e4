use clap::{Parser, Subcommand, ValueEnum};
use minnool::share::ShareTarget;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "minnool", bin_name = "minnool", version)]
#[command(about = "Tamil-first PDF and Word reading library for the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ShareTargetArg {
    #[value(alias = "wa")]
    Whatsapp,
    #[value(alias = "tg")]
    Telegram,
}

impl From<ShareTargetArg> for ShareTarget {
    fn from(arg: ShareTargetArg) -> Self {
        match arg {
            ShareTargetArg::Whatsapp => ShareTarget::WhatsApp,
            ShareTargetArg::Telegram => ShareTarget::Telegram,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import PDF or Word (.docx) files into the library
    #[command(alias = "add")]
    Import {
        /// Files to import
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,
    },

    /// List books, newest first
    #[command(alias = "ls")]
    List,

    /// Print a book's text
    #[command(alias = "view")]
    Read {
        /// Book index, id or title
        #[arg(required = true, num_args = 1..)]
        book: Vec<String>,

        /// Only these lines, e.g. 10-25
        #[arg(short, long)]
        lines: Option<String>,
    },

    /// Copy a book, or some of its lines, to the clipboard
    #[command(alias = "cp")]
    Copy {
        /// Book index, id or title
        #[arg(required = true, num_args = 1..)]
        book: Vec<String>,

        /// Only these lines, e.g. 10-25
        #[arg(short, long)]
        lines: Option<String>,
    },

    /// Share a book, or some of its lines, on WhatsApp or Telegram
    Share {
        /// Where to share
        #[arg(value_enum)]
        target: ShareTargetArg,

        /// Book index, id or title
        #[arg(required = true, num_args = 1..)]
        book: Vec<String>,

        /// Only these lines, e.g. 10-25
        #[arg(short, long)]
        lines: Option<String>,

        /// Print the share link instead of opening it
        #[arg(long)]
        print: bool,
    },

    /// Permanently remove books from the library
    #[command(alias = "rm")]
    Delete {
        /// Book indexes (ranges like 2-4 allowed), an id or a title
        #[arg(required = true, num_args = 1..)]
        books: Vec<String>,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Print a cleaned-up version of a book's text (the stored book is unchanged)
    Clean {
        /// Book index, id or title
        #[arg(required = true, num_args = 1..)]
        book: Vec<String>,
    },

    /// Show or change configuration
    Config {
        /// Configuration key (cleanup-model, cleanup-endpoint, cleanup-timeout)
        key: Option<String>,

        /// New value for the key
        value: Option<String>,
    },
}
