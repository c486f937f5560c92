//! Command-line interface parsing for the pokedex binary.

use clap::{Parser, Subcommand, ValueEnum};

use pokedex_core::views::SortColumn;

/// Pokédex - browse the creature catalog, online or from the local cache
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Browse the PokeAPI creature catalog, with an offline fallback")]
#[command(version)]
pub struct Cli {
    /// Keep fetched entries in memory only instead of the on-disk cache
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// List one or more pages of the catalog
    List {
        /// Page number to start from (0-based)
        #[arg(long, default_value_t = 0)]
        page: usize,

        /// Extra shift applied to every page window
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Number of consecutive pages to show
        #[arg(long, default_value_t = 1)]
        pages: usize,

        /// Order rows by a stat, highest first
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
    },

    /// List a page starting at a random point of the catalog
    Random {
        /// Order rows by a stat, highest first
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
    },

    /// Show details for one creature
    Show {
        /// Creature name, e.g. "pikachu"
        name: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Attack,
    Defense,
    Hp,
}

impl From<SortArg> for SortColumn {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Attack => SortColumn::Attack,
            SortArg::Defense => SortColumn::Defense,
            SortArg::Hp => SortColumn::Hp,
        }
    }
}
