use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Where comments are stored. `auto` picks postgres when
    /// COMMENTS_DATABASE_URL is set and memory otherwise.
    #[arg(long, default_value = "auto")]
    pub storage: Storage,
    #[arg(long, default_value_t = false)]
    pub skip_migrations: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Storage {
    Auto,
    Postgres,
    Memory,
}

impl Storage {
    pub fn use_postgres(self, database_url: Option<&str>) -> bool {
        match self {
            Storage::Auto => database_url.is_some(),
            Storage::Postgres => true,
            Storage::Memory => false,
        }
    }
}
