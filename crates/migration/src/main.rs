//! Applies or inspects the Pocketbook schema outside of the server.
//!
//! The database URL is read from `DATABASE_URL` and defaults to a SQLite file
//! in the working directory.

use std::str::FromStr;

use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::prelude::*;

const DEFAULT_DATABASE_URL: &str = "sqlite:./pocketbook.db?mode=rwc";

enum Command {
    Up,
    Down,
    Fresh,
    Refresh,
    Reset,
    Status,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "fresh" => Ok(Self::Fresh),
            "refresh" => Ok(Self::Refresh),
            "reset" => Ok(Self::Reset),
            "status" => Ok(Self::Status),
            other => Err(format!("unknown command '{other}'")),
        }
    }
}

async fn run(command: Command, db: &DatabaseConnection) -> Result<(), DbErr> {
    match command {
        Command::Up => migration::Migrator::up(db, None).await,
        Command::Down => migration::Migrator::down(db, Some(1)).await,
        Command::Fresh => migration::Migrator::fresh(db).await,
        Command::Refresh => migration::Migrator::refresh(db).await,
        Command::Reset => migration::Migrator::reset(db).await,
        Command::Status => migration::Migrator::status(db).await,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let arg = std::env::args().nth(1).unwrap_or_else(|| "up".to_string());
    let command = match arg.parse::<Command>() {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("Usage: cargo run -p migration -- [up|down|fresh|refresh|reset|status]");
            std::process::exit(2);
        }
    };

    let db_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    let db = Database::connect(&db_url).await?;

    run(command, &db).await?;

    Ok(())
}
