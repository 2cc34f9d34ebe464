//! `audioplane list <table>` - flat scans of the entity tables

use anyhow::Result;
use audioplane_core::db::{AlbumRepo, ArtistRepo, PlaylistRepo, SongRepo, UserRepo};
use audioplane_core::models::LimitParams;
use clap::{Parser, ValueEnum};

use super::{connect, load_config};
use crate::ui;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Users,
    Artists,
    Songs,
    Albums,
    Playlists,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Table to list
    #[arg(value_enum)]
    pub table: Table,

    /// Maximum rows to show (1-2000, default from config or 200)
    #[arg(long, short = 'n')]
    pub limit: Option<i64>,
}

pub async fn run_list(args: ListArgs, as_json: bool) -> Result<()> {
    let app = load_config()?;
    let limit = LimitParams { limit: args.limit }
        .resolve(app.display.row_limit())
        .bound();
    let db = connect(&app)?;

    match args.table {
        Table::Users => ui::print_fetched(
            &ui::with_spinner("Querying", UserRepo::new(&db).list(limit)).await,
            as_json,
        ),
        Table::Artists => ui::print_fetched(
            &ui::with_spinner("Querying", ArtistRepo::new(&db).list(limit)).await,
            as_json,
        ),
        Table::Songs => ui::print_fetched(
            &ui::with_spinner("Querying", SongRepo::new(&db).list(limit)).await,
            as_json,
        ),
        Table::Albums => ui::print_fetched(
            &ui::with_spinner("Querying", AlbumRepo::new(&db).list(limit)).await,
            as_json,
        ),
        Table::Playlists => ui::print_fetched(
            &ui::with_spinner("Querying", PlaylistRepo::new(&db).list(limit)).await,
            as_json,
        ),
    }

    Ok(())
}
