//! `audioplane stats` - catalog summary: average playlist size and the
//! most liked titles

use anyhow::Result;
use audioplane_core::db::{PlaylistRepo, SongRepo};
use serde_json::json;

use super::{connect, load_config};
use crate::ui;

const TOP_SONGS: i64 = 5;

pub async fn run_stats(as_json: bool) -> Result<()> {
    let db = connect(&load_config()?)?;

    let (average, top) = ui::with_spinner("Querying", async {
        let average = PlaylistRepo::new(&db).average_song_count().await;
        let top = SongRepo::new(&db).popularity(Some(TOP_SONGS)).await;
        (average, top)
    })
    .await;

    for diagnostic in [&average.diagnostic, &top.diagnostic].into_iter().flatten() {
        ui::print_diagnostic(diagnostic);
    }
    let avg_songs = average.rows.first().and_then(|row| row.avg_songs);

    if as_json {
        let body = json!({
            "avg_songs_per_playlist": avg_songs,
            "top_liked": top.rows,
        });
        println!("{}", ui::to_json(&body));
        return Ok(());
    }

    match avg_songs {
        Some(avg) => println!("Average songs per playlist: {:.2}", avg),
        None => println!("Average songs per playlist: n/a"),
    }
    println!();
    println!("Top {} liked songs:", TOP_SONGS);
    print!("{}", ui::render_table(&top.rows));
    Ok(())
}
