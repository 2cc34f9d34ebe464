//! Catalog behavior against a live Postgres.
//!
//! Each test gets a fresh database from `#[sqlx::test]` (set `DATABASE_URL`)
//! with `fixtures/schema.sql` and `fixtures/catalog.sql` applied.
//! Run with: `cargo test -p audioplane-core -- --ignored`

use std::time::Duration;

use audioplane_core::db::{
    ActivityRepo, AlbumRepo, ArtistRepo, DiagnosticKind, PlaylistRepo, SongRepo, User,
    UserRepo,
};
use audioplane_core::models::{
    ArtistForm, EntityId, NewArtist, NewPlaylist, NewSong, NewUser, PlaylistForm, SongForm,
    UserForm,
};
use audioplane_core::{Database, FlashAction, LikeGraph};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

fn db(pool: PgPool) -> Database {
    Database::from_pool(pool, Duration::from_secs(8))
}

fn id(n: i64) -> EntityId {
    EntityId::new(n).unwrap()
}

fn artist(name: &str, location: Option<&str>) -> NewArtist {
    NewArtist::try_from(ArtistForm {
        name: name.into(),
        location: location.map(Into::into),
    })
    .unwrap()
}

fn song(name: &str, released: &str) -> NewSong {
    NewSong::try_from(SongForm {
        name: name.into(),
        released: released.into(),
    })
    .unwrap()
}

#[sqlx::test(migrations = false, fixtures("schema", "catalog"))]
#[ignore = "requires database"]
async fn inserted_artist_is_listed(pool: PgPool) {
    let db = db(pool);
    let repo = ArtistRepo::new(&db);

    let inserted = repo.insert(&artist("Test Artist", Some("Test City"))).await;
    assert!(inserted.is_ok());
    let record = inserted.record.clone().expect("row returned");
    assert_eq!(record.artist_id, 4);
    assert_eq!(
        inserted.flash().unwrap().to_string(),
        "Inserted artist: Test Artist (ID 4)"
    );

    let listed = repo.list(None).await;
    assert!(listed.rows.contains(&record));
    assert_eq!(listed.rows.len(), 4);
}

#[sqlx::test(migrations = false, fixtures("schema", "catalog"))]
#[ignore = "requires database"]
async fn update_keeps_row_count(pool: PgPool) {
    let db = db(pool);
    let repo = UserRepo::new(&db);
    let before = repo.list(None).await.rows.len();

    let renamed = NewUser::try_from(UserForm {
        username: "ava2".into(),
    })
    .unwrap();
    let updated = repo.update(id(1), &renamed).await;
    assert_eq!(updated.record.as_ref().unwrap().username, "ava2");
    assert_eq!(updated.action, FlashAction::Updated);

    let after = repo.list(None).await;
    assert_eq!(after.rows.len(), before);
    assert_eq!(after.rows[0].username, "ava2");
}

#[sqlx::test(migrations = false, fixtures("schema", "catalog"))]
#[ignore = "requires database"]
async fn second_delete_matches_nothing(pool: PgPool) {
    let db = db(pool);
    let repo = SongRepo::new(&db);

    let first = repo.delete(id(4)).await;
    assert_eq!(first.record.as_ref().unwrap().name, "Unreleased Demo");

    let second = repo.delete(id(4)).await;
    assert!(second.is_ok());
    assert!(second.record.is_none());
    assert!(second.flash().is_none());
}

#[sqlx::test(migrations = false, fixtures("schema", "catalog"))]
#[ignore = "requires database"]
async fn deleting_missing_playlist_is_not_an_error(pool: PgPool) {
    let db = db(pool);
    let repo = PlaylistRepo::new(&db);

    let outcome = repo.delete(id(9_999)).await;
    assert!(outcome.diagnostic.is_none());
    assert!(outcome.record.is_none());
    assert_eq!(repo.list(None).await.rows.len(), 3);
}

#[sqlx::test(migrations = false, fixtures("schema", "catalog"))]
#[ignore = "requires database"]
async fn new_artist_and_song_show_up_in_counts(pool: PgPool) {
    let db = db(pool);
    let artists = ArtistRepo::new(&db);
    let songs = SongRepo::new(&db);

    let a = artists
        .insert(&artist("Test Artist", Some("Test City")))
        .await
        .record
        .unwrap();
    let s = songs
        .insert(&song("Test Song", "2024-01-01"))
        .await
        .record
        .unwrap();

    sqlx::query("INSERT INTO Produces (artistID, song_id) VALUES ($1, $2)")
        .bind(a.artist_id)
        .bind(s.song_id)
        .execute(db.pool())
        .await
        .unwrap();

    let counts = artists.song_counts(None).await;
    let row = counts
        .rows
        .iter()
        .find(|r| r.name == "Test Artist")
        .expect("artist counted");
    assert_eq!(row.song_count, 1);

    let joined = songs.list_with_artist(None).await;
    let row = joined
        .rows
        .iter()
        .find(|r| r.song_id == s.song_id)
        .unwrap();
    assert_eq!(row.artist_name.as_deref(), Some("Test Artist"));
}

#[sqlx::test(migrations = false, fixtures("schema", "catalog"))]
#[ignore = "requires database"]
async fn joined_views_keep_unmatched_rows(pool: PgPool) {
    let db = db(pool);

    let counts = ArtistRepo::new(&db).song_counts(None).await.rows;
    assert_eq!(counts.len(), 3);
    assert_eq!(counts[2].name, "Silent Artist");
    assert_eq!(counts[2].song_count, 0);

    let liked = SongRepo::new(&db).most_liked(None).await.rows;
    let ids: Vec<i32> = liked.iter().map(|r| r.song_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(liked[0].like_count, 2);
    assert_eq!(liked[3].like_count, 0);
    assert!(liked[3].artist_name.is_none());

    let activity = ActivityRepo::new(&db).user_activity(None).await.rows;
    assert_eq!(activity.len(), 3);
    let cal = activity.iter().find(|r| r.username == "cal").unwrap();
    assert_eq!((cal.songs_liked, cal.playlists_created), (0, 0));
    let ava = activity.iter().find(|r| r.username == "ava").unwrap();
    assert_eq!((ava.songs_liked, ava.playlists_created), (2, 2));

    let albums = AlbumRepo::new(&db).list_with_artist(None).await.rows;
    let names: Vec<&str> = albums.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["the record", "Midnights", "Orphan EP", "Lover"]);
    assert!(albums[2].artist_name.is_none());
}

#[sqlx::test(migrations = false, fixtures("schema", "catalog"))]
#[ignore = "requires database"]
async fn ordered_views(pool: PgPool) {
    let db = db(pool);

    let entries = PlaylistRepo::new(&db).songs(id(1)).await.rows;
    let positions: Vec<(i32, &str)> = entries
        .iter()
        .map(|e| (e.position, e.song_name.as_str()))
        .collect();
    assert_eq!(
        positions,
        vec![(1, "Anti-Hero"), (2, "Cruel Summer"), (3, "Not Strong Enough")]
    );

    let tracks = AlbumRepo::new(&db).tracks(None).await.rows;
    let order: Vec<(&str, i32)> = tracks
        .iter()
        .map(|t| (t.album_name.as_str(), t.track_number))
        .collect();
    assert_eq!(
        order,
        vec![("Lover", 2), ("Midnights", 1), ("Midnights", 3), ("the record", 6)]
    );

    let feed = ActivityRepo::new(&db).likes_feed(None).await.rows;
    assert_eq!(feed.len(), 4);
    assert_eq!(feed[0].song_name, "Not Strong Enough");
    assert!(feed.windows(2).all(|w| w[0].liked_at >= w[1].liked_at));

    let popularity = SongRepo::new(&db).popularity(Some(5)).await.rows;
    assert_eq!(popularity[0].name, "Anti-Hero");
    assert_eq!(popularity[1].name, "Cruel Summer");
}

#[sqlx::test(migrations = false, fixtures("schema", "catalog"))]
#[ignore = "requires database"]
async fn limits_bound_the_rows(pool: PgPool) {
    let db = db(pool);
    let songs = SongRepo::new(&db);

    assert_eq!(songs.list(Some(2)).await.rows.len(), 2);
    assert_eq!(songs.list(None).await.rows.len(), 4);
}

#[sqlx::test(migrations = false, fixtures("schema", "catalog"))]
#[ignore = "requires database"]
async fn playlist_stats_and_network(pool: PgPool) {
    let db = db(pool);
    let playlists = PlaylistRepo::new(&db);

    let avg = playlists.average_song_count().await.rows;
    assert_eq!(avg[0].avg_songs, Some(2.0));

    let creators = playlists.list_with_creator(None).await.rows;
    assert_eq!(creators.len(), 3);
    assert_eq!(creators[2].creator.as_deref(), Some("ben"));

    let choices = playlists.choices().await.rows;
    assert_eq!(choices.len(), 3);

    let inserted = playlists
        .insert(
            &NewPlaylist::try_from(PlaylistForm {
                name: "Late Night".into(),
                num_songs: 0,
            })
            .unwrap(),
        )
        .await;
    assert_eq!(inserted.record.unwrap().playlist_id, 4);

    let edges = ActivityRepo::new(&db).like_edges(Some(500)).await.rows;
    let graph = LikeGraph::from_edges(&edges);
    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.edge_count(), 4);
}

#[sqlx::test(migrations = false, fixtures("schema", "catalog"))]
#[ignore = "requires database"]
async fn constraint_violation_rolls_back(pool: PgPool) {
    let db = db(pool);

    // the user row is written first; linking it to a missing playlist fails
    let query = sqlx::query_as::<_, User>(
        r#"
        WITH added AS (
            INSERT INTO User_table (userName) VALUES ($1) RETURNING userID, userName
        ), linked AS (
            INSERT INTO Creates (userID, playlistID)
            SELECT userID, $2 FROM added
            RETURNING userID
        )
        SELECT added.userID AS user_id, added.userName AS username
        FROM added JOIN linked USING (userID)
        "#,
    )
    .bind("ghost")
    .bind(999_i32);
    let mutated = db.run_mutation(FlashAction::Inserted, query).await;
    assert!(mutated.record.is_none());
    assert!(mutated.flash().is_none());
    assert_eq!(
        mutated.diagnostic.map(|d| d.kind),
        Some(DiagnosticKind::Constraint)
    );

    let users = UserRepo::new(&db).list(None).await;
    assert!(users.is_ok());
    assert_eq!(users.rows.len(), 3);
    assert!(users.rows.iter().all(|u| u.username != "ghost"));
}

#[sqlx::test(migrations = false, fixtures("schema", "catalog"))]
#[ignore = "requires database"]
async fn oversized_value_fails_the_write(pool: PgPool) {
    let db = db(pool);

    let query = sqlx::query_as::<_, User>(
        "INSERT INTO User_table (userName) VALUES ($1) \
         RETURNING userID AS user_id, userName AS username",
    )
    .bind("x".repeat(300));
    let mutated = db.run_mutation(FlashAction::Inserted, query).await;
    assert!(mutated.record.is_none());
    assert_eq!(
        mutated.diagnostic.map(|d| d.kind),
        Some(DiagnosticKind::Query)
    );

    // the pool is still usable afterwards
    assert_eq!(UserRepo::new(&db).list(None).await.rows.len(), 3);
}

#[sqlx::test(migrations = false, fixtures("schema", "catalog"))]
#[ignore = "requires database"]
async fn non_positive_ids_match_nothing(pool: PgPool) {
    let db = db(pool);

    for n in [0, -4] {
        let deleted = PlaylistRepo::new(&db).delete(id(n)).await;
        assert!(deleted.record.is_none());
        assert!(deleted.is_ok());
    }
    assert_eq!(PlaylistRepo::new(&db).list(None).await.rows.len(), 3);
}

#[sqlx::test(migrations = false, fixtures("schema", "catalog"))]
#[ignore = "requires database"]
async fn statement_timeout_yields_empty_result(
    pool_opts: PgPoolOptions,
    connect_opts: PgConnectOptions,
) {
    let pool = pool_opts
        .connect_with(connect_opts.options([("statement_timeout", "200")]))
        .await
        .unwrap();
    let db = Database::from_pool(pool, Duration::from_millis(200));

    let query = sqlx::query_as::<_, (i32,)>("SELECT 1 FROM pg_sleep(5)");
    let fetched = db.run_query("slow", query).await;
    assert!(fetched.rows.is_empty());
    let diagnostic = fetched.diagnostic.expect("timeout reported");
    assert_eq!(diagnostic.kind, DiagnosticKind::Timeout);
    assert!(diagnostic.to_string().starts_with("Query timed out"));

    // a later query on the same pool still works
    assert!(db.ping().await.is_ok());
}
