//! Player repository for SQLite operations

use chrono::{DateTime, TimeZone, Utc};
use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::sqlite::filters::{SqlParams, SqlValue, where_clause};
use crate::data::types::{NewPlayer, PageRequest, Player, PlayerSort, Profession, Race};
use crate::domain::players::Predicate;

const PLAYER_COLUMNS: &str = "id, name, title, race, profession, birthday, banned, experience, \
                              level, until_next_level, version";

type PlayerTuple = (
    i64,
    String,
    String,
    String,
    String,
    i64,
    bool,
    i64,
    i64,
    i64,
    i64,
);

/// List one page of players, optionally filtered
pub async fn find_page(
    pool: &SqlitePool,
    predicate: Option<&Predicate>,
    page: PageRequest,
) -> Result<Vec<Player>, SqliteError> {
    let mut params = SqlParams::default();
    let filter = where_clause(predicate, &mut params);
    let sql = format!(
        "SELECT {} FROM players{} ORDER BY {} LIMIT ? OFFSET ?",
        PLAYER_COLUMNS,
        filter,
        order_by(page.sort)
    );

    let mut query = sqlx::query_as::<_, PlayerTuple>(&sql);
    for value in &params.values {
        query = match value {
            SqlValue::Integer(v) => query.bind(*v),
            SqlValue::Text(v) => query.bind(v.as_str()),
        };
    }

    let rows = query
        .bind(i64::from(page.page_size))
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

    rows.into_iter().map(player_from_row).collect()
}

/// Count players, optionally filtered
pub async fn count_players(
    pool: &SqlitePool,
    predicate: Option<&Predicate>,
) -> Result<u64, SqliteError> {
    let mut params = SqlParams::default();
    let sql = format!(
        "SELECT COUNT(*) FROM players{}",
        where_clause(predicate, &mut params)
    );

    let mut query = sqlx::query_scalar::<_, i64>(&sql);
    for value in &params.values {
        query = match value {
            SqlValue::Integer(v) => query.bind(*v),
            SqlValue::Text(v) => query.bind(v.as_str()),
        };
    }

    let count = query.fetch_one(pool).await?;
    Ok(count.max(0) as u64)
}

pub async fn exists_by_id(pool: &SqlitePool, id: i64) -> Result<bool, SqliteError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM players WHERE id = ?)")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

/// Get a player by ID
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Player>, SqliteError> {
    let sql = format!("SELECT {} FROM players WHERE id = ?", PLAYER_COLUMNS);
    let row = sqlx::query_as::<_, PlayerTuple>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.map(player_from_row).transpose()
}

/// Insert a new player and return it with its assigned ID
pub async fn insert_player(pool: &SqlitePool, player: NewPlayer) -> Result<Player, SqliteError> {
    let result = sqlx::query(
        "INSERT INTO players (name, title, race, profession, birthday, banned, experience, level, until_next_level, version) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 1)",
    )
    .bind(&player.name)
    .bind(&player.title)
    .bind(player.race.as_str())
    .bind(player.profession.as_str())
    .bind(player.birthday.timestamp_millis())
    .bind(player.banned)
    .bind(player.experience)
    .bind(player.level)
    .bind(player.until_next_level)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    tracing::debug!(id, "Player inserted");

    Ok(Player {
        id,
        name: player.name,
        title: player.title,
        race: player.race,
        profession: player.profession,
        birthday: player.birthday,
        banned: player.banned,
        experience: player.experience,
        level: player.level,
        until_next_level: player.until_next_level,
        version: 1,
    })
}

/// Write all mutable columns of `player` if its version is still current
///
/// Returns the player with its bumped version. A version mismatch or a
/// missing row is a conflict.
pub async fn update_player(pool: &SqlitePool, player: Player) -> Result<Player, SqliteError> {
    let result = sqlx::query(
        "UPDATE players SET name = ?, title = ?, race = ?, profession = ?, birthday = ?, banned = ?, \
         experience = ?, level = ?, until_next_level = ?, version = version + 1 \
         WHERE id = ? AND version = ?",
    )
    .bind(&player.name)
    .bind(&player.title)
    .bind(player.race.as_str())
    .bind(player.profession.as_str())
    .bind(player.birthday.timestamp_millis())
    .bind(player.banned)
    .bind(player.experience)
    .bind(player.level)
    .bind(player.until_next_level)
    .bind(player.id)
    .bind(player.version)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(SqliteError::Conflict(format!(
            "player {} was modified concurrently",
            player.id
        )));
    }

    tracing::debug!(id = player.id, "Player updated");
    Ok(Player {
        version: player.version + 1,
        ..player
    })
}

/// Delete a player; a missing row is a conflict
pub async fn delete_player(pool: &SqlitePool, id: i64) -> Result<(), SqliteError> {
    let result = sqlx::query("DELETE FROM players WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(SqliteError::Conflict(format!(
            "player {} was removed concurrently",
            id
        )));
    }

    tracing::debug!(id, "Player deleted");
    Ok(())
}

fn order_by(sort: PlayerSort) -> String {
    match sort {
        PlayerSort::Id => "id ASC".to_string(),
        other => format!("{} ASC, id ASC", other.column()),
    }
}

fn player_from_row(row: PlayerTuple) -> Result<Player, SqliteError> {
    let (
        id,
        name,
        title,
        race,
        profession,
        birthday,
        banned,
        experience,
        level,
        until_next_level,
        version,
    ) = row;

    let race = race.parse::<Race>().map_err(decode_error)?;
    let profession = profession.parse::<Profession>().map_err(decode_error)?;
    let birthday = millis_to_datetime(birthday)?;

    Ok(Player {
        id,
        name,
        title,
        race,
        profession,
        birthday,
        banned,
        experience,
        level,
        until_next_level,
        version,
    })
}

fn millis_to_datetime(millis: i64) -> Result<DateTime<Utc>, SqliteError> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| decode_error(format!("birthday out of range: {}", millis)))
}

fn decode_error(message: String) -> SqliteError {
    SqliteError::Database(sqlx::Error::Decode(message.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::SqliteService;
    use crate::domain::players::{FilterParams, compose, translate};

    fn new_player(name: &str, race: Race, experience: i64, birthday_ms: i64) -> NewPlayer {
        let progress = crate::domain::players::progress_for(experience);
        NewPlayer {
            name: name.to_string(),
            title: format!("{} the Bold", name),
            race,
            profession: Profession::Warrior,
            birthday: Utc.timestamp_millis_opt(birthday_ms).unwrap(),
            banned: false,
            experience,
            level: progress.level,
            until_next_level: progress.until_next_level,
        }
    }

    fn predicate(pairs: &[(&str, &str)]) -> Predicate {
        let params: FilterParams = pairs.iter().copied().collect();
        compose(&translate(&params).unwrap()).unwrap()
    }

    async fn seeded() -> SqlitePool {
        let db = SqliteService::in_memory().await;
        let pool = db.pool().clone();
        for (name, race, exp, birthday) in [
            ("Alvin", Race::Dwarf, 1000, 1_000),
            ("Balin", Race::Dwarf, 5000, 2_000),
            ("alma", Race::Elf, 100, 3_000),
            ("Calbert", Race::Human, 1000, 4_000),
            ("Dora", Race::Orc, 0, 5_000),
        ] {
            insert_player(&pool, new_player(name, race, exp, birthday))
                .await
                .unwrap();
        }
        pool
    }

    #[tokio::test]
    async fn test_insert_and_find_by_id() {
        let db = SqliteService::in_memory().await;
        let created = insert_player(db.pool(), new_player("Alvin", Race::Elf, 5000, 42))
            .await
            .unwrap();
        assert_eq!(created.version, 1);
        assert_eq!(created.level, 9);

        let found = find_by_id(db.pool(), created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(exists_by_id(db.pool(), created.id).await.unwrap());
        assert!(!exists_by_id(db.pool(), created.id + 1).await.unwrap());
        assert!(find_by_id(db.pool(), 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_page_orders_and_pages() {
        let pool = seeded().await;

        let first = find_page(&pool, None, PageRequest::default()).await.unwrap();
        let names: Vec<_> = first.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alvin", "Balin", "alma"]);

        let second = find_page(
            &pool,
            None,
            PageRequest {
                page_number: 1,
                ..PageRequest::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(second.len(), 2);

        let by_exp = find_page(
            &pool,
            None,
            PageRequest {
                page_number: 0,
                page_size: 5,
                sort: PlayerSort::Experience,
            },
        )
        .await
        .unwrap();
        let names: Vec<_> = by_exp.iter().map(|p| p.name.as_str()).collect();
        // Ties on experience fall back to id
        assert_eq!(names, vec!["Dora", "alma", "Alvin", "Calbert", "Balin"]);
    }

    #[tokio::test]
    async fn test_substring_filter_is_case_sensitive() {
        let pool = seeded().await;
        let p = predicate(&[("name", "Al")]);
        let found = find_page(
            &pool,
            Some(&p),
            PageRequest {
                page_size: 10,
                ..PageRequest::default()
            },
        )
        .await
        .unwrap();
        let names: Vec<_> = found.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alvin"]);
        assert_eq!(count_players(&pool, Some(&p)).await.unwrap(), 1);

        let p = predicate(&[("name", "al")]);
        assert_eq!(count_players(&pool, Some(&p)).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_substring_filter_is_literal() {
        let pool = seeded().await;
        let p = predicate(&[("name", "%")]);
        assert_eq!(count_players(&pool, Some(&p)).await.unwrap(), 0);
        let p = predicate(&[("name", "_")]);
        assert_eq!(count_players(&pool, Some(&p)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_range_filters() {
        let pool = seeded().await;

        let exact = predicate(&[("minExperience", "1000"), ("maxExperience", "1000")]);
        assert_eq!(count_players(&pool, Some(&exact)).await.unwrap(), 2);

        let strict = predicate(&[("after", "1000"), ("before", "5000")]);
        assert_eq!(count_players(&pool, Some(&strict)).await.unwrap(), 3);

        let combined = predicate(&[("race", "DWARF"), ("minLevel", "9")]);
        assert_eq!(count_players(&pool, Some(&combined)).await.unwrap(), 1);

        assert_eq!(count_players(&pool, None).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_update_bumps_version() {
        let db = SqliteService::in_memory().await;
        let mut player = insert_player(db.pool(), new_player("Alvin", Race::Elf, 0, 0))
            .await
            .unwrap();
        player.banned = true;

        let updated = update_player(db.pool(), player.clone()).await.unwrap();
        assert_eq!(updated.version, 2);

        let stored = find_by_id(db.pool(), player.id).await.unwrap().unwrap();
        assert!(stored.banned);
        assert_eq!(stored.version, 2);
    }

    #[tokio::test]
    async fn test_stale_update_conflicts() {
        let db = SqliteService::in_memory().await;
        let player = insert_player(db.pool(), new_player("Alvin", Race::Elf, 0, 0))
            .await
            .unwrap();

        let mut first = player.clone();
        first.name = "First".to_string();
        update_player(db.pool(), first).await.unwrap();

        let mut second = player;
        second.name = "Second".to_string();
        let err = update_player(db.pool(), second).await.unwrap_err();
        assert!(matches!(err, SqliteError::Conflict(_)));

        let stored = find_by_id(db.pool(), 1).await.unwrap().unwrap();
        assert_eq!(stored.name, "First");
    }

    #[tokio::test]
    async fn test_delete() {
        let db = SqliteService::in_memory().await;
        let player = insert_player(db.pool(), new_player("Alvin", Race::Elf, 0, 0))
            .await
            .unwrap();

        delete_player(db.pool(), player.id).await.unwrap();
        assert!(!exists_by_id(db.pool(), player.id).await.unwrap());

        let err = delete_player(db.pool(), player.id).await.unwrap_err();
        assert!(matches!(err, SqliteError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_check_constraints_reject_bad_rows() {
        let db = SqliteService::in_memory().await;
        let mut bad = new_player("Alvin", Race::Elf, 0, 0);
        bad.name = "ThirteenChars".to_string();
        let err = insert_player(db.pool(), bad).await.unwrap_err();
        assert!(matches!(err, SqliteError::Database(_)));
    }
}
