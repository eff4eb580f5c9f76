//! [`SqliteStore`], the SQLite implementation of [`PassengerStore`].

use std::{collections::HashMap, path::Path};

use rusqlite::OptionalExtension as _;

use manifest_core::{
  filter::PassengerFilter,
  passenger::Passenger,
  stats::{GroupCount, StatsReport},
  store::PassengerStore,
};

use crate::{
  Result,
  encode::{COLUMNS, INSERT, filter_clause, passenger_from_row, passenger_params},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A passenger store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. Every call
/// runs on the connection's own thread, so calls are serialised and a
/// [`replace_all`](PassengerStore::replace_all) is never observed half-done.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Run a `GROUP BY` count query returning `(key, total, survived)` rows.
fn grouped<K>(
  conn: &rusqlite::Connection,
  column: &str,
) -> rusqlite::Result<HashMap<K, GroupCount>>
where
  K: rusqlite::types::FromSql + Eq + std::hash::Hash,
{
  let mut stmt = conn.prepare(&format!(
    "SELECT {column}, COUNT(*), SUM(survived = 1)
     FROM passengers
     GROUP BY {column}"
  ))?;
  stmt
    .query_map([], |row| {
      let total: i64 = row.get(1)?;
      let survived: i64 = row.get(2)?;
      Ok((row.get(0)?, GroupCount {
        total:    total as u64,
        survived: survived as u64,
      }))
    })?
    .collect()
}

fn clamp(n: u64) -> i64 { i64::try_from(n).unwrap_or(i64::MAX) }

// ─── PassengerStore impl ─────────────────────────────────────────────────────

impl PassengerStore for SqliteStore {
  type Error = crate::Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn replace_all(&self, passengers: Vec<Passenger>) -> Result<usize> {
    for p in &passengers {
      p.validate()?;
    }

    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let removed = tx.execute("DELETE FROM passengers", [])?;
        {
          let mut stmt = tx.prepare_cached(INSERT)?;
          for p in &passengers {
            stmt.execute(&passenger_params(p)[..])?;
          }
        }
        tx.commit()?;
        tracing::debug!(removed, inserted = passengers.len(), "replaced passengers");
        Ok(passengers.len())
      })
      .await?;

    Ok(inserted)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn count(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM passengers", [], |r| r.get(0))?)
      })
      .await?;
    Ok(n as u64)
  }

  async fn get(&self, id: i64) -> Result<Option<Passenger>> {
    let passenger = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {COLUMNS} FROM passengers WHERE passenger_id = ?1"),
            rusqlite::params![id],
            passenger_from_row,
          )
          .optional()?)
      })
      .await?;
    Ok(passenger)
  }

  async fn list(&self, skip: u64, limit: u64) -> Result<Vec<Passenger>> {
    let (skip, limit) = (clamp(skip), clamp(limit));

    let passengers = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {COLUMNS} FROM passengers ORDER BY seq LIMIT ?1 OFFSET ?2"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![limit, skip], passenger_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(passengers)
  }

  async fn filter(&self, filter: &PassengerFilter) -> Result<Vec<Passenger>> {
    let (where_clause, params) = filter_clause(filter);

    let passengers = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {COLUMNS} FROM passengers {where_clause} ORDER BY seq"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), passenger_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(passengers)
  }

  async fn statistics(&self) -> Result<StatsReport> {
    let (overall, by_class, by_sex) = self
      .conn
      .call(|conn| {
        let (total, survived): (i64, i64) = conn.query_row(
          "SELECT COUNT(*), COALESCE(SUM(survived = 1), 0) FROM passengers",
          [],
          |r| Ok((r.get(0)?, r.get(1)?)),
        )?;
        let overall = GroupCount {
          total:    total as u64,
          survived: survived as u64,
        };
        let by_class = grouped::<i64>(conn, "pclass")?;
        let by_sex = grouped::<String>(conn, "sex")?;
        Ok((overall, by_class, by_sex))
      })
      .await?;

    Ok(StatsReport::from_counts(overall, &by_class, &by_sex))
  }
}
