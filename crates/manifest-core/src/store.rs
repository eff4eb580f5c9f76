//! The `PassengerStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `manifest-store-sqlite`).
//! The importer and the HTTP layer depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::{filter::PassengerFilter, passenger::Passenger, stats::StatsReport};

/// Abstraction over a passenger store backend.
///
/// The store holds at most one dataset. The only write is
/// [`replace_all`](PassengerStore::replace_all), which swaps the whole table
/// atomically; there is no per-record update or delete.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PassengerStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Delete every stored passenger and insert `passengers`, in one
  /// transaction. On error nothing changes. Returns the number inserted.
  fn replace_all(
    &self,
    passengers: Vec<Passenger>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Number of stored passengers.
  fn count(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Retrieve a passenger by id. Returns `None` if not found.
  fn get(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Passenger>, Self::Error>> + Send + '_;

  /// Passengers in storage order, skipping `skip` and returning at most
  /// `limit`.
  fn list(
    &self,
    skip: u64,
    limit: u64,
  ) -> impl Future<Output = Result<Vec<Passenger>, Self::Error>> + Send + '_;

  /// Every passenger matching all predicates in `filter`, in storage order.
  /// No limit is applied.
  fn filter<'a>(
    &'a self,
    filter: &'a PassengerFilter,
  ) -> impl Future<Output = Result<Vec<Passenger>, Self::Error>> + Send + 'a;

  /// Overall and per-category survival counts.
  fn statistics(
    &self,
  ) -> impl Future<Output = Result<StatsReport, Self::Error>> + Send + '_;
}
