//! The `ContactStore` trait and the filters it can scan with.
//!
//! The trait is implemented by storage backends (e.g. `rolodex-store-sqlite`).
//! [`crate::service::ContactService`] depends on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use chrono::NaiveDate;

use crate::contact::{Contact, ContactId, NewContact};

// ─── Filters ─────────────────────────────────────────────────────────────────

/// Predicate for [`ContactStore::scan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactFilter {
  /// Case-insensitive substring match against first name, second name or
  /// addresses; any one of them matching is enough.
  Text(String),
  /// Date of birth strictly after `after` and strictly before `before`.
  BornBetween { after: NaiveDate, before: NaiveDate },
}

impl ContactFilter {
  /// Evaluate the filter against a single contact.
  ///
  /// Backends that cannot express a filter natively fall back to this.
  pub fn matches(&self, contact: &Contact) -> bool {
    match self {
      Self::Text(needle) => {
        let needle = needle.to_uppercase();
        [&contact.first_name, &contact.second_name, &contact.addresses]
          .iter()
          .any(|field| field.to_uppercase().contains(&needle))
      }
      Self::BornBetween { after, before } => {
        contact.date_of_birth > *after && contact.date_of_birth < *before
      }
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the relational contact table.
///
/// "Not found" is expressed as `None` / `false`, never as an error.
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new contact and return it with its freshly assigned id.
  fn insert(
    &self,
    contact: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Retrieve a contact by id.
  fn get(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Every contact, in insertion order.
  fn list(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Overwrite every column of the row with `contact.id`.
  ///
  /// Returns `false` if no such row existed at write time; callers treat that
  /// as an optimistic-concurrency conflict.
  fn update<'a>(
    &'a self,
    contact: &'a Contact,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Remove a contact. Returns `false` if no row matched.
  fn delete(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn exists(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// All contacts matching `filter`, in insertion order.
  fn scan<'a>(
    &'a self,
    filter: &'a ContactFilter,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + 'a;
}
