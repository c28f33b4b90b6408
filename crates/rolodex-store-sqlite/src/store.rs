//! [`SqliteStore`] — the SQLite implementation of [`ContactStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use tracing::debug;

use rolodex_core::{
  contact::{Contact, ContactId, NewContact},
  store::{ContactFilter, ContactStore},
};

use crate::{
  Result,
  encode::{CONTACT_COLUMNS, RawContact, encode_date},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// The contact table in a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
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

  /// Open an in-memory store — useful for testing.
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

  /// Run `sql` with `params` and decode every returned row.
  async fn select(
    &self,
    sql: String,
    params: Vec<String>,
  ) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = crate::Error;

  async fn insert(&self, contact: NewContact) -> Result<Contact> {
    let first_name     = contact.first_name.clone();
    let second_name    = contact.second_name.clone();
    let dob_str        = encode_date(contact.date_of_birth);
    let addresses      = contact.addresses.clone();
    let phone_numbers  = contact.phone_numbers.clone();
    let personal_photo = contact.personal_photo.clone();

    let id: ContactId = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO Contact (
             FirstName, SecondName, DateOfBirth, Addresses, PhoneNumbers, PersonalPhoto
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            first_name,
            second_name,
            dob_str,
            addresses,
            phone_numbers,
            personal_photo,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    debug!(id, "inserted contact row");
    Ok(contact.into_contact(id))
  }

  async fn get(&self, id: ContactId) -> Result<Option<Contact>> {
    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CONTACT_COLUMNS} FROM Contact WHERE Id = ?1"),
              rusqlite::params![id],
              RawContact::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn list(&self) -> Result<Vec<Contact>> {
    self
      .select(format!("SELECT {CONTACT_COLUMNS} FROM Contact ORDER BY Id"), vec![])
      .await
  }

  async fn update(&self, contact: &Contact) -> Result<bool> {
    let id             = contact.id;
    let first_name     = contact.first_name.clone();
    let second_name    = contact.second_name.clone();
    let dob_str        = encode_date(contact.date_of_birth);
    let addresses      = contact.addresses.clone();
    let phone_numbers  = contact.phone_numbers.clone();
    let personal_photo = contact.personal_photo.clone();

    let changed = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "UPDATE Contact SET
             FirstName = ?2, SecondName = ?3, DateOfBirth = ?4,
             Addresses = ?5, PhoneNumbers = ?6, PersonalPhoto = ?7
           WHERE Id = ?1",
          rusqlite::params![
            id,
            first_name,
            second_name,
            dob_str,
            addresses,
            phone_numbers,
            personal_photo,
          ],
        )?;
        Ok(n)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn delete(&self, id: ContactId) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM Contact WHERE Id = ?1", rusqlite::params![id])?)
      })
      .await?;

    Ok(removed > 0)
  }

  async fn exists(&self, id: ContactId) -> Result<bool> {
    let found = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM Contact WHERE Id = ?1",
              rusqlite::params![id],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;

    Ok(found)
  }

  async fn scan(&self, filter: &ContactFilter) -> Result<Vec<Contact>> {
    match filter {
      ContactFilter::BornBetween { after, before } => {
        self
          .select(
            format!(
              "SELECT {CONTACT_COLUMNS} FROM Contact
               WHERE DateOfBirth > ?1 AND DateOfBirth < ?2
               ORDER BY Id"
            ),
            vec![encode_date(*after), encode_date(*before)],
          )
          .await
      }
      // SQLite's UPPER/LIKE only fold ASCII; match in Rust instead.
      ContactFilter::Text(_) => {
        let mut contacts = self.list().await?;
        contacts.retain(|c| filter.matches(c));
        Ok(contacts)
      }
    }
  }
}
