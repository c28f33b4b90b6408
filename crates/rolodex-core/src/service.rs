//! [`ContactService`] — the single orchestration point between callers and the
//! two stores.
//!
//! Known gaps:
//! - blob writes are not coordinated with record writes, so a failure between
//!   the two leaves an orphaned blob;
//! - deleting a contact leaves its photo blob on disk;
//! - updating without a new file clears the photo reference.

use bytes::Bytes;
use chrono::{Local, Months, NaiveDate};
use tracing::{debug, info};

use crate::{
  Error, Lookup, Result,
  blob::{BlobStore, Upload},
  contact::{Contact, ContactDetail, ContactId, ContactInput, ContactSummary},
  store::{ContactFilter, ContactStore},
};

/// CRUD, filtering and photo handling over a [`ContactStore`] and a
/// [`BlobStore`], both supplied at construction.
pub struct ContactService<S, B> {
  store: S,
  blobs: B,
}

impl<S, B> ContactService<S, B>
where
  S: ContactStore,
  B: BlobStore,
{
  pub fn new(store: S, blobs: B) -> Self { Self { store, blobs } }

  /// Store `file` if present and return its reference, else an empty string.
  async fn upload(&self, file: Option<&Upload>, base_url: &str) -> Result<String> {
    match file {
      Some(upload) => {
        let reference = self
          .blobs
          .store(upload, base_url)
          .await
          .map_err(Error::blob)?;
        debug!(%reference, "stored photo");
        Ok(reference)
      }
      None => Ok(String::new()),
    }
  }

  // ── Writes ──────────────────────────────────────────────────────────────

  /// Insert a new contact, uploading `file` first when supplied.
  pub async fn create(
    &self,
    input: ContactInput,
    file: Option<Upload>,
    base_url: &str,
  ) -> Result<ContactSummary> {
    let photo = self.upload(file.as_ref(), base_url).await?;
    let contact = self
      .store
      .insert(input.with_photo(photo))
      .await
      .map_err(Error::store)?;

    info!(id = contact.id, "contact created");
    Ok(ContactSummary::from(contact))
  }

  /// Overwrite every field of contact `id` from `input`.
  ///
  /// The photo reference is replaced by the new upload, or cleared when no
  /// file is supplied. The returned summary echoes `input`.
  pub async fn update(
    &self,
    input: ContactInput,
    id: ContactId,
    file: Option<Upload>,
    base_url: &str,
  ) -> Result<Lookup<ContactSummary>> {
    let Some(existing) = self.store.get(id).await.map_err(Error::store)? else {
      return Ok(Lookup::NotFound);
    };

    let photo = self.upload(file.as_ref(), base_url).await?;
    let updated = Contact {
      id:             existing.id,
      first_name:     input.first_name.clone(),
      second_name:    input.second_name.clone(),
      date_of_birth:  input.date_of_birth,
      addresses:      input.addresses.clone(),
      phone_numbers:  input.phone_numbers.clone(),
      personal_photo: photo,
    };

    let written = self.store.update(&updated).await.map_err(Error::store)?;
    if !written {
      // Nothing matched at write time: deleted underneath us, or a genuine
      // conflict.
      if self.store.exists(id).await.map_err(Error::store)? {
        return Err(Error::Conflict(id));
      }
      return Ok(Lookup::NotFound);
    }

    info!(id, "contact updated");
    Ok(Lookup::Found(input.summary()))
  }

  /// Remove contact `id`. Its photo blob, if any, is left in place.
  pub async fn delete(&self, id: ContactId) -> Result<Lookup<()>> {
    if self.store.get(id).await.map_err(Error::store)?.is_none() {
      return Ok(Lookup::NotFound);
    }

    let removed = self.store.delete(id).await.map_err(Error::store)?;
    if removed {
      info!(id, "contact deleted");
      Ok(Lookup::Found(()))
    } else {
      Ok(Lookup::NotFound)
    }
  }

  // ── Reads ───────────────────────────────────────────────────────────────

  pub async fn get_all(&self) -> Result<Vec<ContactSummary>> {
    let contacts = self.store.list().await.map_err(Error::store)?;
    Ok(contacts.into_iter().map(ContactSummary::from).collect())
  }

  pub async fn get_by_id(&self, id: ContactId) -> Result<Lookup<ContactDetail>> {
    let contact = self.store.get(id).await.map_err(Error::store)?;
    Ok(Lookup::from(contact))
  }

  /// Contacts whose first name, second name or addresses contain `name`,
  /// ignoring case.
  pub async fn filter_by_name(&self, name: &str) -> Result<Vec<ContactSummary>> {
    self.scan(&ContactFilter::Text(name.to_owned())).await
  }

  /// Contacts aged strictly between `to` and `from` years, as of today.
  ///
  /// `from` is the upper age bound and `to` the lower; passing them the other
  /// way round yields an empty list. Both bounds compare whole calendar
  /// dates, so someone born exactly `from` or `to` years ago today is left
  /// out rather than decided by the time of day.
  pub async fn filter_by_age(&self, from: i32, to: i32) -> Result<Vec<ContactSummary>> {
    self.filter_by_age_on(Local::now().date_naive(), from, to).await
  }

  /// [`Self::filter_by_age`] evaluated against an explicit `today`.
  pub async fn filter_by_age_on(
    &self,
    today: NaiveDate,
    from: i32,
    to: i32,
  ) -> Result<Vec<ContactSummary>> {
    let (Some(after), Some(before)) =
      (shift_years(today, -i64::from(from)), shift_years(today, -i64::from(to)))
    else {
      debug!(from, to, "age window outside the calendar range");
      return Ok(Vec::new());
    };

    self.scan(&ContactFilter::BornBetween { after, before }).await
  }

  async fn scan(&self, filter: &ContactFilter) -> Result<Vec<ContactSummary>> {
    let contacts = self.store.scan(filter).await.map_err(Error::store)?;
    Ok(contacts.into_iter().map(ContactSummary::from).collect())
  }

  // ── Photos ──────────────────────────────────────────────────────────────

  pub async fn load_image(&self, name: &str) -> Result<Lookup<Bytes>> {
    if name.is_empty() {
      return Ok(Lookup::NotFound);
    }
    let bytes = self.blobs.load(name).await.map_err(Error::blob)?;
    Ok(Lookup::from(bytes))
  }
}

/// Move `date` by whole calendar years; 29 February clamps to 28 February.
/// Returns `None` when the result would leave chrono's supported range.
pub fn shift_years(date: NaiveDate, years: i64) -> Option<NaiveDate> {
  let months = u32::try_from(years.checked_mul(12)?.unsigned_abs()).ok()?;
  if years >= 0 {
    date.checked_add_months(Months::new(months))
  } else {
    date.checked_sub_months(Months::new(months))
  }
}
