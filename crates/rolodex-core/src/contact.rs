//! Contact types — the single entity Rolodex manages, plus its two read
//! projections.
//!
//! Field names serialise in camelCase (`firstName`, `dateOfBirth`, ...), which
//! is the shape HTTP clients of the service already speak.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-assigned row identifier. Immutable once assigned.
pub type ContactId = i64;

// ─── Stored record ───────────────────────────────────────────────────────────

/// A persisted contact row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
  pub id:             ContactId,
  pub first_name:     String,
  pub second_name:    String,
  pub date_of_birth:  NaiveDate,
  /// Free-form text; a single field despite the plural name.
  pub addresses:      String,
  pub phone_numbers:  String,
  /// Reference URL of the stored photo; empty when none was uploaded.
  pub personal_photo: String,
}

/// Input to [`crate::store::ContactStore::insert`]. The id is always chosen
/// by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
  pub first_name:     String,
  pub second_name:    String,
  pub date_of_birth:  NaiveDate,
  pub addresses:      String,
  pub phone_numbers:  String,
  pub personal_photo: String,
}

impl NewContact {
  pub fn into_contact(self, id: ContactId) -> Contact {
    Contact {
      id,
      first_name: self.first_name,
      second_name: self.second_name,
      date_of_birth: self.date_of_birth,
      addresses: self.addresses,
      phone_numbers: self.phone_numbers,
      personal_photo: self.personal_photo,
    }
  }
}

// ─── Caller input ────────────────────────────────────────────────────────────

/// Contact fields as supplied by a caller on create or update.
///
/// `id` is ignored on create. On update the HTTP layer checks it against the
/// path id before the service is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInput {
  pub id:            ContactId,
  pub first_name:    String,
  pub second_name:   String,
  pub date_of_birth: NaiveDate,
  pub addresses:     String,
  pub phone_numbers: String,
}

impl ContactInput {
  pub fn with_photo(self, personal_photo: String) -> NewContact {
    NewContact {
      first_name: self.first_name,
      second_name: self.second_name,
      date_of_birth: self.date_of_birth,
      addresses: self.addresses,
      phone_numbers: self.phone_numbers,
      personal_photo,
    }
  }

  /// The summary echoed back to the caller, built from the input itself.
  pub fn summary(&self) -> ContactSummary {
    ContactSummary {
      id:            self.id,
      first_name:    self.first_name.clone(),
      second_name:   self.second_name.clone(),
      date_of_birth: self.date_of_birth,
      addresses:     self.addresses.clone(),
      phone_numbers: self.phone_numbers.clone(),
    }
  }
}

// ─── Projections ─────────────────────────────────────────────────────────────

/// Every field except the photo reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSummary {
  pub id:            ContactId,
  pub first_name:    String,
  pub second_name:   String,
  pub date_of_birth: NaiveDate,
  pub addresses:     String,
  pub phone_numbers: String,
}

impl From<Contact> for ContactSummary {
  fn from(c: Contact) -> Self {
    Self {
      id:            c.id,
      first_name:    c.first_name,
      second_name:   c.second_name,
      date_of_birth: c.date_of_birth,
      addresses:     c.addresses,
      phone_numbers: c.phone_numbers,
    }
  }
}

/// Every field, photo reference included.
pub type ContactDetail = Contact;
