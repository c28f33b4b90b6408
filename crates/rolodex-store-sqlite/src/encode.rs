//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD` so that text comparison orders them
//! chronologically.

use chrono::NaiveDate;
use rolodex_core::contact::{Contact, ContactId};

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

/// Column list shared by every `SELECT` so `RawContact::from_row` lines up.
pub const CONTACT_COLUMNS: &str =
  "Id, FirstName, SecondName, DateOfBirth, Addresses, PhoneNumbers, PersonalPhoto";

/// Raw values read directly from a `Contact` row.
pub struct RawContact {
  pub id:             ContactId,
  pub first_name:     String,
  pub second_name:    String,
  pub date_of_birth:  String,
  pub addresses:      String,
  pub phone_numbers:  String,
  pub personal_photo: String,
}

impl RawContact {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:             row.get(0)?,
      first_name:     row.get(1)?,
      second_name:    row.get(2)?,
      date_of_birth:  row.get(3)?,
      addresses:      row.get(4)?,
      phone_numbers:  row.get(5)?,
      personal_photo: row.get(6)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:             self.id,
      first_name:     self.first_name,
      second_name:    self.second_name,
      date_of_birth:  decode_date(&self.date_of_birth)?,
      addresses:      self.addresses,
      phone_numbers:  self.phone_numbers,
      personal_photo: self.personal_photo,
    })
  }
}
