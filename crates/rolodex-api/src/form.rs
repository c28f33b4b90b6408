//! [`ContactForm`] — the typed request schema for create and update.
//!
//! Accepts `multipart/form-data` (with an optional photo part) or
//! `application/x-www-form-urlencoded`. Field names are matched without
//! regard to case: `id`, `firstName`, `secondName`, `dateOfBirth`,
//! `addresses`, `phoneNumbers`. Unknown fields are ignored.

use axum::{
  Form,
  extract::{FromRequest, Multipart, Request},
  http::header,
};
use bytes::Bytes;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rolodex_core::{
  blob::Upload,
  contact::{ContactId, ContactInput},
};

use crate::error::ApiError;

/// A validated contact form plus its first attached file, if any.
#[derive(Debug)]
pub struct ContactForm {
  pub input: ContactInput,
  pub file:  Option<Upload>,
}

impl<S> FromRequest<S> for ContactForm
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let is_multipart = req
      .headers()
      .get(header::CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    let mut fields = RawFields::default();

    if is_multipart {
      let mut multipart = Multipart::from_request(req, state)
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?;

      while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
      {
        let name = field.name().unwrap_or_default().to_owned();
        match field.file_name().map(str::to_owned) {
          Some(file_name) => {
            let bytes = field
              .bytes()
              .await
              .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            fields.attach(file_name, bytes);
          }
          None => {
            let value = field
              .text()
              .await
              .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            fields.set(&name, value);
          }
        }
      }
    } else {
      let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?;
      for (name, value) in pairs {
        fields.set(&name, value);
      }
    }

    fields.finish()
  }
}

// ─── Field collection ────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct RawFields {
  id:            Option<String>,
  first_name:    String,
  second_name:   String,
  date_of_birth: Option<String>,
  addresses:     String,
  phone_numbers: String,
  file:          Option<Upload>,
}

impl RawFields {
  fn set(&mut self, name: &str, value: String) {
    match name.to_ascii_lowercase().as_str() {
      "id" => self.id = Some(value),
      "firstname" => self.first_name = value,
      "secondname" => self.second_name = value,
      "dateofbirth" => self.date_of_birth = Some(value),
      "addresses" => self.addresses = value,
      "phonenumbers" => self.phone_numbers = value,
      _ => {}
    }
  }

  /// Keep the first real file; browsers send an unnamed empty part when no
  /// file was picked.
  fn attach(&mut self, file_name: String, bytes: Bytes) {
    if self.file.is_none() && !file_name.is_empty() && !bytes.is_empty() {
      self.file = Some(Upload { file_name, bytes });
    }
  }

  fn finish(self) -> Result<ContactForm, ApiError> {
    let id: ContactId = match self.id.as_deref().map(str::trim) {
      None | Some("") => 0,
      Some(raw) => raw
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid id: {raw:?}")))?,
    };

    let raw_dob = self
      .date_of_birth
      .ok_or_else(|| ApiError::BadRequest("dateOfBirth is required".to_owned()))?;
    let date_of_birth = parse_date(&raw_dob)
      .ok_or_else(|| ApiError::BadRequest(format!("invalid dateOfBirth: {raw_dob:?}")))?;

    Ok(ContactForm {
      input: ContactInput {
        id,
        first_name: self.first_name,
        second_name: self.second_name,
        date_of_birth,
        addresses: self.addresses,
        phone_numbers: self.phone_numbers,
      },
      file:  self.file,
    })
  }
}

/// Accepts `2001-02-03`, `2001-02-03T00:00:00[.fff]` or a full RFC 3339
/// timestamp; only the calendar date is kept.
fn parse_date(raw: &str) -> Option<NaiveDate> {
  let raw = raw.trim();
  raw
    .parse::<NaiveDate>()
    .ok()
    .or_else(|| raw.parse::<NaiveDateTime>().ok().map(|dt| dt.date()))
    .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}
