use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::Identifiable;
use crate::domain::value::FieldValue;
use crate::errors::{LedgerError, Result};

/// A single line in a page: a sequence number, an amount, an optional
/// interest amount and the date the movement happened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub id: Uuid,
    pub no: i64,
    pub money: f64,
    #[serde(default)]
    pub interest: f64,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    pub fn new(no: i64, money: f64, interest: f64, date: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            no,
            money,
            interest,
            date,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Identifiable for Entry {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Raw field values for a new entry, as they arrive from the caller.
///
/// `no` and `money` are required; `interest` falls back to zero and `date`
/// to the current instant. Coercion failures abort the whole insert.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryInput {
    #[serde(default)]
    pub no: Option<FieldValue>,
    #[serde(default)]
    pub money: Option<FieldValue>,
    #[serde(default)]
    pub interest: Option<FieldValue>,
    #[serde(default)]
    pub date: Option<FieldValue>,
}

impl EntryInput {
    pub fn new(no: impl Into<FieldValue>, money: impl Into<FieldValue>) -> Self {
        Self {
            no: Some(no.into()),
            money: Some(money.into()),
            interest: None,
            date: None,
        }
    }

    pub fn with_interest(mut self, interest: impl Into<FieldValue>) -> Self {
        self.interest = Some(interest.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<FieldValue>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn into_entry(self) -> Result<Entry> {
        let no = self
            .no
            .ok_or_else(|| LedgerError::Validation("entry field `no` is required".into()))?
            .to_integer()?;
        let money = self
            .money
            .ok_or_else(|| LedgerError::Validation("entry field `money` is required".into()))?
            .to_number()?;
        let interest = match self.interest {
            Some(value) => value.to_number()?,
            None => 0.0,
        };
        let date = match self.date {
            Some(value) => value.to_timestamp()?,
            None => Utc::now(),
        };
        Ok(Entry::new(no, money, interest, date))
    }
}

/// Partial update for an existing entry. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub money: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<FieldValue>,
}

impl EntryPatch {
    pub fn has_effect(&self) -> bool {
        self.no.is_some() || self.money.is_some() || self.interest.is_some() || self.date.is_some()
    }

    /// Coerces every present field before writing any of them, so a bad
    /// value leaves the entry exactly as it was.
    pub fn apply_to(&self, entry: &mut Entry) -> Result<()> {
        let no = self.no.as_ref().map(|v| v.to_integer()).transpose()?;
        let money = self.money.as_ref().map(|v| v.to_number()).transpose()?;
        let interest = self.interest.as_ref().map(|v| v.to_number()).transpose()?;
        let date = self.date.as_ref().map(|v| v.to_timestamp()).transpose()?;

        if let Some(no) = no {
            entry.no = no;
        }
        if let Some(money) = money {
            entry.money = money;
        }
        if let Some(interest) = interest {
            entry.interest = interest;
        }
        if let Some(date) = date {
            entry.date = date;
        }
        entry.touch();
        Ok(())
    }
}
