//! Contact directory entity.
//!
//! Field rules (alphabetic names, `###-###-####` phones) are enforced by
//! `crate::validation` before values reach this type.

use crate::model::id::{EntityId, IdAllocator};
use crate::model::record::ContactRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    id: EntityId,
    first_name: String,
    last_name: String,
    phone_number: String,
}

impl Contact {
    /// Creates a contact with a fresh id.
    pub fn new(
        ids: &IdAllocator,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            id: ids.next_id(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone_number: phone_number.into(),
        }
    }

    pub(crate) fn from_parts(
        id: EntityId,
        first_name: String,
        last_name: String,
        phone_number: String,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            phone_number,
        }
    }

    /// Replaces all three fields at once. Partial edits are not supported.
    pub fn edit(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone_number: impl Into<String>,
    ) {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self.phone_number = phone_number.into();
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn to_record(&self) -> ContactRecord {
        ContactRecord {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone_number: self.phone_number.clone(),
        }
    }
}
