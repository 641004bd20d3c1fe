//! Normalized entities produced by the inspection transformer

use chrono::NaiveDateTime;
use serde::Deserialize;
use std::collections::HashMap;

/// One source row: column header → raw field value
///
/// Values are exactly as read from the file; empty strings are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(HashMap<String, String>);

impl RawRecord {
    /// Raw value of a column, `None` when the column is absent
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Synthetic identity, assigned from 1 in first-seen order per entity kind
pub type EntityId = u64;

/// Natural key of an address
///
/// Every component is already whitespace-normalized. City and state come from
/// the run configuration, not from the source rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddressKey {
    pub building: Option<String>,
    pub street: Option<String>,
    pub zip_code: Option<String>,
    pub borough: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl AddressKey {
    /// An address is only recorded when at least one component is present
    pub fn is_valid(&self) -> bool {
        [
            &self.building,
            &self.street,
            &self.zip_code,
            &self.borough,
            &self.city,
            &self.state,
        ]
        .iter()
        .any(|part| part.is_some())
    }

    /// Building number and street joined by a single space
    pub fn line1(&self) -> Option<String> {
        match (&self.building, &self.street) {
            (Some(building), Some(street)) => Some(format!("{} {}", building, street)),
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (None, None) => None,
        }
    }
}

/// Natural key of an inspection: one visit of one type to one restaurant on one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InspectionKey {
    pub restaurant_id: EntityId,
    pub inspection_date: NaiveDateTime,
    pub inspection_type_id: EntityId,
}

impl InspectionKey {
    /// Build a key only when all three components resolved
    pub fn new(
        restaurant_id: Option<EntityId>,
        inspection_date: Option<NaiveDateTime>,
        inspection_type_id: Option<EntityId>,
    ) -> Option<Self> {
        Some(Self {
            restaurant_id: restaurant_id?,
            inspection_date: inspection_date?,
            inspection_type_id: inspection_type_id?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restaurant {
    pub id: EntityId,
    pub external_id: String,
    pub name: Option<String>,
    pub cuisine_id: Option<EntityId>,
    pub address_id: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    pub id: EntityId,
    pub restaurant_id: EntityId,
    pub inspection_type_id: EntityId,
    pub inspection_date: NaiveDateTime,
    pub action_id: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub id: EntityId,
    pub inspection_id: EntityId,
    pub code: String,
    pub description: Option<String>,
    pub critical_flag: Option<String>,
}

/// Records that carry their own identity inside the value
pub trait Identified {
    fn id(&self) -> EntityId;
}

impl Identified for EntityId {
    fn id(&self) -> EntityId {
        *self
    }
}

impl Identified for Restaurant {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Identified for Inspection {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Read-only image of every entity collection after the last record
///
/// Collections keep insertion order, which is also ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub cuisines: Vec<(String, EntityId)>,
    pub inspection_types: Vec<(String, EntityId)>,
    pub actions: Vec<(String, EntityId)>,
    pub addresses: Vec<(AddressKey, EntityId)>,
    pub restaurants: Vec<(String, Restaurant)>,
    pub inspections: Vec<(InspectionKey, Inspection)>,
    pub violations: Vec<Violation>,
}

impl Snapshot {
    /// Number of rows each table will receive, in load order
    pub fn table_counts(&self) -> [(crate::sql::Table, usize); 7] {
        use crate::sql::Table;
        [
            (Table::Cuisine, self.cuisines.len()),
            (Table::InspectionType, self.inspection_types.len()),
            (Table::Action, self.actions.len()),
            (Table::Address, self.addresses.len()),
            (Table::Restaurant, self.restaurants.len()),
            (Table::Inspection, self.inspections.len()),
            (Table::Violation, self.violations.len()),
        ]
    }
}
