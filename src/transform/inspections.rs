//! Inspection record transformer
//!
//! Folds raw inspection rows into six deduplicated entity collections plus an
//! append-only violation list, wiring foreign keys as it goes. One forward
//! pass, no backtracking: every id a row needs is resolved earlier in the
//! same `process_record` call.

use super::IdentityMap;
use crate::etl::Transformer;
use crate::fields::{normalize_space, parse_date};
use crate::model::{
    AddressKey, EntityId, Inspection, InspectionKey, RawRecord, Restaurant, Snapshot, Violation,
};
use chrono::NaiveDateTime;

/// Source column headers, matched exactly
pub mod columns {
    pub const CAMIS: &str = "CAMIS";
    pub const DBA: &str = "DBA";
    pub const CUISINE_DESCRIPTION: &str = "CUISINE DESCRIPTION";
    pub const INSPECTION_TYPE: &str = "INSPECTION TYPE";
    pub const ACTION: &str = "ACTION";
    pub const INSPECTION_DATE: &str = "INSPECTION DATE";
    pub const GRADE_DATE: &str = "GRADE DATE";
    pub const BUILDING: &str = "BUILDING";
    pub const STREET: &str = "STREET";
    pub const ZIPCODE: &str = "ZIPCODE";
    pub const BORO: &str = "BORO";
    pub const VIOLATION_CODE: &str = "VIOLATION CODE";
    pub const VIOLATION_DESCRIPTION: &str = "VIOLATION DESCRIPTION";
    pub const CRITICAL_FLAG: &str = "CRITICAL FLAG";
}

/// A source row after whitespace normalization and date parsing
///
/// Missing columns, empty values and unparseable dates are all `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRow {
    pub camis: Option<String>,
    pub dba: Option<String>,
    pub cuisine: Option<String>,
    pub inspection_type: Option<String>,
    pub action: Option<String>,
    pub inspection_date: Option<NaiveDateTime>,
    pub grade_date: Option<NaiveDateTime>,
    pub address: AddressKey,
    pub violation_code: Option<String>,
    pub violation_description: Option<String>,
    pub critical_flag: Option<String>,
}

impl NormalizedRow {
    /// Normalize a raw record; `city` and `state` are already normalized run labels
    pub fn from_record(record: &RawRecord, city: Option<&str>, state: Option<&str>) -> Self {
        let text = |column: &str| normalize_space(record.get(column));
        let date = |column: &str| parse_date(text(column).as_deref());

        Self {
            camis: text(columns::CAMIS),
            dba: text(columns::DBA),
            cuisine: text(columns::CUISINE_DESCRIPTION),
            inspection_type: text(columns::INSPECTION_TYPE),
            action: text(columns::ACTION),
            inspection_date: date(columns::INSPECTION_DATE),
            grade_date: date(columns::GRADE_DATE),
            address: AddressKey {
                building: text(columns::BUILDING),
                street: text(columns::STREET),
                zip_code: text(columns::ZIPCODE),
                borough: text(columns::BORO),
                city: city.map(String::from),
                state: state.map(String::from),
            },
            violation_code: text(columns::VIOLATION_CODE),
            violation_description: text(columns::VIOLATION_DESCRIPTION),
            critical_flag: text(columns::CRITICAL_FLAG),
        }
    }
}

/// Counters describing what a run absorbed rather than recorded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformStats {
    /// Records consumed
    pub records: usize,
    /// Records with an empty `CAMIS`
    pub without_restaurant: usize,
    /// Records whose (restaurant, date, type) key did not resolve
    pub without_inspection: usize,
    /// Violation codes discarded because no inspection resolved
    pub violations_dropped: usize,
}

/// Stateful transformer from raw rows to a normalized [`Snapshot`]
///
/// Each instance owns its collections and counters, so independent runs never
/// share ids.
#[derive(Debug, Clone)]
pub struct InspectionTransformer {
    city: Option<String>,
    state: Option<String>,
    cuisines: IdentityMap<String>,
    inspection_types: IdentityMap<String>,
    actions: IdentityMap<String>,
    addresses: IdentityMap<AddressKey>,
    restaurants: IdentityMap<String, Restaurant>,
    inspections: IdentityMap<InspectionKey, Inspection>,
    violations: Vec<Violation>,
    next_violation_id: EntityId,
    stats: TransformStats,
}

impl InspectionTransformer {
    /// Create a transformer applying `city` and `state` to every address
    pub fn new(city: &str, state: &str) -> Self {
        Self {
            city: normalize_space(Some(city)),
            state: normalize_space(Some(state)),
            cuisines: IdentityMap::new(),
            inspection_types: IdentityMap::new(),
            actions: IdentityMap::new(),
            addresses: IdentityMap::new(),
            restaurants: IdentityMap::new(),
            inspections: IdentityMap::new(),
            violations: Vec::new(),
            next_violation_id: 1,
            stats: TransformStats::default(),
        }
    }

    /// Fold one record into the collections
    ///
    /// The steps run in a fixed order because each consumes ids from the
    /// previous ones:
    /// 1. normalize fields
    /// 2. lookup entities (cuisine, inspection type, action)
    /// 3. address
    /// 4. restaurant, linked to the cuisine and address from steps 2-3
    /// 5. inspection, keyed on the restaurant from step 4
    /// 6. violation, attached to the inspection from step 5
    pub fn process_record(&mut self, record: &RawRecord) {
        self.stats.records += 1;

        // 1. Normalize
        let row = NormalizedRow::from_record(record, self.city.as_deref(), self.state.as_deref());

        // 2. Lookup entities
        let cuisine_id = row
            .cuisine
            .map(|desc| self.cuisines.get_or_create_id(desc));
        let inspection_type_id = row
            .inspection_type
            .map(|desc| self.inspection_types.get_or_create_id(desc));
        let action_id = row.action.map(|desc| self.actions.get_or_create_id(desc));

        // 3. Address
        let address_id = if row.address.is_valid() {
            Some(self.addresses.get_or_create_id(row.address))
        } else {
            None
        };

        // 4. Restaurant; an existing one keeps its first-seen links
        let restaurant_id = match row.camis {
            Some(camis) => {
                let name = row.dba;
                Some(
                    self.restaurants
                        .get_or_create_with(camis.clone(), |id| Restaurant {
                            id,
                            external_id: camis,
                            name,
                            cuisine_id,
                            address_id,
                        }),
                )
            }
            None => {
                self.stats.without_restaurant += 1;
                None
            }
        };

        // 5. Inspection
        let inspection_id =
            match InspectionKey::new(restaurant_id, row.inspection_date, inspection_type_id) {
                Some(key) => Some(self.inspections.get_or_create_with(key, |id| Inspection {
                    id,
                    restaurant_id: key.restaurant_id,
                    inspection_type_id: key.inspection_type_id,
                    inspection_date: key.inspection_date,
                    action_id,
                })),
                None => {
                    self.stats.without_inspection += 1;
                    None
                }
            };

        // 6. Violation
        let Some(code) = row.violation_code else {
            return;
        };
        let Some(inspection_id) = inspection_id else {
            log::debug!(
                "Dropping violation {} from record {}: no inspection resolved",
                code,
                self.stats.records
            );
            self.stats.violations_dropped += 1;
            return;
        };

        self.violations.push(Violation {
            id: self.next_violation_id,
            inspection_id,
            code,
            description: row.violation_description,
            critical_flag: row.critical_flag,
        });
        self.next_violation_id += 1;
    }

    pub fn stats(&self) -> TransformStats {
        self.stats
    }

    /// Hand over every collection as a read-only snapshot
    pub fn into_snapshot(self) -> Snapshot {
        Snapshot {
            cuisines: self.cuisines.into_entries(),
            inspection_types: self.inspection_types.into_entries(),
            actions: self.actions.into_entries(),
            addresses: self.addresses.into_entries(),
            restaurants: self.restaurants.into_entries(),
            inspections: self.inspections.into_entries(),
            violations: self.violations,
        }
    }
}

impl Transformer for InspectionTransformer {
    type Input = RawRecord;
    type Output = Snapshot;

    fn transform(&mut self, input: Self::Input) {
        self.process_record(&input);
    }

    fn finalize(self) -> Self::Output {
        let stats = self.stats;
        log::info!(
            "Normalized {} records: {} restaurants, {} inspections, {} violations",
            stats.records,
            self.restaurants.len(),
            self.inspections.len(),
            self.violations.len()
        );
        if stats.violations_dropped > 0 {
            log::info!(
                "Dropped {} violations without a resolvable inspection",
                stats.violations_dropped
            );
        }
        self.into_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[(&str, &str)]) -> RawRecord {
        fields.iter().copied().collect()
    }

    fn inspection_fields<'a>(
        camis: &'a str,
        date: &'a str,
        kind: &'a str,
        code: &'a str,
    ) -> Vec<(&'static str, &'a str)> {
        vec![
            (columns::CAMIS, camis),
            (columns::DBA, "Joe's Pizza"),
            (columns::CUISINE_DESCRIPTION, "Pizza"),
            (columns::INSPECTION_TYPE, kind),
            (columns::ACTION, "Violations were cited"),
            (columns::INSPECTION_DATE, date),
            (columns::BUILDING, "12"),
            (columns::STREET, "MAIN ST"),
            (columns::ZIPCODE, "10001"),
            (columns::BORO, "Manhattan"),
            (columns::VIOLATION_CODE, code),
            (columns::VIOLATION_DESCRIPTION, "Evidence of mice"),
            (columns::CRITICAL_FLAG, "Critical"),
        ]
    }

    fn inspection_row(camis: &str, date: &str, kind: &str, code: &str) -> RawRecord {
        record(&inspection_fields(camis, date, kind, code))
    }

    fn with_field<'a>(
        mut fields: Vec<(&'static str, &'a str)>,
        column: &str,
        value: &'a str,
    ) -> RawRecord {
        for (k, v) in fields.iter_mut() {
            if *k == column {
                *v = value;
            }
        }
        record(&fields)
    }

    fn run(records: &[RawRecord]) -> Snapshot {
        let mut transformer = InspectionTransformer::new("ny", "ny");
        for r in records {
            transformer.process_record(r);
        }
        transformer.into_snapshot()
    }

    #[test]
    fn test_normalized_row() {
        let raw = record(&[
            (columns::CAMIS, " 100 "),
            (columns::DBA, "Joe's   Pizza"),
            (columns::INSPECTION_DATE, "1/2/23"),
            (columns::GRADE_DATE, "N/A"),
        ]);

        let row = NormalizedRow::from_record(&raw, Some("ny"), None);
        assert_eq!(row.camis.as_deref(), Some("100"));
        assert_eq!(row.dba.as_deref(), Some("Joe's Pizza"));
        assert!(row.inspection_date.is_some());
        assert_eq!(row.grade_date, None);
        assert_eq!(row.cuisine, None);
        assert_eq!(row.address.city.as_deref(), Some("ny"));
        assert_eq!(row.address.state, None);
    }

    #[test]
    fn test_shared_inspection_collects_violations() {
        let snapshot = run(&[
            inspection_row("100", "01/02/2023", "Cycle Inspection", "04L"),
            inspection_row("100", "01/02/2023", "Cycle Inspection", "08A"),
        ]);

        assert_eq!(snapshot.restaurants.len(), 1);
        assert_eq!(snapshot.inspections.len(), 1);
        assert_eq!(snapshot.violations.len(), 2);

        let inspection_id = snapshot.inspections[0].1.id;
        assert!(snapshot.violations.iter().all(|v| v.inspection_id == inspection_id));
        assert_eq!(snapshot.violations[0].id, 1);
        assert_eq!(snapshot.violations[1].id, 2);
        assert_eq!(snapshot.violations[0].code, "04L");
        assert_eq!(snapshot.violations[1].code, "08A");
    }

    #[test]
    fn test_distinct_dates_make_distinct_inspections() {
        let snapshot = run(&[
            inspection_row("100", "01/02/2023", "Cycle Inspection", "04L"),
            inspection_row("100", "01/03/2023", "Cycle Inspection", "04L"),
            inspection_row("100", "01/03/2023", "Re-inspection", ""),
        ]);

        assert_eq!(snapshot.restaurants.len(), 1);
        assert_eq!(snapshot.inspection_types.len(), 2);
        assert_eq!(snapshot.inspections.len(), 3);
        assert_eq!(snapshot.violations.len(), 2);
        assert_eq!(snapshot.violations[1].inspection_id, 2);
    }

    #[test]
    fn test_same_date_in_both_formats_is_one_inspection() {
        let snapshot = run(&[
            inspection_row("100", "01/02/2023", "Cycle Inspection", "04L"),
            inspection_row("100", "1/2/23", "Cycle Inspection", "08A"),
        ]);

        assert_eq!(snapshot.inspections.len(), 1);
        assert_eq!(snapshot.violations.len(), 2);
    }

    #[test]
    fn test_violation_without_inspection_is_dropped() {
        let mut transformer = InspectionTransformer::new("ny", "ny");
        transformer.process_record(&inspection_row("100", "N/A", "Cycle Inspection", "04L"));
        transformer.process_record(&inspection_row("", "01/02/2023", "Cycle Inspection", "04L"));
        transformer.process_record(&inspection_row("200", "01/02/2023", "", "04L"));

        let stats = transformer.stats();
        assert_eq!(stats.records, 3);
        assert_eq!(stats.without_restaurant, 1);
        assert_eq!(stats.without_inspection, 3);
        assert_eq!(stats.violations_dropped, 3);

        let snapshot = transformer.into_snapshot();
        assert!(snapshot.inspections.is_empty());
        assert!(snapshot.violations.is_empty());
        // Restaurants still resolve without an inspection
        assert_eq!(snapshot.restaurants.len(), 2);
    }

    #[test]
    fn test_empty_cuisine_leaves_null_link() {
        let raw = with_field(
            inspection_fields("100", "01/02/2023", "Cycle Inspection", ""),
            columns::CUISINE_DESCRIPTION,
            "   ",
        );

        let snapshot = run(&[raw]);
        assert!(snapshot.cuisines.is_empty());
        assert_eq!(snapshot.restaurants[0].1.cuisine_id, None);
    }

    #[test]
    fn test_first_seen_restaurant_attributes_win() {
        let first = inspection_row("100", "01/02/2023", "Cycle Inspection", "");
        let second = record(&[
            (columns::CAMIS, "100"),
            (columns::DBA, "Renamed"),
            (columns::CUISINE_DESCRIPTION, "Thai"),
            (columns::BUILDING, "99"),
            (columns::STREET, "OTHER AVE"),
        ]);

        let snapshot = run(&[first, second]);
        assert_eq!(snapshot.restaurants.len(), 1);
        assert_eq!(snapshot.cuisines.len(), 2);
        assert_eq!(snapshot.addresses.len(), 2);

        let restaurant = &snapshot.restaurants[0].1;
        assert_eq!(restaurant.name.as_deref(), Some("Joe's Pizza"));
        assert_eq!(restaurant.cuisine_id, Some(1));
        assert_eq!(restaurant.address_id, Some(1));
    }

    #[test]
    fn test_inspection_keeps_first_action() {
        let first = inspection_row("100", "01/02/2023", "Cycle Inspection", "04L");
        let second = with_field(
            inspection_fields("100", "01/02/2023", "Cycle Inspection", "08A"),
            columns::ACTION,
            "Establishment Closed",
        );

        let snapshot = run(&[first, second]);
        assert_eq!(snapshot.actions.len(), 2);
        assert_eq!(snapshot.inspections[0].1.action_id, Some(1));
    }

    #[test]
    fn test_address_skipped_without_any_component() {
        let mut transformer = InspectionTransformer::new("", " ");
        transformer.process_record(&record(&[(columns::CAMIS, "100")]));

        let snapshot = transformer.into_snapshot();
        assert!(snapshot.addresses.is_empty());
        assert_eq!(snapshot.restaurants[0].1.address_id, None);
    }

    #[test]
    fn test_address_uses_run_labels() {
        let mut transformer = InspectionTransformer::new(" New   York ", "NY");
        transformer.process_record(&record(&[(columns::CAMIS, "100")]));

        let snapshot = transformer.into_snapshot();
        let (key, id) = &snapshot.addresses[0];
        assert_eq!(*id, 1);
        assert_eq!(key.city.as_deref(), Some("New York"));
        assert_eq!(key.state.as_deref(), Some("NY"));
        assert_eq!(key.building, None);
    }

    #[test]
    fn test_independent_transformers_do_not_share_ids() {
        let rows = [inspection_row("100", "01/02/2023", "Cycle Inspection", "04L")];
        let a = run(&rows);
        let b = run(&rows);

        assert_eq!(a, b);
        assert_eq!(b.restaurants[0].1.id, 1);
        assert_eq!(b.violations[0].id, 1);
    }

    #[test]
    fn test_transformer_trait_finalize() {
        let mut transformer = InspectionTransformer::new("ny", "ny");
        let count = transformer
            .transform_all(vec![
                Ok(inspection_row("100", "01/02/2023", "Cycle Inspection", "04L")),
                Ok(inspection_row("200", "01/02/2023", "Cycle Inspection", "")),
            ])
            .unwrap();

        assert_eq!(count, 2);
        let snapshot = transformer.finalize();
        assert_eq!(snapshot.restaurants.len(), 2);
        assert_eq!(snapshot.restaurants[1].0, "200");
        assert_eq!(snapshot.restaurants[1].1.id, 2);
    }
}
