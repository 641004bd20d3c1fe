//! Target tables of the normalized schema

use std::fmt;

/// Tables in load order: lookups first, then the rows that reference them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Cuisine,
    InspectionType,
    Action,
    Address,
    Restaurant,
    Inspection,
    Violation,
}

impl Table {
    pub const ALL: [Table; 7] = [
        Table::Cuisine,
        Table::InspectionType,
        Table::Action,
        Table::Address,
        Table::Restaurant,
        Table::Inspection,
        Table::Violation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Table::Cuisine => "Cuisine",
            Table::InspectionType => "InspectionType",
            Table::Action => "Action",
            Table::Address => "Address",
            Table::Restaurant => "Restaurant",
            Table::Inspection => "Inspection",
            Table::Violation => "Violation",
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Table::Cuisine => &["CuisineID", "CuisineDescription"],
            Table::InspectionType => &["InspectionTypeID", "TypeName", "Description"],
            Table::Action => &["ActionID", "ActionDescription"],
            Table::Address => &[
                "AddressID",
                "AddressLine1",
                "ZipCode",
                "Borough",
                "City",
                "State",
            ],
            Table::Restaurant => &[
                "RestaurantID",
                "ExternalID",
                "DBA_Name",
                "CuisineID",
                "AddressID",
            ],
            Table::Inspection => &[
                "InspectionID",
                "RestaurantID",
                "InspectionTypeID",
                "InspectionDate",
                "ActionID",
            ],
            Table::Violation => &[
                "ViolationID",
                "InspectionID",
                "ViolationCode",
                "ViolationDescription",
                "CriticalFlag",
            ],
        }
    }

    /// Output file for this table, e.g. `insert_inspectiontype.sql`
    pub fn file_name(&self) -> String {
        format!("insert_{}.sql", self.name().to_lowercase())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert_eq!(Table::Cuisine.file_name(), "insert_cuisine.sql");
        assert_eq!(Table::InspectionType.file_name(), "insert_inspectiontype.sql");
        assert_eq!(Table::Violation.file_name(), "insert_violation.sql");
    }

    #[test]
    fn test_every_table_starts_with_its_id_column() {
        for table in Table::ALL {
            assert_eq!(table.columns()[0], format!("{}ID", table.name()));
        }
    }
}
