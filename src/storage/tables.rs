/// Closed set of tables the query endpoint may read.
///
/// Every identifier the query path interpolates into SQL comes from this
/// enum, never from request input. Adding a table means adding a variant
/// and its query template here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryTable {
    WaterMeterReadings,
}

impl QueryTable {
    /// Resolve a request-supplied table name against the closed set.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "water_meter_readings" => Some(QueryTable::WaterMeterReadings),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            QueryTable::WaterMeterReadings => "water_meter_readings",
        }
    }

    /// Status-filter template for this table. The identifier is fixed at
    /// compile time; only the status value is bound at runtime.
    pub(crate) fn select_by_status_sql(self) -> &'static str {
        match self {
            QueryTable::WaterMeterReadings => {
                r#"SELECT * FROM water_meter_readings WHERE "Status" = ?1"#
            }
        }
    }
}
