use oath_speaker::ingest::Dataset;
use oath_speaker::storage::{Database, QueryTable};

async fn test_db() -> (tempfile::TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("oath-speaker.db").display()
    );
    let db = Database::connect(&url).await.unwrap();
    (dir, db)
}

fn readings_dataset() -> Dataset {
    Dataset {
        table: "water_meter_readings".to_string(),
        columns: vec!["Status".to_string(), "Value".to_string()],
        rows: vec![
            vec!["Active".to_string(), "100".to_string()],
            vec!["Active".to_string(), "105".to_string()],
            vec!["Closed".to_string(), "7".to_string()],
        ],
    }
}

#[tokio::test]
async fn test_replace_and_select_by_status() {
    let (_dir, db) = test_db().await;
    let written = db.replace_table(&readings_dataset()).await.unwrap();
    assert_eq!(written, 3);

    let records = db
        .select_by_status(QueryTable::WaterMeterReadings, "Active")
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("Value").unwrap(), "100");
    assert_eq!(records[1].get("Value").unwrap(), "105");
}

#[tokio::test]
async fn test_select_no_matches_is_empty() {
    let (_dir, db) = test_db().await;
    db.replace_table(&readings_dataset()).await.unwrap();

    let records = db
        .select_by_status(QueryTable::WaterMeterReadings, "Missing")
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_records_keyed_by_every_column() {
    let (_dir, db) = test_db().await;
    db.replace_table(&readings_dataset()).await.unwrap();

    let records = db
        .select_by_status(QueryTable::WaterMeterReadings, "Closed")
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].len(), 2);
    assert!(records[0].contains_key("Status"));
    assert!(records[0].contains_key("Value"));
}

#[tokio::test]
async fn test_replace_is_idempotent() {
    let (_dir, db) = test_db().await;
    db.replace_table(&readings_dataset()).await.unwrap();
    db.replace_table(&readings_dataset()).await.unwrap();

    // Replace semantics: the second upload does not append
    let records = db
        .select_by_status(QueryTable::WaterMeterReadings, "Active")
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn test_replace_swaps_schema() {
    let (_dir, db) = test_db().await;
    db.replace_table(&readings_dataset()).await.unwrap();

    let reshaped = Dataset {
        table: "water_meter_readings".to_string(),
        columns: vec![
            "Status".to_string(),
            "Reading".to_string(),
            "Unit".to_string(),
        ],
        rows: vec![vec![
            "Active".to_string(),
            "12".to_string(),
            "kL".to_string(),
        ]],
    };
    db.replace_table(&reshaped).await.unwrap();

    let records = db
        .select_by_status(QueryTable::WaterMeterReadings, "Active")
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].len(), 3);
    assert!(records[0].contains_key("Reading"));
    assert!(records[0].contains_key("Unit"));
    assert_eq!(records[0].get("Reading").unwrap(), "12");
}

#[tokio::test]
async fn test_status_value_is_parameterized() {
    let (_dir, db) = test_db().await;
    db.replace_table(&readings_dataset()).await.unwrap();

    // A status value full of SQL stays a value
    let records = db
        .select_by_status(QueryTable::WaterMeterReadings, "Active' OR '1'='1")
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_replace_quotes_awkward_identifiers() {
    let (_dir, db) = test_db().await;
    let dataset = Dataset {
        table: "odd name".to_string(),
        columns: vec!["weird \"col\"".to_string()],
        rows: vec![vec!["x".to_string()]],
    };
    db.replace_table(&dataset).await.unwrap();

    assert!(db.table_exists("odd name").await.unwrap());
}

#[tokio::test]
async fn test_table_exists() {
    let (_dir, db) = test_db().await;
    assert!(!db.table_exists("water_meter_readings").await.unwrap());

    db.replace_table(&readings_dataset()).await.unwrap();
    assert!(db.table_exists("water_meter_readings").await.unwrap());
}

#[test]
fn test_query_table_closed_set() {
    assert_eq!(
        QueryTable::parse("water_meter_readings"),
        Some(QueryTable::WaterMeterReadings)
    );
    assert_eq!(QueryTable::parse("users"), None);
    assert_eq!(QueryTable::parse(""), None);
    assert_eq!(QueryTable::parse("WATER_METER_READINGS"), None);
    assert_eq!(
        QueryTable::WaterMeterReadings.name(),
        "water_meter_readings"
    );
}
