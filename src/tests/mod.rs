mod cache_tests;

use chrono::NaiveDate;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use crate::core::services::PortalService;
use crate::infrastructure::source::in_memory::InMemorySheets;
use crate::infrastructure::source::{Row, Sheet};

/// First caller wins; later calls are no-ops so tests can share one fixture
/// path.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

pub fn d(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
}

pub fn header_for(sheet: Sheet) -> Row {
    let cols: &[&str] = match sheet {
        Sheet::Families => &["id", "name"],
        Sheet::Students => &[
            "id",
            "name",
            "familyId",
            "classGroupId",
            "active",
            "enrollmentStart",
            "enrollmentEnd",
        ],
        Sheet::Attendance => &["id", "studentId", "classId", "notes", "price"],
        Sheet::Payments => &["id", "familyId", "date", "amount"],
        Sheet::Classes => &["id", "classGroupId", "date", "price", "cancelled"],
        Sheet::ClassGroups => &["id", "name", "pricePerClass"],
        Sheet::AdditionalFees => &["id", "studentId", "date", "notes", "price"],
    };
    cols.iter().map(|c| json!(c)).collect()
}

/// Seeds every sheet with its header row, then appends the given data rows.
pub async fn seeded_sheets(overrides: Vec<(Sheet, Vec<Row>)>) -> InMemorySheets {
    init_tracing();
    let sheets = InMemorySheets::new();
    for sheet in Sheet::ALL {
        sheets.insert(sheet, vec![header_for(sheet)]).await;
    }
    for (sheet, rows) in overrides {
        let mut seeded = vec![header_for(sheet)];
        seeded.extend(rows);
        sheets.insert(sheet, seeded).await;
    }
    sheets
}

pub async fn portal_with(overrides: Vec<(Sheet, Vec<Row>)>) -> PortalService<InMemorySheets> {
    PortalService::new(seeded_sheets(overrides).await)
}

/// One family with one active student in a single class group (default price
/// 20) and one scheduled session on 2024-03-05.
pub fn baseline() -> Vec<(Sheet, Vec<Row>)> {
    vec![
        (Sheet::Families, vec![vec![json!("f1"), json!("Rivera")]]),
        (
            Sheet::Students,
            vec![vec![
                json!("s1"),
                json!("Maya"),
                json!("f1"),
                json!("g1"),
                json!(true),
                json!(""),
                json!(""),
            ]],
        ),
        (
            Sheet::ClassGroups,
            vec![vec![json!("g1"), json!("Beginner Drums"), json!(20)]],
        ),
        (
            Sheet::Classes,
            vec![vec![
                json!("c1"),
                json!("g1"),
                json!("2024-03-05"),
                json!(""),
                json!(false),
            ]],
        ),
    ]
}
