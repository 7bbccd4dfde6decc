//! Positional-to-named projection of raw sheet rows. Column positions are
//! mapped exactly once here; nothing past this boundary touches a row by
//! index.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use crate::core::errors::PortalError;
use crate::core::models::{
    AdditionalFee, Attendance, ClassGroup, ClassSession, Family, Payment, Student,
};
use crate::infrastructure::source::{Row, Sheet};

/// Data rows with their sheet row index. Row 0 is the header and is skipped
/// for every projection.
fn data_rows(rows: &[Row]) -> impl Iterator<Item = (usize, &Row)> {
    rows.iter().enumerate().skip(1)
}

fn cell_str(row: &Row, idx: usize) -> String {
    match row.get(idx) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn cell_opt_number(row: &Row, idx: usize) -> Option<f64> {
    match row.get(idx) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().parse().ok(),
        _ => None,
    }
}

fn cell_number(row: &Row, idx: usize, sheet: Sheet, row_idx: usize) -> Result<f64, PortalError> {
    cell_opt_number(row, idx).ok_or_else(|| PortalError::MalformedRow {
        sheet: sheet.to_string(),
        row: row_idx,
        reason: format!("column {idx} is not a number"),
    })
}

fn cell_bool(row: &Row, idx: usize) -> bool {
    match row.get(idx) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => {
            matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1")
        }
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        _ => false,
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| NaiveDate::parse_from_str(text, "%m/%d/%Y").ok())
}

fn cell_opt_date(row: &Row, idx: usize) -> Option<NaiveDate> {
    parse_date(&cell_str(row, idx))
}

fn cell_date(row: &Row, idx: usize, sheet: Sheet, row_idx: usize) -> Result<NaiveDate, PortalError> {
    cell_opt_date(row, idx).ok_or_else(|| PortalError::MalformedRow {
        sheet: sheet.to_string(),
        row: row_idx,
        reason: format!("column {idx} is not a date"),
    })
}

fn has_cells(row: &Row, key_columns: &[usize]) -> bool {
    key_columns.iter().all(|&idx| !cell_str(row, idx).is_empty())
}

pub fn project_families(rows: &[Row]) -> Vec<Family> {
    data_rows(rows)
        .filter(|(_, row)| has_cells(row, &[0, 1]))
        .map(|(_, row)| Family {
            id: cell_str(row, 0),
            name: cell_str(row, 1),
        })
        .collect()
}

pub fn project_students(rows: &[Row]) -> Vec<Student> {
    data_rows(rows)
        .filter(|(_, row)| has_cells(row, &[0]))
        .map(|(_, row)| Student {
            id: cell_str(row, 0),
            name: cell_str(row, 1),
            family_id: cell_str(row, 2),
            class_group_id: cell_str(row, 3),
            active: cell_bool(row, 4),
            enrollment_start: cell_opt_date(row, 5),
            enrollment_end: cell_opt_date(row, 6),
        })
        .collect()
}

pub fn project_classes(rows: &[Row]) -> Result<Vec<ClassSession>, PortalError> {
    data_rows(rows)
        .filter(|(_, row)| has_cells(row, &[0]))
        .map(|(row_idx, row)| {
            Ok(ClassSession {
                id: cell_str(row, 0),
                class_group_id: cell_str(row, 1),
                date: cell_date(row, 2, Sheet::Classes, row_idx)?,
                price: cell_opt_number(row, 3),
                cancelled: cell_bool(row, 4),
            })
        })
        .collect()
}

pub fn project_class_groups(rows: &[Row]) -> Result<Vec<ClassGroup>, PortalError> {
    data_rows(rows)
        .filter(|(_, row)| has_cells(row, &[0, 1]))
        .map(|(row_idx, row)| {
            Ok(ClassGroup {
                id: cell_str(row, 0),
                name: cell_str(row, 1),
                default_price: cell_number(row, 2, Sheet::ClassGroups, row_idx)?,
            })
        })
        .collect()
}

pub fn project_attendance(rows: &[Row]) -> Vec<Attendance> {
    data_rows(rows)
        .filter(|(_, row)| has_cells(row, &[0]))
        .map(|(_, row)| Attendance {
            id: cell_str(row, 0),
            student_id: cell_str(row, 1),
            class_id: cell_str(row, 2),
            notes: cell_str(row, 3),
            price: cell_opt_number(row, 4),
        })
        .collect()
}

pub fn project_payments(rows: &[Row]) -> Result<Vec<Payment>, PortalError> {
    data_rows(rows)
        .filter(|(_, row)| has_cells(row, &[0]))
        .map(|(row_idx, row)| {
            Ok(Payment {
                id: cell_str(row, 0),
                family_id: cell_str(row, 1),
                date: cell_date(row, 2, Sheet::Payments, row_idx)?,
                amount: cell_number(row, 3, Sheet::Payments, row_idx)?,
            })
        })
        .collect()
}

pub fn project_additional_fees(rows: &[Row]) -> Result<Vec<AdditionalFee>, PortalError> {
    data_rows(rows)
        .filter(|(_, row)| has_cells(row, &[0]))
        .map(|(row_idx, row)| {
            Ok(AdditionalFee {
                id: cell_str(row, 0),
                student_id: cell_str(row, 1),
                date: cell_date(row, 2, Sheet::AdditionalFees, row_idx)?,
                notes: cell_str(row, 3),
                price: cell_number(row, 4, Sheet::AdditionalFees, row_idx)?,
            })
        })
        .collect()
}
