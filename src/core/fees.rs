//! Fee computation engine: pure functions over a [`Ledger`] snapshot.
//! Anything that depends on "today" takes it as an argument; callers pass the
//! current date, tests pass a fixed one.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::core::errors::PortalError;
use crate::core::ledger::Ledger;
use crate::core::models::{
    AdditionalFee, AttendanceEntry, ClassGroup, ClassSession, CreditBreakdown, FamilyData,
    FeeEntry, FeesByMonth, MonthlyFees, PaymentEntry, UpcomingClass,
};

/// An explicit price override. Empty cells project to `None`; a stored zero
/// also falls through to the next tier.
fn override_price(price: Option<f64>) -> Option<f64> {
    price.filter(|p| *p != 0.0)
}

fn session_price(session: &ClassSession, group: &ClassGroup) -> f64 {
    override_price(session.price).unwrap_or(group.default_price)
}

fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

fn family_fee_rows<'a>(ledger: &'a Ledger, family_id: &str) -> Vec<&'a AdditionalFee> {
    let students: BTreeSet<&str> = ledger
        .students_of_family(family_id, false)
        .into_iter()
        .map(|s| s.id.as_str())
        .collect();
    ledger
        .additional_fees
        .iter()
        .filter(|fee| students.contains(fee.student_id.as_str()))
        .collect()
}

/// Sum of |amount| over the family's payments. Refunds are folded in at
/// absolute value: a refund lowers the balance exactly as a payment would,
/// and its magnitude is reported separately under [`CreditBreakdown::refunds`].
fn absolute_payments_total(ledger: &Ledger, family_id: &str) -> f64 {
    ledger
        .payments
        .iter()
        .filter(|p| p.family_id == family_id)
        .map(|p| p.amount.abs())
        .sum()
}

fn amount_owed_to_date(
    ledger: &Ledger,
    family_id: &str,
    today: NaiveDate,
) -> Result<f64, PortalError> {
    Ok(class_fees_to_date(ledger, family_id, today)? + additional_fee_charges(ledger, family_id))
}

/// Attendance history for the family, priced through the three-tier
/// precedence chain: attendance override, then session price, then class-group
/// default. Sorted by session date, newest first; equal dates keep input order.
pub fn recent_attendance(
    ledger: &Ledger,
    family_id: &str,
) -> Result<Vec<AttendanceEntry>, PortalError> {
    let students = ledger.students_of_family(family_id, false);
    debug!(
        family_id,
        students = students.len(),
        "resolving attendance for family"
    );

    let mut entries = Vec::new();
    for record in &ledger.attendance {
        let Some(student) = students.iter().find(|s| s.id == record.student_id) else {
            continue;
        };
        let session = ledger.class(&record.class_id)?;
        let group = ledger.class_group(&session.class_group_id)?;
        let price = override_price(record.price)
            .or_else(|| override_price(session.price))
            .unwrap_or(group.default_price);
        entries.push(AttendanceEntry {
            attendance_id: record.id.clone(),
            class_date: session.date,
            student_name: student.name.clone(),
            class_group_name: group.name.clone(),
            price,
        });
    }

    entries.sort_by(|a, b| b.class_date.cmp(&a.class_date));
    Ok(entries)
}

/// Payments for the family, newest first; equal dates keep input order.
pub fn recent_payments(ledger: &Ledger, family_id: &str) -> Vec<PaymentEntry> {
    let mut entries: Vec<PaymentEntry> = ledger
        .payments
        .iter()
        .filter(|p| p.family_id == family_id)
        .map(|p| PaymentEntry {
            payment_id: p.id.clone(),
            date: p.date,
            amount: p.amount,
        })
        .collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}

/// Sessions of the family's class groups dated today or later, day
/// granularity.
pub fn upcoming_classes(
    ledger: &Ledger,
    family_id: &str,
    today: NaiveDate,
) -> Result<Vec<UpcomingClass>, PortalError> {
    let sessions = ledger.class_sessions_of_family(family_id, |c| c.date >= today);
    debug!(
        family_id,
        upcoming = sessions.len(),
        "resolved upcoming classes"
    );

    sessions
        .into_iter()
        .map(|session| {
            let group = ledger.class_group(&session.class_group_id)?;
            Ok(UpcomingClass {
                class_id: session.id.clone(),
                date: session.date,
                class_group_name: group.name.clone(),
                price: session_price(session, group),
            })
        })
        .collect()
}

/// Incidental fees for the family's students, annotated with the student
/// name, newest first.
pub fn additional_fees(ledger: &Ledger, family_id: &str) -> Vec<FeeEntry> {
    let students = ledger.students_of_family(family_id, false);
    let mut entries: Vec<FeeEntry> = ledger
        .additional_fees
        .iter()
        .filter_map(|fee| {
            let student = students.iter().find(|s| s.id == fee.student_id)?;
            Some(FeeEntry {
                fee_id: fee.id.clone(),
                student_id: fee.student_id.clone(),
                student_name: student.name.clone(),
                date: fee.date,
                notes: fee.notes.clone(),
                price: fee.price,
            })
        })
        .collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}

/// Scheduled class fees bucketed by (year, month) of the session date. Each
/// session is billed once per currently enrolled student whose class group
/// matches and whose enrollment window contains the session date; sessions
/// with no matching students create no bucket.
pub fn fees_by_month(ledger: &Ledger, family_id: &str) -> Result<FeesByMonth, PortalError> {
    let students = ledger.students_of_family(family_id, true);
    let groups = ledger.class_groups_of_family(family_id);

    let mut buckets = FeesByMonth::new();
    for session in ledger
        .classes
        .iter()
        .filter(|c| groups.contains(c.class_group_id.as_str()))
    {
        let billed = students
            .iter()
            .filter(|s| s.class_group_id == session.class_group_id && s.enrolled_on(session.date))
            .count();
        if billed == 0 {
            continue;
        }
        let group = ledger.class_group(&session.class_group_id)?;
        let bucket = buckets
            .entry(month_key(session.date))
            .or_insert_with(|| MonthlyFees {
                label: session.date.format("%B").to_string(),
                year: session.date.year(),
                total: 0.0,
            });
        bucket.total += session_price(session, group) * billed as f64;
    }
    Ok(buckets)
}

/// Sum of the monthly buckets up to and including the current (year, month).
pub fn class_fees_to_date(
    ledger: &Ledger,
    family_id: &str,
    today: NaiveDate,
) -> Result<f64, PortalError> {
    let cutoff = month_key(today);
    Ok(fees_by_month(ledger, family_id)?
        .into_iter()
        .filter(|(key, _)| *key <= cutoff)
        .map(|(_, bucket)| bucket.total)
        .sum())
}

/// Only positive fee entries count as charges; negative entries belong to the
/// credit side.
pub fn additional_fee_charges(ledger: &Ledger, family_id: &str) -> f64 {
    family_fee_rows(ledger, family_id)
        .into_iter()
        .map(|fee| fee.price.max(0.0))
        .sum()
}

/// Net amount owed, floored at zero.
pub fn balance(ledger: &Ledger, family_id: &str, today: NaiveDate) -> Result<f64, PortalError> {
    let owed = amount_owed_to_date(ledger, family_id, today)?;
    let paid = absolute_payments_total(ledger, family_id);
    debug!(family_id, owed, paid, "computed balance inputs");
    Ok((owed - paid).max(0.0))
}

/// Net favorable balance from cancellations, fee credits, overpayment, and
/// refunds. Unlike [`balance`], the total is not floored.
pub fn credit(
    ledger: &Ledger,
    family_id: &str,
    today: NaiveDate,
) -> Result<CreditBreakdown, PortalError> {
    let mut cancelled_classes_total = 0.0;
    for student in ledger.students_of_family(family_id, true) {
        for session in ledger.classes.iter().filter(|c| {
            c.cancelled
                && c.class_group_id == student.class_group_id
                && c.date < today
                && student.enrolled_on(c.date)
        }) {
            let group = ledger.class_group(&session.class_group_id)?;
            // A cancelled session with an explicit zero price credits zero;
            // only a missing price falls back to the group default.
            cancelled_classes_total += session.price.unwrap_or(group.default_price);
        }
    }

    let additional_fees_total: f64 = family_fee_rows(ledger, family_id)
        .into_iter()
        .map(|fee| fee.price.min(0.0))
        .sum();

    let owed = amount_owed_to_date(ledger, family_id, today)?;
    let paid = absolute_payments_total(ledger, family_id);
    let fee_payment_difference = (owed - paid).min(0.0).abs();

    let refunds: f64 = ledger
        .payments
        .iter()
        .filter(|p| p.family_id == family_id)
        .map(|p| p.amount.min(0.0).abs())
        .sum();

    Ok(CreditBreakdown {
        total_credit: cancelled_classes_total + additional_fees_total + fee_payment_difference
            - refunds,
        cancelled_classes_total,
        additional_fees_total,
        fee_payment_difference,
        refunds,
    })
}

/// Bundles the four family-facing lists into a single response payload.
pub fn all_data(
    ledger: &Ledger,
    family_id: &str,
    today: NaiveDate,
) -> Result<FamilyData, PortalError> {
    Ok(FamilyData {
        recent_attendance: recent_attendance(ledger, family_id)?,
        recent_payments: recent_payments(ledger, family_id),
        upcoming_classes: upcoming_classes(ledger, family_id, today)?,
        additional_fees: additional_fees(ledger, family_id),
    })
}
