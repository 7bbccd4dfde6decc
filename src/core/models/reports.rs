use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Output records returned to the presentation shell. Plain data, nothing
/// behavioral attached.

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AttendanceEntry {
    pub attendance_id: String,
    pub class_date: NaiveDate,
    pub student_name: String,
    pub class_group_name: String,
    pub price: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PaymentEntry {
    pub payment_id: String,
    pub date: NaiveDate,
    pub amount: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UpcomingClass {
    pub class_id: String,
    pub date: NaiveDate,
    pub class_group_name: String,
    pub price: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FeeEntry {
    pub fee_id: String,
    pub student_id: String,
    pub student_name: String,
    pub date: NaiveDate,
    pub notes: String,
    pub price: f64,
}

/// One (year, month) billing bucket.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MonthlyFees {
    pub label: String,
    pub year: i32,
    pub total: f64,
}

pub type FeesByMonth = BTreeMap<String, MonthlyFees>;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CreditBreakdown {
    pub total_credit: f64,
    pub cancelled_classes_total: f64,
    pub additional_fees_total: f64,
    pub fee_payment_difference: f64,
    pub refunds: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FamilyData {
    pub recent_attendance: Vec<AttendanceEntry>,
    pub recent_payments: Vec<PaymentEntry>,
    pub upcoming_classes: Vec<UpcomingClass>,
    pub additional_fees: Vec<FeeEntry>,
}
