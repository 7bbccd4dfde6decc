//! Per-request snapshot of all projected tables, with the family-scoped
//! joins the fee engine works from. Built once per top-level call and
//! discarded with the response; never mutated in place.

use std::collections::BTreeSet;

use tracing::debug;

use crate::core::errors::PortalError;
use crate::core::models::{
    AdditionalFee, Attendance, ClassGroup, ClassSession, Family, Payment, Student,
};
use crate::core::projection;
use crate::infrastructure::source::{Sheet, SheetSource};

pub struct Ledger {
    pub families: Vec<Family>,
    pub students: Vec<Student>,
    pub class_groups: Vec<ClassGroup>,
    pub classes: Vec<ClassSession>,
    pub attendance: Vec<Attendance>,
    pub payments: Vec<Payment>,
    pub additional_fees: Vec<AdditionalFee>,
}

impl Ledger {
    pub async fn load<S: SheetSource + ?Sized>(source: &S) -> Result<Self, PortalError> {
        let ledger = Ledger {
            families: projection::project_families(&source.fetch_rows(Sheet::Families).await?),
            students: projection::project_students(&source.fetch_rows(Sheet::Students).await?),
            class_groups: projection::project_class_groups(
                &source.fetch_rows(Sheet::ClassGroups).await?,
            )?,
            classes: projection::project_classes(&source.fetch_rows(Sheet::Classes).await?)?,
            attendance: projection::project_attendance(
                &source.fetch_rows(Sheet::Attendance).await?,
            ),
            payments: projection::project_payments(&source.fetch_rows(Sheet::Payments).await?)?,
            additional_fees: projection::project_additional_fees(
                &source.fetch_rows(Sheet::AdditionalFees).await?,
            )?,
        };
        debug!(
            students = ledger.students.len(),
            classes = ledger.classes.len(),
            "ledger snapshot loaded"
        );
        Ok(ledger)
    }

    pub fn students_of_family(&self, family_id: &str, active_only: bool) -> Vec<&Student> {
        self.students
            .iter()
            .filter(|s| s.family_id == family_id && (!active_only || s.active))
            .collect()
    }

    /// Distinct class-group ids over the family's active students.
    pub fn class_groups_of_family(&self, family_id: &str) -> BTreeSet<&str> {
        self.students_of_family(family_id, true)
            .into_iter()
            .map(|s| s.class_group_id.as_str())
            .collect()
    }

    /// Sessions of the family's class groups matching `pred`. Group-scoped
    /// only: per-student enrollment windows are applied during fee
    /// aggregation, not here.
    pub fn class_sessions_of_family(
        &self,
        family_id: &str,
        mut pred: impl FnMut(&ClassSession) -> bool,
    ) -> Vec<&ClassSession> {
        let groups = self.class_groups_of_family(family_id);
        self.classes
            .iter()
            .filter(|c| groups.contains(c.class_group_id.as_str()) && pred(c))
            .collect()
    }

    /// A miss here is corrupt upstream data, not absence.
    pub fn class(&self, class_id: &str) -> Result<&ClassSession, PortalError> {
        self.classes
            .iter()
            .find(|c| c.id == class_id)
            .ok_or_else(|| PortalError::ClassNotFound(class_id.to_string()))
    }

    /// A miss here is corrupt upstream data, not absence.
    pub fn class_group(&self, class_group_id: &str) -> Result<&ClassGroup, PortalError> {
        self.class_groups
            .iter()
            .find(|g| g.id == class_group_id)
            .ok_or_else(|| PortalError::ClassGroupNotFound(class_group_id.to_string()))
    }
}
