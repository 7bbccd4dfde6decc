use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::core::errors::PortalError;
use crate::core::fees;
use crate::core::ledger::Ledger;
use crate::core::models::{
    AttendanceEntry, CreditBreakdown, Family, FamilyData, FeeEntry, FeesByMonth, PaymentEntry,
    UpcomingClass,
};
use crate::core::projection;
use crate::infrastructure::source::{Sheet, SheetSource};

/// Outward contract consumed by the presentation shell. Every call builds one
/// [`Ledger`] snapshot through the source (and whatever caching the source
/// layers in) and evaluates the fee engine against it; nothing is shared
/// across requests.
pub struct PortalService<S: SheetSource> {
    source: S,
}

impl<S: SheetSource> PortalService<S> {
    pub fn new(source: S) -> Self {
        info!("Initializing PortalService");
        PortalService { source }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    async fn ledger(&self) -> Result<Ledger, PortalError> {
        Ledger::load(&self.source).await
    }

    pub async fn get_families(&self) -> Result<Vec<Family>, PortalError> {
        let rows = self.source.fetch_rows(Sheet::Families).await?;
        Ok(projection::project_families(&rows))
    }

    pub async fn get_all_data(&self, family_id: &str) -> Result<FamilyData, PortalError> {
        self.get_all_data_as_of(family_id, Self::today()).await
    }

    pub async fn get_all_data_as_of(
        &self,
        family_id: &str,
        today: NaiveDate,
    ) -> Result<FamilyData, PortalError> {
        info!(family_id, "building family data payload");
        let ledger = self.ledger().await?;
        fees::all_data(&ledger, family_id, today)
    }

    pub async fn get_balance(&self, family_id: &str) -> Result<f64, PortalError> {
        self.get_balance_as_of(family_id, Self::today()).await
    }

    pub async fn get_balance_as_of(
        &self,
        family_id: &str,
        today: NaiveDate,
    ) -> Result<f64, PortalError> {
        let ledger = self.ledger().await?;
        fees::balance(&ledger, family_id, today)
    }

    pub async fn get_credit(&self, family_id: &str) -> Result<CreditBreakdown, PortalError> {
        self.get_credit_as_of(family_id, Self::today()).await
    }

    pub async fn get_credit_as_of(
        &self,
        family_id: &str,
        today: NaiveDate,
    ) -> Result<CreditBreakdown, PortalError> {
        let ledger = self.ledger().await?;
        fees::credit(&ledger, family_id, today)
    }

    pub async fn get_recent_attendance(
        &self,
        family_id: &str,
    ) -> Result<Vec<AttendanceEntry>, PortalError> {
        let ledger = self.ledger().await?;
        fees::recent_attendance(&ledger, family_id)
    }

    pub async fn get_recent_payments(
        &self,
        family_id: &str,
    ) -> Result<Vec<PaymentEntry>, PortalError> {
        let ledger = self.ledger().await?;
        Ok(fees::recent_payments(&ledger, family_id))
    }

    pub async fn get_upcoming_classes(
        &self,
        family_id: &str,
    ) -> Result<Vec<UpcomingClass>, PortalError> {
        self.get_upcoming_classes_as_of(family_id, Self::today())
            .await
    }

    pub async fn get_upcoming_classes_as_of(
        &self,
        family_id: &str,
        today: NaiveDate,
    ) -> Result<Vec<UpcomingClass>, PortalError> {
        let ledger = self.ledger().await?;
        fees::upcoming_classes(&ledger, family_id, today)
    }

    pub async fn get_additional_fees(&self, family_id: &str) -> Result<Vec<FeeEntry>, PortalError> {
        let ledger = self.ledger().await?;
        Ok(fees::additional_fees(&ledger, family_id))
    }

    pub async fn get_fees_by_month(&self, family_id: &str) -> Result<FeesByMonth, PortalError> {
        let ledger = self.ledger().await?;
        fees::fees_by_month(&ledger, family_id)
    }
}
