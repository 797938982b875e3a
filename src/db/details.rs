use rusqlite::params;
use tracing::{info, warn};

use super::Store;
use crate::error::{Result, StorageContext, ValidationError};
use crate::models::PlanDetail;

impl Store {
    /// Itinerary for one plan, ascending by the `detail_date` text. Unknown
    /// plans simply have no details.
    pub fn list_details(&self, plan_id: i64) -> Result<Vec<PlanDetail>> {
        let mut stmt = self
            .conn()
            .prepare(
                "SELECT id, plan_id, detail_date, destination, address, notes
                 FROM plan_details
                 WHERE plan_id = ?1
                 ORDER BY detail_date ASC",
            )
            .context("failed to prepare plan detail query")?;

        let details = stmt
            .query_map([plan_id], |row| {
                Ok(PlanDetail {
                    id: row.get(0)?,
                    plan_id: row.get(1)?,
                    detail_date: row.get(2)?,
                    destination: row.get(3)?,
                    address: row.get(4)?,
                    notes: row.get(5)?,
                })
            })
            .context("failed to load plan details")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("failed to collect plan details")?;

        info!(plan_id, count = details.len(), "loaded plan details");
        Ok(details)
    }

    /// Insert an itinerary entry under `plan_id` and return its id. The date
    /// and destination must not be empty; every field, address and notes
    /// included, is stored verbatim. `plan_id` must name an existing plan,
    /// otherwise the foreign key rejects the row.
    pub fn add_detail(
        &self,
        plan_id: i64,
        detail_date: &str,
        destination: &str,
        address: &str,
        notes: &str,
    ) -> Result<i64> {
        if detail_date.is_empty() || destination.is_empty() {
            warn!(plan_id, "detail rejected: date and destination are required");
            return Err(ValidationError::MissingDetailFields.into());
        }

        self.conn()
            .execute(
                "INSERT INTO plan_details (plan_id, detail_date, destination, address, notes)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![plan_id, detail_date, destination, address, notes],
            )
            .context("failed to insert plan detail")?;

        let id = self.conn().last_insert_rowid();
        info!(id, plan_id, "added plan detail");
        Ok(id)
    }

    /// Remove one itinerary entry. Deleting an unknown id is a no-op.
    pub fn delete_detail(&self, id: i64) -> Result<()> {
        let deleted = self
            .conn()
            .execute("DELETE FROM plan_details WHERE id = ?1", params![id])
            .context("failed to delete plan detail")?;

        info!(id, deleted, "deleted plan detail");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::db::Store;
    use crate::error::{StoreError, ValidationError};

    fn store_with_plan() -> (Store, i64) {
        let store = Store::open_in_memory().unwrap();
        let plan = store.add_plan("Kyoto Trip", "2024-05-01").unwrap();
        (store, plan)
    }

    #[test]
    fn added_detail_is_listed() {
        let (store, plan) = store_with_plan();
        let id = store
            .add_detail(plan, "05-01 09-00", "Temple", "Kyoto", "bring camera")
            .unwrap();

        let details = store.list_details(plan).unwrap();
        assert_eq!(details.len(), 1);
        let detail = &details[0];
        assert_eq!(detail.id, id);
        assert_eq!(detail.plan_id, plan);
        assert_eq!(detail.detail_date, "05-01 09-00");
        assert_eq!(detail.destination, "Temple");
        assert_eq!(detail.address.as_deref(), Some("Kyoto"));
        assert_eq!(detail.notes.as_deref(), Some("bring camera"));
    }

    #[test]
    fn optional_fields_are_stored_as_entered() {
        let (store, plan) = store_with_plan();
        store.add_detail(plan, "05-01", "Temple", " ", "").unwrap();
        store
            .add_detail(plan, "05-02", "Market", "", "  leading space")
            .unwrap();

        let details = store.list_details(plan).unwrap();
        assert_eq!(details[0].address.as_deref(), Some(" "));
        assert_eq!(details[0].notes.as_deref(), Some(""));
        assert_eq!(details[1].address.as_deref(), Some(""));
        assert_eq!(details[1].notes.as_deref(), Some("  leading space"));
    }

    #[test]
    fn null_columns_read_back_as_none() {
        let (store, plan) = store_with_plan();
        store
            .conn()
            .execute(
                "INSERT INTO plan_details (plan_id, detail_date, destination) VALUES (?1, ?2, ?3)",
                rusqlite::params![plan, "05-01", "Temple"],
            )
            .unwrap();

        let detail = &store.list_details(plan).unwrap()[0];
        assert_eq!(detail.address, None);
        assert_eq!(detail.notes, None);
        assert_eq!(detail.address_or_blank(), "");
        assert_eq!(detail.notes_or_blank(), "");
    }

    #[test]
    fn whitespace_date_and_destination_are_accepted() {
        let (store, plan) = store_with_plan();
        store.add_detail(plan, " ", " ", "", "").unwrap();
        assert_eq!(store.list_details(plan).unwrap()[0].destination, " ");
    }

    #[test]
    fn details_are_listed_by_date_and_scoped_to_plan() {
        let (store, plan) = store_with_plan();
        let other = store.add_plan("Tokyo Trip", "2024-03-10").unwrap();
        store.add_detail(plan, "05-02 10-00", "Market", "", "").unwrap();
        store.add_detail(plan, "05-01 09-00", "Temple", "", "").unwrap();
        store.add_detail(other, "03-10 08-00", "Tower", "", "").unwrap();

        let destinations: Vec<_> = store
            .list_details(plan)
            .unwrap()
            .into_iter()
            .map(|d| d.destination)
            .collect();
        assert_eq!(destinations, vec!["Temple", "Market"]);
    }

    #[test]
    fn missing_date_is_rejected_without_writing() {
        let (store, plan) = store_with_plan();

        let err = store.add_detail(plan, "", "Temple", "", "").unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::MissingDetailFields)
        ));
        let err = store.add_detail(plan, "05-01 09-00", "", "Kyoto", "").unwrap_err();
        assert!(err.is_validation());

        assert!(store.list_details(plan).unwrap().is_empty());
    }

    #[test]
    fn detail_for_unknown_plan_is_a_storage_error() {
        let store = Store::open_in_memory().unwrap();
        let err = store.add_detail(99, "05-01 09-00", "Temple", "", "").unwrap_err();
        assert!(matches!(err, StoreError::Storage { .. }));
    }

    #[test]
    fn unknown_plan_has_no_details() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.list_details(7).unwrap().is_empty());
    }

    #[test]
    fn delete_detail_is_idempotent() {
        let (store, plan) = store_with_plan();
        let keep = store.add_detail(plan, "05-01 09-00", "Temple", "", "").unwrap();
        let drop = store.add_detail(plan, "05-01 12-00", "Lunch", "", "").unwrap();

        store.delete_detail(drop).unwrap();
        store.delete_detail(drop).unwrap();

        let ids: Vec<_> = store.list_details(plan).unwrap().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![keep]);
    }
}
