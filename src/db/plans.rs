use rusqlite::params;
use tracing::{info, warn};

use super::Store;
use crate::error::{Result, StorageContext, ValidationError};
use crate::models::Plan;

impl Store {
    /// Every plan, ascending by the `date` text. The ordering is a plain
    /// string comparison, so `2024-3-10` sorts after `2024-12-01`.
    pub fn list_plans(&self) -> Result<Vec<Plan>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT id, name, date FROM plans ORDER BY date ASC")
            .context("failed to prepare plan query")?;

        let plans = stmt
            .query_map([], |row| {
                Ok(Plan {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    date: row.get(2)?,
                })
            })
            .context("failed to load plans")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("failed to collect plans")?;

        info!(count = plans.len(), "loaded plans");
        Ok(plans)
    }

    /// Insert a plan and return its new id. Both fields are required; any
    /// non-empty text, whitespace included, is stored exactly as given.
    pub fn add_plan(&self, name: &str, date: &str) -> Result<i64> {
        if name.is_empty() || date.is_empty() {
            warn!("plan rejected: travel name and date are required");
            return Err(ValidationError::MissingPlanFields.into());
        }

        self.conn()
            .execute(
                "INSERT INTO plans (name, date) VALUES (?1, ?2)",
                params![name, date],
            )
            .context("failed to insert plan")?;

        let id = self.conn().last_insert_rowid();
        info!(id, name, date, "added plan");
        Ok(id)
    }

    /// Remove a plan. The schema cascades to `plan_details`, so its itinerary
    /// goes with it. Deleting an unknown id is a no-op.
    pub fn delete_plan(&self, id: i64) -> Result<()> {
        let deleted = self
            .conn()
            .execute("DELETE FROM plans WHERE id = ?1", params![id])
            .context("failed to delete plan")?;

        info!(id, deleted, "deleted plan");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::db::Store;
    use crate::error::{StoreError, ValidationError};

    fn store() -> Store {
        Store::open_in_memory().unwrap()
    }

    #[test]
    fn added_plan_is_listed() {
        let store = store();
        let id = store.add_plan("Kyoto Trip", "2024-05-01").unwrap();

        let plans = store.list_plans().unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].id, id);
        assert_eq!(plans[0].name, "Kyoto Trip");
        assert_eq!(plans[0].date, "2024-05-01");
    }

    #[test]
    fn plans_are_listed_by_date() {
        let store = store();
        store.add_plan("Kyoto Trip", "2024-05-01").unwrap();
        store.add_plan("Tokyo Trip", "2024-03-10").unwrap();

        let names: Vec<_> = store
            .list_plans()
            .unwrap()
            .into_iter()
            .map(|plan| (plan.name, plan.date))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Tokyo Trip".to_string(), "2024-03-10".to_string()),
                ("Kyoto Trip".to_string(), "2024-05-01".to_string()),
            ]
        );
    }

    #[test]
    fn date_ordering_is_lexical() {
        let store = store();
        store.add_plan("Later", "2024-3-10").unwrap();
        store.add_plan("Earlier", "2024-12-01").unwrap();
        store.add_plan("Unparsed", "next spring").unwrap();

        let dates: Vec<_> = store
            .list_plans()
            .unwrap()
            .into_iter()
            .map(|plan| plan.date)
            .collect();
        assert_eq!(dates, vec!["2024-12-01", "2024-3-10", "next spring"]);
    }

    #[test]
    fn missing_fields_are_rejected_without_writing() {
        let store = store();
        store.add_plan("Kyoto Trip", "2024-05-01").unwrap();
        let before = store.list_plans().unwrap();

        for (name, date) in [("", "2024-05-01"), ("Tokyo Trip", ""), ("", "")] {
            let err = store.add_plan(name, date).unwrap_err();
            assert!(matches!(
                err,
                StoreError::Validation(ValidationError::MissingPlanFields)
            ));
        }

        assert_eq!(store.list_plans().unwrap(), before);
    }

    #[test]
    fn whitespace_counts_as_entered_text() {
        let store = store();
        let id = store.add_plan(" ", "2024-05-01").unwrap();
        store.add_plan("Tokyo Trip", "  ").unwrap();

        let plans = store.list_plans().unwrap();
        assert_eq!(plans.len(), 2);
        let spaced = plans.iter().find(|plan| plan.id == id).unwrap();
        assert_eq!(spaced.name, " ");
        assert_eq!(plans[0].date, "  ");
    }

    #[test]
    fn delete_plan_removes_it() {
        let store = store();
        let keep = store.add_plan("Kyoto Trip", "2024-05-01").unwrap();
        let drop = store.add_plan("Tokyo Trip", "2024-03-10").unwrap();

        store.delete_plan(drop).unwrap();

        let ids: Vec<_> = store.list_plans().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![keep]);
    }

    #[test]
    fn delete_unknown_plan_is_a_no_op() {
        let store = store();
        store.delete_plan(42).unwrap();
        store.delete_plan(42).unwrap();
        assert!(store.list_plans().unwrap().is_empty());
    }

    #[test]
    fn delete_plan_cascades_to_details() {
        let store = store();
        let plan = store.add_plan("Kyoto Trip", "2024-05-01").unwrap();
        store
            .add_detail(plan, "05-01 09-00", "Temple", "Kyoto", "bring camera")
            .unwrap();
        store.add_detail(plan, "05-01 12-00", "Lunch", "", "").unwrap();

        store.delete_plan(plan).unwrap();

        assert!(store.list_details(plan).unwrap().is_empty());
        let orphans: i64 = store
            .conn()
            .query_row("SELECT COUNT(*) FROM plan_details", [], |row| row.get(0))
            .unwrap();
        assert_eq!(orphans, 0);
    }
}
