//! Plain data holders mirroring the two tables. They carry their database id
//! so every row the front-end shows stays bound to the record it came from.

/// A named trip with a free-form date. Top-level record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Primary key, carried so deletes and detail lookups can name the row.
    pub id: i64,
    /// Trip name shown in the plan list.
    pub name: String,
    /// Free-form text, typically `YYYY-MM-DD`. Sorted as a plain string.
    pub date: String,
}

/// One itinerary entry belonging to a [`Plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDetail {
    pub id: i64,
    /// Owning [`Plan`]; deleting that plan deletes this row too.
    pub plan_id: i64,
    /// Free-form text, typically `MM-DD hh-mm`. Sorted as a plain string.
    pub detail_date: String,
    pub destination: String,
    pub address: Option<String>,
    pub notes: Option<String>,
}

impl PlanDetail {
    /// Address for display; rows written without one show as empty.
    pub fn address_or_blank(&self) -> &str {
        self.address.as_deref().unwrap_or("")
    }

    /// Notes for display; rows written without any show as empty.
    pub fn notes_or_blank(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }
}
