use crate::db::result_set::RowRef;
use serde::Serialize;

/// A survey promoter, as stored in the `promoters` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Promoter {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

impl Promoter {
    /// Build from a row of `SELECT id, name, email, created_at ...`.
    pub fn from_row(row: RowRef<'_>) -> Option<Self> {
        Some(Self {
            id: row.get_i64("id")?,
            name: row.get_str("name")?.to_string(),
            email: row.get_str("email").unwrap_or_default().to_string(),
            created_at: row.get_str("created_at").unwrap_or_default().to_string(),
        })
    }

    /// "Name <email>", or just the name when no email is known.
    pub fn display_name(&self) -> String {
        if self.email.is_empty() {
            self.name.clone()
        } else {
            format!("{} <{}>", self.name, self.email)
        }
    }
}
