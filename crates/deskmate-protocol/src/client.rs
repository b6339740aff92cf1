//! Client record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder stored for any client field left blank.
pub const BLANK_FIELD: &str = "-";

/// Client details as typed by the user, before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientDraft {
    pub name: String,
    pub contact: String,
    pub file_name: String,
    pub file_details: String,
    pub notes: String,
}

/// Persisted client record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientRecord {
    /// Record identifier.
    pub id: Uuid,
    pub name: String,
    pub contact: String,
    pub file_name: String,
    pub file_details: String,
    pub notes: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl ClientRecord {
    /// Build a record from a draft, replacing blank fields with [`BLANK_FIELD`].
    pub fn from_draft(draft: ClientDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: or_blank(draft.name),
            contact: or_blank(draft.contact),
            file_name: or_blank(draft.file_name),
            file_details: or_blank(draft.file_details),
            notes: or_blank(draft.notes),
            created_at,
        }
    }
}

fn or_blank(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        BLANK_FIELD.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{BLANK_FIELD, ClientDraft, ClientRecord};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_fields_become_placeholder() {
        let draft = ClientDraft {
            name: "  Asha Rao ".to_string(),
            contact: "   ".to_string(),
            ..ClientDraft::default()
        };
        let record = ClientRecord::from_draft(draft, Utc::now());
        assert_eq!(record.name, "Asha Rao");
        assert_eq!(record.contact, BLANK_FIELD);
        assert_eq!(record.file_name, BLANK_FIELD);
        assert_eq!(record.file_details, BLANK_FIELD);
        assert_eq!(record.notes, BLANK_FIELD);
    }
}
