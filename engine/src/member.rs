//! Library members and their loan quota.

use crate::{error::Result, validation, LibraryConfig, MemberId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A registered member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Surrogate identifier
    pub id: MemberId,
    pub name: String,
    /// Day the member registered, serialized as `YYYY-MM-DD`
    pub membership_date: NaiveDate,
    /// How many more books the member may borrow right now
    pub available_book_amount: i32,
}

impl Member {
    /// Whether the member may take one more book.
    pub fn can_borrow(&self) -> bool {
        self.available_book_amount > 0
    }
}

/// Client-supplied member fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRequest {
    #[serde(default)]
    pub name: String,
}

impl MemberRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn validate(&self) -> Result<()> {
        validation::validate_member_name(&self.name)
    }
}

/// A member that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub name: String,
    pub membership_date: NaiveDate,
    pub available_book_amount: i32,
}

impl NewMember {
    /// Build a registration: the date is the day of creation and the quota
    /// comes from configuration, never from the client.
    pub fn register(request: MemberRequest, today: NaiveDate, config: &LibraryConfig) -> Self {
        Self {
            name: request.name,
            membership_date: today,
            available_book_amount: config.default_book_quota,
        }
    }

    /// Attach the id assigned by the store.
    pub fn with_id(self, id: MemberId) -> Member {
        Member {
            id,
            name: self.name,
            membership_date: self.membership_date,
            available_book_amount: self.available_book_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn register_uses_configured_quota() {
        let config = LibraryConfig::new(3);
        let member = NewMember::register(MemberRequest::new("Alice"), today(), &config).with_id(9);

        assert_eq!(member.id, 9);
        assert_eq!(member.name, "Alice");
        assert_eq!(member.membership_date, today());
        assert_eq!(member.available_book_amount, 3);
        assert!(member.can_borrow());
    }

    #[test]
    fn zero_quota_cannot_borrow() {
        let member = NewMember::register(MemberRequest::new("Bob"), today(), &LibraryConfig::new(0))
            .with_id(1);
        assert!(!member.can_borrow());
    }

    #[test]
    fn member_serializes_date_as_iso_day() {
        let member = NewMember::register(MemberRequest::new("Alice"), today(), &LibraryConfig::new(2))
            .with_id(1);
        let json = serde_json::to_value(&member).unwrap();

        assert_eq!(json["membershipDate"], "2024-03-01");
        assert_eq!(json["availableBookAmount"], 2);
    }
}
