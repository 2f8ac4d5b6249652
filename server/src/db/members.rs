//! Database operations for the members table.

use chrono::NaiveDate;
use library_engine::{Member, MemberId, NewMember, PageRequest};
use sqlx::{PgExecutor, Row};

/// A stored member row from the database.
#[derive(Debug)]
pub struct StoredMember {
    pub id: i64,
    pub name: String,
    pub membership_date: NaiveDate,
    pub available_book_amount: i32,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for StoredMember {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(StoredMember {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            membership_date: row.try_get("membership_date")?,
            available_book_amount: row.try_get("available_book_amount")?,
        })
    }
}

impl StoredMember {
    /// Convert database row to an engine Member.
    pub fn into_member(self) -> Member {
        Member {
            id: self.id,
            name: self.name,
            membership_date: self.membership_date,
            available_book_amount: self.available_book_amount,
        }
    }
}

/// Insert a newly registered member.
pub async fn insert_member<'e, E>(executor: E, member: &NewMember) -> Result<Member, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let stored = sqlx::query_as::<_, StoredMember>(
        r#"
        INSERT INTO members (name, membership_date, available_book_amount)
        VALUES ($1, $2, $3)
        RETURNING id, name, membership_date, available_book_amount
        "#,
    )
    .bind(&member.name)
    .bind(member.membership_date)
    .bind(member.available_book_amount)
    .fetch_one(executor)
    .await?;

    Ok(stored.into_member())
}

/// Get a member by ID.
pub async fn get_member<'e, E>(executor: E, id: MemberId) -> Result<Option<Member>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let stored = sqlx::query_as::<_, StoredMember>(
        r#"
        SELECT id, name, membership_date, available_book_amount
        FROM members
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(stored.map(StoredMember::into_member))
}

/// Get a member by ID and lock the row until the transaction ends.
pub async fn lock_member<'e, E>(executor: E, id: MemberId) -> Result<Option<Member>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let stored = sqlx::query_as::<_, StoredMember>(
        r#"
        SELECT id, name, membership_date, available_book_amount
        FROM members
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(stored.map(StoredMember::into_member))
}

/// Overwrite the name. Returns `None` if the member does not exist.
pub async fn update_member_name<'e, E>(
    executor: E,
    id: MemberId,
    name: &str,
) -> Result<Option<Member>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let stored = sqlx::query_as::<_, StoredMember>(
        r#"
        UPDATE members SET name = $2
        WHERE id = $1
        RETURNING id, name, membership_date, available_book_amount
        "#,
    )
    .bind(id)
    .bind(name)
    .fetch_optional(executor)
    .await?;

    Ok(stored.map(StoredMember::into_member))
}

/// Store a new remaining quota.
pub async fn set_member_quota<'e, E>(
    executor: E,
    id: MemberId,
    available_book_amount: i32,
) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(r#"UPDATE members SET available_book_amount = $2 WHERE id = $1"#)
        .bind(id)
        .bind(available_book_amount)
        .execute(executor)
        .await?;

    Ok(())
}

/// Delete a member row.
pub async fn delete_member<'e, E>(executor: E, id: MemberId) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(r#"DELETE FROM members WHERE id = $1"#)
        .bind(id)
        .execute(executor)
        .await?;

    Ok(())
}

/// Get one page of members ordered by ID.
pub async fn list_members<'e, E>(executor: E, page: PageRequest) -> Result<Vec<Member>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let stored = sqlx::query_as::<_, StoredMember>(
        r#"
        SELECT id, name, membership_date, available_book_amount
        FROM members
        ORDER BY id ASC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(executor)
    .await?;

    Ok(stored.into_iter().map(StoredMember::into_member).collect())
}
