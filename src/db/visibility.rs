//! Ownership-scoped reads.
//!
//! Every list or lookup that serves a user goes through [`VisibleTo`], so the
//! only visibility predicate is the one derived here from the caller's id.
//! Handlers must pass the authenticated user's id, never a value taken from
//! the request.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Select};

use crate::db::entities::{conversation, message, tag};

pub trait VisibleTo: EntityTrait {
    /// Selects the rows of this entity that `caller_id` is allowed to see.
    fn visible_to(caller_id: i32) -> Select<Self>;
}

impl VisibleTo for conversation::Entity {
    fn visible_to(caller_id: i32) -> Select<Self> {
        Self::find().filter(conversation::Column::OwnerId.eq(caller_id))
    }
}

impl VisibleTo for message::Entity {
    // Messages have no owner of their own; they inherit their conversation's.
    fn visible_to(caller_id: i32) -> Select<Self> {
        Self::find()
            .inner_join(conversation::Entity)
            .filter(conversation::Column::OwnerId.eq(caller_id))
    }
}

impl VisibleTo for tag::Entity {
    fn visible_to(caller_id: i32) -> Select<Self> {
        Self::find().filter(tag::Column::OwnerId.eq(caller_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn conversations_are_filtered_by_owner() {
        let sql = conversation::Entity::visible_to(7)
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains(r#"FROM "conversations""#), "{sql}");
        assert!(sql.contains(r#"WHERE "conversations"."owner_id" = 7"#), "{sql}");
    }

    #[test]
    fn messages_are_filtered_through_their_conversation() {
        let sql = message::Entity::visible_to(7)
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains(r#"FROM "messages""#), "{sql}");
        assert!(sql.contains(r#"INNER JOIN "conversations""#), "{sql}");
        assert!(sql.contains(r#""conversations"."owner_id" = 7"#), "{sql}");
    }

    #[test]
    fn tags_are_filtered_by_owner() {
        let sql = tag::Entity::visible_to(42)
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains(r#"WHERE "tags"."owner_id" = 42"#), "{sql}");
    }
}
