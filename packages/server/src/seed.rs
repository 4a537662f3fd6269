use sea_orm::*;
use sea_orm::sea_query::{Index, IndexCreateStatement, OnConflict, PostgresQueryBuilder};
use tracing::info;

use crate::config::BootstrapConfig;
use crate::entity::role::Role;
use crate::entity::{event, event_member, lap_record, liked_news, member};
use crate::models::shared::{is_blank, normalize_email};
use crate::utils::{datetime, hash};

struct StartupIndex {
    name: &'static str,
    /// Uniqueness the services rely on; startup fails without it.
    required: bool,
    statement: IndexCreateStatement,
}

fn startup_indexes() -> Vec<StartupIndex> {
    vec![
        StartupIndex {
            name: "uq_liked_news_member_news",
            required: true,
            statement: Index::create()
                .if_not_exists()
                .unique()
                .name("uq_liked_news_member_news")
                .table(liked_news::Entity)
                .col(liked_news::Column::MemberId)
                .col(liked_news::Column::NewsId)
                .to_owned(),
        },
        StartupIndex {
            name: "uq_event_member_member_event",
            required: true,
            statement: Index::create()
                .if_not_exists()
                .unique()
                .name("uq_event_member_member_event")
                .table(event_member::Entity)
                .col(event_member::Column::MemberId)
                .col(event_member::Column::EventId)
                .to_owned(),
        },
        // Calendar queries filter on the start timestamp.
        StartupIndex {
            name: "idx_event_start_date",
            required: false,
            statement: Index::create()
                .if_not_exists()
                .name("idx_event_start_date")
                .table(event::Entity)
                .col(event::Column::StartDate)
                .to_owned(),
        },
        StartupIndex {
            name: "idx_lap_record_track",
            required: false,
            statement: Index::create()
                .if_not_exists()
                .name("idx_lap_record_track")
                .table(lap_record::Entity)
                .col(lap_record::Column::TrackId)
                .to_owned(),
        },
        StartupIndex {
            name: "idx_lap_record_member",
            required: false,
            statement: Index::create()
                .if_not_exists()
                .name("idx_lap_record_member")
                .table(lap_record::Entity)
                .col(lap_record::Column::MemberId)
                .to_owned(),
        },
    ]
}

/// Create the indexes schema-sync does not derive from the entities.
///
/// A failing lookup index is logged and skipped. A failing unique index is
/// returned as an error, since likes and participations would no longer be
/// deduplicated.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    for index in startup_indexes() {
        let sql = index.statement.to_string(PostgresQueryBuilder);
        match db.execute_unprepared(&sql).await {
            Ok(_) => info!("Ensured index {} exists", index.name),
            Err(e) if index.required => {
                tracing::error!("Failed to create index {}: {}", index.name, e);
                return Err(e);
            }
            Err(e) => tracing::warn!("Failed to create index {}: {}", index.name, e),
        }
    }
    Ok(())
}

/// Insert the configured administrator if no member owns that e-mail yet.
pub async fn seed_bootstrap_admin(
    db: &DatabaseConnection,
    config: &BootstrapConfig,
) -> Result<(), DbErr> {
    let (Some(email), Some(password)) = (
        config.admin_email.as_deref(),
        config.admin_password.as_deref(),
    ) else {
        return Ok(());
    };
    if is_blank(Some(email)) || is_blank(Some(password)) {
        tracing::warn!("Bootstrap admin e-mail or password is blank, skipping");
        return Ok(());
    }

    let password_hash = hash::hash_password(password)
        .map_err(|e| DbErr::Custom(format!("Password hash error: {}", e)))?;
    let now = datetime::now();

    let model = member::ActiveModel {
        first_name: Set("Admin".to_string()),
        last_name: Set("Admin".to_string()),
        email: Set(normalize_email(email)),
        password: Set(Some(password_hash)),
        active: Set(true),
        verified: Set(true),
        admin: Set(true),
        role: Set(Role::Admin),
        registration_date: Set(Some(now)),
        created_on: Set(now),
        ..Default::default()
    };

    let result = member::Entity::insert(model)
        .on_conflict(
            OnConflict::column(member::Column::Email)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await;

    match result {
        Ok(0) | Err(DbErr::RecordNotInserted) => {}
        Ok(_) => info!("Seeded bootstrap admin {}", normalize_email(email)),
        Err(e) => return Err(e),
    }
    Ok(())
}
