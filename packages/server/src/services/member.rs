use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sea_orm::*;
use tracing::instrument;

use super::is_unique_violation;
use crate::entity::role::{DEFAULT_ROLE, Role};
use crate::entity::{attachment, event_member, lap_record, liked_news, member};
use crate::error::ServiceError;
use crate::models::shared::{contains_ignore_case, non_blank, normalize_email};
use crate::utils::datetime;

/// Settable member fields, overwritten as a whole on update.
#[derive(Debug, Clone)]
pub struct MemberInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub bike: Option<String>,
    pub active: bool,
    pub admin: bool,
    /// Base64-encoded avatar image.
    pub avatar_file: Option<String>,
    pub avatar_file_name: Option<String>,
}

/// Look up a member by ID.
pub async fn find_member<C: ConnectionTrait>(db: &C, id: i64) -> Result<member::Model, ServiceError> {
    member::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::MemberNotFound)
}

pub async fn find_member_by_email<C: ConnectionTrait>(
    db: &C,
    email: &str,
) -> Result<Option<member::Model>, DbErr> {
    member::Entity::find()
        .filter(member::Column::Email.eq(normalize_email(email)))
        .one(db)
        .await
}

#[instrument(skip(db))]
pub async fn get_all_members<C: ConnectionTrait>(db: &C) -> Result<Vec<member::Model>, ServiceError> {
    Ok(member::Entity::find()
        .order_by_asc(member::Column::Id)
        .all(db)
        .await?)
}

#[instrument(skip(db))]
pub async fn get_member_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<member::Model, ServiceError> {
    find_member(db, id).await
}

#[instrument(skip(db))]
pub async fn get_member_by_email<C: ConnectionTrait>(
    db: &C,
    email: &str,
) -> Result<member::Model, ServiceError> {
    find_member_by_email(db, email)
        .await?
        .ok_or(ServiceError::MemberNotFound)
}

/// Search first name, last name and e-mail. A blank filter returns everyone.
#[instrument(skip(db))]
pub async fn get_members_filtered<C: ConnectionTrait>(
    db: &C,
    text: Option<&str>,
) -> Result<Vec<member::Model>, ServiceError> {
    let mut select = member::Entity::find();

    if let Some(text) = non_blank(text) {
        select = select.filter(
            Condition::any()
                .add(contains_ignore_case(member::Column::FirstName, text))
                .add(contains_ignore_case(member::Column::LastName, text))
                .add(contains_ignore_case(member::Column::Email, text)),
        );
    }

    Ok(select.order_by_asc(member::Column::Id).all(db).await?)
}

fn decode_avatar(input: &MemberInput) -> Result<Option<(String, Vec<u8>)>, ServiceError> {
    let Some(encoded) = input.avatar_file.as_deref() else {
        return Ok(None);
    };
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|_| ServiceError::InvalidAvatar)?;
    let filename = input
        .avatar_file_name
        .clone()
        .unwrap_or_else(|| "avatar".to_string());
    Ok(Some((filename, bytes)))
}

/// Store `bytes` as the member's avatar, reusing the existing attachment row.
/// Returns the attachment id.
async fn store_avatar<C: ConnectionTrait>(
    db: &C,
    existing: Option<i64>,
    filename: String,
    bytes: Vec<u8>,
) -> Result<i64, DbErr> {
    let now = datetime::now();

    if let Some(id) = existing
        && let Some(current) = attachment::Entity::find_by_id(id).one(db).await?
    {
        let mut active: attachment::ActiveModel = current.into();
        active.filename = Set(filename);
        active.file = Set(bytes);
        active.upload_date = Set(now);
        return Ok(active.update(db).await?.id);
    }

    let model = attachment::ActiveModel {
        filename: Set(filename),
        file: Set(bytes),
        upload_date: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(model.id)
}

fn map_email_conflict(err: DbErr) -> ServiceError {
    if is_unique_violation(&err) {
        tracing::debug!("Unique constraint caught on member e-mail");
        ServiceError::MemberEmailAlreadyExist
    } else {
        ServiceError::from(err)
    }
}

#[instrument(skip(db, input), fields(email = %input.email))]
pub async fn create_member(
    db: &DatabaseConnection,
    input: MemberInput,
) -> Result<member::Model, ServiceError> {
    let email = normalize_email(&input.email);
    if find_member_by_email(db, &email).await?.is_some() {
        return Err(ServiceError::MemberEmailAlreadyExist);
    }
    let avatar = decode_avatar(&input)?;

    let txn = db.begin().await?;

    let attachment_id = match avatar {
        Some((filename, bytes)) => Some(store_avatar(&txn, None, filename, bytes).await?),
        None => None,
    };

    let now = datetime::now();
    let model = member::ActiveModel {
        first_name: Set(input.first_name),
        last_name: Set(input.last_name),
        email: Set(email),
        password: Set(None),
        phone: Set(input.phone),
        avatar_url: Set(None),
        bike: Set(input.bike),
        active: Set(input.active),
        verified: Set(false),
        admin: Set(input.admin),
        role: Set(DEFAULT_ROLE),
        otp: Set(None),
        otp_date: Set(None),
        attachment_id: Set(attachment_id),
        registration_date: Set(Some(now)),
        created_on: Set(now),
        modified_on: Set(None),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(map_email_conflict)?;

    txn.commit().await?;
    Ok(model)
}

#[instrument(skip(db, input), fields(email = %input.email))]
pub async fn update_member(
    db: &DatabaseConnection,
    id: i64,
    input: MemberInput,
) -> Result<member::Model, ServiceError> {
    let existing = find_member(db, id).await?;
    let avatar = decode_avatar(&input)?;

    let txn = db.begin().await?;

    let attachment_id = match avatar {
        Some((filename, bytes)) => {
            Some(store_avatar(&txn, existing.attachment_id, filename, bytes).await?)
        }
        None => existing.attachment_id,
    };

    let mut active: member::ActiveModel = existing.into();
    active.first_name = Set(input.first_name);
    active.last_name = Set(input.last_name);
    active.email = Set(normalize_email(&input.email));
    active.phone = Set(input.phone);
    active.bike = Set(input.bike);
    active.active = Set(input.active);
    active.admin = Set(input.admin);
    active.attachment_id = Set(attachment_id);
    active.modified_on = Set(Some(datetime::now()));

    let model = active.update(&txn).await.map_err(map_email_conflict)?;

    txn.commit().await?;
    Ok(model)
}

/// Delete a member with its likes, participations, lap records and avatar.
#[instrument(skip(db))]
pub async fn delete_member(db: &DatabaseConnection, id: i64) -> Result<member::Model, ServiceError> {
    let txn = db.begin().await?;

    let model = find_member(&txn, id).await?;

    liked_news::Entity::delete_many()
        .filter(liked_news::Column::MemberId.eq(id))
        .exec(&txn)
        .await?;
    event_member::Entity::delete_many()
        .filter(event_member::Column::MemberId.eq(id))
        .exec(&txn)
        .await?;
    lap_record::Entity::delete_many()
        .filter(lap_record::Column::MemberId.eq(id))
        .exec(&txn)
        .await?;
    member::Entity::delete_by_id(id).exec(&txn).await?;
    if let Some(attachment_id) = model.attachment_id {
        attachment::Entity::delete_by_id(attachment_id)
            .exec(&txn)
            .await?;
    }

    txn.commit().await?;
    Ok(model)
}

#[instrument(skip(db))]
pub async fn update_member_role(
    db: &DatabaseConnection,
    id: i64,
    role: Role,
) -> Result<member::Model, ServiceError> {
    let existing = find_member(db, id).await?;
    let mut active: member::ActiveModel = existing.into();
    active.role = Set(role);
    active.modified_on = Set(Some(datetime::now()));
    Ok(active.update(db).await?)
}

/// Replace (or create) the avatar of a member from raw bytes.
#[instrument(skip(db, bytes), fields(size = bytes.len()))]
pub async fn set_member_avatar(
    db: &DatabaseConnection,
    id: i64,
    filename: String,
    bytes: Vec<u8>,
) -> Result<member::Model, ServiceError> {
    let txn = db.begin().await?;

    let existing = find_member(&txn, id).await?;
    let attachment_id = store_avatar(&txn, existing.attachment_id, filename, bytes).await?;

    let mut active: member::ActiveModel = existing.into();
    active.attachment_id = Set(Some(attachment_id));
    active.modified_on = Set(Some(datetime::now()));
    let model = active.update(&txn).await?;

    txn.commit().await?;
    Ok(model)
}
