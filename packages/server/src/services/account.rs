//! Account lifecycle: pre-registration, OTP issue/check, e-mail
//! confirmation and password completion.
//!
//! Status decisions are pure functions over the stored member so the REST
//! handlers only translate them into status codes.

use chrono::NaiveDateTime;
use sea_orm::*;
use tracing::instrument;

use super::is_unique_violation;
use super::member::find_member_by_email;
use crate::entity::member;
use crate::entity::role::DEFAULT_ROLE;
use crate::error::ServiceError;
use crate::models::shared::normalize_email;
use crate::utils::{datetime, otp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    /// Not verified, and the pending code is still usable.
    OtpPending,
    /// Not verified, and the pending code has expired.
    OtpExpired,
    /// Verified but no password chosen yet.
    PasswordMissing,
    Registered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpCheck {
    Valid,
    Missing,
    Expired,
    Mismatch,
}

fn status_of(
    verified: bool,
    has_password: bool,
    pending_otp: Option<Option<NaiveDateTime>>,
    now: NaiveDateTime,
    validity_minutes: i64,
) -> AccountStatus {
    if !verified && let Some(issued_at) = pending_otp {
        return match issued_at {
            Some(issued_at) if !otp::is_expired(issued_at, now, validity_minutes) => {
                AccountStatus::OtpPending
            }
            _ => AccountStatus::OtpExpired,
        };
    }
    if verified && !has_password {
        return AccountStatus::PasswordMissing;
    }
    // Also reached by an unverified member whose code was consumed, e.g. by
    // a delete-account request.
    AccountStatus::Registered
}

/// Where `member` stands in the registration flow at `now`.
pub fn account_status(
    member: &member::Model,
    now: NaiveDateTime,
    validity_minutes: i64,
) -> AccountStatus {
    status_of(
        member.verified,
        member.password.is_some(),
        member.otp.as_ref().map(|_| member.otp_date),
        now,
        validity_minutes,
    )
}

fn check_code(
    stored: Option<&str>,
    issued_at: Option<NaiveDateTime>,
    submitted: &str,
    now: NaiveDateTime,
    validity_minutes: i64,
) -> OtpCheck {
    let Some(stored) = stored else {
        return OtpCheck::Missing;
    };
    match issued_at {
        Some(issued_at) if !otp::is_expired(issued_at, now, validity_minutes) => {}
        _ => return OtpCheck::Expired,
    }
    if otp::matches(stored, submitted) {
        OtpCheck::Valid
    } else {
        OtpCheck::Mismatch
    }
}

/// Compare `submitted` with the member's pending code.
pub fn check_otp(
    member: &member::Model,
    submitted: &str,
    now: NaiveDateTime,
    validity_minutes: i64,
) -> OtpCheck {
    check_code(
        member.otp.as_deref(),
        member.otp_date,
        submitted,
        now,
        validity_minutes,
    )
}

/// Create an unverified, inactive member holding a fresh OTP.
#[instrument(skip(db))]
pub async fn pre_register<C: ConnectionTrait>(
    db: &C,
    email: &str,
    first_name: &str,
    last_name: &str,
) -> Result<member::Model, ServiceError> {
    let email = normalize_email(email);
    if find_member_by_email(db, &email).await?.is_some() {
        return Err(ServiceError::MemberEmailAlreadyExist);
    }

    let now = datetime::now();
    member::ActiveModel {
        first_name: Set(first_name.trim().to_string()),
        last_name: Set(last_name.trim().to_string()),
        email: Set(email),
        password: Set(None),
        active: Set(false),
        verified: Set(false),
        admin: Set(false),
        role: Set(DEFAULT_ROLE),
        otp: Set(Some(otp::generate())),
        otp_date: Set(Some(now)),
        created_on: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            tracing::debug!("Pre-registration race condition: unique constraint caught on insert");
            ServiceError::MemberEmailAlreadyExist
        } else {
            ServiceError::from(e)
        }
    })
}

/// Replace the member's pending code with a fresh one.
#[instrument(skip(db, member), fields(member_id = member.id))]
pub async fn issue_otp<C: ConnectionTrait>(
    db: &C,
    member: member::Model,
) -> Result<member::Model, ServiceError> {
    let mut active: member::ActiveModel = member.into();
    active.otp = Set(Some(otp::generate()));
    active.otp_date = Set(Some(datetime::now()));
    Ok(active.update(db).await?)
}

#[instrument(skip(db, member), fields(member_id = member.id))]
pub async fn clear_otp<C: ConnectionTrait>(
    db: &C,
    member: member::Model,
) -> Result<member::Model, ServiceError> {
    let mut active: member::ActiveModel = member.into();
    active.otp = Set(None);
    active.otp_date = Set(None);
    Ok(active.update(db).await?)
}

/// Consume the pending code and mark the e-mail address as verified.
#[instrument(skip(db, member), fields(member_id = member.id))]
pub async fn confirm_email<C: ConnectionTrait>(
    db: &C,
    member: member::Model,
) -> Result<member::Model, ServiceError> {
    let mut active: member::ActiveModel = member.into();
    active.otp = Set(None);
    active.otp_date = Set(None);
    active.verified = Set(true);
    active.modified_on = Set(Some(datetime::now()));
    Ok(active.update(db).await?)
}

/// Store the password hash, consume any pending code and activate the
/// account.
#[instrument(skip(db, member, password_hash), fields(member_id = member.id))]
pub async fn complete_registration<C: ConnectionTrait>(
    db: &C,
    member: member::Model,
    password_hash: String,
) -> Result<member::Model, ServiceError> {
    let now = datetime::now();
    let first_registration = member.registration_date.is_none();
    let mut active: member::ActiveModel = member.into();
    active.password = Set(Some(password_hash));
    active.otp = Set(None);
    active.otp_date = Set(None);
    active.active = Set(true);
    if first_registration {
        active.registration_date = Set(Some(now));
    }
    active.modified_on = Set(Some(now));
    Ok(active.update(db).await?)
}
