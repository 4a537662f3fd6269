//! Account lifecycle endpoints.
//!
//! Outcomes are reported as bare status codes so mobile clients can branch
//! on them directly. A member row committed before a failed e-mail still
//! counts as done, reported with `207 Multi-Status`.

use axum::{extract::State, http::StatusCode};
use tracing::{error, info, instrument};

use crate::error::{AppError, ErrorBody, ServiceError};
use crate::extractors::json::AppJson;
use crate::mail::{MailError, Recipient};
use crate::models::account::{
    CompleteRegistrationRequest, ConfirmEmailRequest, EmailRequest, PreRegisterRequest,
};
use crate::models::shared::non_blank;
use crate::services::account::{self, AccountStatus, OtpCheck};
use crate::services::member::find_member_by_email;
use crate::state::AppState;
use crate::utils::{datetime, hash};

fn mail_outcome(result: Result<(), MailError>, success: StatusCode, email: &str) -> StatusCode {
    match result {
        Ok(()) => success,
        Err(e) => {
            error!(%email, error = %e, "Failed to send e-mail");
            StatusCode::MULTI_STATUS
        }
    }
}

/// Which e-mail carries a freshly issued code.
#[derive(Debug, Clone, Copy)]
enum CodeMail {
    Registration,
    ForgotPassword,
    DeleteAccount,
}

/// Replace the member's pending code and mail it. `200` on success.
async fn issue_code(
    state: &AppState,
    email: Option<&str>,
    kind: CodeMail,
) -> Result<StatusCode, AppError> {
    let Some(email) = non_blank(email) else {
        return Ok(StatusCode::BAD_REQUEST);
    };
    let Some(member) = find_member_by_email(&state.db, email).await? else {
        info!(%email, "E-mail address has not been found");
        return Ok(StatusCode::NOT_FOUND);
    };

    let member = account::issue_otp(&state.db, member).await?;
    let otp = member.otp.as_deref().unwrap_or_default();
    let to = Recipient::from(&member);
    let sent = match kind {
        CodeMail::Registration => state.mail.send_registration_email(to, otp).await,
        CodeMail::ForgotPassword => state.mail.send_forgot_password_email(to, otp).await,
        CodeMail::DeleteAccount => state.mail.send_delete_account_otp_email(to, otp).await,
    };

    info!(email = %member.email, ?kind, "Code issued");
    Ok(mail_outcome(sent, StatusCode::OK, &member.email))
}

#[utoipa::path(
    post,
    path = "/checkAccount",
    tag = "Account",
    operation_id = "checkAccount",
    summary = "Report where an account stands in the registration flow",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Account exists and is registered"),
        (status = 302, description = "Not verified, a valid code is pending"),
        (status = 400, description = "Missing e-mail"),
        (status = 403, description = "Verified but no password yet"),
        (status = 404, description = "Unknown e-mail"),
        (status = 417, description = "Not verified and the pending code has expired"),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn check_account(
    State(state): State<AppState>,
    AppJson(payload): AppJson<EmailRequest>,
) -> Result<StatusCode, AppError> {
    let Some(email) = non_blank(payload.email.as_deref()) else {
        info!("No e-mail address specified");
        return Ok(StatusCode::BAD_REQUEST);
    };
    let Some(member) = find_member_by_email(&state.db, email).await? else {
        info!(%email, "E-mail address has not been found");
        return Ok(StatusCode::NOT_FOUND);
    };

    let status = account::account_status(
        &member,
        datetime::now(),
        state.config.auth.otp_validity_minutes,
    );
    info!(%email, ?status, "Account checked");

    Ok(match status {
        AccountStatus::OtpPending => StatusCode::FOUND,
        AccountStatus::OtpExpired => StatusCode::EXPECTATION_FAILED,
        AccountStatus::PasswordMissing => StatusCode::FORBIDDEN,
        AccountStatus::Registered => StatusCode::OK,
    })
}

#[utoipa::path(
    post,
    path = "/preRegister",
    tag = "Account",
    operation_id = "preRegister",
    summary = "Create an unverified account and e-mail a confirmation code",
    request_body = PreRegisterRequest,
    responses(
        (status = 201, description = "Account created and code sent"),
        (status = 207, description = "Account created but the e-mail could not be sent"),
        (status = 400, description = "Missing e-mail, first name or last name"),
        (status = 409, description = "E-mail already registered"),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn pre_register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<PreRegisterRequest>,
) -> Result<StatusCode, AppError> {
    let (Some(email), Some(first_name), Some(last_name)) = (
        non_blank(payload.email.as_deref()),
        non_blank(payload.first_name.as_deref()),
        non_blank(payload.last_name.as_deref()),
    ) else {
        info!("Missing e-mail, first name or last name");
        return Ok(StatusCode::BAD_REQUEST);
    };

    let member = match account::pre_register(&state.db, email, first_name, last_name).await {
        Ok(member) => member,
        Err(ServiceError::MemberEmailAlreadyExist) => {
            info!(%email, "A member already exists with this e-mail address");
            return Ok(StatusCode::CONFLICT);
        }
        Err(e) => return Err(e.into()),
    };

    let otp = member.otp.as_deref().unwrap_or_default();
    let sent = state
        .mail
        .send_registration_email(Recipient::from(&member), otp)
        .await;

    info!(email = %member.email, "Pre-registration done");
    Ok(mail_outcome(sent, StatusCode::CREATED, &member.email))
}

#[utoipa::path(
    post,
    path = "/resendOtp",
    tag = "Account",
    operation_id = "resendOtp",
    summary = "Issue a new confirmation code",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "New code sent"),
        (status = 207, description = "New code stored but the e-mail could not be sent"),
        (status = 400, description = "Missing e-mail"),
        (status = 404, description = "Unknown e-mail"),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn resend_otp(
    State(state): State<AppState>,
    AppJson(payload): AppJson<EmailRequest>,
) -> Result<StatusCode, AppError> {
    issue_code(&state, payload.email.as_deref(), CodeMail::Registration).await
}

#[utoipa::path(
    post,
    path = "/confirmEmail",
    tag = "Account",
    operation_id = "confirmEmail",
    summary = "Verify an e-mail address with the code it received",
    request_body = ConfirmEmailRequest,
    responses(
        (status = 202, description = "E-mail verified"),
        (status = 400, description = "Missing e-mail or code"),
        (status = 401, description = "No pending code, or the code does not match"),
        (status = 404, description = "Unknown e-mail"),
        (status = 406, description = "The code has expired"),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn confirm_email(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ConfirmEmailRequest>,
) -> Result<StatusCode, AppError> {
    let (Some(email), Some(otp)) = (
        non_blank(payload.email.as_deref()),
        non_blank(payload.otp.as_deref()),
    ) else {
        return Ok(StatusCode::BAD_REQUEST);
    };
    let Some(member) = find_member_by_email(&state.db, email).await? else {
        info!(%email, "E-mail address has not been found");
        return Ok(StatusCode::NOT_FOUND);
    };

    let check = account::check_otp(
        &member,
        otp,
        datetime::now(),
        state.config.auth.otp_validity_minutes,
    );
    match check {
        OtpCheck::Valid => {}
        OtpCheck::Expired => {
            info!(%email, "Code has expired");
            return Ok(StatusCode::NOT_ACCEPTABLE);
        }
        OtpCheck::Missing | OtpCheck::Mismatch => {
            info!(%email, ?check, "Code rejected");
            return Ok(StatusCode::UNAUTHORIZED);
        }
    }

    account::confirm_email(&state.db, member).await?;
    info!(%email, "E-mail address confirmed");
    Ok(StatusCode::ACCEPTED)
}

#[utoipa::path(
    post,
    path = "/completeRegistration",
    tag = "Account",
    operation_id = "completeRegistration",
    summary = "Set the password of a verified account",
    request_body = CompleteRegistrationRequest,
    responses(
        (status = 200, description = "Registration completed"),
        (status = 400, description = "Missing e-mail or password"),
        (status = 401, description = "Password already set and the code does not match"),
        (status = 403, description = "E-mail address not verified yet, or password already set and no code given"),
        (status = 404, description = "Unknown e-mail"),
        (status = 406, description = "Password already set and the code has expired"),
        (status = 500, description = "Password could not be hashed (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn complete_registration(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CompleteRegistrationRequest>,
) -> Result<StatusCode, AppError> {
    let Some(email) = non_blank(payload.email.as_deref()) else {
        return Ok(StatusCode::BAD_REQUEST);
    };
    let Some(password) = payload.password.as_deref().filter(|p| !p.trim().is_empty()) else {
        return Ok(StatusCode::BAD_REQUEST);
    };
    let Some(member) = find_member_by_email(&state.db, email).await? else {
        info!(%email, "E-mail address has not been found");
        return Ok(StatusCode::NOT_FOUND);
    };
    if !member.verified {
        info!(%email, "Registration attempted before e-mail confirmation");
        return Ok(StatusCode::FORBIDDEN);
    }
    if member.password.is_some() {
        // Replacing an existing password consumes the forgot-password code.
        let Some(otp) = non_blank(payload.otp.as_deref()) else {
            info!(%email, "Password change attempted without a code");
            return Ok(StatusCode::FORBIDDEN);
        };
        let check = account::check_otp(
            &member,
            otp,
            datetime::now(),
            state.config.auth.otp_validity_minutes,
        );
        match check {
            OtpCheck::Valid => {}
            OtpCheck::Expired => {
                info!(%email, "Code has expired");
                return Ok(StatusCode::NOT_ACCEPTABLE);
            }
            OtpCheck::Missing | OtpCheck::Mismatch => {
                info!(%email, ?check, "Code rejected");
                return Ok(StatusCode::UNAUTHORIZED);
            }
        }
    }

    let password_hash = hash::hash_password(password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;
    account::complete_registration(&state.db, member, password_hash).await?;

    info!(%email, "Registration completed");
    Ok(StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/forgotPassword",
    tag = "Account",
    operation_id = "forgotPassword",
    summary = "E-mail a code to choose a new password",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Code sent"),
        (status = 207, description = "Code stored but the e-mail could not be sent"),
        (status = 400, description = "Missing e-mail"),
        (status = 404, description = "Unknown e-mail"),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn forgot_password(
    State(state): State<AppState>,
    AppJson(payload): AppJson<EmailRequest>,
) -> Result<StatusCode, AppError> {
    issue_code(&state, payload.email.as_deref(), CodeMail::ForgotPassword).await
}

#[utoipa::path(
    post,
    path = "/requestDeleteAccountOtp",
    tag = "Account",
    operation_id = "requestDeleteAccountOtp",
    summary = "E-mail a code confirming an account deletion request",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Code sent"),
        (status = 207, description = "Code stored but the e-mail could not be sent"),
        (status = 400, description = "Missing e-mail"),
        (status = 404, description = "Unknown e-mail"),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn request_delete_account_otp(
    State(state): State<AppState>,
    AppJson(payload): AppJson<EmailRequest>,
) -> Result<StatusCode, AppError> {
    issue_code(&state, payload.email.as_deref(), CodeMail::DeleteAccount).await
}
