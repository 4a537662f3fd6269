//! Server-rendered account deletion form, linked from the deletion e-mail.

use axum::extract::{Form, State};
use axum::response::Html;
use tracing::{info, instrument};

use crate::error::AppError;
use crate::models::account::DeleteAccountForm;
use crate::models::shared::non_blank;
use crate::services::account::{self, OtpCheck};
use crate::services::member::find_member_by_email;
use crate::state::AppState;
use crate::utils::datetime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteRequestResult {
    MissingEmail,
    MemberNotFound,
    InvalidOtp,
    ExpiredOtp,
    Success,
}

impl DeleteRequestResult {
    pub fn code(self) -> &'static str {
        match self {
            DeleteRequestResult::MissingEmail => "missing_email",
            DeleteRequestResult::MemberNotFound => "member_not_found",
            DeleteRequestResult::InvalidOtp => "invalid_otp",
            DeleteRequestResult::ExpiredOtp => "expired_otp",
            DeleteRequestResult::Success => "success",
        }
    }

    fn message(self) -> &'static str {
        match self {
            DeleteRequestResult::MissingEmail => "Please enter the e-mail address of your account.",
            DeleteRequestResult::MemberNotFound => "No account matches this e-mail address.",
            DeleteRequestResult::InvalidOtp => "The code you entered is not valid.",
            DeleteRequestResult::ExpiredOtp => {
                "The code you entered has expired. Please request a new one from the app."
            }
            DeleteRequestResult::Success => {
                "Your request has been recorded. Your account will be deleted shortly."
            }
        }
    }
}

fn page(club_name: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\
         <html><head><meta charset=\"utf-8\"><title>{club_name} - Delete my account</title></head>\
         <body><h1>{club_name} - Delete my account</h1>{body}</body></html>"
    ))
}

#[instrument(skip(state))]
pub async fn delete_account_form(State(state): State<AppState>) -> Html<String> {
    info!("Displaying delete account form");
    page(
        &state.config.mail.club_name,
        "<form method=\"post\" action=\"/requestDeleteAccount\">\
         <p><label>E-mail <input type=\"email\" name=\"email\" required></label></p>\
         <p><label>Code <input type=\"text\" name=\"otp\" required></label></p>\
         <p><label>Reason <textarea name=\"reason\"></textarea></label></p>\
         <p><button type=\"submit\">Delete my account</button></p>\
         </form>",
    )
}

#[instrument(skip(state, form))]
pub async fn submit_delete_account(
    State(state): State<AppState>,
    Form(form): Form<DeleteAccountForm>,
) -> Result<Html<String>, AppError> {
    let result = process_delete_request(&state, &form).await?;
    info!(result = result.code(), "Delete account request processed");

    let body = format!(
        "<p id=\"result\" data-result=\"{}\">{}</p>",
        result.code(),
        result.message()
    );
    Ok(page(&state.config.mail.club_name, &body))
}

async fn process_delete_request(
    state: &AppState,
    form: &DeleteAccountForm,
) -> Result<DeleteRequestResult, AppError> {
    let Some(email) = non_blank(form.email.as_deref()) else {
        return Ok(DeleteRequestResult::MissingEmail);
    };
    let Some(member) = find_member_by_email(&state.db, email).await? else {
        return Ok(DeleteRequestResult::MemberNotFound);
    };

    let submitted = form.otp.as_deref().unwrap_or_default();
    let check = account::check_otp(
        &member,
        submitted,
        datetime::now(),
        state.config.auth.otp_validity_minutes,
    );
    match check {
        OtpCheck::Valid => {}
        OtpCheck::Expired => return Ok(DeleteRequestResult::ExpiredOtp),
        OtpCheck::Missing | OtpCheck::Mismatch => return Ok(DeleteRequestResult::InvalidOtp),
    }

    info!(
        member_id = member.id,
        %email,
        reason = form.reason.as_deref().unwrap_or_default(),
        "Account deletion requested"
    );
    account::clear_otp(&state.db, member).await?;
    Ok(DeleteRequestResult::Success)
}
