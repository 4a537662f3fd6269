//! Request bodies of the account lifecycle endpoints.
//!
//! Every field is optional so a missing value reaches the handler and is
//! answered with a bare `400` instead of a deserialization error.

use serde::Deserialize;

/// Body carrying only an e-mail address.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    #[schema(example = "jane.doe@example.com")]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreRegisterRequest {
    #[schema(example = "jane.doe@example.com")]
    pub email: Option<String>,
    #[schema(example = "Jane")]
    pub first_name: Option<String>,
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmEmailRequest {
    #[schema(example = "jane.doe@example.com")]
    pub email: Option<String>,
    /// Code received by e-mail.
    #[schema(example = "4821")]
    pub otp: Option<String>,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteRegistrationRequest {
    #[schema(example = "jane.doe@example.com")]
    pub email: Option<String>,
    #[schema(example = "s3cure_P@ss!")]
    pub password: Option<String>,
    /// Code from the forgot-password e-mail. Required once a password is set.
    #[schema(example = "4821")]
    pub otp: Option<String>,
}

/// Fields posted by the delete-account HTML form.
#[derive(Debug, Deserialize)]
pub struct DeleteAccountForm {
    pub email: Option<String>,
    pub otp: Option<String>,
    pub reason: Option<String>,
}
