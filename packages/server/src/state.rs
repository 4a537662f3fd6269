use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::graphql::{self, AppSchema};
use crate::mail::{MailService, Mailer};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub mail: MailService,
    pub schema: AppSchema,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: AppConfig, mailer: Arc<dyn Mailer>) -> Self {
        let mail = MailService::new(
            mailer,
            &config.mail.club_name,
            config.auth.otp_validity_minutes,
        );
        let schema = graphql::build_schema(db.clone());
        Self {
            db,
            config,
            mail,
            schema,
        }
    }
}
