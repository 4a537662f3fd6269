use async_graphql::{Context, Object, Result, ResultExt};
use sea_orm::DatabaseConnection;
use tracing::info;

use super::guard::RoleGuard;
use super::scalars::Long;
use super::types::Member;
use crate::entity::role::Role;
use crate::error::ServiceError;
use crate::services::member::{self as service, MemberInput};

#[derive(Default)]
pub struct MemberQuery;

#[Object]
impl MemberQuery {
    #[graphql(guard = "RoleGuard::new(Role::Member)")]
    async fn get_all_members(&self, ctx: &Context<'_>) -> Result<Vec<Member>> {
        info!("Received call to getAllMembers");
        let db = ctx.data::<DatabaseConnection>()?;
        let members = service::get_all_members(db).await.extend()?;
        Ok(members.into_iter().map(Member).collect())
    }

    #[graphql(guard = "RoleGuard::new(Role::Member)")]
    async fn get_member_by_id(&self, ctx: &Context<'_>, id: Long) -> Result<Member> {
        info!(id = id.0, "Received call to getMemberById");
        let db = ctx.data::<DatabaseConnection>()?;
        Ok(Member(service::get_member_by_id(db, id.0).await.extend()?))
    }

    /// Available to any signed-in user so a fresh account can load itself.
    #[graphql(guard = "RoleGuard::new(Role::User)")]
    async fn get_member_by_email(&self, ctx: &Context<'_>, email: String) -> Result<Member> {
        info!(%email, "Received call to getMemberByEmail");
        let db = ctx.data::<DatabaseConnection>()?;
        Ok(Member(
            service::get_member_by_email(db, &email).await.extend()?,
        ))
    }

    #[graphql(guard = "RoleGuard::new(Role::Member)")]
    async fn get_members_filtered(
        &self,
        ctx: &Context<'_>,
        text: Option<String>,
    ) -> Result<Vec<Member>> {
        info!(?text, "Received call to getMembersFiltered");
        let db = ctx.data::<DatabaseConnection>()?;
        let members = service::get_members_filtered(db, text.as_deref())
            .await
            .extend()?;
        Ok(members.into_iter().map(Member).collect())
    }
}

#[derive(Default)]
pub struct MemberMutation;

#[Object]
impl MemberMutation {
    #[graphql(guard = "RoleGuard::new(Role::Admin)")]
    async fn create_member(
        &self,
        ctx: &Context<'_>,
        first_name: String,
        last_name: String,
        email: String,
        phone: Option<String>,
        avatar_file: Option<String>,
        avatar_file_name: Option<String>,
        bike: Option<String>,
        #[graphql(default)] active: bool,
        #[graphql(default)] admin: bool,
    ) -> Result<Member> {
        info!(%first_name, %last_name, %email, active, admin, "Received call to createMember");
        let db = ctx.data::<DatabaseConnection>()?;
        let input = MemberInput {
            first_name,
            last_name,
            email,
            phone,
            bike,
            active,
            admin,
            avatar_file,
            avatar_file_name,
        };
        Ok(Member(service::create_member(db, input).await.extend()?))
    }

    #[graphql(guard = "RoleGuard::new(Role::Admin)")]
    async fn update_member(
        &self,
        ctx: &Context<'_>,
        member_id: Long,
        first_name: String,
        last_name: String,
        email: String,
        phone: Option<String>,
        avatar_file: Option<String>,
        avatar_file_name: Option<String>,
        bike: Option<String>,
        #[graphql(default)] active: bool,
        #[graphql(default)] admin: bool,
    ) -> Result<Member> {
        info!(member_id = member_id.0, %email, active, admin, "Received call to updateMember");
        let db = ctx.data::<DatabaseConnection>()?;
        let input = MemberInput {
            first_name,
            last_name,
            email,
            phone,
            bike,
            active,
            admin,
            avatar_file,
            avatar_file_name,
        };
        Ok(Member(
            service::update_member(db, member_id.0, input)
                .await
                .extend()?,
        ))
    }

    #[graphql(guard = "RoleGuard::new(Role::Admin)")]
    async fn delete_member(&self, ctx: &Context<'_>, member_id: Long) -> Result<Member> {
        info!(member_id = member_id.0, "Received call to deleteMember");
        let db = ctx.data::<DatabaseConnection>()?;
        Ok(Member(
            service::delete_member(db, member_id.0).await.extend()?,
        ))
    }

    /// Promote or demote a member. `role` is `ROLE_USER`, `ROLE_MEMBER` or `ROLE_ADMIN`.
    #[graphql(guard = "RoleGuard::new(Role::Admin)")]
    async fn update_member_role(
        &self,
        ctx: &Context<'_>,
        member_id: Long,
        role: String,
    ) -> Result<Member> {
        info!(member_id = member_id.0, %role, "Received call to updateMemberRole");
        let db = ctx.data::<DatabaseConnection>()?;
        let role = Role::parse(&role)
            .ok_or_else(|| ServiceError::InvalidRole(role.clone()))
            .extend()?;
        Ok(Member(
            service::update_member_role(db, member_id.0, role)
                .await
                .extend()?,
        ))
    }
}
