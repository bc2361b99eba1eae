use std::ops::Deref;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{domain::models::Identity, routes::ApiError};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const ROLES_HEADER: &str = "x-user-roles";

/// The authenticated caller. Rejects with 401 when no user id was forwarded.
#[derive(Debug, Clone)]
pub struct AuthUser {
    identity: Identity,
}

impl AuthUser {
    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}

impl Deref for AuthUser {
    type Target = Identity;

    fn deref(&self) -> &Self::Target {
        &self.identity
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

        let roles = parts
            .headers
            .get(ROLES_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(parse_roles)
            .unwrap_or_default();

        Ok(AuthUser {
            identity: Identity::new(user_id, roles),
        })
    }
}

/// An authenticated caller holding the admin role. Rejects others with 403.
#[derive(Debug, Clone)]
pub struct AdminUser(AuthUser);

impl Deref for AdminUser {
    type Target = Identity;

    fn deref(&self) -> &Self::Target {
        &self.0.identity
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            return Err(ApiError::forbidden("Admin role required"));
        }
        Ok(AdminUser(user))
    }
}

fn parse_roles(header: &str) -> Vec<String> {
    header
        .split(',')
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use axum::http::{Request, StatusCode};

    use super::*;

    async fn extract<T>(headers: &[(&str, &str)]) -> Result<T, ApiError>
    where
        T: FromRequestParts<(), Rejection = ApiError>,
    {
        let mut builder = Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        T::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn missing_or_blank_user_is_unauthorized() {
        let err = extract::<AuthUser>(&[]).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);

        let err = extract::<AuthUser>(&[(USER_ID_HEADER, "  ")]).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn reads_user_and_roles() {
        let user = extract::<AuthUser>(&[(USER_ID_HEADER, "alice"), (ROLES_HEADER, "agent, admin,")])
            .await
            .unwrap();
        assert_eq!(user.user_id.as_str(), "alice");
        assert_eq!(user.roles, vec!["agent", "admin"]);
        assert!(user.is_admin());
    }

    #[tokio::test]
    async fn admin_requires_admin_role() {
        let err = extract::<AdminUser>(&[(USER_ID_HEADER, "bob"), (ROLES_HEADER, "agent")])
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);

        let admin = extract::<AdminUser>(&[(USER_ID_HEADER, "root"), (ROLES_HEADER, "admin")])
            .await
            .unwrap();
        assert_eq!(admin.user_id.as_str(), "root");
    }
}
