use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    database::client::Db,
    entities::local_user_entity::{CreateUser, LocalUser, LocalUserDbService},
    middleware::{
        ctx::Ctx,
        error::{AppError, CtxResult},
    },
    utils::{jwt::JWT, validate_utils::validate_username},
};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct AuthRegisterInput {
    #[validate(custom(function = validate_username))]
    pub username: String,
    #[validate(length(min = 6, message = "Min 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "Min 1 character"))]
    pub full_name: Option<String>,
    #[validate(length(min = 6, message = "Min 6 characters"))]
    pub image_uri: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct AuthLoginInput {
    #[validate(custom(function = validate_username))]
    pub username: String,
    #[validate(length(min = 6, message = "Min 6 characters"))]
    pub password: String,
}

pub struct AuthService<'a> {
    ctx: &'a Ctx,
    jwt: &'a JWT,
    user_repository: LocalUserDbService<'a>,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a Db, ctx: &'a Ctx, jwt: &'a JWT) -> Self {
        AuthService {
            ctx,
            jwt,
            user_repository: LocalUserDbService { db, ctx },
        }
    }

    pub async fn register_password(
        &self,
        input: AuthRegisterInput,
    ) -> CtxResult<(String, LocalUser)> {
        input.validate().map_err(|e| {
            self.ctx.to_ctx_error(AppError::Generic {
                description: e.to_string(),
            })
        })?;

        if self
            .user_repository
            .exists_by_username(&input.username)
            .await?
        {
            return Err(self.ctx.to_ctx_error(AppError::RegisterFail {
                description: "The username is already used".to_string(),
            }));
        }

        let password_hash = hash_password(&input.password)
            .map_err(|description| self.ctx.to_ctx_error(AppError::Generic { description }))?;

        let user = self
            .user_repository
            .create(CreateUser {
                username: input.username,
                full_name: input.full_name,
                image_uri: input.image_uri,
                password_hash,
            })
            .await?;

        let token = self.build_jwt_token(&user.id.as_ref().unwrap().to_raw())?;
        Ok((token, user))
    }

    pub async fn login_password(&self, input: AuthLoginInput) -> CtxResult<(String, LocalUser)> {
        input.validate().map_err(|e| {
            self.ctx.to_ctx_error(AppError::Generic {
                description: e.to_string(),
            })
        })?;

        let credentials = self
            .user_repository
            .get_credentials_by_username(&input.username)
            .await?
            .ok_or_else(|| self.ctx.to_ctx_error(AppError::AuthenticationFail))?;

        if !verify_password(&credentials.password_hash, &input.password) {
            return Err(self.ctx.to_ctx_error(AppError::AuthenticationFail));
        }

        let user = self
            .user_repository
            .get_by_id(&credentials.id.to_raw())
            .await?;

        let token = self.build_jwt_token(&credentials.id.to_raw())?;
        Ok((token, user))
    }

    fn build_jwt_token(&self, user_id: &str) -> CtxResult<String> {
        self.jwt
            .create_by_login(user_id)
            .map_err(|e| self.ctx.to_ctx_error(e))
    }
}

fn hash_password(pwd: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(pwd.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| err.to_string())
}

fn verify_password(hash: &str, pwd: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(pwd.as_bytes(), &parsed_hash)
        .is_ok()
}
