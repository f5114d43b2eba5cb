use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::err::Error::IndexExists;
use surrealdb::sql::Thing;
use surrealdb::Error as ErrorSrl;

use crate::database::client::Db;
use crate::middleware::ctx::Ctx;
use crate::middleware::error::{AppError, CtxError, CtxResult};
use crate::middleware::utils::db_utils::with_not_found_err;
use crate::middleware::utils::string_utils::get_str_thing;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocalUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Thing>,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CreateUser {
    pub username: String,
    pub full_name: Option<String>,
    pub image_uri: Option<String>,
    pub password_hash: String,
}

/// Login-only view carrying the stored password hash.
#[derive(Debug, Deserialize)]
pub struct LocalUserCredentials {
    pub id: Thing,
    pub username: String,
    pub password_hash: String,
}

pub struct LocalUserDbService<'a> {
    pub db: &'a Db,
    pub ctx: &'a Ctx,
}

pub const TABLE_NAME: &str = "local_user";

impl<'a> LocalUserDbService<'a> {
    pub async fn mutate_db(&self) -> Result<(), AppError> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS username ON TABLE {TABLE_NAME} TYPE string VALUE string::lowercase($value);
    DEFINE FIELD IF NOT EXISTS full_name ON TABLE {TABLE_NAME} TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS image_uri ON TABLE {TABLE_NAME} TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS password_hash ON TABLE {TABLE_NAME} TYPE string;
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE $before OR time::now();
    DEFINE INDEX IF NOT EXISTS local_user_username_idx ON TABLE {TABLE_NAME} COLUMNS username UNIQUE;
");
        let mutation = self.db.query(sql).await?;
        mutation.check()?;

        Ok(())
    }

    pub async fn get_by_id(&self, id: &str) -> CtxResult<LocalUser> {
        let thing = match get_str_thing(id) {
            Ok(thing) if thing.tb == TABLE_NAME => thing,
            _ => Thing::from((TABLE_NAME, id)),
        };
        let mut res = self
            .db
            .query("SELECT * FROM <record>$id;")
            .bind(("id", thing.to_raw()))
            .await
            .map_err(CtxError::from(self.ctx))?;
        let user = res
            .take::<Option<LocalUser>>(0)
            .map_err(CtxError::from(self.ctx))?;
        with_not_found_err(user, self.ctx, &thing.to_raw())
    }

    pub async fn get_credentials_by_username(
        &self,
        username: &str,
    ) -> CtxResult<Option<LocalUserCredentials>> {
        let mut res = self
            .db
            .query(format!(
                "SELECT id, username, password_hash FROM {TABLE_NAME} WHERE username=$username;"
            ))
            .bind(("username", username.to_lowercase()))
            .await
            .map_err(CtxError::from(self.ctx))?;
        let user = res
            .take::<Option<LocalUserCredentials>>(0)
            .map_err(CtxError::from(self.ctx))?;
        Ok(user)
    }

    pub async fn exists_by_username(&self, username: &str) -> CtxResult<bool> {
        let mut res = self
            .db
            .query(format!(
                "SELECT id FROM {TABLE_NAME} WHERE username=$username;"
            ))
            .bind(("username", username.to_lowercase()))
            .await
            .map_err(CtxError::from(self.ctx))?;
        let found = res
            .take::<Option<Thing>>((0, "id"))
            .map_err(CtxError::from(self.ctx))?;
        Ok(found.is_some())
    }

    pub async fn create(&self, data: CreateUser) -> CtxResult<LocalUser> {
        let created: Option<LocalUser> = self
            .db
            .create(TABLE_NAME)
            .content(data)
            .await
            .map_err(|e| match e {
                ErrorSrl::Db(IndexExists { .. }) => self.ctx.to_ctx_error(AppError::RegisterFail {
                    description: "The username is already used".to_string(),
                }),
                _ => CtxError::from(self.ctx)(e),
            })?;
        created.ok_or_else(|| {
            self.ctx.to_ctx_error(AppError::RegisterFail {
                description: "User was not created".to_string(),
            })
        })
    }
}
