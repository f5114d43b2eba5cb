use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::{Id, Thing};

use crate::database::client::Db;
use crate::entities::local_user_entity;
use crate::middleware::ctx::Ctx;
use crate::middleware::error::{AppError, CtxError, CtxResult};
use crate::middleware::utils::db_utils::{record_exists, with_not_found_err, Pagination, QryOrder};
use crate::middleware::utils::string_utils::get_str_thing;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub user: Thing,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub user: Thing,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    // id is ULID for sorting by time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Thing>,
    pub created_by: Thing,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    pub content: String,
    #[serde(default)]
    pub likes: Vec<Like>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CreatePost {
    pub id: Thing,
    pub created_by: Thing,
    pub username: String,
    pub image_uri: Option<String>,
    pub content: String,
}

pub struct PostDbService<'a> {
    pub db: &'a Db,
    pub ctx: &'a Ctx,
}

pub const TABLE_NAME: &str = "post";

const TABLE_COL_USER: &str = local_user_entity::TABLE_NAME;

impl<'a> PostDbService<'a> {
    pub async fn mutate_db(&self) -> Result<(), AppError> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS created_by ON TABLE {TABLE_NAME} TYPE record<{TABLE_COL_USER}>;
    DEFINE FIELD IF NOT EXISTS username ON TABLE {TABLE_NAME} TYPE string;
    DEFINE FIELD IF NOT EXISTS image_uri ON TABLE {TABLE_NAME} TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS content ON TABLE {TABLE_NAME} TYPE string ASSERT string::len(string::trim($value))>0;
    DEFINE FIELD IF NOT EXISTS likes ON TABLE {TABLE_NAME} TYPE array<object> DEFAULT [];
    DEFINE FIELD IF NOT EXISTS likes.*.user ON TABLE {TABLE_NAME} TYPE record<{TABLE_COL_USER}>;
    DEFINE FIELD IF NOT EXISTS likes.*.created_at ON TABLE {TABLE_NAME} TYPE datetime;
    DEFINE FIELD IF NOT EXISTS comments ON TABLE {TABLE_NAME} TYPE array<object> DEFAULT [];
    DEFINE FIELD IF NOT EXISTS comments.*.id ON TABLE {TABLE_NAME} TYPE string;
    DEFINE FIELD IF NOT EXISTS comments.*.user ON TABLE {TABLE_NAME} TYPE record<{TABLE_COL_USER}>;
    DEFINE FIELD IF NOT EXISTS comments.*.username ON TABLE {TABLE_NAME} TYPE string;
    DEFINE FIELD IF NOT EXISTS comments.*.image_uri ON TABLE {TABLE_NAME} TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS comments.*.content ON TABLE {TABLE_NAME} TYPE string;
    DEFINE FIELD IF NOT EXISTS comments.*.created_at ON TABLE {TABLE_NAME} TYPE datetime;
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE $before OR time::now();
    DEFINE FIELD IF NOT EXISTS updated_at ON TABLE {TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE time::now();
    DEFINE INDEX IF NOT EXISTS created_by_idx ON TABLE {TABLE_NAME} COLUMNS created_by;
");
        let mutation = self.db.query(sql).await?;
        mutation.check()?;

        Ok(())
    }

    pub fn get_new_post_thing() -> Thing {
        // id is ULID for sorting by time
        Thing::from((TABLE_NAME.to_string(), Id::ulid()))
    }

    pub fn get_new_comment_id() -> String {
        Id::ulid().to_raw()
    }

    pub fn get_thing(&self, post_id: &str) -> CtxResult<Thing> {
        let thing = get_str_thing(post_id).map_err(|e| self.ctx.to_ctx_error(e))?;
        if thing.tb != TABLE_NAME {
            return Err(self.ctx.to_ctx_error(AppError::EntityFailIdNotFound {
                ident: post_id.to_string(),
            }));
        }
        Ok(thing)
    }

    pub async fn get_all(&self, pag: Pagination) -> CtxResult<Vec<Post>> {
        let order_dir = pag.order_dir.unwrap_or(QryOrder::DESC).to_string();
        let query = format!(
            "SELECT * FROM {TABLE_NAME} ORDER BY id {order_dir} LIMIT $limit START $start;"
        );
        let mut res = self
            .db
            .query(query)
            .bind(("limit", pag.count))
            .bind(("start", pag.start))
            .await
            .map_err(CtxError::from(self.ctx))?;
        let posts = res
            .take::<Vec<Post>>(0)
            .map_err(CtxError::from(self.ctx))?;
        Ok(posts)
    }

    pub async fn get_by_id(&self, post_id: &str) -> CtxResult<Post> {
        let thing = self.get_thing(post_id)?;
        let mut res = self
            .db
            .query("SELECT * FROM <record>$id;")
            .bind(("id", thing.to_raw()))
            .await
            .map_err(CtxError::from(self.ctx))?;
        let post = res
            .take::<Option<Post>>(0)
            .map_err(CtxError::from(self.ctx))?;
        with_not_found_err(post, self.ctx, &thing.to_raw())
    }

    pub async fn create(&self, data: CreatePost) -> CtxResult<Post> {
        let created: Option<Post> = self
            .db
            .create(TABLE_NAME)
            .content(data)
            .await
            .map_err(CtxError::from(self.ctx))?;
        created.ok_or_else(|| {
            self.ctx.to_ctx_error(AppError::Generic {
                description: "Post was not created".to_string(),
            })
        })
    }

    /// Prepend a like in a single conditional update. The match filter makes
    /// the uniqueness invariant hold under concurrent likes: the statement is
    /// a no-op when the user is already in the like list.
    pub async fn like(&self, post: &Thing, user: &Thing) -> CtxResult<Post> {
        record_exists(self.db, post)
            .await
            .map_err(CtxError::from(self.ctx))?;

        let query = "
            UPDATE <record>$post
            SET likes = array::prepend(likes, { user: <record>$user, created_at: time::now() })
            WHERE <record>$user NOTINSIDE likes.user
            RETURN AFTER;";
        let mut res = self
            .db
            .query(query)
            .bind(("post", post.to_raw()))
            .bind(("user", user.to_raw()))
            .await
            .map_err(CtxError::from(self.ctx))?;
        let updated = res
            .take::<Option<Post>>(0)
            .map_err(CtxError::from(self.ctx))?;
        updated.ok_or_else(|| {
            self.ctx.to_ctx_error(AppError::AlreadyLiked {
                post: post.to_raw(),
            })
        })
    }

    /// Pull the caller's like with a single conditional update. The filter
    /// keeps all other users' likes untouched.
    pub async fn unlike(&self, post: &Thing, user: &Thing) -> CtxResult<Post> {
        record_exists(self.db, post)
            .await
            .map_err(CtxError::from(self.ctx))?;

        let query = "
            UPDATE <record>$post
            SET likes = likes[WHERE user != <record>$user]
            WHERE <record>$user INSIDE likes.user
            RETURN AFTER;";
        let mut res = self
            .db
            .query(query)
            .bind(("post", post.to_raw()))
            .bind(("user", user.to_raw()))
            .await
            .map_err(CtxError::from(self.ctx))?;
        let updated = res
            .take::<Option<Post>>(0)
            .map_err(CtxError::from(self.ctx))?;
        updated.ok_or_else(|| {
            self.ctx.to_ctx_error(AppError::NotLiked {
                post: post.to_raw(),
            })
        })
    }

    pub async fn add_comment(
        &self,
        post: &Thing,
        comment_id: &str,
        user: &Thing,
        username: &str,
        image_uri: Option<String>,
        content: &str,
    ) -> CtxResult<Post> {
        let query = "
            UPDATE <record>$post
            SET comments = array::prepend(comments, {
                id: $comment_id,
                user: <record>$user,
                username: $username,
                image_uri: $image_uri,
                content: $content,
                created_at: time::now()
            })
            RETURN AFTER;";
        let mut res = self
            .db
            .query(query)
            .bind(("post", post.to_raw()))
            .bind(("comment_id", comment_id.to_string()))
            .bind(("user", user.to_raw()))
            .bind(("username", username.to_string()))
            .bind(("image_uri", image_uri))
            .bind(("content", content.to_string()))
            .await
            .map_err(CtxError::from(self.ctx))?;
        let updated = res
            .take::<Option<Post>>(0)
            .map_err(CtxError::from(self.ctx))?;
        with_not_found_err(updated, self.ctx, &post.to_raw())
    }

    pub async fn remove_comment(&self, post: &Thing, comment_id: &str) -> CtxResult<Post> {
        record_exists(self.db, post)
            .await
            .map_err(CtxError::from(self.ctx))?;

        let query = "
            UPDATE <record>$post
            SET comments = comments[WHERE id != $comment_id]
            WHERE $comment_id INSIDE comments.id
            RETURN AFTER;";
        let mut res = self
            .db
            .query(query)
            .bind(("post", post.to_raw()))
            .bind(("comment_id", comment_id.to_string()))
            .await
            .map_err(CtxError::from(self.ctx))?;
        let updated = res
            .take::<Option<Post>>(0)
            .map_err(CtxError::from(self.ctx))?;
        updated.ok_or_else(|| {
            self.ctx.to_ctx_error(AppError::CommentNotFound {
                ident: comment_id.to_string(),
            })
        })
    }

    pub async fn delete(&self, post: &Thing) -> CtxResult<()> {
        let _: Option<Post> = self
            .db
            .delete((post.tb.clone(), post.id.to_raw()))
            .await
            .map_err(CtxError::from(self.ctx))?;
        Ok(())
    }
}
