use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    database::client::Db,
    entities::{
        local_user_entity::LocalUserDbService,
        post_entity::{CreatePost, Post, PostDbService},
    },
    middleware::{
        ctx::Ctx,
        error::{AppError, CtxResult},
        utils::db_utils::Pagination,
    },
    utils::validate_utils::validate_content,
};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct PostInput {
    #[validate(custom(function = validate_content))]
    pub content: String,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CommentInput {
    #[validate(custom(function = validate_content))]
    pub content: String,
}

pub struct PostService<'a> {
    users_repository: LocalUserDbService<'a>,
    posts_repository: PostDbService<'a>,
}

impl<'a> PostService<'a> {
    pub fn new(db: &'a Db, ctx: &'a Ctx) -> Self {
        Self {
            users_repository: LocalUserDbService { db, ctx },
            posts_repository: PostDbService { db, ctx },
        }
    }

    pub async fn get_all(&self, pagination: Pagination) -> CtxResult<Vec<Post>> {
        self.posts_repository.get_all(pagination).await
    }

    pub async fn get_by_id(&self, post_id: &str) -> CtxResult<Post> {
        self.posts_repository.get_by_id(post_id).await
    }

    /// Author identity, display name and avatar always come from the stored
    /// user record, never from the request body.
    pub async fn create(&self, user_id: &str, data: PostInput) -> CtxResult<Post> {
        let user = self.users_repository.get_by_id(user_id).await?;

        self.posts_repository
            .create(CreatePost {
                id: PostDbService::get_new_post_thing(),
                created_by: user.id.as_ref().unwrap().clone(),
                username: user.username,
                image_uri: user.image_uri,
                content: data.content,
            })
            .await
    }

    pub async fn like(&self, user_id: &str, post_id: &str) -> CtxResult<Post> {
        let user = self.users_repository.get_by_id(user_id).await?;
        let post = self.posts_repository.get_thing(post_id)?;

        self.posts_repository
            .like(&post, user.id.as_ref().unwrap())
            .await
    }

    pub async fn unlike(&self, user_id: &str, post_id: &str) -> CtxResult<Post> {
        let user = self.users_repository.get_by_id(user_id).await?;
        let post = self.posts_repository.get_thing(post_id)?;

        self.posts_repository
            .unlike(&post, user.id.as_ref().unwrap())
            .await
    }

    pub async fn comment(
        &self,
        user_id: &str,
        post_id: &str,
        data: CommentInput,
    ) -> CtxResult<Post> {
        let user = self.users_repository.get_by_id(user_id).await?;
        let post = self.posts_repository.get_thing(post_id)?;

        self.posts_repository
            .add_comment(
                &post,
                &PostDbService::get_new_comment_id(),
                user.id.as_ref().unwrap(),
                &user.username,
                user.image_uri.clone(),
                &data.content,
            )
            .await
    }

    pub async fn remove_comment(
        &self,
        user_id: &str,
        post_id: &str,
        comment_id: &str,
    ) -> CtxResult<Post> {
        let _ = self.users_repository.get_by_id(user_id).await?;
        let post = self.posts_repository.get_thing(post_id)?;

        self.posts_repository.remove_comment(&post, comment_id).await
    }

    pub async fn delete(&self, user_id: &str, post_id: &str) -> CtxResult<()> {
        let user = self.users_repository.get_by_id(user_id).await?;
        let post = self.posts_repository.get_by_id(post_id).await?;

        if &post.created_by != user.id.as_ref().unwrap() {
            return Err(AppError::AuthorizationFail {
                required: "post owner".to_string(),
            }
            .into());
        }

        self.posts_repository
            .delete(post.id.as_ref().unwrap())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_content_fails_validation() {
        for content in ["", "   ", "\n\t "] {
            let input = PostInput {
                content: content.to_string(),
            };
            assert!(input.validate().is_err());

            let input = CommentInput {
                content: content.to_string(),
            };
            assert!(input.validate().is_err());
        }
    }
}
