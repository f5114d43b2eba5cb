pub mod local_user_entity;
pub mod post_entity;
