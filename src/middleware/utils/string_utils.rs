use surrealdb::sql::Thing;

use crate::middleware::error::{AppError, AppResult};

/// Parse a `table:id` string. A malformed id is reported the same way as a
/// missing record, so lookups by garbage ids stay a not-found response.
pub fn get_str_thing(value: &str) -> AppResult<Thing> {
    Thing::try_from(value).map_err(|_| AppError::EntityFailIdNotFound {
        ident: value.to_string(),
    })
}
