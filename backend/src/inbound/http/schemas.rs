//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`; the wrappers here mirror their
//! serialised shape so the framework dependency stays at the edge.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Identifier assigned on creation.
    #[schema(example = 1)]
    id: i64,
    /// Name, at least three characters.
    #[schema(example = "Alice")]
    name: String,
    /// Age in years, `null` when unknown.
    #[schema(example = 12)]
    age: Option<i64>,
}
