//! Domain primitives and ports.
//!
//! Purpose: define the user entity, its validated inputs and the store port
//! without any transport concerns. Adapters in `inbound` and `outbound`
//! depend on this module, never the other way round.
//!
//! Public surface:
//! - DomainError / ErrorCode: transport-agnostic failure type.
//! - User, UserId, UserName: the entity and its value types.
//! - NewUser, UserChanges, AgeChange: validated create and update inputs.
//! - TraceId: request correlation identifier.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::error::{DomainError, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    AgeChange, NewUser, USER_NAME_MIN, User, UserChanges, UserId, UserName, UserValidationError,
};

/// Convenient result alias for fallible domain and adapter operations.
pub type ApiResult<T> = Result<T, DomainError>;
