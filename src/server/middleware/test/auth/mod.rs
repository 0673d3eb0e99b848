use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::{
        auth::{ensure_owner, AuthGuard, Permission},
        session::AuthSession,
    },
};
use test_utils::{builder::TestBuilder, factory};

mod optional;
mod require;
