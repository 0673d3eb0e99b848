//! Request-scoped helpers built on the session: typed session access and the
//! authentication guard used by every protected handler.

pub mod auth;
pub mod session;

#[cfg(test)]
mod test;
