//! Background jobs run on a cron schedule alongside the HTTP server.

pub mod expiry;
