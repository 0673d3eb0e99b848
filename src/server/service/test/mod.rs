use chrono::{Duration, NaiveDate, Utc};
use sea_orm::{DatabaseConnection, EntityTrait};
use tempfile::TempDir;
use test_utils::{
    builder::TestBuilder,
    factory::{self, booking::BookingFactory, car::CarFactory, user::UserFactory},
};

use crate::{
    model::enums::{App, BookingStatus, UserType},
    server::{
        config::Config,
        data::user::UserRepository,
        error::{auth::AuthError, AppError},
        model::user::{SignUpParams, User},
        service::{
            mail::{Email, Mailer},
            push::PushService,
            storage::FileStorage,
        },
    },
};

mod auth;
mod booking;
mod location;
mod notification;

/// Collaborators shared by the services under test: configuration, a memory
/// mailer, a push service without access token and file storage in a temp dir.
struct Fixture {
    config: Config,
    mailer: Mailer,
    push: PushService,
    storage: FileStorage,
    _cdn: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let cdn = tempfile::tempdir().unwrap();
        let config = Config::for_tests(cdn.path().to_path_buf());

        Self {
            storage: FileStorage::new(cdn.path().to_path_buf()),
            config,
            mailer: Mailer::memory(),
            push: PushService::new(reqwest::Client::new(), None),
            _cdn: cdn,
        }
    }
}

/// Loads the domain model of a user created by a factory.
async fn user(db: &DatabaseConnection, id: i32) -> User {
    UserRepository::new(db).find_by_id(id).await.unwrap().unwrap()
}

/// Extracts the token of the link mailed in an email.
fn token_of(email: &Email) -> String {
    email
        .html
        .split("&amp;t=")
        .nth(1)
        .unwrap()
        .chars()
        .take_while(char::is_ascii_alphanumeric)
        .collect()
}

fn sign_up_params(email: &str) -> SignUpParams {
    SignUpParams {
        full_name: "Jane Doe".to_string(),
        email: email.to_string(),
        password: "secret123".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1990, 4, 2),
        phone: None,
        language: None,
    }
}
