//! Test data builders

use chrono::{Duration, Utc};
use gatherly::database::repositories::{EventRepository, UserRepository};
use gatherly::models::event::{CreateEventRequest, Event};
use gatherly::models::user::{CreateUserRequest, User, UserRole};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a user account with a unique email
pub async fn create_user(pool: &PgPool, full_name: &str) -> User {
    create_user_with_role(pool, full_name, UserRole::User).await
}

/// Create an admin account with a unique email
pub async fn create_admin(pool: &PgPool, full_name: &str) -> User {
    create_user_with_role(pool, full_name, UserRole::Admin).await
}

async fn create_user_with_role(pool: &PgPool, full_name: &str, role: UserRole) -> User {
    let repo = UserRepository::new(pool.clone());
    repo.create(CreateUserRequest {
        email: format!("{}@test.example", Uuid::new_v4()),
        full_name: full_name.to_string(),
        role: Some(role.as_str().to_string()),
    })
    .await
    .expect("failed to create test user")
}

/// Create an upcoming event owned by `owner_id`
pub async fn create_event(pool: &PgPool, owner_id: i64, total_seats: i32) -> Event {
    let repo = EventRepository::new(pool.clone());
    repo.create(CreateEventRequest {
        title: format!("Test Event {}", Uuid::new_v4()),
        description: Some("An event created by the test suite".to_string()),
        event_date: Utc::now() + Duration::days(7),
        location: Some("Community Hall".to_string()),
        total_seats,
        created_by: owner_id,
    })
    .await
    .expect("failed to create test event")
}
