use std::sync::Arc;

use chrono::{Duration, Utc};

use rust_tutordesk::cache::ObjectCache;
use rust_tutordesk::cache::object_cache::moka::MokaCacheWrapper;
use rust_tutordesk::models::assignments::entities::Assignment;
use rust_tutordesk::models::assignments::requests::CreateAssignmentRequest;
use rust_tutordesk::models::users::entities::{Caller, User, UserRole};
use rust_tutordesk::models::users::requests::CreateUser;
use rust_tutordesk::storage::Storage;
use rust_tutordesk::storage::sea_orm_storage::SeaOrmStorage;
use rust_tutordesk::utils::password::hash_password;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// 每个测试独占一个内存数据库
pub async fn storage() -> Arc<dyn Storage> {
    let storage = SeaOrmStorage::connect("sqlite::memory:", 1, 5)
        .await
        .expect("Failed to open in-memory database");
    Arc::new(storage)
}

pub fn cache() -> Arc<dyn ObjectCache> {
    Arc::new(MokaCacheWrapper::with_capacity(1_000, 3_600))
}

pub async fn user(storage: &Arc<dyn Storage>, username: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUser {
            username: username.to_string(),
            password_hash: hash_password(TEST_PASSWORD).expect("hash"),
            role,
            full_name: username.to_uppercase(),
            avatar: None,
            phone_number: None,
        })
        .await
        .expect("Failed to create user")
}

pub async fn teacher(storage: &Arc<dyn Storage>, username: &str) -> (User, Caller) {
    let user = user(storage, username, UserRole::Teacher).await;
    let caller = user.caller();
    (user, caller)
}

pub async fn student(storage: &Arc<dyn Storage>, username: &str) -> (User, Caller) {
    let user = user(storage, username, UserRole::Student).await;
    let caller = user.caller();
    (user, caller)
}

pub async fn link(storage: &Arc<dyn Storage>, teacher: &Caller, student_id: i64) {
    storage
        .create_teacher_student(teacher, student_id)
        .await
        .expect("Failed to link student");
}

pub fn new_assignment(title: &str, student_id: Option<i64>) -> CreateAssignmentRequest {
    CreateAssignmentRequest {
        title: title.to_string(),
        description: String::new(),
        due_date: Utc::now() + Duration::days(7),
        student_id,
        status: None,
    }
}

pub async fn assignment(
    storage: &Arc<dyn Storage>,
    teacher: &Caller,
    title: &str,
    student_id: Option<i64>,
) -> Assignment {
    storage
        .create_assignment(teacher, new_assignment(title, student_id))
        .await
        .expect("Failed to create assignment")
}
