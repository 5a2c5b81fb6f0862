//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod schedules;
mod stats;
mod submissions;
mod teacher_students;
mod users;

use crate::config::AppConfig;
use crate::errors::{Result, TutorDeskError};
use crate::models::PaginationInfo;
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Select,
};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| TutorDeskError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        // 内存数据库随连接存在，只能使用单个常驻连接
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("temp_store", "memory")
                .pragma("mmap_size", "536870912")
                .pragma("wal_autocheckpoint", "1000");

            SqlitePoolOptions::new()
                .max_connections(pool_size)
                .min_connections(1)
                .test_before_acquire(true)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(timeout))
            .connect_with(opt)
            .await
            .map_err(|e| TutorDeskError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(pool_size.min(5))
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| TutorDeskError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(TutorDeskError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 分页执行查询
    pub(crate) async fn paginate_select<E>(
        &self,
        select: Select<E>,
        page: i64,
        size: i64,
        what: &str,
    ) -> Result<(Vec<E::Model>, PaginationInfo)>
    where
        E: EntityTrait,
        E::Model: Sync + 'static,
    {
        let (page, size) = crate::models::normalize_pagination(page, size);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("查询{what}总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("查询{what}页数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("查询{what}列表失败: {e}")))?;

        Ok((items, PaginationInfo::new(page, size, total, pages)))
    }
}

/// 数据库错误转换，唯一约束冲突单独映射为 Conflict
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(DbErr) -> TutorDeskError {
    move |e| match e.sql_err() {
        Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
            TutorDeskError::conflict(format!("{context}: {detail}"))
        }
        _ => TutorDeskError::database_operation(format!("{context}: {e}")),
    }
}

// Storage trait 实现
use crate::models::{
    assignments::{
        entities::Assignment,
        requests::{AssignmentListParams, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
    schedules::{
        entities::TeacherSchedule,
        requests::{CreateScheduleRequest, ScheduleListParams, UpdateScheduleRequest},
        responses::ScheduleListResponse,
    },
    stats::{StudentStats, TeacherStats},
    submissions::{
        entities::Submission,
        requests::{CreateSubmissionRequest, SubmissionListParams},
        responses::SubmissionListResponse,
    },
    teacher_students::{
        entities::TeacherStudent, requests::TeacherStudentListParams,
        responses::TeacherStudentListResponse,
    },
    users::{
        entities::{Caller, User},
        requests::{CreateUser, UpdateUser, UserListParams},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUser) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn list_users_with_pagination(&self, query: UserListParams) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUser) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    // 师生关系模块
    async fn list_teacher_students(
        &self,
        caller: &Caller,
        query: TeacherStudentListParams,
    ) -> Result<TeacherStudentListResponse> {
        self.list_teacher_students_impl(caller, query).await
    }

    async fn get_teacher_student(
        &self,
        caller: &Caller,
        id: i64,
    ) -> Result<Option<TeacherStudent>> {
        self.get_teacher_student_impl(caller, id).await
    }

    async fn create_teacher_student(
        &self,
        caller: &Caller,
        student_id: i64,
    ) -> Result<TeacherStudent> {
        self.create_teacher_student_impl(caller, student_id).await
    }

    async fn delete_teacher_student(&self, caller: &Caller, id: i64) -> Result<bool> {
        self.delete_teacher_student_impl(caller, id).await
    }

    async fn is_student_linked(&self, teacher_id: i64, student_id: i64) -> Result<bool> {
        self.is_student_linked_impl(teacher_id, student_id).await
    }

    // 作业模块
    async fn list_assignments(
        &self,
        caller: &Caller,
        query: AssignmentListParams,
    ) -> Result<AssignmentListResponse> {
        self.list_assignments_impl(caller, query).await
    }

    async fn get_assignment(&self, caller: &Caller, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_impl(caller, id).await
    }

    async fn create_assignment(
        &self,
        caller: &Caller,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(caller, req).await
    }

    async fn update_assignment(
        &self,
        caller: &Caller,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(caller, id, update).await
    }

    async fn delete_assignment(&self, caller: &Caller, id: i64) -> Result<bool> {
        self.delete_assignment_impl(caller, id).await
    }

    // 提交模块
    async fn list_submissions(
        &self,
        caller: &Caller,
        query: SubmissionListParams,
    ) -> Result<SubmissionListResponse> {
        self.list_submissions_impl(caller, query).await
    }

    async fn get_submission(&self, caller: &Caller, id: i64) -> Result<Option<Submission>> {
        self.get_submission_impl(caller, id).await
    }

    async fn create_submission(
        &self,
        caller: &Caller,
        req: CreateSubmissionRequest,
    ) -> Result<Submission> {
        self.create_submission_impl(caller, req).await
    }

    async fn update_submission(
        &self,
        caller: &Caller,
        id: i64,
        content: String,
    ) -> Result<Option<Submission>> {
        self.update_submission_impl(caller, id, content).await
    }

    async fn review_submission(
        &self,
        caller: &Caller,
        id: i64,
        review_content: String,
    ) -> Result<Option<Submission>> {
        self.review_submission_impl(caller, id, review_content).await
    }

    async fn delete_submission(&self, caller: &Caller, id: i64) -> Result<bool> {
        self.delete_submission_impl(caller, id).await
    }

    // 时间安排模块
    async fn list_schedules(
        &self,
        caller: &Caller,
        query: ScheduleListParams,
    ) -> Result<ScheduleListResponse> {
        self.list_schedules_impl(caller, query).await
    }

    async fn get_schedule(&self, caller: &Caller, id: i64) -> Result<Option<TeacherSchedule>> {
        self.get_schedule_impl(caller, id).await
    }

    async fn create_schedule(
        &self,
        caller: &Caller,
        req: CreateScheduleRequest,
    ) -> Result<TeacherSchedule> {
        self.create_schedule_impl(caller, req).await
    }

    async fn update_schedule(
        &self,
        caller: &Caller,
        id: i64,
        update: UpdateScheduleRequest,
    ) -> Result<Option<TeacherSchedule>> {
        self.update_schedule_impl(caller, id, update).await
    }

    async fn delete_schedule(&self, caller: &Caller, id: i64) -> Result<bool> {
        self.delete_schedule_impl(caller, id).await
    }

    // 统计模块
    async fn teacher_stats(&self, caller: &Caller) -> Result<TeacherStats> {
        self.teacher_stats_impl(caller).await
    }

    async fn student_stats(&self, caller: &Caller) -> Result<StudentStats> {
        self.student_stats_impl(caller).await
    }
}
