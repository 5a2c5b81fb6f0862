use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

/// 存储接口
///
/// 除用户账户相关方法外，所有方法都显式接收调用者 [`Caller`]，
/// 结果集按调用者角色收窄：查询不到与无权访问统一表现为 `None` / `false`。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（密码已哈希）
    async fn create_user(&self, user: CreateUser) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListParams) -> Result<UserListResponse>;
    // 更新用户资料
    async fn update_user(&self, id: i64, update: UpdateUser) -> Result<Option<User>>;
    // 删除用户（级联删除其关联数据）
    async fn delete_user(&self, id: i64) -> Result<bool>;

    /// 师生关系方法
    async fn list_teacher_students(
        &self,
        caller: &Caller,
        query: TeacherStudentListParams,
    ) -> Result<TeacherStudentListResponse>;
    async fn get_teacher_student(&self, caller: &Caller, id: i64)
    -> Result<Option<TeacherStudent>>;
    // 教师添加学生
    async fn create_teacher_student(&self, caller: &Caller, student_id: i64)
    -> Result<TeacherStudent>;
    async fn delete_teacher_student(&self, caller: &Caller, id: i64) -> Result<bool>;
    // 学生是否属于该教师
    async fn is_student_linked(&self, teacher_id: i64, student_id: i64) -> Result<bool>;

    /// 作业方法
    async fn list_assignments(
        &self,
        caller: &Caller,
        query: AssignmentListParams,
    ) -> Result<AssignmentListResponse>;
    async fn get_assignment(&self, caller: &Caller, id: i64) -> Result<Option<Assignment>>;
    async fn create_assignment(
        &self,
        caller: &Caller,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    async fn update_assignment(
        &self,
        caller: &Caller,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    async fn delete_assignment(&self, caller: &Caller, id: i64) -> Result<bool>;

    /// 提交方法
    async fn list_submissions(
        &self,
        caller: &Caller,
        query: SubmissionListParams,
    ) -> Result<SubmissionListResponse>;
    async fn get_submission(&self, caller: &Caller, id: i64) -> Result<Option<Submission>>;
    // 作业不在调用者范围内时返回 NotFound，且不写入任何数据
    async fn create_submission(
        &self,
        caller: &Caller,
        req: CreateSubmissionRequest,
    ) -> Result<Submission>;
    async fn update_submission(
        &self,
        caller: &Caller,
        id: i64,
        content: String,
    ) -> Result<Option<Submission>>;
    // 教师批阅
    async fn review_submission(
        &self,
        caller: &Caller,
        id: i64,
        review_content: String,
    ) -> Result<Option<Submission>>;
    async fn delete_submission(&self, caller: &Caller, id: i64) -> Result<bool>;

    /// 教师时间安排方法
    async fn list_schedules(
        &self,
        caller: &Caller,
        query: ScheduleListParams,
    ) -> Result<ScheduleListResponse>;
    async fn get_schedule(&self, caller: &Caller, id: i64) -> Result<Option<TeacherSchedule>>;
    async fn create_schedule(
        &self,
        caller: &Caller,
        req: CreateScheduleRequest,
    ) -> Result<TeacherSchedule>;
    async fn update_schedule(
        &self,
        caller: &Caller,
        id: i64,
        update: UpdateScheduleRequest,
    ) -> Result<Option<TeacherSchedule>>;
    async fn delete_schedule(&self, caller: &Caller, id: i64) -> Result<bool>;

    /// 统计方法
    async fn teacher_stats(&self, caller: &Caller) -> Result<TeacherStats>;
    async fn student_stats(&self, caller: &Caller) -> Result<StudentStats>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
