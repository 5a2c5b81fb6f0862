//! 访问策略
//!
//! 每个请求在执行任何查询之前按调用者角色做一次判定：
//! 路由层通过 [`RequireRole`](crate::middlewares::RequireRole) 中间件应用，
//! 存储层在写操作入口再次调用 [`AccessPolicy::authorize`]。

use crate::errors::{Result, TutorDeskError};
use crate::models::users::entities::{Caller, UserRole};

/// 访问策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    TeacherOnly,
    StudentOnly,
    TeacherOrStudent,
}

/// 调用者是否为教师
pub fn is_teacher(caller: Option<&Caller>) -> bool {
    matches!(caller, Some(c) if c.role == UserRole::Teacher)
}

/// 调用者是否为学生
pub fn is_student(caller: Option<&Caller>) -> bool {
    matches!(caller, Some(c) if c.role == UserRole::Student)
}

/// 调用者是否为教师或学生（未登录返回 false）
pub fn is_teacher_or_student(caller: Option<&Caller>) -> bool {
    is_teacher(caller) || is_student(caller)
}

impl AccessPolicy {
    pub fn permits(self, caller: Option<&Caller>) -> bool {
        match self {
            AccessPolicy::TeacherOnly => is_teacher(caller),
            AccessPolicy::StudentOnly => is_student(caller),
            AccessPolicy::TeacherOrStudent => is_teacher_or_student(caller),
        }
    }

    /// 校验调用者，失败时返回授权错误
    pub fn authorize(self, caller: &Caller) -> Result<()> {
        if self.permits(Some(caller)) {
            Ok(())
        } else {
            Err(TutorDeskError::authorization(format!(
                "Role mismatch: {} required",
                self.required_role()
            )))
        }
    }

    pub fn required_role(self) -> &'static str {
        match self {
            AccessPolicy::TeacherOnly => UserRole::TEACHER,
            AccessPolicy::StudentOnly => UserRole::STUDENT,
            AccessPolicy::TeacherOrStudent => "teacher or student",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEACHER: Caller = Caller {
        id: 1,
        role: UserRole::Teacher,
    };
    const STUDENT: Caller = Caller {
        id: 2,
        role: UserRole::Student,
    };

    #[test]
    fn test_predicates() {
        assert!(is_teacher(Some(&TEACHER)));
        assert!(!is_teacher(Some(&STUDENT)));
        assert!(is_student(Some(&STUDENT)));
        assert!(!is_student(Some(&TEACHER)));
        assert!(is_teacher_or_student(Some(&TEACHER)));
        assert!(is_teacher_or_student(Some(&STUDENT)));
    }

    #[test]
    fn test_anonymous_caller_rejected() {
        assert!(!is_teacher(None));
        assert!(!is_student(None));
        assert!(!is_teacher_or_student(None));
        assert!(!AccessPolicy::TeacherOrStudent.permits(None));
    }

    #[test]
    fn test_authorize() {
        assert!(AccessPolicy::TeacherOnly.authorize(&TEACHER).is_ok());
        assert!(AccessPolicy::StudentOnly.authorize(&STUDENT).is_ok());
        assert!(AccessPolicy::TeacherOrStudent.authorize(&STUDENT).is_ok());

        let err = AccessPolicy::TeacherOnly.authorize(&STUDENT).unwrap_err();
        assert!(matches!(err, TutorDeskError::Authorization(_)));
        assert!(err.message().contains("teacher"));

        let err = AccessPolicy::StudentOnly.authorize(&TEACHER).unwrap_err();
        assert!(matches!(err, TutorDeskError::Authorization(_)));
    }
}
