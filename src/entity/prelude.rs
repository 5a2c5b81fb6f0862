//! 预导入模块，方便使用

pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
pub use super::teacher_schedules::{
    ActiveModel as TeacherScheduleActiveModel, Entity as TeacherSchedules,
    Model as TeacherScheduleModel,
};
pub use super::teacher_students::{
    ActiveModel as TeacherStudentActiveModel, Entity as TeacherStudents,
    Model as TeacherStudentModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
