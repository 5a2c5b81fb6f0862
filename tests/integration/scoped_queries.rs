use rust_tutordesk::errors::TutorDeskError;
use rust_tutordesk::models::assignments::requests::{AssignmentListParams, UpdateAssignmentRequest};
use rust_tutordesk::models::schedules::requests::{
    CreateScheduleRequest, ScheduleListParams, UpdateScheduleRequest,
};
use rust_tutordesk::models::submissions::requests::{CreateSubmissionRequest, SubmissionListParams};
use rust_tutordesk::models::teacher_students::requests::TeacherStudentListParams;
use rust_tutordesk::models::users::entities::UserRole;

use crate::common;

fn assignment_params() -> AssignmentListParams {
    AssignmentListParams {
        page: 1,
        size: 100,
        status: None,
        student_id: None,
        search: None,
    }
}

fn submission_params() -> SubmissionListParams {
    SubmissionListParams {
        page: 1,
        size: 100,
        assignment_id: None,
        is_reviewed: None,
    }
}

fn schedule_params() -> ScheduleListParams {
    ScheduleListParams {
        page: 1,
        size: 100,
        day_of_week: None,
        is_available: None,
        teacher_id: None,
    }
}

fn slot(day_of_week: i32, student_id: Option<i64>) -> CreateScheduleRequest {
    CreateScheduleRequest {
        day_of_week,
        start_time: "09:00".to_string(),
        end_time: "10:00".to_string(),
        is_available: None,
        title: None,
        description: None,
        student_id,
    }
}

mod assignments {
    use super::*;

    #[tokio::test]
    async fn teachers_only_see_assignments_they_created() {
        let storage = common::storage().await;
        let (_, alice) = common::teacher(&storage, "alice").await;
        let (_, bob) = common::teacher(&storage, "bob").await;
        let (student, _) = common::student(&storage, "sam").await;
        common::link(&storage, &alice, student.id).await;
        common::link(&storage, &bob, student.id).await;

        common::assignment(&storage, &alice, "Alice 1", Some(student.id)).await;
        common::assignment(&storage, &alice, "Alice 2", None).await;
        common::assignment(&storage, &bob, "Bob 1", Some(student.id)).await;

        let list = storage
            .list_assignments(&alice, assignment_params())
            .await
            .unwrap();
        assert_eq!(list.pagination.total, 2);
        assert!(list.items.iter().all(|a| a.teacher_id == alice.id));

        // 过滤条件只能在范围内收窄
        let mut params = assignment_params();
        params.search = Some("Bob".to_string());
        let list = storage.list_assignments(&alice, params).await.unwrap();
        assert!(list.items.is_empty());
    }

    #[tokio::test]
    async fn students_only_see_assignments_assigned_to_them() {
        let storage = common::storage().await;
        let (_, teacher) = common::teacher(&storage, "tina").await;
        let (sam, sam_caller) = common::student(&storage, "sam").await;
        let (sue, _) = common::student(&storage, "sue").await;
        common::link(&storage, &teacher, sam.id).await;
        common::link(&storage, &teacher, sue.id).await;

        common::assignment(&storage, &teacher, "For Sam", Some(sam.id)).await;
        common::assignment(&storage, &teacher, "For Sue", Some(sue.id)).await;
        common::assignment(&storage, &teacher, "Unassigned", None).await;

        let list = storage
            .list_assignments(&sam_caller, assignment_params())
            .await
            .unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].title, "For Sam");
        assert_eq!(list.items[0].student_id, Some(sam.id));

        let mut params = assignment_params();
        params.student_id = Some(sue.id);
        let list = storage.list_assignments(&sam_caller, params).await.unwrap();
        assert!(list.items.is_empty());
    }

    #[tokio::test]
    async fn created_assignment_is_stamped_with_the_calling_teacher() {
        let storage = common::storage().await;
        let (_, teacher) = common::teacher(&storage, "tina").await;

        let created = common::assignment(&storage, &teacher, "Essay", None).await;

        assert_eq!(created.teacher_id, teacher.id);
        assert_eq!(created.status, "pending");
        assert_eq!(
            created.teacher.as_ref().map(|t| t.username.as_str()),
            Some("tina")
        );
    }

    #[tokio::test]
    async fn assigning_an_unlinked_student_is_a_validation_error() {
        let storage = common::storage().await;
        let (_, teacher) = common::teacher(&storage, "tina").await;
        let (stranger, _) = common::student(&storage, "stan").await;

        let err = storage
            .create_assignment(&teacher, common::new_assignment("Essay", Some(stranger.id)))
            .await
            .unwrap_err();

        assert!(matches!(err, TutorDeskError::Validation(ref msg) if msg.contains("student not found in your class")));
    }

    #[tokio::test]
    async fn students_cannot_create_assignments() {
        let storage = common::storage().await;
        let (_, student) = common::student(&storage, "sam").await;

        let err = storage
            .create_assignment(&student, common::new_assignment("Sneaky", None))
            .await
            .unwrap_err();

        assert!(matches!(err, TutorDeskError::Authorization(_)));
        let list = storage
            .list_assignments(&student, assignment_params())
            .await
            .unwrap();
        assert_eq!(list.pagination.total, 0);
    }

    #[tokio::test]
    async fn teachers_cannot_update_or_delete_foreign_assignments() {
        let storage = common::storage().await;
        let (_, alice) = common::teacher(&storage, "alice").await;
        let (_, bob) = common::teacher(&storage, "bob").await;
        let created = common::assignment(&storage, &alice, "Alice only", None).await;

        let update = UpdateAssignmentRequest {
            title: Some("Hijacked".to_string()),
            ..Default::default()
        };
        assert!(
            storage
                .update_assignment(&bob, created.id, update)
                .await
                .unwrap()
                .is_none()
        );
        assert!(!storage.delete_assignment(&bob, created.id).await.unwrap());

        let still = storage.get_assignment(&alice, created.id).await.unwrap();
        assert_eq!(still.map(|a| a.title), Some("Alice only".to_string()));
    }

    #[tokio::test]
    async fn huge_page_number_returns_an_empty_page() {
        let storage = common::storage().await;
        let (_, teacher) = common::teacher(&storage, "tina").await;
        common::assignment(&storage, &teacher, "Essay", None).await;

        let mut params = assignment_params();
        params.page = i64::MAX;
        let list = storage.list_assignments(&teacher, params).await.unwrap();
        assert!(list.items.is_empty());
        assert_eq!(list.pagination.total, 1);
    }
}

mod submissions {
    use super::*;

    #[tokio::test]
    async fn submitting_to_an_unassigned_assignment_is_not_found() {
        let storage = common::storage().await;
        let (_, teacher) = common::teacher(&storage, "tina").await;
        let (sam, _) = common::student(&storage, "sam").await;
        let (_, sue) = common::student(&storage, "sue").await;
        common::link(&storage, &teacher, sam.id).await;
        let assignment = common::assignment(&storage, &teacher, "Sam only", Some(sam.id)).await;

        let err = storage
            .create_submission(
                &sue,
                CreateSubmissionRequest {
                    assignment_id: assignment.id,
                    content: "not mine".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TutorDeskError::NotFound(_)));

        let list = storage
            .list_submissions(&teacher, submission_params())
            .await
            .unwrap();
        assert_eq!(list.pagination.total, 0);
    }

    #[tokio::test]
    async fn essay_scenario_is_visible_to_the_right_people_only() {
        let storage = common::storage().await;
        let (_, teacher_a) = common::teacher(&storage, "teacher_a").await;
        let (student_b, caller_b) = common::student(&storage, "student_b").await;
        let (_, caller_c) = common::student(&storage, "student_c").await;
        common::link(&storage, &teacher_a, student_b.id).await;

        let essay = common::assignment(&storage, &teacher_a, "Essay 1", Some(student_b.id)).await;
        storage
            .create_submission(
                &caller_b,
                CreateSubmissionRequest {
                    assignment_id: essay.id,
                    content: "draft text".to_string(),
                },
            )
            .await
            .unwrap();

        let list = storage
            .list_submissions(&teacher_a, submission_params())
            .await
            .unwrap();
        assert_eq!(list.items.len(), 1);
        let row = &list.items[0];
        assert_eq!(row.assignment_id, essay.id);
        assert_eq!(row.assignment_title.as_deref(), Some("Essay 1"));
        assert_eq!(row.student_id, student_b.id);
        assert_eq!(row.content, "draft text");
        assert!(!row.is_reviewed);

        let mut params = assignment_params();
        params.search = Some("Essay 1".to_string());
        let seen_by_c = storage.list_assignments(&caller_c, params).await.unwrap();
        assert!(seen_by_c.items.is_empty());
    }

    #[tokio::test]
    async fn resubmissions_are_kept_as_history() {
        let storage = common::storage().await;
        let (_, teacher) = common::teacher(&storage, "tina").await;
        let (sam, sam_caller) = common::student(&storage, "sam").await;
        common::link(&storage, &teacher, sam.id).await;
        let assignment = common::assignment(&storage, &teacher, "Essay", Some(sam.id)).await;

        for content in ["first", "second"] {
            storage
                .create_submission(
                    &sam_caller,
                    CreateSubmissionRequest {
                        assignment_id: assignment.id,
                        content: content.to_string(),
                    },
                )
                .await
                .unwrap();
        }

        let mut params = submission_params();
        params.assignment_id = Some(assignment.id);
        let list = storage.list_submissions(&sam_caller, params).await.unwrap();
        assert_eq!(list.pagination.total, 2);
    }

    #[tokio::test]
    async fn review_marks_submission_and_is_teacher_scoped() {
        let storage = common::storage().await;
        let (_, teacher) = common::teacher(&storage, "tina").await;
        let (_, other_teacher) = common::teacher(&storage, "otto").await;
        let (sam, sam_caller) = common::student(&storage, "sam").await;
        common::link(&storage, &teacher, sam.id).await;
        let assignment = common::assignment(&storage, &teacher, "Essay", Some(sam.id)).await;
        let submission = storage
            .create_submission(
                &sam_caller,
                CreateSubmissionRequest {
                    assignment_id: assignment.id,
                    content: "answer".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(
            storage
                .review_submission(&other_teacher, submission.id, "nope".to_string())
                .await
                .unwrap()
                .is_none()
        );

        let reviewed = storage
            .review_submission(&teacher, submission.id, "Well done".to_string())
            .await
            .unwrap()
            .expect("submission in scope");
        assert!(reviewed.is_reviewed);
        assert_eq!(reviewed.review_content.as_deref(), Some("Well done"));
        assert!(reviewed.reviewed_at.is_some());

        let mut params = submission_params();
        params.is_reviewed = Some(false);
        let pending = storage.list_submissions(&teacher, params).await.unwrap();
        assert!(pending.items.is_empty());

        let err = storage
            .review_submission(&sam_caller, submission.id, "self".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, TutorDeskError::Authorization(_)));
    }

    #[tokio::test]
    async fn only_the_owning_student_can_edit_or_delete() {
        let storage = common::storage().await;
        let (_, teacher) = common::teacher(&storage, "tina").await;
        let (sam, sam_caller) = common::student(&storage, "sam").await;
        let (sue, sue_caller) = common::student(&storage, "sue").await;
        common::link(&storage, &teacher, sam.id).await;
        common::link(&storage, &teacher, sue.id).await;
        let assignment = common::assignment(&storage, &teacher, "Essay", Some(sam.id)).await;
        let submission = storage
            .create_submission(
                &sam_caller,
                CreateSubmissionRequest {
                    assignment_id: assignment.id,
                    content: "answer".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(
            storage
                .update_submission(&sue_caller, submission.id, "hijack".to_string())
                .await
                .unwrap()
                .is_none()
        );
        assert!(!storage.delete_submission(&sue_caller, submission.id).await.unwrap());

        let err = storage
            .update_submission(&teacher, submission.id, "edit".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, TutorDeskError::Authorization(_)));
        let err = storage
            .delete_submission(&teacher, submission.id)
            .await
            .unwrap_err();
        assert!(matches!(err, TutorDeskError::Authorization(_)));

        let unchanged = storage
            .get_submission(&sam_caller, submission.id)
            .await
            .unwrap()
            .expect("own submission");
        assert_eq!(unchanged.content, "answer");

        let updated = storage
            .update_submission(&sam_caller, submission.id, "revised".to_string())
            .await
            .unwrap()
            .expect("own submission");
        assert_eq!(updated.content, "revised");

        assert!(storage.delete_submission(&sam_caller, submission.id).await.unwrap());
        assert!(
            storage
                .get_submission(&teacher, submission.id)
                .await
                .unwrap()
                .is_none()
        );
    }
}

mod teacher_students {
    use super::*;

    #[tokio::test]
    async fn duplicate_pair_is_rejected() {
        let storage = common::storage().await;
        let (_, teacher) = common::teacher(&storage, "tina").await;
        let (sam, _) = common::student(&storage, "sam").await;

        common::link(&storage, &teacher, sam.id).await;
        let err = storage
            .create_teacher_student(&teacher, sam.id)
            .await
            .unwrap_err();

        assert!(matches!(err, TutorDeskError::Conflict(_)));
    }

    #[tokio::test]
    async fn only_existing_students_can_be_linked() {
        let storage = common::storage().await;
        let (_, teacher) = common::teacher(&storage, "tina").await;
        let (other_teacher, _) = common::teacher(&storage, "otto").await;

        let err = storage
            .create_teacher_student(&teacher, 9_999)
            .await
            .unwrap_err();
        assert!(matches!(err, TutorDeskError::NotFound(_)));

        let err = storage
            .create_teacher_student(&teacher, other_teacher.id)
            .await
            .unwrap_err();
        assert!(matches!(err, TutorDeskError::Validation(_)));
    }

    #[tokio::test]
    async fn each_side_sees_their_own_links() {
        let storage = common::storage().await;
        let (_, alice) = common::teacher(&storage, "alice").await;
        let (_, bob) = common::teacher(&storage, "bob").await;
        let (sam, sam_caller) = common::student(&storage, "sam").await;
        let (sue, _) = common::student(&storage, "sue").await;
        common::link(&storage, &alice, sam.id).await;
        common::link(&storage, &alice, sue.id).await;
        common::link(&storage, &bob, sam.id).await;

        let params = TeacherStudentListParams { page: 1, size: 10 };
        let alice_links = storage
            .list_teacher_students(&alice, params.clone())
            .await
            .unwrap();
        assert_eq!(alice_links.pagination.total, 2);

        let sam_links = storage
            .list_teacher_students(&sam_caller, params)
            .await
            .unwrap();
        assert_eq!(sam_links.pagination.total, 2);
        assert!(sam_links.items.iter().all(|l| l.student_id == sam.id));
        assert!(sam_links.items.iter().all(|l| l.teacher.is_some()));

        // 只能删除自己的关系
        let bob_link = sam_links
            .items
            .iter()
            .find(|l| l.teacher_id == bob.id)
            .expect("bob link");
        assert!(!storage.delete_teacher_student(&alice, bob_link.id).await.unwrap());
        assert!(storage.delete_teacher_student(&bob, bob_link.id).await.unwrap());
    }
}

mod schedules {
    use super::*;

    #[tokio::test]
    async fn students_see_schedules_of_linked_teachers_only() {
        let storage = common::storage().await;
        let (_, alice) = common::teacher(&storage, "alice").await;
        let (_, bob) = common::teacher(&storage, "bob").await;
        let (sam, sam_caller) = common::student(&storage, "sam").await;
        common::link(&storage, &alice, sam.id).await;

        storage.create_schedule(&alice, slot(1, None)).await.unwrap();
        storage.create_schedule(&alice, slot(3, Some(sam.id))).await.unwrap();
        storage.create_schedule(&bob, slot(2, None)).await.unwrap();

        let list = storage
            .list_schedules(&sam_caller, schedule_params())
            .await
            .unwrap();
        assert_eq!(list.items.len(), 2);
        assert!(list.items.iter().all(|s| s.teacher_id == alice.id));
        // 按星期排序
        assert_eq!(list.items[0].day_of_week, 1);
        assert_eq!(list.items[1].day_of_week, 3);

        let mut params = schedule_params();
        params.teacher_id = Some(bob.id);
        let list = storage.list_schedules(&sam_caller, params).await.unwrap();
        assert!(list.items.is_empty());
    }

    #[tokio::test]
    async fn booking_requires_a_linked_student() {
        let storage = common::storage().await;
        let (_, teacher) = common::teacher(&storage, "tina").await;
        let (stranger, _) = common::student(&storage, "stan").await;

        let err = storage
            .create_schedule(&teacher, slot(1, Some(stranger.id)))
            .await
            .unwrap_err();
        assert!(matches!(err, TutorDeskError::Validation(_)));
    }

    #[tokio::test]
    async fn update_checks_time_range_against_stored_values() {
        let storage = common::storage().await;
        let (_, teacher) = common::teacher(&storage, "tina").await;
        let (_, other) = common::teacher(&storage, "otto").await;
        let schedule = storage.create_schedule(&teacher, slot(1, None)).await.unwrap();

        // 只改开始时间，仍需早于已保存的 10:00
        let err = storage
            .update_schedule(
                &teacher,
                schedule.id,
                UpdateScheduleRequest {
                    start_time: Some("11:00".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TutorDeskError::Validation(_)));

        let updated = storage
            .update_schedule(
                &teacher,
                schedule.id,
                UpdateScheduleRequest {
                    start_time: Some("09:30".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .expect("schedule in scope");
        assert_eq!(updated.start_time, "09:30");
        assert_eq!(updated.end_time, "10:00");

        assert!(
            storage
                .update_schedule(
                    &other,
                    schedule.id,
                    UpdateScheduleRequest {
                        is_available: Some(false),
                        ..Default::default()
                    },
                )
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn explicit_null_clears_text_fields() {
        let storage = common::storage().await;
        let (_, teacher) = common::teacher(&storage, "tina").await;
        let mut request = slot(2, None);
        request.title = Some("Office hours".to_string());
        request.description = Some("Room 3".to_string());
        let schedule = storage.create_schedule(&teacher, request).await.unwrap();

        let updated = storage
            .update_schedule(
                &teacher,
                schedule.id,
                UpdateScheduleRequest {
                    title: Some(None),
                    cancellation_reason: Some(Some("sick".to_string())),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .expect("schedule in scope");
        assert_eq!(updated.title, None);
        assert_eq!(updated.description.as_deref(), Some("Room 3"));
        assert_eq!(updated.cancellation_reason.as_deref(), Some("sick"));
    }

    #[tokio::test]
    async fn teachers_cannot_delete_foreign_schedules() {
        let storage = common::storage().await;
        let (_, teacher) = common::teacher(&storage, "tina").await;
        let (_, other) = common::teacher(&storage, "otto").await;
        let schedule = storage.create_schedule(&teacher, slot(4, None)).await.unwrap();

        assert!(!storage.delete_schedule(&other, schedule.id).await.unwrap());
        assert!(storage.get_schedule(&teacher, schedule.id).await.unwrap().is_some());

        assert!(storage.delete_schedule(&teacher, schedule.id).await.unwrap());
        assert!(storage.get_schedule(&teacher, schedule.id).await.unwrap().is_none());
    }
}

mod cascade {
    use super::*;

    #[tokio::test]
    async fn deleting_a_teacher_removes_their_data() {
        let storage = common::storage().await;
        let (alice_user, alice) = common::teacher(&storage, "alice").await;
        let (sam, sam_caller) = common::student(&storage, "sam").await;
        common::link(&storage, &alice, sam.id).await;
        let assignment = common::assignment(&storage, &alice, "Essay", Some(sam.id)).await;
        storage
            .create_submission(
                &sam_caller,
                CreateSubmissionRequest {
                    assignment_id: assignment.id,
                    content: "answer".to_string(),
                },
            )
            .await
            .unwrap();
        storage.create_schedule(&alice, slot(1, None)).await.unwrap();

        assert!(storage.delete_user(alice_user.id).await.unwrap());

        assert_eq!(
            storage
                .list_assignments(&sam_caller, assignment_params())
                .await
                .unwrap()
                .pagination
                .total,
            0
        );
        assert_eq!(
            storage
                .list_submissions(&sam_caller, submission_params())
                .await
                .unwrap()
                .pagination
                .total,
            0
        );
        assert_eq!(
            storage
                .list_schedules(&sam_caller, schedule_params())
                .await
                .unwrap()
                .pagination
                .total,
            0
        );
        assert!(!storage.is_student_linked(alice.id, sam.id).await.unwrap());
        assert!(storage.get_user_by_id(sam.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn deleting_a_student_clears_schedule_bookings() {
        let storage = common::storage().await;
        let (_, teacher) = common::teacher(&storage, "tina").await;
        let (sam, _) = common::student(&storage, "sam").await;
        common::link(&storage, &teacher, sam.id).await;
        let booked = storage
            .create_schedule(&teacher, slot(4, Some(sam.id)))
            .await
            .unwrap();

        assert!(storage.delete_user(sam.id).await.unwrap());

        let schedule = storage
            .get_schedule(&teacher, booked.id)
            .await
            .unwrap()
            .expect("schedule survives");
        assert_eq!(schedule.student_id, None);
    }
}

mod users {
    use super::*;
    use rust_tutordesk::models::users::requests::UserListParams;

    #[tokio::test]
    async fn list_filters_by_role_and_search() {
        let storage = common::storage().await;
        common::teacher(&storage, "tina").await;
        common::student(&storage, "sam").await;
        common::student(&storage, "sally").await;

        let list = storage
            .list_users_with_pagination(UserListParams {
                page: 1,
                size: 10,
                role: Some(UserRole::Student),
                search: Some("sa".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(list.pagination.total, 2);
        assert!(list.items.iter().all(|u| u.role == UserRole::Student));
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let storage = common::storage().await;
        common::teacher(&storage, "tina").await;

        let err = storage
            .create_user(rust_tutordesk::models::users::requests::CreateUser {
                username: "tina".to_string(),
                password_hash: "x".to_string(),
                role: UserRole::Student,
                full_name: "Other Tina".to_string(),
                avatar: None,
                phone_number: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TutorDeskError::Conflict(_)));
    }
}
