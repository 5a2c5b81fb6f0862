use rust_tutordesk::errors::TutorDeskError;
use rust_tutordesk::models::assignments::requests::UpdateAssignmentRequest;
use rust_tutordesk::models::stats::{StudentStats, TeacherStats};
use rust_tutordesk::models::submissions::requests::CreateSubmissionRequest;

use crate::common;

#[tokio::test]
async fn teacher_pending_is_assignments_minus_submissions() {
    let storage = common::storage().await;
    let (_, teacher) = common::teacher(&storage, "tina").await;
    let (sam, sam_caller) = common::student(&storage, "sam").await;
    let (sue, _) = common::student(&storage, "sue").await;
    common::link(&storage, &teacher, sam.id).await;
    common::link(&storage, &teacher, sue.id).await;

    let essay = common::assignment(&storage, &teacher, "Essay", Some(sam.id)).await;
    common::assignment(&storage, &teacher, "Reading", Some(sue.id)).await;
    common::assignment(&storage, &teacher, "Draft", None).await;

    for content in ["v1", "v2"] {
        storage
            .create_submission(
                &sam_caller,
                CreateSubmissionRequest {
                    assignment_id: essay.id,
                    content: content.to_string(),
                },
            )
            .await
            .unwrap();
    }

    let stats = storage.teacher_stats(&teacher).await.unwrap();
    assert_eq!(
        stats,
        TeacherStats {
            total_students: 2,
            total_assignments: 3,
            total_submissions: 2,
            completed: 2,
            pending: 1,
        }
    );
}

#[tokio::test]
async fn student_counts_follow_assignment_status() {
    let storage = common::storage().await;
    let (_, teacher) = common::teacher(&storage, "tina").await;
    let (sam, sam_caller) = common::student(&storage, "sam").await;
    common::link(&storage, &teacher, sam.id).await;

    let done = common::assignment(&storage, &teacher, "Done", Some(sam.id)).await;
    common::assignment(&storage, &teacher, "Todo", Some(sam.id)).await;
    let other = common::assignment(&storage, &teacher, "Other", Some(sam.id)).await;

    storage
        .update_assignment(
            &teacher,
            done.id,
            UpdateAssignmentRequest {
                status: Some("completed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    storage
        .update_assignment(
            &teacher,
            other.id,
            UpdateAssignmentRequest {
                status: Some("in_review".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    storage
        .create_submission(
            &sam_caller,
            CreateSubmissionRequest {
                assignment_id: done.id,
                content: "finished".to_string(),
            },
        )
        .await
        .unwrap();

    let stats = storage.student_stats(&sam_caller).await.unwrap();
    assert_eq!(
        stats,
        StudentStats {
            total_assignments: 3,
            total_submissions: 1,
            completed_assignments: 1,
            pending_assignments: 1,
        }
    );
}

#[tokio::test]
async fn students_are_rejected_from_teacher_stats() {
    let storage = common::storage().await;
    let (_, student) = common::student(&storage, "sam").await;

    let err = storage.teacher_stats(&student).await.unwrap_err();
    assert!(matches!(err, TutorDeskError::Authorization(_)));

    let (_, teacher) = common::teacher(&storage, "tina").await;
    let err = storage.student_stats(&teacher).await.unwrap_err();
    assert!(matches!(err, TutorDeskError::Authorization(_)));
}
