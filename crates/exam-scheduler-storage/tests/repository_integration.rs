use exam_scheduler_core::{Assignment, ExamRepository, WallClockTime};
use exam_scheduler_storage::{init_db, SqliteExamRepository};
use sqlx::SqlitePool;

async fn seeded_pool() -> SqlitePool {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("exam_scheduler.db");
    // Leak the tempdir so the file survives for the lifetime of the pool.
    std::mem::forget(dir);

    let pool = init_db(db_path.to_str().unwrap()).await.unwrap();

    sqlx::query("INSERT INTO departments (id, name) VALUES (1, 'Computer Science')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO rooms (id, name, capacity, has_computer, is_active, department_id) \
         VALUES (1, 'R1', 60, 0, 1, 1)",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO exam_requests \
         (id, course_code, class_level, instructor, student_count, duration_minutes, \
          needs_computer, difficulty, preferred_dates_json, allowed_room_names_json, department_id, status) \
         VALUES (1, 'CS101', 1, 'Dr. A', 40, 90, 0, 'easy', '[\"2024-01-15\"]', '[\"R1\"]', 1, 'pending')",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO settings (key, value) VALUES ('exam_week_start', '2024-01-15'), ('exam_week_end', '2024-01-19')",
    )
    .execute(&pool)
    .await
    .unwrap();

    pool
}

#[tokio::test]
async fn load_window_reads_settings_table() {
    let repo = SqliteExamRepository::new(seeded_pool().await);
    let window = repo.load_window().await.unwrap();
    assert_eq!(window.start_date.to_string(), "2024-01-15");
    assert_eq!(window.end_date.to_string(), "2024-01-19");
}

#[tokio::test]
async fn list_pending_requests_parses_preferred_dates_and_rooms() {
    let repo = SqliteExamRepository::new(seeded_pool().await);
    let requests = repo.list_pending_requests(None).await.unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.course_code, "CS101");
    assert_eq!(request.preferred_dates.len(), 1);
    assert!(request.allowed_room_names.contains("R1"));
}

#[tokio::test]
async fn persist_assignments_marks_request_planned() {
    let pool = seeded_pool().await;
    let repo = SqliteExamRepository::new(pool.clone());

    let window = repo.load_window().await.unwrap();
    let assignment = Assignment {
        exam_request_id: 1,
        primary_room_id: 1,
        additional_room_ids: Vec::new(),
        scheduled_date: window.start_date,
        start_time: WallClockTime::from_hm(9, 0).unwrap(),
        end_time: WallClockTime::from_hm(10, 30).unwrap(),
    };

    repo.persist_assignments(&[assignment]).await.unwrap();

    let status: String = sqlx::query_scalar("SELECT status FROM exam_requests WHERE id = 1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(status, "planned");

    let assignment_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM assignments")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(assignment_count, 1);
}
