use chalkboard::{
    domain::{NewAnnouncement, NewClass, NewStudent},
    repository::{
        AnnouncementRepository, ClassRepository, SqliteAnnouncementRepository,
        SqliteClassRepository,
    },
};
use chrono::{Duration, Utc};
use sqlx::SqlitePool;

#[tokio::test]
async fn test_announcement_crud() -> anyhow::Result<()> {
    // Create an in-memory SQLite database
    let pool = SqlitePool::connect(":memory:").await?;

    // Run migrations
    sqlx::migrate!("./migrations").run(&pool).await?;

    let repo = SqliteAnnouncementRepository::new(pool.clone());

    // Test Create
    let created = repo
        .create(NewAnnouncement {
            title: "Sports day".to_string(),
            description: "The annual sports day takes place on Friday.".to_string(),
            date: Utc::now(),
            class_id: None,
        })
        .await?;
    assert_eq!(created.title, "Sports day");
    assert!(created.class_id.is_none());

    // Test Find by ID
    let found = repo.find_by_id(created.id).await?;
    assert!(found.is_some());
    assert_eq!(found.unwrap().id, created.id);

    // Test List
    let listed = repo.list(10, 0).await?;
    assert_eq!(listed.len(), 1);

    // Test Update
    let mut update = created.clone();
    update.title = "Sports day (rescheduled)".to_string();
    let updated = repo.update(created.id, update).await?;
    assert_eq!(updated.title, "Sports day (rescheduled)");

    // Test Delete
    repo.delete(created.id).await?;
    assert!(repo.find_by_id(created.id).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_list_all_is_ordered_newest_first() -> anyhow::Result<()> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let repo = SqliteAnnouncementRepository::new(pool.clone());
    let base = Utc::now();

    // Inserted out of date order; two rows share a timestamp.
    let old = repo
        .create(NewAnnouncement {
            title: "Old".to_string(),
            description: "d".to_string(),
            date: base - Duration::hours(10),
            class_id: None,
        })
        .await?;
    let tied_first = repo
        .create(NewAnnouncement {
            title: "Tied first".to_string(),
            description: "d".to_string(),
            date: base,
            class_id: None,
        })
        .await?;
    let tied_second = repo
        .create(NewAnnouncement {
            title: "Tied second".to_string(),
            description: "d".to_string(),
            date: base,
            class_id: None,
        })
        .await?;

    let all = repo.list_all().await?;
    let ids: Vec<i64> = all.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![tied_first.id, tied_second.id, old.id]);

    Ok(())
}

#[tokio::test]
async fn test_roster_resolution() -> anyhow::Result<()> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let repo = SqliteClassRepository::new(pool.clone());

    let class = repo
        .create(NewClass {
            name: "Class 1A".to_string(),
            teacher_id: "T1".to_string(),
        })
        .await?;

    repo.enroll(
        class.id,
        NewStudent {
            id: "S1".to_string(),
            full_name: "Sam Osei".to_string(),
            parent_id: "P1".to_string(),
        },
    )
    .await?;
    repo.enroll(
        class.id,
        NewStudent {
            id: "S2".to_string(),
            full_name: "Ida Berg".to_string(),
            parent_id: "P2".to_string(),
        },
    )
    .await?;

    let roster = repo.find_roster(class.id).await?.expect("roster resolves");
    assert_eq!(roster.teacher_id, "T1");
    assert_eq!(roster.students.len(), 2);
    assert!(roster
        .students
        .iter()
        .any(|s| s.student_id == "S1" && s.parent_id == "P1"));

    // Duplicate enrollment is a conflict
    let duplicate = repo
        .enroll(
            class.id,
            NewStudent {
                id: "S1".to_string(),
                full_name: "Sam Osei".to_string(),
                parent_id: "P1".to_string(),
            },
        )
        .await;
    assert!(duplicate.is_err());

    // Unknown classes are absent from the directory
    let rosters = repo.rosters_for(&[class.id, 999]).await?;
    assert_eq!(rosters.len(), 1);
    assert!(rosters.contains_key(&class.id));

    Ok(())
}
