use chalkboard::{
    auth::AuthService,
    domain::{NewAnnouncement, NewClass, NewStudent},
    repository::{
        AnnouncementRepository, ClassRepository, SqliteAnnouncementRepository,
        SqliteClassRepository,
    },
};
use chrono::{Duration, Utc};
use clap::Parser;
use fake::{faker::lorem::en::Sentence, faker::name::en::Name, Fake};
use sqlx::sqlite::SqlitePoolOptions;

/// Seed the database with demo classes, rosters, and announcements.
#[derive(Parser, Debug)]
#[command(name = "seed")]
struct Args {
    /// Database URL; falls back to DATABASE_URL, then the local file.
    #[arg(long)]
    database_url: Option<String>,

    /// Number of classes to create.
    #[arg(long, default_value_t = 3)]
    classes: i64,

    /// Students enrolled per class.
    #[arg(long, default_value_t = 5)]
    students_per_class: i64,

    /// Announcements to publish (roughly half class-scoped).
    #[arg(long, default_value_t = 12)]
    announcements: i64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    println!("🌱 Starting database seeding...");

    let database_url = args
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite:chalkboard.db".to_string());

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    // Run migrations first
    println!("📋 Running migrations...");
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    // Initialize repositories
    let announcement_repo = SqliteAnnouncementRepository::new(db_pool.clone());
    let class_repo = SqliteClassRepository::new(db_pool.clone());

    println!("🏫 Creating classes and rosters...");
    let mut class_ids = Vec::new();
    for i in 0..args.classes {
        let class = class_repo
            .create(NewClass {
                name: format!("Class {}{}", i + 1, ['A', 'B', 'C', 'D', 'E'][(i % 5) as usize]),
                teacher_id: format!("teacher_{}", i + 1),
            })
            .await?;

        for j in 0..args.students_per_class {
            let n = i * args.students_per_class + j + 1;
            class_repo
                .enroll(
                    class.id,
                    NewStudent {
                        id: format!("student_{}", n),
                        full_name: Name().fake(),
                        parent_id: format!("parent_{}", n),
                    },
                )
                .await?;
        }

        class_ids.push(class.id);
    }
    println!(
        "  ✅ Created {} classes with {} students each",
        args.classes, args.students_per_class
    );

    println!("📣 Publishing announcements...");
    for i in 0..args.announcements {
        let class_id = if i % 2 == 0 || class_ids.is_empty() {
            None
        } else {
            Some(class_ids[(i as usize / 2) % class_ids.len()])
        };

        announcement_repo
            .create(NewAnnouncement {
                title: Sentence(3..6).fake(),
                description: Sentence(8..16).fake(),
                date: Utc::now() - Duration::hours(i * 6),
                class_id,
            })
            .await?;
    }
    println!("  ✅ Published {} announcements", args.announcements);

    // Demo sessions for each role so the API can be exercised by hand
    println!("🔑 Creating demo sessions...");
    let auth_service = AuthService::new(db_pool.clone(), "seed-secret".to_string());
    for (user_id, role) in [
        ("admin_1", "admin"),
        ("teacher_1", "teacher"),
        ("student_1", "student"),
        ("parent_1", "parent"),
    ] {
        let (_session, token) = auth_service.create_session(user_id, role, 24 * 7).await?;
        println!("  🔓 {} session token: {}", role, token);
    }

    println!("✨ Seeding complete.");

    Ok(())
}
