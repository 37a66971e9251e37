use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};

use crate::{
    domain::{Class, ClassRoster, Enrollment, NewClass, NewStudent, RosterDirectory},
    error::{AppError, Result},
    repository::ClassRepository,
};

#[derive(FromRow)]
struct ClassRow {
    id: i64,
    teacher_id: String,
}

#[derive(FromRow)]
struct EnrollmentRow {
    id: String,
    parent_id: String,
}

pub struct SqliteClassRepository {
    pool: SqlitePool,
}

impl SqliteClassRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClassRepository for SqliteClassRepository {
    async fn create(&self, class: NewClass) -> Result<Class> {
        let result = sqlx::query("INSERT INTO classes (name, teacher_id) VALUES (?, ?)")
            .bind(&class.name)
            .bind(&class.teacher_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(Class {
            id: result.last_insert_rowid(),
            name: class.name,
            teacher_id: class.teacher_id,
        })
    }

    async fn enroll(&self, class_id: i64, student: NewStudent) -> Result<()> {
        sqlx::query("INSERT INTO students (id, full_name, class_id, parent_id) VALUES (?, ?, ?, ?)")
            .bind(&student.id)
            .bind(&student.full_name)
            .bind(class_id)
            .bind(&student.parent_id)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.message().contains("UNIQUE") => {
                    AppError::Conflict(format!("Student {} is already enrolled", student.id))
                }
                _ => AppError::Database(e.to_string()),
            })?;

        Ok(())
    }

    async fn find_roster(&self, class_id: i64) -> Result<Option<ClassRoster>> {
        let class = sqlx::query_as::<_, ClassRow>(
            "SELECT id, teacher_id FROM classes WHERE id = ?"
        )
        .bind(class_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        let Some(class) = class else {
            return Ok(None);
        };

        let students = sqlx::query_as::<_, EnrollmentRow>(
            "SELECT id, parent_id FROM students WHERE class_id = ? ORDER BY id"
        )
        .bind(class_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(Some(ClassRoster {
            class_id: class.id,
            teacher_id: class.teacher_id,
            students: students
                .into_iter()
                .map(|s| Enrollment {
                    student_id: s.id,
                    parent_id: s.parent_id,
                })
                .collect(),
        }))
    }

    async fn rosters_for(&self, class_ids: &[i64]) -> Result<RosterDirectory> {
        let mut rosters = RosterDirectory::new();

        for &class_id in class_ids {
            if let Some(roster) = self.find_roster(class_id).await? {
                rosters.insert(class_id, roster);
            }
        }

        Ok(rosters)
    }
}
