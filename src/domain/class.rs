use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    pub id: i64,
    pub name: String,
    /// Identity of the teacher who owns the class, as issued by the
    /// identity provider.
    pub teacher_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClass {
    pub name: String,
    pub teacher_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudent {
    pub id: String,
    pub full_name: String,
    pub parent_id: String,
}

/// Resolved membership of a class: the owning teacher plus each enrolled
/// student and that student's parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassRoster {
    pub class_id: i64,
    pub teacher_id: String,
    pub students: Vec<Enrollment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub student_id: String,
    pub parent_id: String,
}

pub type RosterDirectory = HashMap<i64, ClassRoster>;
