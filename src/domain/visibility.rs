use crate::{
    domain::{Announcement, Role, RosterDirectory, Viewer},
    error::{AppError, Result},
};

/// Page size used when a caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 3;

/// Select the announcements `viewer` is authorized to see, newest first,
/// capped to `limit`.
///
/// The candidate set usually arrives already ordered by the persistence
/// layer, but ordering is part of this contract, so it is re-sorted here
/// rather than trusted. Ties on the publication date break by id
/// ascending so repeated calls page deterministically.
pub fn select_visible(
    viewer: &Viewer,
    announcements: &[Announcement],
    rosters: &RosterDirectory,
    limit: i64,
) -> Result<Vec<Announcement>> {
    if limit <= 0 {
        return Err(AppError::Validation(format!(
            "page size must be a positive integer, got {}",
            limit
        )));
    }

    let mut visible: Vec<Announcement> = announcements
        .iter()
        .filter(|a| is_visible(viewer, a, rosters))
        .cloned()
        .collect();

    visible.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
    visible.truncate(limit as usize);

    Ok(visible)
}

/// The visibility predicate for a single announcement.
///
/// Admin bypasses all scoping. An unscoped announcement is visible to
/// everyone. A class-scoped announcement requires the viewer's
/// role-specific relationship to the class roster; a roster missing from
/// the directory denies rather than guesses.
pub fn is_visible(viewer: &Viewer, announcement: &Announcement, rosters: &RosterDirectory) -> bool {
    if viewer.role == Role::Admin {
        return true;
    }

    let Some(class_id) = announcement.class_id else {
        return true;
    };

    let Some(roster) = rosters.get(&class_id) else {
        return false;
    };

    match viewer.role {
        Role::Admin => true,
        Role::Teacher => roster.teacher_id == viewer.id,
        Role::Student => roster.students.iter().any(|s| s.student_id == viewer.id),
        Role::Parent => roster.students.iter().any(|s| s.parent_id == viewer.id),
        Role::Unknown => false,
    }
}
