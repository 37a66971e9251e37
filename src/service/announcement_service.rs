use std::collections::BTreeSet;
use std::sync::Arc;

use crate::{
    domain::{visibility, Announcement, Role, RosterDirectory, Viewer},
    error::Result,
    repository::{AnnouncementRepository, ClassRepository},
};

pub struct AnnouncementService {
    announcement_repo: Arc<dyn AnnouncementRepository>,
    class_repo: Arc<dyn ClassRepository>,
}

impl AnnouncementService {
    pub fn new(
        announcement_repo: Arc<dyn AnnouncementRepository>,
        class_repo: Arc<dyn ClassRepository>,
    ) -> Self {
        Self {
            announcement_repo,
            class_repo,
        }
    }

    /// The announcements `viewer` may see, newest first, capped to `limit`.
    pub async fn visible_to(&self, viewer: &Viewer, limit: i64) -> Result<Vec<Announcement>> {
        let candidates = self.announcement_repo.list_all().await?;

        // Admin bypasses scoping entirely, so the rosters are never
        // consulted and fetching them would be wasted work.
        let rosters = if viewer.role == Role::Admin {
            RosterDirectory::new()
        } else {
            let class_ids: Vec<i64> = candidates
                .iter()
                .filter_map(|a| a.class_id)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
            self.class_repo.rosters_for(&class_ids).await?
        };

        visibility::select_visible(viewer, &candidates, &rosters, limit)
    }

    /// Fetch a single announcement if `viewer` may see it. A hidden
    /// announcement is indistinguishable from a missing one.
    pub async fn find_visible(&self, viewer: &Viewer, id: i64) -> Result<Option<Announcement>> {
        let Some(announcement) = self.announcement_repo.find_by_id(id).await? else {
            return Ok(None);
        };

        let rosters = match announcement.class_id {
            Some(class_id) if viewer.role != Role::Admin => {
                self.class_repo.rosters_for(&[class_id]).await?
            }
            _ => RosterDirectory::new(),
        };

        Ok(visibility::is_visible(viewer, &announcement, &rosters).then_some(announcement))
    }
}
