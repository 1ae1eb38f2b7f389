pub mod repository;
pub mod service;
pub mod types;

pub use repository::{AnnouncementRepository, SqliteAnnouncementRepository};
pub use service::{ContentService, ContentServiceImpl};
pub use types::{Announcement, AnnouncementRow, NewAnnouncement, UpdateAnnouncement};
