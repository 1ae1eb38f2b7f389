mod common;

use masjid_admin_core::domains::content::{NewAnnouncement, UpdateAnnouncement};
use masjid_admin_core::errors::ServiceError;

fn announcement(title: &str, published: bool) -> NewAnnouncement {
    NewAnnouncement {
        title: title.to_string(),
        body: "Assalamu alaikum".to_string(),
        published,
    }
}

#[tokio::test]
async fn create_without_an_image_has_no_image_url() {
    let app = common::setup().await;

    let created = app
        .services
        .content
        .create_announcement(announcement("Jumu'ah timing", true), None)
        .await
        .unwrap();

    assert_eq!(created.title, "Jumu'ah timing");
    assert!(created.published);
    assert!(created.image_url.is_none());
}

#[tokio::test]
async fn an_attached_image_is_stored_and_linked() {
    let app = common::setup().await;

    let created = app
        .services
        .content
        .create_announcement(
            announcement("Eid prayer", true),
            Some((vec![0xAA, 0xBB, 0xCC], "poster.png".to_string())),
        )
        .await
        .unwrap();

    let url = created.image_url.expect("image url set");
    let stored = app.stored_file(&url);
    assert!(stored.exists(), "stored file missing at {}", url);
    assert_eq!(std::fs::read(&stored).unwrap(), vec![0xAA, 0xBB, 0xCC]);
}

#[tokio::test]
async fn replacing_the_image_removes_the_old_file() {
    let app = common::setup().await;
    let content = &app.services.content;

    let created = content
        .create_announcement(
            announcement("Eid prayer", false),
            Some((vec![1, 2, 3], "old.png".to_string())),
        )
        .await
        .unwrap();
    let old_url = created.image_url.clone().unwrap();

    let updated = content
        .update_announcement(
            created.id,
            UpdateAnnouncement::default(),
            Some((vec![4, 5, 6], "new.png".to_string())),
        )
        .await
        .unwrap();
    let new_url = updated.image_url.unwrap();

    assert_ne!(new_url, old_url);
    assert!(!app.stored_file(&old_url).exists());
    assert_eq!(std::fs::read(app.stored_file(&new_url)).unwrap(), vec![4, 5, 6]);
}

#[tokio::test]
async fn delete_removes_the_record_and_its_image() {
    let app = common::setup().await;
    let content = &app.services.content;

    let created = content
        .create_announcement(
            announcement("Eid prayer", true),
            Some((vec![9, 9], "poster.png".to_string())),
        )
        .await
        .unwrap();
    let url = created.image_url.clone().unwrap();

    content.delete_announcement(created.id).await.unwrap();

    assert!(!app.stored_file(&url).exists());
    let err = content.get_announcement(created.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Domain(_)), "got {:?}", err);
}

#[tokio::test]
async fn toggling_published_updates_the_count() {
    let app = common::setup().await;
    let content = &app.services.content;

    let created = content
        .create_announcement(announcement("Jumu'ah timing", false), None)
        .await
        .unwrap();
    assert_eq!(content.published_count().await.unwrap(), 0);

    content
        .update_announcement(
            created.id,
            UpdateAnnouncement {
                published: Some(true),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(content.published_count().await.unwrap(), 1);
}

#[tokio::test]
async fn an_empty_title_is_rejected() {
    let app = common::setup().await;

    let err = app
        .services
        .content
        .create_announcement(announcement("", true), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(_)), "got {:?}", err);
}
