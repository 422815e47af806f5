use itemsvc_core::{
    get_database_pool, run_migrations, DatabaseConfig, ErrorKind, ItemError, ItemManager,
    ItemRepository, ItemRequest,
};
use tempfile::NamedTempFile;

async fn setup_manager() -> (ItemManager, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let config = DatabaseConfig {
        url: format!("sqlite:{}", temp_file.path().display()),
        ..DatabaseConfig::default()
    };

    let pool = get_database_pool(&config).await.unwrap();
    run_migrations(pool.clone()).await.unwrap();

    (ItemManager::new(ItemRepository::new(pool)), temp_file)
}

#[tokio::test]
async fn test_widget_scenario() {
    let (manager, _file) = setup_manager().await;

    let created = manager
        .create(ItemRequest::new("Widget", "A widget", "u1"))
        .await
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.created_by, "u1");
    assert_eq!(created.updated_by, "u1");

    let missing = manager.get(created.id + 1000).await.unwrap_err();
    assert_eq!(missing.kind(), ErrorKind::NotFound);

    let unchanged = manager
        .update(created.id, ItemRequest::new("Widget", "A widget", "u2"))
        .await
        .unwrap_err();
    assert_eq!(unchanged, ItemError::NotModified);

    let updated = manager
        .update(created.id, ItemRequest::new("Widget2", "A widget", "u2"))
        .await
        .unwrap();
    assert_eq!(updated.name, "Widget2");
    assert_eq!(updated.updated_by, "u2");

    let stored = manager.get(created.id).await.unwrap();
    assert_eq!(stored.name, "Widget2");
    assert_eq!(stored.updated_by, "u2");
    assert_eq!(stored.created_by, "u1");
    assert_eq!(stored.created_at, created.created_at);
}

#[tokio::test]
async fn test_create_then_get_returns_equal_item() {
    let (manager, _file) = setup_manager().await;

    for name in ["alpha", "beta", "gamma"] {
        let created = manager
            .create(ItemRequest::new(name, format!("{} item", name), "u1"))
            .await
            .unwrap();
        let fetched = manager.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }
}

#[tokio::test]
async fn test_every_created_item_is_readable_at_once() {
    let (manager, _file) = setup_manager().await;

    let mut missing = 0;
    for n in 0..50 {
        let created = manager
            .create(ItemRequest::new(format!("Item {}", n), "", "u1"))
            .await
            .unwrap();
        if manager.get(created.id).await.is_err() {
            missing += 1;
        }
    }

    assert_eq!(missing, 0);
}

#[tokio::test]
async fn test_no_op_update_leaves_audit_fields() {
    let (manager, _file) = setup_manager().await;

    let created = manager.create(ItemRequest::new("N", "D", "u1")).await.unwrap();

    let err = manager
        .update(created.id, ItemRequest::new("N", "D", "u9"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotModified);

    let stored = manager.get(created.id).await.unwrap();
    assert_eq!(stored.updated_at, created.updated_at);
    assert_eq!(stored.updated_by, "u1");
}

#[tokio::test]
async fn test_patch_merges_with_stored_item() {
    let (manager, _file) = setup_manager().await;

    let created = manager.create(ItemRequest::new("N", "D", "u1")).await.unwrap();

    let patched = manager
        .patch(created.id, ItemRequest::new("", "D2", "u2"))
        .await
        .unwrap();
    assert_eq!(patched.name, "N");
    assert_eq!(patched.description, "D2");

    let stored = manager.get(created.id).await.unwrap();
    assert_eq!(stored.name, "N");
    assert_eq!(stored.description, "D2");
    assert_eq!(stored.updated_by, "u2");
    assert!(stored.updated_at >= stored.created_at);

    let err = manager
        .patch(created.id, ItemRequest::new("", "", "u3"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotModified);
}

#[tokio::test]
async fn test_storage_failure_after_pool_close() {
    let temp_file = NamedTempFile::new().unwrap();
    let config = DatabaseConfig {
        url: format!("sqlite:{}", temp_file.path().display()),
        ..DatabaseConfig::default()
    };
    let pool = get_database_pool(&config).await.unwrap();
    run_migrations(pool.clone()).await.unwrap();
    let manager = ItemManager::new(ItemRepository::new(pool.clone()));

    pool.close().await;

    let err = manager
        .create(ItemRequest::new("Widget", "", "u1"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StorageFailure);

    let err = manager.get(1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StorageFailure);
}
