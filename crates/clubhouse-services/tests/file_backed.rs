use clubhouse_core::{CoreConfig, StorageBackendKind};
use clubhouse_services::{AppContext, EventsService, ProfileService};

fn file_config(root: &std::path::Path) -> CoreConfig {
    let mut cfg = CoreConfig::default();
    cfg.storage.backend = StorageBackendKind::File;
    cfg.storage.root_dir = Some(root.to_path_buf());
    cfg
}

#[tokio::test]
async fn records_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let ctx = AppContext::from_config(file_config(dir.path())).unwrap();
        let profiles = ProfileService::new(&ctx);
        let mut profile = profiles.load().await;
        profile.email = Some("alexey@example.com".to_string());
        profiles.save(&profile).await.unwrap();
        EventsService::new(&ctx).toggle_signup(3).await.unwrap();
    }

    let ctx = AppContext::from_config(file_config(dir.path())).unwrap();
    let profile = ProfileService::new(&ctx).load().await;
    assert_eq!(profile.email.as_deref(), Some("alexey@example.com"));

    let registered = ProfileService::new(&ctx).registered_events().await;
    assert_eq!(registered.len(), 1);
    assert_eq!(registered[0].id, 3);
    assert!(dir.path().join("user_events.json").exists());
}

#[test]
fn file_backend_without_root_is_rejected() {
    let mut cfg = CoreConfig::default();
    cfg.storage.backend = StorageBackendKind::File;
    assert!(AppContext::from_config(cfg).is_err());
}
