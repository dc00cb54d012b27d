use playlog_core::repo::character_repo::{CharacterRepository, SqliteCharacterRepository};
use playlog_core::{Repository, Store, StoreLocation};

fn repository() -> Repository {
    let mut repo = Repository::new(StoreLocation::Memory);
    assert!(repo.initialize());
    repo
}

#[test]
fn initialize_creates_store_file_and_is_repeatable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracker.db");

    let mut repo = Repository::new(path.clone());
    assert!(repo.initialize());
    assert!(repo.initialize());
    assert!(path.exists());
}

#[test]
fn initialize_reports_failure_for_unusable_location() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("nested").join("tracker.db");

    let mut repo = Repository::new(path);
    assert!(!repo.initialize());
    assert!(repo.get_all_characters().is_empty());
}

#[test]
fn get_or_create_character_is_idempotent_per_name() {
    let mut repo = repository();

    let first = repo.get_or_create_character("TestPlayer").unwrap();
    let second = repo.get_or_create_character("TestPlayer").unwrap();
    let other = repo.get_or_create_character("OtherPlayer").unwrap();

    assert_eq!(first.name, "TestPlayer");
    assert_eq!(first.id, second.id);
    assert_ne!(first.id, other.id);
    assert_eq!(repo.get_all_characters().len(), 2);
}

#[test]
fn new_characters_start_inactive() {
    let mut repo = repository();

    let character = repo.get_or_create_character("Fresh").unwrap();
    assert!(!character.is_active);
    assert!(repo.get_active_character().is_none());
}

#[test]
fn get_all_characters_returns_every_character() {
    let mut repo = repository();
    repo.get_or_create_character("Player1").unwrap();
    repo.get_or_create_character("Player2").unwrap();

    let names: Vec<String> = repo
        .get_all_characters()
        .into_iter()
        .map(|character| character.name)
        .collect();
    assert_eq!(names, vec!["Player1".to_string(), "Player2".to_string()]);
}

#[test]
fn set_active_character_leaves_exactly_one_active() {
    let mut repo = repository();
    let first = repo.get_or_create_character("Player1").unwrap();
    let second = repo.get_or_create_character("Player2").unwrap();
    let third = repo.get_or_create_character("Player3").unwrap();

    assert!(repo.set_active_character(first.id));
    assert!(repo.set_active_character(third.id));
    assert!(repo.set_active_character(second.id));

    let active: Vec<_> = repo
        .get_all_characters()
        .into_iter()
        .filter(|character| character.is_active)
        .collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, second.id);
    assert_eq!(repo.get_active_character().unwrap().id, second.id);
}

#[test]
fn set_active_character_with_unknown_id_changes_nothing() {
    let mut repo = repository();
    let character = repo.get_or_create_character("Player1").unwrap();
    assert!(repo.set_active_character(character.id));

    assert!(!repo.set_active_character(99_999));
    assert_eq!(repo.get_active_character().unwrap().id, character.id);
}

#[test]
fn returned_characters_are_detached_copies() {
    let mut repo = repository();
    let mut character = repo.get_or_create_character("Original").unwrap();

    character.name = "Renamed".to_string();
    character.is_active = true;

    let reloaded = repo.get_or_create_character("Original").unwrap();
    assert_eq!(reloaded.id, character.id);
    assert_eq!(reloaded.name, "Original");
    assert!(!reloaded.is_active);
    assert!(repo.get_active_character().is_none());
}

#[test]
fn close_is_safe_to_repeat_and_repository_reopens_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracker.db");

    let mut repo = Repository::new(path.clone());
    assert!(repo.initialize());
    let character = repo.get_or_create_character("Persisted").unwrap();
    repo.close();
    repo.close();
    assert!(!repo.is_initialized());

    assert!(repo.initialize());
    let reloaded = repo.get_or_create_character("Persisted").unwrap();
    assert_eq!(reloaded.id, character.id);
}

#[test]
fn store_never_holds_more_than_one_active_flag() {
    let mut repo = repository();
    for name in ["A", "B", "C", "D"] {
        let character = repo.get_or_create_character(name).unwrap();
        assert!(repo.set_active_character(character.id));
    }

    let active = repo
        .store_mut()
        .scope(|tx| SqliteCharacterRepository::new(tx).count_active())
        .unwrap();
    assert_eq!(active, 1);
}

#[test]
fn find_character_never_creates() {
    let mut repo = repository();
    assert!(repo.find_character("Ghost").is_none());
    assert!(repo.get_all_characters().is_empty());

    let created = repo.get_or_create_character("Ghost").unwrap();
    assert_eq!(repo.find_character("Ghost").unwrap().id, created.id);
}
