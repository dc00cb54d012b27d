use playlog_core::{NewActivity, NewBusinessSnapshot, Repository, StoreLocation};

fn repository() -> Repository {
    let mut repo = Repository::new(StoreLocation::Memory);
    assert!(repo.initialize());
    repo
}

#[test]
fn start_session_returns_open_session_with_id() {
    let mut repo = repository();
    let character = repo.get_or_create_character("TestPlayer").unwrap();

    let session = repo.start_session(&character, 1_000_000).unwrap();
    assert!(session.id > 0);
    assert_eq!(session.character_id, character.id);
    assert_eq!(session.start_money, 1_000_000);
    assert!(session.is_open());
    assert_eq!(session.end_money, None);
    assert_eq!(session.total_earnings, None);
}

#[test]
fn end_session_settles_total_earnings() {
    let mut repo = repository();
    let character = repo.get_or_create_character("TestPlayer").unwrap();
    let session = repo.start_session(&character, 1_000_000).unwrap();

    assert!(repo.end_session(session.id, 1_500_000));

    let closed = repo.get_recent_sessions(character.id, 1).remove(0);
    assert_eq!(closed.id, session.id);
    assert!(closed.ended_at.is_some());
    assert_eq!(closed.end_money, Some(1_500_000));
    assert_eq!(closed.total_earnings, Some(500_000));
    assert!(closed.duration_seconds() >= 0);
}

#[test]
fn end_session_on_unknown_id_returns_false_and_writes_nothing() {
    let mut repo = repository();
    let character = repo.get_or_create_character("TestPlayer").unwrap();

    assert!(!repo.end_session(99_999, 1_000_000));
    assert!(repo.get_recent_sessions(character.id, 10).is_empty());
}

#[test]
fn start_session_for_unknown_character_fails_softly() {
    let mut repo = repository();
    let mut ghost = repo.get_or_create_character("Ghost").unwrap();
    ghost.id = 4_242;

    assert!(repo.start_session(&ghost, 0).is_none());
}

#[test]
fn recent_sessions_are_newest_first_and_limited() {
    let mut repo = repository();
    let character = repo.get_or_create_character("TestPlayer").unwrap();

    let mut ids = Vec::new();
    for i in 0..5 {
        let session = repo.start_session(&character, i * 100_000).unwrap();
        assert!(repo.end_session(session.id, (i + 1) * 100_000));
        ids.push(session.id);
    }

    let recent = repo.get_recent_sessions(character.id, 3);
    let recent_ids: Vec<_> = recent.iter().map(|session| session.id).collect();
    assert_eq!(recent_ids, vec![ids[4], ids[3], ids[2]]);
}

#[test]
fn log_activity_round_trips_request_fields() {
    let mut repo = repository();
    let character = repo.get_or_create_character("TestPlayer").unwrap();
    let session = repo.start_session(&character, 1_000_000).unwrap();

    let request = NewActivity::new(session.id, "SELL_MISSION")
        .name("Bunker sale")
        .earnings(210_000)
        .success(Some(false))
        .duration_seconds(900)
        .business_type("BUNKER")
        .notes("lost one vehicle");
    let activity = repo.log_activity(&request).unwrap();

    assert!(activity.id > 0);
    assert_eq!(activity.session_id, session.id);
    assert_eq!(activity.activity_type, "SELL_MISSION");
    assert_eq!(activity.activity_name, "Bunker sale");
    assert_eq!(activity.earnings, 210_000);
    assert_eq!(activity.success, Some(false));
    assert_eq!(activity.duration_seconds, 900);
    assert_eq!(activity.business_type.as_deref(), Some("BUNKER"));
    assert_eq!(activity.notes.as_deref(), Some("lost one vehicle"));

    let ended_at = activity.ended_at.unwrap();
    assert_eq!((ended_at - activity.started_at).num_seconds(), 900);
}

#[test]
fn log_activity_applies_defaults() {
    let mut repo = repository();
    let character = repo.get_or_create_character("TestPlayer").unwrap();
    let session = repo.start_session(&character, 0).unwrap();

    let activity = repo
        .log_activity(&NewActivity::new(session.id, "CONTACT_MISSION"))
        .unwrap();
    assert_eq!(activity.activity_name, "");
    assert_eq!(activity.earnings, 0);
    assert_eq!(activity.success, Some(true));
    assert_eq!(activity.duration_seconds, 0);
    assert_eq!(activity.business_type, None);
}

#[test]
fn session_activities_are_most_recent_first() {
    let mut repo = repository();
    let character = repo.get_or_create_character("TestPlayer").unwrap();
    let session = repo.start_session(&character, 1_000_000).unwrap();

    for i in 0..3 {
        let request = NewActivity::new(session.id, "CONTACT_MISSION")
            .name(format!("Mission {i}"))
            .earnings(10_000 * (i + 1))
            .duration_seconds(300);
        repo.log_activity(&request).unwrap();
    }

    let names: Vec<String> = repo
        .get_session_activities(session.id)
        .into_iter()
        .map(|activity| activity.activity_name)
        .collect();
    assert_eq!(names, vec!["Mission 2", "Mission 1", "Mission 0"]);
}

#[test]
fn log_earning_round_trips_including_debits() {
    let mut repo = repository();
    let character = repo.get_or_create_character("TestPlayer").unwrap();
    let session = repo.start_session(&character, 1_000_000).unwrap();

    let credit = repo
        .log_earning(session.id, 50_000, Some("Contact Mission"), Some(1_050_000))
        .unwrap();
    assert_eq!(credit.session_id, session.id);
    assert_eq!(credit.amount, 50_000);
    assert_eq!(credit.source.as_deref(), Some("Contact Mission"));
    assert_eq!(credit.balance_after, Some(1_050_000));

    let debit = repo.log_earning(session.id, -25_000, None, None).unwrap();
    assert_eq!(debit.amount, -25_000);
    assert_eq!(debit.source, None);
    assert!(debit.id > credit.id);
}

#[test]
fn latest_business_snapshot_is_per_character_and_type() {
    let mut repo = repository();
    let character = repo.get_or_create_character("TestPlayer").unwrap();
    let other = repo.get_or_create_character("Other").unwrap();

    assert!(repo
        .get_latest_business_snapshot(character.id, "BUNKER")
        .is_none());

    let first = NewBusinessSnapshot {
        stock_level: Some(40),
        supply_level: Some(80),
        stock_value: Some(420_000),
        ..NewBusinessSnapshot::new(character.id, "BUNKER")
    };
    let second = NewBusinessSnapshot {
        stock_level: Some(60),
        supply_level: Some(20),
        stock_value: Some(630_000),
        ..NewBusinessSnapshot::new(character.id, "BUNKER")
    };
    let nightclub = NewBusinessSnapshot {
        stock_level: Some(100),
        ..NewBusinessSnapshot::new(character.id, "NIGHTCLUB")
    };
    repo.save_business_snapshot(&first).unwrap();
    let saved = repo.save_business_snapshot(&second).unwrap();
    repo.save_business_snapshot(&nightclub).unwrap();
    repo.save_business_snapshot(&NewBusinessSnapshot::new(other.id, "BUNKER"))
        .unwrap();

    let latest = repo
        .get_latest_business_snapshot(character.id, "BUNKER")
        .unwrap();
    assert_eq!(latest.id, saved.id);
    assert_eq!(latest.stock_level, Some(60));
    assert_eq!(latest.supply_level, Some(20));
    assert_eq!(latest.stock_value, Some(630_000));
}

#[test]
fn business_levels_are_stored_unvalidated() {
    let mut repo = repository();
    let character = repo.get_or_create_character("TestPlayer").unwrap();

    let request = NewBusinessSnapshot {
        stock_level: Some(140),
        supply_level: None,
        ..NewBusinessSnapshot::new(character.id, "ACID_LAB")
    };
    let snapshot = repo.save_business_snapshot(&request).unwrap();
    assert_eq!(snapshot.stock_level, Some(140));
    assert_eq!(snapshot.supply_level, None);
    assert_eq!(snapshot.stock_value, None);
}

#[test]
fn end_session_rejects_overflowing_earnings_and_leaves_session_open() {
    let mut repo = repository();
    let character = repo.get_or_create_character("Overflow").unwrap();
    let session = repo.start_session(&character, -10).unwrap();

    assert!(!repo.end_session(session.id, i64::MAX));

    let stored = repo.get_recent_sessions(character.id, 1).remove(0);
    assert_eq!(stored.id, session.id);
    assert!(stored.is_open());
    assert_eq!(stored.end_money, None);
    assert_eq!(stored.total_earnings, None);
}

#[test]
fn log_activity_rejects_out_of_range_durations() {
    let mut repo = repository();
    let character = repo.get_or_create_character("Marathon").unwrap();
    let session = repo.start_session(&character, 0).unwrap();

    for duration in [i64::MAX, i64::MAX / 2, 1_000_000_000_000] {
        let request = NewActivity::new(session.id, "VIP_WORK").duration_seconds(duration);
        assert!(repo.log_activity(&request).is_none());
    }
    assert!(repo.get_session_activities(session.id).is_empty());

    let week = NewActivity::new(session.id, "VIP_WORK").duration_seconds(7 * 24 * 3600);
    let logged = repo.log_activity(&week).unwrap();
    assert_eq!(
        (logged.ended_at.unwrap() - logged.started_at).num_seconds(),
        7 * 24 * 3600
    );
}
