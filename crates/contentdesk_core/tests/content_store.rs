use chrono::{Duration, TimeZone, Utc};
use contentdesk_core::{
    ContentId, ContentInput, ContentStore, ContentType, Controller, ListView, LoadOutcome,
    ManualClock, MemorySlotRepository, Renderer, SlotRepository, SqliteSlotRepository,
    DEFAULT_SLOT_KEY, EMPTY_PLACEHOLDER,
};

fn input(title: &str, kind: ContentType, body: &str) -> ContentInput {
    ContentInput::new(title, Some(kind), body).unwrap()
}

fn clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap())
}

#[test]
fn create_prepends_and_sets_equal_timestamps() {
    let mut store = ContentStore::new(MemorySlotRepository::new(), DEFAULT_SLOT_KEY)
        .with_clock(clock());

    let first = store.create(input("A", ContentType::Note, "b1")).clone();
    assert_eq!(store.len(), 1);
    assert_eq!(first.created_at, first.updated_at);
    assert!(!first.is_edited());

    let second = store.create(input("B", ContentType::Blog, "b2")).clone();
    assert_eq!(store.len(), 2);
    assert_eq!(store.records()[0].id, second.id);
    assert_eq!(store.records()[1].id, first.id);
    assert_ne!(first.id, second.id);
}

#[test]
fn update_preserves_identity_and_position() {
    let clock = clock();
    let mut store = ContentStore::new(MemorySlotRepository::new(), DEFAULT_SLOT_KEY)
        .with_clock(clock.clone());
    let a = store.create(input("A", ContentType::Note, "b1")).clone();
    store.create(input("B", ContentType::Note, "b2"));
    store.create(input("C", ContentType::Note, "b3"));

    clock.advance(Duration::minutes(5));
    assert!(store.update(&a.id, input("A2", ContentType::Page, "b1-updated")));

    let edited = &store.records()[2];
    assert_eq!(edited.id, a.id);
    assert_eq!(edited.created_at, a.created_at);
    assert_eq!(edited.updated_at, a.created_at + Duration::minutes(5));
    assert_eq!(edited.title, "A2");
    assert_eq!(edited.kind, ContentType::Page);
    assert_eq!(edited.body, "b1-updated");
}

#[test]
fn update_unknown_id_is_noop() {
    let mut store = ContentStore::new(MemorySlotRepository::new(), DEFAULT_SLOT_KEY);
    store.create(input("A", ContentType::Note, "b1"));
    let before = store.records().to_vec();

    assert!(!store.update(&ContentId::from("missing"), input("X", ContentType::Note, "x")));
    assert_eq!(store.records(), before.as_slice());
}

#[test]
fn delete_removes_exactly_one_record() {
    let mut store = ContentStore::new(MemorySlotRepository::new(), DEFAULT_SLOT_KEY);
    let a = store.create(input("A", ContentType::Note, "b1")).id.clone();
    let b = store.create(input("B", ContentType::Note, "b2")).id.clone();

    assert!(store.delete(&b));
    assert_eq!(store.len(), 1);
    assert!(store.find_by_id(&b).is_none());
    assert!(store.find_by_id(&a).is_some());

    assert!(!store.delete(&ContentId::from("missing")));
    assert_eq!(store.len(), 1);
}

#[test]
fn persist_then_load_roundtrips_through_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("contentdesk.sqlite3");
    let clock = clock();

    let expected = {
        let repo = SqliteSlotRepository::open(&db_path).unwrap();
        let mut store = ContentStore::new(repo, DEFAULT_SLOT_KEY).with_clock(clock.clone());
        let a = store.create(input("A", ContentType::Note, "line one\nline two")).id.clone();
        clock.advance(Duration::milliseconds(1_234));
        store.create(input("B \"quoted\"", ContentType::Article, "ünïcödé"));
        clock.advance(Duration::nanoseconds(987_654_321));
        store.update(&a, input("A", ContentType::Note, "edited"));
        store.persist().unwrap();
        store.records().to_vec()
    };

    let repo = SqliteSlotRepository::open(&db_path).unwrap();
    let mut reloaded = ContentStore::new(repo, DEFAULT_SLOT_KEY);
    let outcome = reloaded.load().unwrap();
    assert_eq!(
        outcome,
        LoadOutcome::Loaded {
            count: 2,
            dropped_duplicates: 0,
            dropped_invalid: 0,
        }
    );
    assert_eq!(reloaded.records(), expected.as_slice());
}

#[test]
fn load_of_absent_slot_is_empty() {
    let mut store = ContentStore::new(SqliteSlotRepository::open_in_memory().unwrap(), "contents");
    assert_eq!(store.load().unwrap(), LoadOutcome::Empty);
    assert!(store.is_empty());
}

#[test]
fn load_of_corrupt_slot_recovers_to_empty() {
    let repo = MemorySlotRepository::new().with_slot(DEFAULT_SLOT_KEY, "{not json");
    let mut store = ContentStore::new(repo, DEFAULT_SLOT_KEY);
    store.create(input("stale", ContentType::Note, "in memory"));

    let outcome = store.load().unwrap();
    assert!(matches!(outcome, LoadOutcome::Recovered { .. }));
    assert!(store.is_empty());
}

#[test]
fn persist_after_recovery_overwrites_corrupt_slot() {
    let repo = MemorySlotRepository::new().with_slot(DEFAULT_SLOT_KEY, "{\"id\":1}");
    let mut store = ContentStore::new(repo, DEFAULT_SLOT_KEY);
    assert!(matches!(store.load().unwrap(), LoadOutcome::Recovered { .. }));

    store.persist().unwrap();
    assert_eq!(
        store.repo().read_slot(DEFAULT_SLOT_KEY).unwrap().as_deref(),
        Some("[]")
    );
}

#[test]
fn stores_with_different_keys_do_not_share_data() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("shared.sqlite3");

    let mut left = ContentStore::new(SqliteSlotRepository::open(&db_path).unwrap(), "left");
    left.create(input("L", ContentType::Note, "l"));
    left.persist().unwrap();

    let mut right = ContentStore::new(SqliteSlotRepository::open(&db_path).unwrap(), "right");
    assert_eq!(right.load().unwrap(), LoadOutcome::Empty);
}

fn repo_with_blob_slot() -> SqliteSlotRepository {
    let repo = SqliteSlotRepository::open_in_memory().unwrap();
    repo.connection()
        .execute(
            "INSERT INTO slots (key, value) VALUES (?1, X'FFFE00');",
            [DEFAULT_SLOT_KEY],
        )
        .unwrap();
    repo
}

#[test]
fn non_utf8_blob_slot_recovers_instead_of_failing_startup() {
    let store = ContentStore::new(repo_with_blob_slot(), DEFAULT_SLOT_KEY);
    let (controller, outcome) = Controller::init(store, Renderer::default()).unwrap();

    match outcome {
        LoadOutcome::Recovered { reason } => assert!(reason.contains("blob")),
        other => panic!("expected recovery, got {other:?}"),
    }
    assert!(controller.store().is_empty());
    assert_eq!(controller.view(), &ListView::Placeholder(EMPTY_PLACEHOLDER));
}

#[test]
fn persist_after_blob_recovery_writes_readable_text() {
    let mut store = ContentStore::new(repo_with_blob_slot(), DEFAULT_SLOT_KEY);
    assert!(matches!(store.load().unwrap(), LoadOutcome::Recovered { .. }));

    store.create(input("A", ContentType::Note, "b1"));
    store.persist().unwrap();
    assert_eq!(
        store.load().unwrap(),
        LoadOutcome::Loaded {
            count: 1,
            dropped_duplicates: 0,
            dropped_invalid: 0,
        }
    );
}

#[test]
fn one_invalid_record_does_not_discard_the_rest() {
    let raw = r#"[
        {"id":"a","title":"A","type":"note","body":"b1",
         "createdAt":"2026-10-19T08:00:00Z","updatedAt":"2026-10-19T08:00:00Z"},
        {"id":"b","title":"B","type":"Note","body":"b2",
         "createdAt":"2026-10-19T07:00:00Z","updatedAt":"2026-10-19T07:00:00Z"},
        {"id":"c","title":"C","type":"podcast","body":"b3",
         "createdAt":"2026-10-19T06:00:00Z","updatedAt":"2026-10-19T06:00:00Z"}
    ]"#;
    let repo = MemorySlotRepository::new().with_slot(DEFAULT_SLOT_KEY, raw);
    let mut store = ContentStore::new(repo, DEFAULT_SLOT_KEY).with_clock(clock());

    assert_eq!(
        store.load().unwrap(),
        LoadOutcome::Loaded {
            count: 2,
            dropped_duplicates: 0,
            dropped_invalid: 1,
        }
    );
    let ids: Vec<_> = store.records().iter().map(|record| record.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(store.records()[1].kind, ContentType::Note);

    store.create(input("D", ContentType::Page, "b4"));
    store.persist().unwrap();
    assert_eq!(
        store.load().unwrap(),
        LoadOutcome::Loaded {
            count: 3,
            dropped_duplicates: 0,
            dropped_invalid: 0,
        }
    );
    assert!(store.find_by_id(&ContentId::from("a")).is_some());
}
