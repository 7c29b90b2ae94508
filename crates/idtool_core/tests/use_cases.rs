use chrono::{DateTime, Duration, TimeZone, Utc};
use idtool_core::{
    generate_ids, list_ids, make_provider, make_repository, IdProvider, IdRepository,
    JsonlIdRepository, ProviderKind, RawIdRecord, RepoError, RepoResult, RepositoryKind,
    SqliteIdRepository, StorageConfig,
};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

/// In-memory repository that fails every save after `fail_after` successes.
struct FlakyRepository {
    saved: RefCell<Vec<RawIdRecord>>,
    fail_after: usize,
    attempts: Cell<usize>,
    location: PathBuf,
}

impl FlakyRepository {
    fn failing_after(fail_after: usize) -> Self {
        Self {
            saved: RefCell::new(Vec::new()),
            fail_after,
            attempts: Cell::new(0),
            location: PathBuf::from("flaky"),
        }
    }
}

impl IdRepository for FlakyRepository {
    fn save(&self, id: &str, provider: &str, timestamp: DateTime<Utc>) -> RepoResult<()> {
        self.attempts.set(self.attempts.get() + 1);
        if self.saved.borrow().len() >= self.fail_after {
            return Err(RepoError::Io {
                path: self.location.clone(),
                source: io::Error::other("disk full"),
            });
        }
        self.saved
            .borrow_mut()
            .push(RawIdRecord::new(id, provider, timestamp));
        Ok(())
    }

    fn list(&self, _limit: Option<usize>) -> RepoResult<Vec<RawIdRecord>> {
        Ok(self.saved.borrow().clone())
    }

    fn location(&self) -> &Path {
        &self.location
    }
}

struct FixedProvider;

impl IdProvider for FixedProvider {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn generate_id(&self) -> String {
        "always-the-same".to_string()
    }
}

fn both_backends(dir: &Path) -> Vec<Box<dyn IdRepository>> {
    let config = StorageConfig::in_dir(dir);
    RepositoryKind::ALL
        .into_iter()
        .map(|kind| make_repository(kind, &config).unwrap())
        .collect()
}

#[test]
fn uuid4_into_fresh_log_file_then_list_last_two() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonlIdRepository::new(dir.path().join("ids.jsonl")).unwrap();
    let provider = make_provider(ProviderKind::Uuid4);

    let records = generate_ids(provider.as_ref(), &repo, 3).unwrap();
    assert_eq!(records.len(), 3);
    let ids: HashSet<&str> = records.iter().map(|r| r.id()).collect();
    assert_eq!(ids.len(), 3);
    assert!(records.iter().all(|r| r.provider() == "uuid4"));
    assert!(records
        .windows(2)
        .all(|pair| pair[0].timestamp() <= pair[1].timestamp()));

    let listed = list_ids(&repo, Some(2)).unwrap();
    assert_eq!(listed.len(), 2);
    // Newest first; ties keep file order after the stable sort.
    let listed_ids: HashSet<&str> = listed.iter().map(|r| r.id()).collect();
    let expected: HashSet<&str> = [records[1].id(), records[2].id()].into_iter().collect();
    assert_eq!(listed_ids, expected);
    assert!(listed[0].timestamp() >= listed[1].timestamp());
    assert_eq!(listed[0].timestamp(), records[2].timestamp());
}

#[test]
fn generated_records_round_trip_through_every_backend() {
    let dir = tempfile::tempdir().unwrap();
    for repo in both_backends(dir.path()) {
        for kind in ProviderKind::ALL {
            let provider = make_provider(kind);
            let generated = generate_ids(provider.as_ref(), &repo, 4).unwrap();

            let listed = list_ids(&repo, None).unwrap();
            assert!(listed.len() >= generated.len());
            for record in &generated {
                let found = listed
                    .iter()
                    .find(|r| r.id() == record.id())
                    .unwrap_or_else(|| panic!("{} missing from {:?}", record.id(), repo.location()));
                assert_eq!(found.provider(), kind.as_str());
                assert_eq!(found.timestamp(), record.timestamp());
            }
        }
    }
}

#[test]
fn list_is_newest_first_and_limit_picks_most_recent_for_every_backend() {
    let dir = tempfile::tempdir().unwrap();
    let base = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
    // Appended in time order, as generation does.
    let offsets = [0, 5, 10, 15, 20, 25];

    for repo in both_backends(dir.path()) {
        for (i, minutes) in offsets.iter().enumerate() {
            repo.save(&format!("id-{i}"), "ulid", base + Duration::minutes(*minutes))
                .unwrap();
        }

        let all = list_ids(&repo, None).unwrap();
        assert_eq!(all.len(), offsets.len());
        assert!(all
            .windows(2)
            .all(|pair| pair[0].timestamp() >= pair[1].timestamp()));
        assert_eq!(all[0].id(), "id-5");

        let top_ids: Vec<String> = list_ids(&repo, Some(3))
            .unwrap()
            .into_iter()
            .map(|r| r.id().to_string())
            .collect();
        assert_eq!(top_ids, vec!["id-5", "id-4", "id-3"]);
    }
}

#[test]
fn sqlite_native_ascending_order_is_reversed_by_listing() {
    let repo = SqliteIdRepository::open_in_memory().unwrap();
    let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    repo.save("late", "ksuid", base + Duration::days(1)).unwrap();
    repo.save("early", "ksuid", base).unwrap();

    let raw: Vec<String> = repo.list(None).unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(raw, vec!["early", "late"]);

    let listed: Vec<String> = list_ids(&repo, None)
        .unwrap()
        .into_iter()
        .map(|r| r.id().to_string())
        .collect();
    assert_eq!(listed, vec!["late", "early"]);
}

#[test]
fn file_order_tail_can_hide_newer_out_of_order_record() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonlIdRepository::new(dir.path().join("ids.jsonl")).unwrap();
    let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    repo.save("newest-but-first", "uuid4", base + Duration::days(9)).unwrap();
    repo.save("old-1", "uuid4", base).unwrap();
    repo.save("old-2", "uuid4", base + Duration::days(1)).unwrap();

    let listed: Vec<String> = list_ids(&repo, Some(2))
        .unwrap()
        .into_iter()
        .map(|r| r.id().to_string())
        .collect();
    assert_eq!(listed, vec!["old-2", "old-1"]);
}

#[test]
fn records_with_unparseable_timestamps_are_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ids.jsonl");
    let lines = [
        r#"{"timestamp":"2025-01-01T00:00:00+00:00","id":"good-1","provider":"ulid"}"#,
        r#"{"timestamp":"not a time","id":"bad","provider":"ulid"}"#,
        r#"{"id":"no-timestamp","provider":"ulid"}"#,
        r#"{"timestamp":"2025-01-02T00:00:00.5+01:00","id":"good-2","provider":"ulid"}"#,
    ];
    std::fs::write(&path, lines.join("\n")).unwrap();
    let repo = JsonlIdRepository::new(&path).unwrap();

    let listed = list_ids(&repo, None).unwrap();
    let ids: Vec<&str> = listed.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["good-2", "good-1"]);
    assert_eq!(
        listed[0].timestamp(),
        Utc.with_ymd_and_hms(2025, 1, 1, 23, 0, 0).unwrap() + Duration::milliseconds(500)
    );
}

#[test]
fn save_failure_aborts_generation_and_keeps_earlier_records() {
    let repo = FlakyRepository::failing_after(2);
    let provider = make_provider(ProviderKind::Sha256);

    let err = generate_ids(provider.as_ref(), &repo, 5).unwrap_err();
    assert!(matches!(err, RepoError::Io { .. }));
    assert_eq!(repo.attempts.get(), 3);
    assert_eq!(repo.saved.borrow().len(), 2);
    assert_eq!(list_ids(&repo, None).unwrap().len(), 2);
}

#[test]
fn duplicate_id_from_weak_provider_surfaces_as_storage_error() {
    let repo = SqliteIdRepository::open_in_memory().unwrap();

    let err = generate_ids(&FixedProvider, &repo, 2).unwrap_err();
    assert!(matches!(&err, RepoError::DuplicateId(id) if id == "always-the-same"));

    let listed = list_ids(&repo, None).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].provider(), "fixed");
}

#[test]
fn zero_count_and_zero_limit_are_empty() {
    let repo = FlakyRepository::failing_after(0);
    let records = generate_ids(&FixedProvider, &repo, 0).unwrap();
    assert!(records.is_empty());
    assert_eq!(repo.attempts.get(), 0);

    let sqlite = SqliteIdRepository::open_in_memory().unwrap();
    generate_ids(&FixedProvider, &sqlite, 1).unwrap();
    assert!(list_ids(&sqlite, Some(0)).unwrap().is_empty());
}
