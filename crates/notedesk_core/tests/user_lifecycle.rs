use notedesk_core::db::open_db_in_memory;
use notedesk_core::{
    ExistencePolicy, InMemoryRepository, Note, NoteContent, NoteService, RepoError, RepoResult,
    Repository, ResourceId, ServiceError, SqliteNoteRepository, SqliteUserRepository, User,
    UserContent, UserService,
};
use std::error::Error;

fn ada() -> UserContent {
    UserContent::new("Ada Lovelace", "ada@example.com")
}

#[test]
fn get_user_by_unknown_id_is_not_found() {
    let service = UserService::new(InMemoryRepository::new());
    let err = service.get_user_by_id(3).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { id: 3, .. }));
    assert_eq!(err.to_string(), "user not found with id 3");
    assert_eq!(
        UserService::<InMemoryRepository<User>>::POLICY,
        ExistencePolicy::MustExist
    );
}

#[test]
fn create_update_and_read_back() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());

    let created = service.create_user(ada()).unwrap();
    let id = created.id.unwrap();
    assert_eq!(service.get_user_by_id(id).unwrap(), created);

    let updated = service
        .update_user(id, UserContent::new("Ada King", "ada.king@example.com"))
        .unwrap();
    assert_eq!(updated.id, Some(id));
    assert_eq!(updated.name, "Ada King");
    assert_eq!(updated.email, "ada.king@example.com");
}

#[test]
fn delete_requires_existing_user() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    let id = service.create_user(ada()).unwrap().id.unwrap();

    service.delete_user(id).unwrap();
    assert!(matches!(
        service.get_user_by_id(id).unwrap_err(),
        ServiceError::NotFound { .. }
    ));
    assert!(matches!(
        service.delete_user(id).unwrap_err(),
        ServiceError::NotFound { .. }
    ));
    assert!(matches!(
        service.update_user(id, ada()).unwrap_err(),
        ServiceError::NotFound { .. }
    ));
    assert_eq!(service.get_all_users().unwrap(), Vec::<User>::new());
}

#[test]
fn invalid_email_is_rejected_before_persisting() {
    let service = UserService::new(InMemoryRepository::new());
    let err = service
        .create_user(UserContent::new("Bob", "bob-at-example"))
        .unwrap_err();
    match err {
        ServiceError::Validation(inner) => assert!(inner.has_field("email")),
        other => panic!("unexpected error: {other}"),
    }
    assert!(service.get_all_users().unwrap().is_empty());
}

#[test]
fn search_summary_and_uppercase_names() {
    let service = UserService::new(InMemoryRepository::new());
    assert_eq!(service.get_users_summary().unwrap(), "No users available");

    service.create_user(ada()).unwrap();
    assert_eq!(service.get_users_summary().unwrap(), "There is 1 user");
    service
        .create_user(UserContent::new("Alan Turing", "alan@example.com"))
        .unwrap();
    assert_eq!(service.get_users_summary().unwrap(), "There are 2 users");

    let hits = service.search_by_name("TURING").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Alan Turing");
    assert_eq!(service.search_by_name("").unwrap().len(), 2);

    assert_eq!(
        service.get_all_names_uppercase().unwrap(),
        vec!["ADA LOVELACE", "ALAN TURING"]
    );
}

#[test]
fn notes_and_users_share_one_connection() {
    let conn = open_db_in_memory().unwrap();
    let notes = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());
    let users = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());

    notes.create_note(NoteContent::new("n", "")).unwrap();
    users.create_user(ada()).unwrap();
    users
        .create_user(UserContent::new("Grace", "grace@example.com"))
        .unwrap();

    assert_eq!(notes.get_notes_summary().unwrap(), "There is 1 note");
    assert_eq!(users.get_users_summary().unwrap(), "There are 2 users");
}

/// Reports a row on lookup that storage no longer has, as if another writer
/// deleted it between fetch and save.
struct VanishingRepository {
    inner: InMemoryRepository<User>,
}

impl Repository<User> for VanishingRepository {
    fn find_all(&self) -> RepoResult<Vec<User>> {
        self.inner.find_all()
    }

    fn find_by_id(&self, id: ResourceId) -> RepoResult<Option<User>> {
        Ok(Some(User {
            id: Some(id),
            name: "stale".to_string(),
            email: "stale@example.com".to_string(),
        }))
    }

    fn find_by_name_contains(&self, fragment: &str) -> RepoResult<Vec<User>> {
        self.inner.find_by_name_contains(fragment)
    }

    fn save(&self, resource: &User) -> RepoResult<User> {
        self.inner.save(resource)
    }

    fn delete_by_id(&self, id: ResourceId) -> RepoResult<()> {
        self.inner.delete_by_id(id)
    }

    fn count(&self) -> RepoResult<u64> {
        self.inner.count()
    }

    fn atomically<R, E, F>(&self, work: F) -> Result<R, E>
    where
        F: FnOnce(&Self) -> Result<R, E>,
        E: From<RepoError>,
    {
        work(self)
    }
}

#[test]
fn row_vanishing_mid_update_is_a_conflict_not_a_resurrection() {
    let service = UserService::new(VanishingRepository {
        inner: InMemoryRepository::new(),
    });

    let err = service.update_user(9, ada()).unwrap_err();
    assert!(matches!(err, ServiceError::Conflict { id: 9, .. }));
    assert_eq!(service.get_all_users().unwrap(), Vec::<User>::new());
}

/// Fails every call with a storage error.
struct BrokenRepository;

impl BrokenRepository {
    fn failure<T>() -> RepoResult<T> {
        Err(RepoError::InvalidData("disk on fire".to_string()))
    }
}

impl Repository<Note> for BrokenRepository {
    fn find_all(&self) -> RepoResult<Vec<Note>> {
        Self::failure()
    }

    fn find_by_id(&self, _id: ResourceId) -> RepoResult<Option<Note>> {
        Self::failure()
    }

    fn find_by_name_contains(&self, _fragment: &str) -> RepoResult<Vec<Note>> {
        Self::failure()
    }

    fn save(&self, _resource: &Note) -> RepoResult<Note> {
        Self::failure()
    }

    fn delete_by_id(&self, _id: ResourceId) -> RepoResult<()> {
        Self::failure()
    }

    fn count(&self) -> RepoResult<u64> {
        Self::failure()
    }

    fn atomically<R, E, F>(&self, work: F) -> Result<R, E>
    where
        F: FnOnce(&Self) -> Result<R, E>,
        E: From<RepoError>,
    {
        work(self)
    }
}

#[test]
fn storage_failures_propagate_unmodified() {
    let service = NoteService::new(BrokenRepository);

    let errors = [
        service.get_all_notes().map(|_| ()).unwrap_err(),
        service.get_note_by_id(1).map(|_| ()).unwrap_err(),
        service.delete_note(1).unwrap_err(),
        service.get_notes_summary().map(|_| ()).unwrap_err(),
        service
            .update_note(1, NoteContent::new("x", ""))
            .map(|_| ())
            .unwrap_err(),
    ];
    for err in errors {
        assert!(matches!(err, ServiceError::Repo(RepoError::InvalidData(_))));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("disk on fire"));
    }
}
