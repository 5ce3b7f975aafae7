//! In-memory repository for tests and ephemeral wiring.
//!
//! # Invariants
//! - Ids are assigned from a monotonically increasing counter starting at 1
//!   and are never reused, matching `AUTOINCREMENT`.
//! - `atomically` restores the pre-call snapshot when `work` fails.

use super::{RepoError, RepoResult, Repository};
use crate::model::resource::{Resource, ResourceId};
use std::cell::RefCell;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct State<T> {
    rows: BTreeMap<ResourceId, T>,
    last_id: ResourceId,
}

/// Single-threaded in-memory repository keyed by id.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    state: RefCell<State<T>>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            state: RefCell::new(State {
                rows: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }
}

impl<T: Resource> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Resource> Repository<T> for InMemoryRepository<T> {
    fn find_all(&self) -> RepoResult<Vec<T>> {
        Ok(self.state.borrow().rows.values().cloned().collect())
    }

    fn find_by_id(&self, id: ResourceId) -> RepoResult<Option<T>> {
        Ok(self.state.borrow().rows.get(&id).cloned())
    }

    fn find_by_name_contains(&self, fragment: &str) -> RepoResult<Vec<T>> {
        let needle = fragment.to_lowercase();
        Ok(self
            .state
            .borrow()
            .rows
            .values()
            .filter(|row| row.name().to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    fn save(&self, resource: &T) -> RepoResult<T> {
        resource.validate()?;
        let mut state = self.state.borrow_mut();
        match resource.id() {
            None => {
                state.last_id += 1;
                let id = state.last_id;
                let saved = resource.clone().with_id(id);
                state.rows.insert(id, saved.clone());
                Ok(saved)
            }
            Some(id) => match state.rows.get_mut(&id) {
                Some(slot) => {
                    *slot = resource.clone();
                    Ok(resource.clone())
                }
                None => Err(RepoError::Conflict { kind: T::KIND, id }),
            },
        }
    }

    fn delete_by_id(&self, id: ResourceId) -> RepoResult<()> {
        self.state.borrow_mut().rows.remove(&id);
        Ok(())
    }

    fn count(&self) -> RepoResult<u64> {
        Ok(self.state.borrow().rows.len() as u64)
    }

    fn atomically<R, E, F>(&self, work: F) -> Result<R, E>
    where
        F: FnOnce(&Self) -> Result<R, E>,
        E: From<RepoError>,
    {
        let snapshot = self.state.borrow().clone();
        let result = work(self);
        if result.is_err() {
            *self.state.borrow_mut() = snapshot;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryRepository;
    use crate::model::note::{Note, NoteContent};
    use crate::model::resource::Resource;
    use crate::repo::{RepoError, Repository};

    fn note(title: &str) -> Note {
        Note::from_content(NoteContent::new(title, "body"))
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let repo = InMemoryRepository::<Note>::new();
        let first = repo.save(&note("a")).unwrap();
        repo.delete_by_id(first.id.unwrap()).unwrap();
        let second = repo.save(&note("b")).unwrap();
        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
    }

    #[test]
    fn failed_unit_of_work_restores_snapshot() {
        let repo = InMemoryRepository::<Note>::new();
        repo.save(&note("kept")).unwrap();

        let result: Result<(), RepoError> = repo.atomically(|repo| {
            repo.save(&note("discarded"))?;
            Err(RepoError::InvalidData("forced".to_string()))
        });

        assert!(result.is_err());
        assert_eq!(repo.count().unwrap(), 1);
    }
}
