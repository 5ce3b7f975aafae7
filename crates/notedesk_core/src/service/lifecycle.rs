//! Generic resource lifecycle shared by every concrete service.
//!
//! # Responsibility
//! - Create, read, update, delete and derive views over one repository.
//! - Run multi-step operations inside the repository's atomic boundary.
//!
//! # Invariants
//! - Identity always comes from the repository; update carries the fetched
//!   id forward and never creates.
//! - No state is cached between calls.

use super::error::{ServiceError, ServiceResult};
use super::summary::describe_count;
use crate::model::resource::{Resource, ResourceId};
use crate::repo::Repository;
use log::{info, warn};
use std::marker::PhantomData;

/// Lifecycle operations for resource type `T` backed by repository `R`.
pub struct ResourceLifecycle<T, R> {
    repo: R,
    _resource: PhantomData<T>,
}

impl<T: Resource, R: Repository<T>> ResourceLifecycle<T, R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            _resource: PhantomData,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Persists a new resource built from `content` and returns it with its
    /// assigned id.
    pub fn create(&self, content: T::Content) -> ServiceResult<T> {
        let saved = self.repo.save(&T::from_content(content))?;
        info!(
            "event=resource_create module=service kind={} status=ok id={}",
            T::KIND,
            saved.id().unwrap_or_default()
        );
        Ok(saved)
    }

    pub fn get_all(&self) -> ServiceResult<Vec<T>> {
        Ok(self.repo.find_all()?)
    }

    /// Looks up `id`, treating absence as an ordinary result.
    pub fn find(&self, id: ResourceId) -> ServiceResult<Option<T>> {
        Ok(self.repo.find_by_id(id)?)
    }

    /// Looks up `id`, treating absence as `ServiceError::NotFound`.
    pub fn require(&self, id: ResourceId) -> ServiceResult<T> {
        require_in(&self.repo, id)
    }

    /// Replaces the content fields of `id` and returns the persisted result.
    ///
    /// Fetch and save run in one unit of work. A missing id fails with
    /// `NotFound` and nothing is written.
    pub fn update(&self, id: ResourceId, content: T::Content) -> ServiceResult<T> {
        let updated = self.repo.atomically(|repo| {
            let mut current = require_in::<T, R>(repo, id)?;
            current.apply_content(content);
            Ok::<_, ServiceError>(repo.save(&current)?)
        })?;
        info!(
            "event=resource_update module=service kind={} status=ok id={}",
            T::KIND,
            id
        );
        Ok(updated)
    }

    /// Deletes `id`; missing ids are a silent no-op.
    pub fn delete_idempotent(&self, id: ResourceId) -> ServiceResult<()> {
        self.repo.delete_by_id(id)?;
        info!(
            "event=resource_delete module=service kind={} status=ok id={}",
            T::KIND,
            id
        );
        Ok(())
    }

    /// Deletes `id` after confirming it exists, in one unit of work.
    pub fn delete_existing(&self, id: ResourceId) -> ServiceResult<()> {
        self.repo.atomically(|repo| {
            require_in::<T, R>(repo, id)?;
            Ok::<_, ServiceError>(repo.delete_by_id(id)?)
        })?;
        info!(
            "event=resource_delete module=service kind={} status=ok id={}",
            T::KIND,
            id
        );
        Ok(())
    }

    pub fn search(&self, fragment: &str) -> ServiceResult<Vec<T>> {
        Ok(self.repo.find_by_name_contains(fragment)?)
    }

    pub fn summarize(&self) -> ServiceResult<String> {
        Ok(describe_count(T::KIND, self.repo.count()?))
    }

    /// Uppercased `Resource::name` of every row, in `find_all` order.
    pub fn uppercase_names(&self) -> ServiceResult<Vec<String>> {
        Ok(self
            .repo
            .find_all()?
            .iter()
            .map(|resource| resource.name().to_uppercase())
            .collect())
    }
}

fn require_in<T: Resource, R: Repository<T>>(repo: &R, id: ResourceId) -> ServiceResult<T> {
    match repo.find_by_id(id)? {
        Some(resource) => Ok(resource),
        None => {
            warn!(
                "event=resource_lookup module=service kind={} status=not_found id={}",
                T::KIND,
                id
            );
            Err(ServiceError::not_found(T::KIND, id))
        }
    }
}
