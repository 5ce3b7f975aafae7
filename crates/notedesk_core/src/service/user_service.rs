//! User use-case service.
//!
//! # Invariants
//! - Users follow `ExistencePolicy::MustExist`: lookups, updates and
//!   deletes of unknown ids fail with `ServiceError::NotFound`.

use super::error::ServiceResult;
use super::lifecycle::ResourceLifecycle;
use super::ExistencePolicy;
use crate::model::resource::ResourceId;
use crate::model::user::{User, UserContent};
use crate::repo::Repository;

/// User service facade over repository implementations.
pub struct UserService<R: Repository<User>> {
    lifecycle: ResourceLifecycle<User, R>,
}

impl<R: Repository<User>> UserService<R> {
    pub const POLICY: ExistencePolicy = ExistencePolicy::MustExist;

    pub fn new(repo: R) -> Self {
        Self {
            lifecycle: ResourceLifecycle::new(repo),
        }
    }

    pub fn get_all_users(&self) -> ServiceResult<Vec<User>> {
        self.lifecycle.get_all()
    }

    pub fn get_user_by_id(&self, id: ResourceId) -> ServiceResult<User> {
        self.lifecycle.require(id)
    }

    pub fn create_user(&self, content: UserContent) -> ServiceResult<User> {
        self.lifecycle.create(content)
    }

    pub fn update_user(&self, id: ResourceId, content: UserContent) -> ServiceResult<User> {
        self.lifecycle.update(id, content)
    }

    /// Deletes a user, failing when it does not exist.
    pub fn delete_user(&self, id: ResourceId) -> ServiceResult<()> {
        self.lifecycle.delete_existing(id)
    }

    /// Users whose name contains `fragment`, ignoring case.
    pub fn search_by_name(&self, fragment: &str) -> ServiceResult<Vec<User>> {
        self.lifecycle.search(fragment)
    }

    pub fn get_users_summary(&self) -> ServiceResult<String> {
        self.lifecycle.summarize()
    }

    pub fn get_all_names_uppercase(&self) -> ServiceResult<Vec<String>> {
        self.lifecycle.uppercase_names()
    }
}
