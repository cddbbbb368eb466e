use std::sync::Arc;

use tracing::info;

use campus_types::{Person, PersonId, Role, WhoAmI};

use super::{DOMAIN_TARGET, DomainError, Entity, required_text};
use crate::store::Store;

/// Person creation and self-description.
#[derive(Debug, Clone)]
pub struct PersonService {
    store: Arc<Store>,
}

impl PersonService {
    /// Builds the service over a shared store.
    #[must_use]
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Creates a teacher or student.
    ///
    /// Both fields are trimmed; the role must then be exactly `teacher` or
    /// `student`.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidInput`] for a blank name or unknown role.
    pub fn create(&self, name: &str, role: &str) -> Result<Person, DomainError> {
        let name = required_text(name, "person name is empty")?;
        let role: Role = role
            .trim()
            .parse()
            .map_err(|_| DomainError::invalid("role must be teacher or student"))?;
        let person = self
            .store
            .with_repos(|repos| repos.people().insert(name, role))?;
        info!(
            target: DOMAIN_TARGET,
            person_id = %person.id,
            role = %person.role,
            "person created"
        );
        Ok(person)
    }

    /// Describes a person and the classes they teach or attend.
    ///
    /// # Errors
    ///
    /// [`DomainError::NotFound`] when the person does not exist.
    pub fn who_am_i(&self, id: PersonId) -> Result<WhoAmI, DomainError> {
        self.store.with_repos(|repos| {
            let person = repos
                .people()
                .find(id)?
                .ok_or_else(|| DomainError::not_found(Entity::Person, id))?;
            let class_ids = match person.role {
                Role::Student => repos.enrollments().class_ids_for_student(person.id)?,
                Role::Teacher => repos.classes().ids_taught_by(person.id)?,
            };
            Ok(WhoAmI { person, class_ids })
        })
    }
}
