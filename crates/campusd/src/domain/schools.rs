use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use campus_types::{ClassListing, School, SchoolDirectory, SchoolId};

use super::{DOMAIN_TARGET, DomainError, Entity, required_text};
use crate::store::Store;

/// School creation and listing.
#[derive(Debug, Clone)]
pub struct SchoolService {
    store: Arc<Store>,
}

impl SchoolService {
    /// Builds the service over a shared store.
    #[must_use]
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Creates a school with a unique, trimmed name.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidInput`] for a blank name and
    /// [`DomainError::AlreadyExists`] when the name is taken.
    pub fn create(&self, name: &str) -> Result<School, DomainError> {
        let name = required_text(name, "school name is empty")?;
        let school = self
            .store
            .with_repos(|repos| repos.schools().insert(name))
            .map_err(|error| {
                if error.is_unique_violation() {
                    DomainError::AlreadyExists {
                        name: name.to_owned(),
                    }
                } else {
                    DomainError::Store(error)
                }
            })?;
        info!(
            target: DOMAIN_TARGET,
            school_id = %school.id,
            name = %school.name,
            "school created"
        );
        Ok(school)
    }

    /// Lists every school with its classes and their teachers.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Store`] when the store fails.
    pub fn list(&self) -> Result<Vec<SchoolDirectory>, DomainError> {
        let (schools, listings) = self.store.with_repos(|repos| {
            let schools = repos.schools().list()?;
            let listings = repos.classes().list_all()?;
            Ok::<_, DomainError>((schools, listings))
        })?;

        let mut by_school: BTreeMap<SchoolId, Vec<ClassListing>> = BTreeMap::new();
        for listing in listings {
            by_school
                .entry(listing.class.school_id)
                .or_default()
                .push(listing);
        }

        Ok(schools
            .into_iter()
            .map(|school| SchoolDirectory {
                classes: by_school.remove(&school.id).unwrap_or_default(),
                school,
            })
            .collect())
    }

    /// Lists the classes of one school, by ascending identity.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidInput`] for the unset identity and
    /// [`DomainError::NotFound`] when the school does not exist.
    pub fn list_classes(&self, school_id: SchoolId) -> Result<Vec<ClassListing>, DomainError> {
        if school_id.is_unset() {
            return Err(DomainError::invalid("school id is unset"));
        }
        self.store.with_repos(|repos| {
            if !repos.schools().exists(school_id)? {
                return Err(DomainError::not_found(Entity::School, school_id));
            }
            Ok(repos.classes().list_for_school(school_id)?)
        })
    }
}
