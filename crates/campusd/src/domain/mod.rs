//! Domain services enforcing the registry's cross-entity invariants.
//!
//! Each service holds a shared [`Store`] handle. Validation failures and
//! invariant violations are reported as typed [`DomainError`]s; writes that
//! touch more than one row run inside a single unit of work.

mod classes;
mod errors;
mod people;
mod schools;

use std::sync::Arc;

use crate::store::Store;

pub use self::classes::ClassService;
pub use self::errors::{DomainError, Entity};
pub use self::people::PersonService;
pub use self::schools::SchoolService;

pub(crate) const DOMAIN_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::domain");

/// The three domain services sharing one store.
#[derive(Debug, Clone)]
pub struct Services {
    /// School operations.
    pub schools: SchoolService,
    /// Person operations.
    pub people: PersonService,
    /// Class and enrollment operations.
    pub classes: ClassService,
}

impl Services {
    /// Builds every service over `store`.
    #[must_use]
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            schools: SchoolService::new(Arc::clone(&store)),
            people: PersonService::new(Arc::clone(&store)),
            classes: ClassService::new(store),
        }
    }
}

/// Trims `value`, rejecting the result when it is empty.
fn required_text<'a>(value: &'a str, reason: &'static str) -> Result<&'a str, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid(reason));
    }
    Ok(trimmed)
}
