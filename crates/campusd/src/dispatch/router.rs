//! Method routing for decoded requests.
//!
//! The router maps each method name to exactly one domain service operation.
//! It decodes the payload into the method's typed shape, invokes the service
//! and serialises the result; it never touches the store itself.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, warn};

use campus_types::{
    Acknowledgement, AddStudentToClass, AssignTeacherToClass, CreateClass, CreatePerson,
    CreateSchool, FailureKind, ListClassesForSchool, ListStudentsForClass, Method, Request,
    Response, WhoAmIQuery,
};

use crate::domain::Services;

use super::errors::DispatchError;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Dispatch table from method name to domain service operation.
#[derive(Debug, Clone)]
pub struct Router {
    services: Services,
}

impl Router {
    /// Builds a router over the domain services.
    #[must_use]
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    /// Routes one request and produces its response.
    ///
    /// Failures are reported with their fixed wire message only; details stay
    /// in the log.
    #[must_use]
    pub fn route(&self, request: &Request) -> Response {
        match self.dispatch(request) {
            Ok(data) => Response::ok(data),
            Err(failure) => {
                let kind = failure.failure_kind();
                log_failure(&request.method, kind, &failure);
                Response::failure(kind)
            }
        }
    }

    fn dispatch(&self, request: &Request) -> Result<Value, DispatchError> {
        let method: Method = request
            .method
            .parse()
            .map_err(|_| DispatchError::unknown_method(&request.method))?;
        debug!(target: DISPATCH_TARGET, %method, "dispatching request");

        let data = &request.data;
        match method {
            Method::CreateSchool => {
                let payload: CreateSchool = decode(method, data)?;
                respond(&self.services.schools.create(&payload.name)?)
            }
            Method::CreatePerson => {
                let payload: CreatePerson = decode(method, data)?;
                respond(&self.services.people.create(&payload.name, &payload.role)?)
            }
            Method::CreateClass => {
                let payload: CreateClass = decode(method, data)?;
                respond(&self.services.classes.create(
                    &payload.name,
                    payload.school_id,
                    payload.teacher_id,
                )?)
            }
            Method::AddStudentToClass => {
                let payload: AddStudentToClass = decode(method, data)?;
                self.services
                    .classes
                    .add_student_to_class(payload.student_id, payload.class_id)?;
                respond(&Acknowledgement::enrolled())
            }
            Method::WhoAmI => {
                let payload: WhoAmIQuery = decode(method, data)?;
                respond(&self.services.people.who_am_i(payload.id)?)
            }
            Method::ListSchools => respond(&self.services.schools.list()?),
            Method::ListClassesForSchool => {
                let payload: ListClassesForSchool = decode(method, data)?;
                respond(&self.services.schools.list_classes(payload.school_id)?)
            }
            Method::ListStudentsForClass => {
                let payload: ListStudentsForClass = decode(method, data)?;
                respond(&self.services.classes.list_students(payload.class_id)?)
            }
            Method::AssignTeacherToClass => {
                let payload: AssignTeacherToClass = decode(method, data)?;
                self.services
                    .classes
                    .update_teacher(payload.class_id, payload.teacher_id)?;
                respond(&Acknowledgement::teacher_assigned())
            }
        }
    }
}

fn decode<P: DeserializeOwned>(method: Method, data: &Value) -> Result<P, DispatchError> {
    P::deserialize(data).map_err(|source| DispatchError::invalid_payload(method, source))
}

fn respond<T: Serialize>(result: &T) -> Result<Value, DispatchError> {
    serde_json::to_value(result).map_err(DispatchError::SerializeResponse)
}

fn log_failure(method: &str, kind: FailureKind, failure: &DispatchError) {
    match kind {
        FailureKind::Internal => error!(
            target: DISPATCH_TARGET,
            method,
            error = %failure,
            "request failed"
        ),
        kind if kind.is_protocol_error() || kind == FailureKind::UnknownMethod => warn!(
            target: DISPATCH_TARGET,
            method,
            error = %failure,
            "rejected request"
        ),
        _ => debug!(
            target: DISPATCH_TARGET,
            method,
            message = kind.message(),
            error = %failure,
            "request refused by domain"
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    use campus_types::{Class, Person, Role, School, SchoolDirectory, WhoAmI};

    use super::*;
    use crate::store::test_support::TempStore;

    struct RouterFixture {
        router: Router,
        _temp: TempStore,
    }

    impl RouterFixture {
        fn call(&self, method: &str, data: Value) -> Response {
            self.router.route(&Request::raw(method, data))
        }

        fn expect_ok<T: DeserializeOwned>(&self, method: &str, data: Value) -> T {
            let response = self.call(method, data);
            assert!(response.status, "{method} failed: {response:?}");
            response
                .decode()
                .expect("response carries data")
                .expect("data decodes")
        }
    }

    #[fixture]
    fn router() -> RouterFixture {
        let temp = TempStore::new();
        RouterFixture {
            router: Router::new(Services::new(Arc::clone(&temp.store))),
            _temp: temp,
        }
    }

    #[rstest]
    fn create_school_returns_the_record(router: RouterFixture) {
        let school: School = router.expect_ok("create-school", json!({"name": "North"}));
        assert_eq!(school.name, "North");

        let duplicate = router.call("create-school", json!({"name": "North"}));
        assert_eq!(duplicate.failure_kind(), Some(FailureKind::AlreadyExists));
        assert_eq!(duplicate.data, None);
    }

    #[rstest]
    fn unknown_methods_are_reported(router: RouterFixture) {
        let response = router.call("drop-tables", Value::Null);
        assert_eq!(response.failure_kind(), Some(FailureKind::UnknownMethod));
        assert_eq!(response.message, "unknown method");
    }

    #[rstest]
    #[case("create-school", json!({"name": 5}))]
    #[case("who-am-i", json!({"id": "three"}))]
    #[case("who-am-i", Value::Null)]
    #[case("create-class", json!([1, 2]))]
    #[case("add-student-to-class", json!({"student_id": -1, "class_id": 1}))]
    fn structurally_invalid_payloads_are_rejected(
        router: RouterFixture,
        #[case] method: &str,
        #[case] data: Value,
    ) {
        let response = router.call(method, data);
        assert_eq!(response.failure_kind(), Some(FailureKind::InvalidPayload));
    }

    #[rstest]
    #[case("create-school", json!({}))]
    #[case("create-person", json!({"name": "Ada"}))]
    #[case("create-class", json!({"name": "Maths"}))]
    #[case("list-students-for-class", json!({}))]
    fn absent_fields_fall_through_to_validation(
        router: RouterFixture,
        #[case] method: &str,
        #[case] data: Value,
    ) {
        let response = router.call(method, data);
        assert_eq!(response.failure_kind(), Some(FailureKind::InvalidInput));
    }

    #[rstest]
    #[case("who-am-i", json!({}))]
    #[case("who-am-i", json!({"id": u64::MAX}))]
    #[case("list-classes-for-school", json!({"school_id": u64::MAX}))]
    #[case("add-student-to-class", json!({"student_id": 1_u64 << 63, "class_id": 1}))]
    fn unknown_identities_are_not_found(
        router: RouterFixture,
        #[case] method: &str,
        #[case] data: Value,
    ) {
        let response = router.call(method, data);
        assert_eq!(response.failure_kind(), Some(FailureKind::NotFound));
    }

    #[rstest]
    fn list_schools_ignores_its_payload(router: RouterFixture) {
        let _: School = router.expect_ok("create-school", json!({"name": "North"}));
        let schools: Vec<SchoolDirectory> = router.expect_ok("list-schools", json!("anything"));
        assert_eq!(schools.len(), 1);
    }

    #[rstest]
    fn enrollment_flow_round_trips(router: RouterFixture) {
        let school: School = router.expect_ok("create-school", json!({"name": "North"}));
        let teacher: Person =
            router.expect_ok("create-person", json!({"name": "Grace", "role": "teacher"}));
        let student: Person =
            router.expect_ok("create-person", json!({"name": "Alan", "role": "student"}));
        assert_eq!(student.role, Role::Student);
        let class: Class = router.expect_ok(
            "create-class",
            json!({"name": "Algebra", "school_id": school.id, "teacher_id": teacher.id}),
        );

        let ack: Acknowledgement = router.expect_ok(
            "add-student-to-class",
            json!({"student_id": student.id, "class_id": class.id}),
        );
        assert_eq!(ack, Acknowledgement::enrolled());

        let again = router.call(
            "add-student-to-class",
            json!({"student_id": student.id, "class_id": class.id}),
        );
        assert_eq!(again.failure_kind(), Some(FailureKind::DuplicateEnrollment));

        let who: WhoAmI = router.expect_ok("who-am-i", json!({"id": student.id}));
        assert_eq!(who.class_ids, vec![class.id]);
        assert_eq!(who.person.school_id, Some(school.id));

        let students: Vec<Person> =
            router.expect_ok("list-students-for-class", json!({"class_id": class.id}));
        assert_eq!(students, vec![who.person]);

        let ack: Acknowledgement = router.expect_ok(
            "assign-teacher-to-class",
            json!({"class_id": class.id, "teacher_id": teacher.id}),
        );
        assert_eq!(ack, Acknowledgement::teacher_assigned());
    }
}
