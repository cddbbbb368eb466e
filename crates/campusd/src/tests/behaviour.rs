//! Behavioural tests for the daemon bootstrap sequence.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::bootstrap::BootstrapError;

use super::support::{self, HealthEvent, TestConfigLoader, TestWorld};

type StepResult = Result<(), String>;

#[fixture]
fn world() -> RefCell<TestWorld> {
    support::world()
}

#[given("a healthy configuration loader")]
fn given_healthy_loader(world: &RefCell<TestWorld>) {
    world.borrow_mut().use_successful_loader();
}

#[given("a failing configuration loader")]
fn given_failing_loader(world: &RefCell<TestWorld>) {
    world.borrow_mut().use_failing_loader();
}

#[given("a configuration whose database directory cannot be created")]
fn given_unwritable_database(world: &RefCell<TestWorld>) {
    world
        .borrow_mut()
        .use_loader(TestConfigLoader::new().with_unwritable_database());
}

#[when("the daemon bootstrap runs")]
fn when_bootstrap_runs(world: &RefCell<TestWorld>) {
    world.borrow_mut().bootstrap();
}

#[then("bootstrap succeeds")]
fn then_bootstrap_succeeds(world: &RefCell<TestWorld>) {
    let world = world.borrow();
    assert!(
        world.bootstrap_error().is_none(),
        "bootstrap error: {:?}",
        world.bootstrap_error()
    );
    assert!(
        world.daemon().is_some(),
        "daemon should have been initialised"
    );
}

#[then("bootstrap fails")]
fn then_bootstrap_fails(world: &RefCell<TestWorld>) {
    let world = world.borrow();
    assert!(
        world.bootstrap_error().is_some(),
        "bootstrap succeeded unexpectedly"
    );
}

#[then("the failure names the {stage} stage")]
fn then_failure_stage(world: &RefCell<TestWorld>, stage: String) -> StepResult {
    let world = world.borrow();
    let error = world
        .bootstrap_error()
        .ok_or_else(|| "bootstrap did not fail".to_owned())?;
    let matched = match stage.as_str() {
        "configuration" => matches!(error, BootstrapError::Configuration { .. }),
        "store" => matches!(error, BootstrapError::Store { .. }),
        "socket" => matches!(error, BootstrapError::Socket { .. }),
        other => return Err(format!("unknown bootstrap stage '{other}'")),
    };
    if matched {
        Ok(())
    } else {
        Err(format!("expected {stage} failure, got {error:?}"))
    }
}

#[then("the store database file exists")]
fn then_database_exists(world: &RefCell<TestWorld>) -> StepResult {
    let world = world.borrow();
    let daemon = world
        .daemon()
        .ok_or_else(|| "daemon was not bootstrapped".to_owned())?;
    let path = daemon.config().database_path();
    if path.is_file() {
        Ok(())
    } else {
        Err(format!("database file '{path}' was not created"))
    }
}

#[then("the reporter recorded bootstrap start")]
fn then_reporter_start(world: &RefCell<TestWorld>) {
    assert!(
        world
            .borrow()
            .reporter
            .events()
            .contains(&HealthEvent::BootstrapStarting),
        "bootstrap start event missing"
    );
}

#[then("the reporter recorded store readiness before bootstrap success")]
fn then_reporter_store_then_success(world: &RefCell<TestWorld>) -> StepResult {
    let events = world.borrow().reporter.events();
    let store = events.iter().position(|event| *event == HealthEvent::StoreReady);
    let success = events
        .iter()
        .position(|event| *event == HealthEvent::BootstrapSucceeded);
    match (store, success) {
        (Some(store), Some(success)) if store < success => Ok(()),
        _ => Err(format!("unexpected event order: {events:?}")),
    }
}

#[then("the reporter recorded bootstrap failure")]
fn then_reporter_failure(world: &RefCell<TestWorld>) {
    let events = world.borrow().reporter.events();
    let failed = events
        .iter()
        .any(|event| matches!(event, HealthEvent::BootstrapFailed(_)));
    assert!(failed, "bootstrap failure event missing: {events:?}");
    assert!(
        !events.contains(&HealthEvent::BootstrapSucceeded),
        "failed bootstrap must not report success: {events:?}"
    );
}

#[scenario(
    path = "tests/features/daemon_bootstrap.feature",
    name = "Successful bootstrap opens the store"
)]
fn successful_bootstrap_opens_the_store(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/daemon_bootstrap.feature",
    name = "Configuration failure aborts bootstrap"
)]
fn configuration_failure_aborts_bootstrap(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/daemon_bootstrap.feature",
    name = "Store failure aborts bootstrap"
)]
fn store_failure_aborts_bootstrap(world: RefCell<TestWorld>) {
    drop(world);
}
