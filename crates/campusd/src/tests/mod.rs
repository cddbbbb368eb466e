//! Test suites for the campus registry daemon.

mod behaviour;
mod support;
