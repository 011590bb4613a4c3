//! Integration test modules.

mod support;

mod users_api_test;
mod workouts_api_test;
