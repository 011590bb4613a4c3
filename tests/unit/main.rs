//! Unit test modules.

mod aggregation_test;
mod query_filter_test;
mod relations_test;
