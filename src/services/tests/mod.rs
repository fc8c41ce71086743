//! Unit tests for service implementations

mod farm;
