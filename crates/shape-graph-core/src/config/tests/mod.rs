//! Configuration tests.

mod serialization_tests;
