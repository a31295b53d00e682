//! CLI integration tests.


mod activate_tests;
mod deactivate_tests;
mod script_tests;
