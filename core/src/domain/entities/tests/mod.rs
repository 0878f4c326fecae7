mod contact_tests;
mod step_tests;
