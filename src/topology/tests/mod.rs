mod property_tests;
mod validation_tests;
