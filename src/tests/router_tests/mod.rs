mod dashboard_tests;
mod export_tests;
mod home_tests;
