mod phonenumbermatcher_tests;
mod phonenumberutil_tests;
