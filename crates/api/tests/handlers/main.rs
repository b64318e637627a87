mod health_test;
mod middleware_test;
mod teacher_test;
mod test_utils;
