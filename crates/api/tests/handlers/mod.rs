mod copy_test;
mod middleware_test;
mod services_test;
