mod like_test;
mod login_test;
mod password_test;
mod post_test;
mod register_test;
mod router_test;
mod user_test;
