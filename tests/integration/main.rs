//! Integration tests spanning every service unit.

mod helpers;
mod lifecycle_test;
