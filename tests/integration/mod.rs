//! Integration tests driving the header-release binary

mod helpers;

mod test_docs;
mod test_init;
mod test_mirror;
mod test_release;
mod test_status;
mod test_verify;
mod test_versions;
