#![allow(missing_docs)]

pub(crate) mod http;

pub(crate) use http::{
    assert_content_type, assert_error_message, get_test_server, must_create_entry,
};
