#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod surface;
pub(crate) mod transport;

pub(crate) use form::{
    assert_form_input, assert_form_input_with_value, assert_form_submit_button, must_get_form,
};
pub(crate) use html::{assert_valid_html, dataset, parse_html_document, parse_html_fragment};
pub(crate) use http::spawn_backend;
pub(crate) use surface::RecordingSurface;
pub(crate) use transport::FakeTransport;
