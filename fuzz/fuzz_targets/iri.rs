#![no_main]
use libfuzzer_sys::fuzz_target;
use uri_transform::iri::{iri_to_uri, uri_to_iri};

fuzz_target!(|data: &str| {
    let uri = iri_to_uri(data);
    assert!(uri.is_ascii());

    if !data.contains('%') {
        assert_eq!(uri_to_iri(&uri), data);
    }

    let iri = uri_to_iri(&uri);
    assert!(iri.len() <= uri.len());
});
