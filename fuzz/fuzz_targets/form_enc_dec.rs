#![no_main]
use libfuzzer_sys::fuzz_target;
use uri_transform::{
    form::{self, FormOptions},
    pct_enc::DecodeOptions,
};

fuzz_target!(|data: &str| {
    let encoded = form::encode(data, &FormOptions::new());
    assert!(!encoded.contains(' '));

    if !data.contains(['%', '+']) {
        assert_eq!(form::decode(&encoded, &DecodeOptions::new()).unwrap(), data);
    }
});
