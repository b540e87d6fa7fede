#![no_main]
use libfuzzer_sys::fuzz_target;
use uri_transform::pct_enc::{self, EStr, NormalizeOptions};

fuzz_target!(|data: &str| {
    let lenient = pct_enc::normalize(data, &NormalizeOptions::new()).unwrap();
    let strict = pct_enc::normalize(data, &NormalizeOptions::new().strict(true));

    // Strict mode fails exactly when the input has an invalid octet.
    assert_eq!(strict.is_ok(), EStr::new(data).is_ok());

    if let Ok(s) = strict {
        assert_eq!(s, lenient);
        // `normalize` is idempotent: we cannot normalize beyond a normalized string.
        assert_eq!(pct_enc::normalize(&s, &NormalizeOptions::new()).unwrap(), s);
    }
});
