#![no_main]
use libfuzzer_sys::fuzz_target;
use uri_transform::pct_enc::{self, DecodeOptions, EStr};

fuzz_target!(|data: &str| {
    let once = pct_enc::decode(data, &DecodeOptions::new()).unwrap();
    let strict = pct_enc::decode(data, &DecodeOptions::new().strict(true));
    match EStr::new(data) {
        Ok(_) => assert_eq!(strict.unwrap(), once),
        Err(e) => assert_eq!(strict.unwrap_err(), e),
    }

    for max in 1..=4 {
        let opts = DecodeOptions::new().until_stable(true).max_iterations(max);
        let result = pct_enc::decode(data, &opts).unwrap();

        let mut cur = data.to_owned();
        let mut seen = false;
        for _ in 0..max {
            cur = pct_enc::decode(&cur, &DecodeOptions::new()).unwrap();
            seen |= cur == result;
        }
        assert!(seen);
    }
});
