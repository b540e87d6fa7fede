#![no_main]
use libfuzzer_sys::fuzz_target;
use uri_transform::{
    multipass,
    pct_enc::{self, DecodeOptions, EStr, Rfc3986Options},
    Context,
};

fuzz_target!(|data: &str| {
    for context in [Context::PathSegment, Context::Query, Context::Full] {
        let opts = Rfc3986Options::new().context(context);
        let encoded = pct_enc::encode(data, &opts).unwrap();

        // Existing octets are left alone, so encoding twice changes nothing.
        assert_eq!(pct_enc::encode(&encoded, &opts).unwrap(), encoded);

        let estr = EStr::new(&encoded).unwrap();
        if !data.contains('%') {
            assert_eq!(estr.decode().to_string().unwrap(), data);
            if data.is_ascii() {
                assert_eq!(pct_enc::decode(&encoded, &DecodeOptions::new()).unwrap(), data);
            }
        }
    }

    if data.is_ascii() {
        let opts = Rfc3986Options::new().reencode_percent(true);
        for n in 1..=3 {
            let encoded =
                multipass::try_apply_n_times(data, n, |s| pct_enc::encode(s, &opts)).unwrap();
            let decoded = pct_enc::decode(&encoded, &DecodeOptions::new().times(n)).unwrap();
            assert_eq!(decoded, data);
        }
    }
});
