#![no_main]
use libfuzzer_sys::fuzz_target;
use uri_transform::variant::{self, VariantConfig};

fuzz_target!(|data: &str| {
    let config = VariantConfig::new().selective_chars(data.get(..4).unwrap_or(""));
    if let Ok(report) = variant::generate(data, &config) {
        for (i, v) in report.iter().enumerate() {
            assert_eq!(usize::from(v.id), i + 1);
        }
    }
});
