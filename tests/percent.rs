use uri_transform::{
    pct_enc::{self, DecodeOptions, EStr, NormalizeOptions, Rfc3986Options},
    Context, ErrorKind, Table,
};

const RAW: &str = "te😃a 测1`~!@试#$%st^&+=";
const ENCODED: &str = "te%F0%9F%98%83a%20%E6%B5%8B1%60~!@%E8%AF%95%23$%25st%5E&+=";

fn encode(s: &str, opts: Rfc3986Options) -> String {
    pct_enc::encode(s, &opts).unwrap()
}

fn decode(s: &str, opts: DecodeOptions) -> String {
    pct_enc::decode(s, &opts).unwrap()
}

fn normalize(s: &str) -> String {
    pct_enc::normalize(s, &NormalizeOptions::new()).unwrap()
}

#[test]
fn enc_dec_validate() {
    let s = encode(RAW, Rfc3986Options::new().context(Context::Query));
    assert_eq!(s, ENCODED);

    let estr = EStr::new(&s).unwrap();
    assert_eq!(estr.decode().to_string().unwrap(), RAW);
    assert_eq!(estr.decode().to_bytes(), RAW.as_bytes());

    assert_eq!(EStr::new("%2d%").unwrap_err().index(), 3);
    assert_eq!(EStr::new("%2d%fg").unwrap_err().index(), 3);
    assert!(EStr::new("plain").unwrap().is_unencoded());
    assert_eq!(
        EStr::new("%FF").unwrap().decode().to_string().unwrap_err(),
        [0xff]
    );
    assert_eq!(EStr::new("a%FFb").unwrap().decode().to_string_lossy(), "a\u{fffd}b");
}

#[test]
fn encode_defaults() {
    let opts = Rfc3986Options::new();
    assert_eq!(encode("hello-world_test.file~123", opts), "hello-world_test.file~123");
    assert_eq!(encode("hello world", opts), "hello%20world");
    assert_eq!(encode("a=b&c=d", opts), "a%3Db%26c%3Dd");
    assert_eq!(encode("ğ", opts), "%C4%9F");
    assert_eq!(encode("ş", opts), "%C5%9F");
    assert_eq!(encode("😀", opts), "%F0%9F%98%80");
    assert_eq!(encode("", opts), "");
}

#[test]
fn encode_existing_octets() {
    let opts = Rfc3986Options::new();
    assert_eq!(encode("%20already%20encoded", opts), "%20already%20encoded");
    assert_eq!(encode("%2f", opts), "%2f");
    assert_eq!(encode("%GG", opts), "%25GG");
    assert_eq!(encode("100%", opts), "100%25");
    assert_eq!(encode("%%41", opts), "%25%41");

    let opts = opts.reencode_percent(true);
    assert_eq!(encode("%20", opts), "%2520");
    assert_eq!(encode("%GG", opts), "%25GG");
}

#[test]
fn encode_strict() {
    let opts = Rfc3986Options::new().strict(true);
    let e = pct_enc::encode("ab%GG", &opts).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::InvalidPercentSequence);
    assert_eq!(e.index(), 2);
    assert_eq!(encode("%20é", opts), "%20%C3%A9");

    // Every `%` is encoded, so nothing can be invalid.
    assert_eq!(encode("%GG", opts.reencode_percent(true)), "%25GG");
}

#[test]
fn encode_contexts() {
    let opts = Rfc3986Options::new();
    assert_eq!(
        encode("a/b:c@d!e'f", opts.context(Context::PathSegment)),
        "a%2Fb:c@d!e'f"
    );
    assert_eq!(encode("a:b@c", opts.context(Context::PathSegment)), "a:b@c");
    assert_eq!(encode("a/b/c", opts.context(Context::Path)), "a/b/c");
    assert_eq!(encode("a/b?c", opts.context(Context::Path)), "a/b%3Fc");
    assert_eq!(
        encode("key=val&a=b?q", opts.context(Context::Query)),
        "key=val&a=b?q"
    );
    assert_eq!(encode("frag#extra", opts.context(Context::Fragment)), "frag%23extra");
    assert_eq!(encode("a/b", opts.context(Context::Full)), "a%2Fb");
}

#[test]
fn encode_keep_reserved() {
    let reserved = ":/?#[]@!$&'()*+,;=";
    let opts = Rfc3986Options::new();
    assert_eq!(encode(reserved, opts.keep_reserved(true)), reserved);
    assert_eq!(encode(":/?#[]@", opts), "%3A%2F%3F%23%5B%5D%40");
    assert_eq!(encode("a b|c", opts.keep_reserved(true)), "a%20b%7Cc");
}

#[test]
fn encode_safe_set() {
    let opts = Rfc3986Options::new().safe_set(Table::new(b"!"));
    assert_eq!(encode("a b!c", opts), "a%20b!c");

    let opts = Rfc3986Options::new().safe_set(Table::from_ascii(" é"));
    assert_eq!(encode("a bé", opts), "a b%C3%A9");
}

#[test]
fn decode_passes() {
    let once = DecodeOptions::new();
    assert_eq!(decode("%20", once), " ");
    assert_eq!(decode("hello%20world", once), "hello world");
    assert_eq!(decode("%2f", once), "/");
    assert_eq!(decode("%GG", once), "%GG");
    assert_eq!(decode("abc%", once), "abc%");
    assert_eq!(decode("", once), "");
    assert_eq!(decode("%2520", once), "%20");
    assert_eq!(decode("a+b", once), "a+b");

    assert_eq!(decode("%2520", once.times(2)), " ");
    assert_eq!(decode("%2520", once.times(0)), "%20");

    let stable = DecodeOptions::new().until_stable(true);
    assert_eq!(decode("%252520", stable), " ");
    assert_eq!(decode("%252520", stable.max_iterations(1)), "%2520");
    assert_eq!(decode("%252520", stable.max_iterations(0)), "%2520");
    assert_eq!(decode("%252520", stable.times(1)), " ");
}

#[test]
fn decode_bytes_as_chars() {
    assert_eq!(decode("%C3%A9", DecodeOptions::new()), "\u{c3}\u{a9}");
    assert_eq!(decode("%FF", DecodeOptions::new()), "\u{ff}");
}

#[test]
fn decode_strict() {
    let opts = DecodeOptions::new().strict(true);
    let e = pct_enc::decode("%GG", &opts).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::InvalidPercentSequence);
    assert_eq!(e.index(), 0);

    assert_eq!(decode("%25GG", opts), "%GG");
    let e = pct_enc::decode("x%25GG", &opts.times(2)).unwrap_err();
    assert_eq!(e.index(), 1);
    assert!(pct_enc::decode("%25GG", &opts.until_stable(true)).is_err());
}

#[test]
fn normalize_octets() {
    assert_eq!(normalize("%2f%3a"), "%2F%3A");
    assert_eq!(normalize("%41"), "A");
    assert_eq!(normalize("%7e"), "~");
    assert_eq!(normalize("%2f"), "%2F");
    assert_eq!(normalize("hello"), "hello");
    assert_eq!(normalize("%zz%"), "%zz%");
    assert_eq!(normalize("%c3%a9"), "%C3%A9");

    let opts = NormalizeOptions::new().uppercase_hex(false);
    assert_eq!(pct_enc::normalize("%2f%41", &opts).unwrap(), "%2fA");

    let opts = NormalizeOptions::new().strict(true);
    assert!(pct_enc::normalize("%ZZ", &opts).is_err());
}

#[test]
fn encode_byte_table() {
    assert_eq!(pct_enc::encode_byte(0), "%00");
    assert_eq!(pct_enc::encode_byte(b'%'), "%25");
    assert_eq!(pct_enc::encode_byte(0xff), "%FF");
}
