use uri_transform::{
    form::{self, FormOptions},
    multipass,
    pct_enc::{self, DecodeOptions, NormalizeOptions, Rfc3986Options},
    query::{self, BuildOptions, Pair, ParseOptions, QueryMode},
    Context,
};

const ASCII: &[&str] = &[
    "",
    "hello world",
    ":/?#[]@!$&'()*+,;=",
    "a=b&c=d e",
    "`~^|\\\"<>{}",
    "\0\t\r\n\x7f",
    "path/to/file.txt?x=1#frag",
];

const UNICODE: &[&str] = &[
    "München straße",
    "测试😀",
    "ğüş",
    "é+é",
    "\u{80}\u{7ff}\u{800}\u{ffff}\u{10000}",
];

const CONTEXTS: [Context; 5] = [
    Context::Path,
    Context::PathSegment,
    Context::Query,
    Context::Fragment,
    Context::Full,
];

fn encode(s: &str, opts: &Rfc3986Options) -> String {
    pct_enc::encode(s, opts).unwrap()
}

fn decode(s: &str, opts: &DecodeOptions) -> String {
    pct_enc::decode(s, opts).unwrap()
}

#[test]
fn percent_round_trip() {
    for &s in ASCII {
        for context in CONTEXTS {
            for keep_reserved in [false, true] {
                let opts = Rfc3986Options::new()
                    .context(context)
                    .keep_reserved(keep_reserved);
                assert_eq!(decode(&encode(s, &opts), &DecodeOptions::new()), s);
            }
        }
    }
}

#[test]
fn form_round_trip() {
    for &s in ASCII.iter().chain(UNICODE) {
        if s.contains(['%', '+']) {
            continue;
        }
        let encoded = form::encode(s, &FormOptions::new());
        assert_eq!(form::decode(&encoded, &DecodeOptions::new()).unwrap(), s);
    }
}

#[test]
fn encode_idempotent() {
    let inputs = ASCII
        .iter()
        .chain(UNICODE)
        .copied()
        .chain(["%", "%2", "%%41", "%zz%20", "100%"]);
    for s in inputs {
        for context in CONTEXTS {
            let opts = Rfc3986Options::new().context(context);
            let once = encode(s, &opts);
            assert_eq!(encode(&once, &opts), once, "{s:?}");
        }
    }
}

#[test]
fn n_encodes_n_decodes() {
    let opts = Rfc3986Options::new().reencode_percent(true);
    for &s in ASCII.iter().chain(&["%41", "%%", "50%"]) {
        for n in 1..=4 {
            let encoded =
                multipass::try_apply_n_times(s, n, |s| pct_enc::encode(s, &opts)).unwrap();
            assert_eq!(decode(&encoded, &DecodeOptions::new().times(n)), s);
        }
    }
}

#[test]
fn decode_until_stable_bounded() {
    for s in ["%2525252541", "%41", "a", "%25%32%35"] {
        for max in 1..=6 {
            let opts = DecodeOptions::new().until_stable(true).max_iterations(max);
            let result = decode(s, &opts);

            let mut outputs = Vec::new();
            let mut cur = String::from(s);
            for _ in 0..max {
                cur = decode(&cur, &DecodeOptions::new());
                outputs.push(cur.clone());
            }
            assert!(outputs.contains(&result), "{s:?} {max}");
        }
    }
}

#[test]
fn normalize_idempotent() {
    let opts = NormalizeOptions::new();
    let inputs = ASCII
        .iter()
        .chain(UNICODE)
        .copied()
        .chain(["%2f%3a", "%41%7e%7E", "%c3%a9", "%2541"]);
    for s in inputs {
        let once = pct_enc::normalize(s, &opts).unwrap();
        assert_eq!(pct_enc::normalize(&once, &opts).unwrap(), once, "{s:?}");
    }
}

#[test]
fn query_round_trip() {
    let ascii: Vec<Pair> = ASCII
        .iter()
        .zip(ASCII.iter().rev())
        .map(|(&k, &v)| Pair::new(k, v))
        .collect();
    let built = query::build(&ascii, &BuildOptions::new()).unwrap();
    assert_eq!(query::parse(&built, &ParseOptions::new()), ascii);

    let all: Vec<Pair> = ASCII
        .iter()
        .chain(UNICODE)
        .map(|&s| Pair::new(s, s))
        .collect();
    let built = query::build(&all, &BuildOptions::new().mode(QueryMode::Form)).unwrap();
    assert_eq!(
        query::parse(&built, &ParseOptions::new().mode(QueryMode::Form)),
        all
    );

    for qs in ["a=1&b=2", "?k=v&k&=x", "sp%20ace=a%2Fb", "x=%3Fy%23z", "a=%26b%3D%2541"] {
        let parsed = query::parse(qs, &ParseOptions::new());
        let built = query::build(&parsed, &BuildOptions::new()).unwrap();
        assert_eq!(query::parse(&built, &ParseOptions::new()), parsed);
    }
}
