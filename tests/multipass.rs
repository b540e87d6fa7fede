use std::cell::Cell;
use uri_transform::{
    multipass::{self, mixed_case_percent, Passes},
    pct_enc::{self, DecodeOptions, Rfc3986Options},
    ErrorKind,
};

#[test]
fn n_times() {
    let opts = Rfc3986Options::new().reencode_percent(true);
    let s = multipass::try_apply_n_times("a b", 3, |s| pct_enc::encode(s, &opts)).unwrap();
    assert_eq!(s, "a%252520b");

    assert_eq!(multipass::apply_n_times("x", 0, |_| unreachable!()), "x");
    assert_eq!(multipass::apply_n_times("", 2, |s| format!("{s}!")), "!!");
}

#[test]
fn n_times_stops_at_error() {
    let calls = Cell::new(0);
    let opts = DecodeOptions::new().strict(true);
    let e = multipass::try_apply_n_times("%2525GG", 5, |s| {
        calls.set(calls.get() + 1);
        pct_enc::decode(s, &opts)
    })
    .unwrap_err();
    assert_eq!(e.kind(), ErrorKind::InvalidPercentSequence);
    assert_eq!(calls.get(), 3);
}

#[test]
fn until_stable_bounded() {
    let calls = Cell::new(0);
    let grow = |s: &str| {
        calls.set(calls.get() + 1);
        format!("{s}a")
    };
    assert_eq!(multipass::apply_until_stable("", grow, 4), "aaaa");
    assert_eq!(calls.get(), 4);

    calls.set(0);
    let same = |s: &str| {
        calls.set(calls.get() + 1);
        s.to_owned()
    };
    assert_eq!(multipass::apply_until_stable("z", same, 10), "z");
    assert_eq!(calls.get(), 1);

    assert_eq!(multipass::apply_until_stable("z", |_| unreachable!(), 0), "z");
}

#[test]
fn until_stable_returns_pass_output() {
    let outputs = std::cell::RefCell::new(Vec::new());
    let decode_once = |s: &str| {
        let out = pct_enc::decode(s, &DecodeOptions::new()).unwrap();
        outputs.borrow_mut().push(out.clone());
        out
    };
    let s = multipass::apply_until_stable("%25252541", decode_once, 3);
    assert_eq!(s, "%41");
    assert_eq!(outputs.borrow().last(), Some(&s));
}

#[test]
fn passes() {
    let dec = |s: &str| pct_enc::decode(s, &DecodeOptions::new()).unwrap();
    assert_eq!(Passes::Times(2).apply("%2541", dec), "A");
    assert_eq!(Passes::UntilStable { max_iterations: 10 }.apply("%252541", dec), "A");
    assert_eq!(
        DecodeOptions::new().times(0).passes(),
        Passes::Times(1)
    );
    assert_eq!(
        DecodeOptions::new().until_stable(true).max_iterations(0).passes(),
        Passes::UntilStable { max_iterations: 1 }
    );
}

#[test]
fn mixed_case() {
    assert_eq!(mixed_case_percent("%AB%CD%ef"), "%aB%Cd%eF");
    assert_eq!(mixed_case_percent("a%2F%%3a"), "a%2F%%3a");
    assert_eq!(mixed_case_percent("%c3%a9%C3%A9"), "%c3%A9%c3%A9");
    assert_eq!(mixed_case_percent("no octets"), "no octets");
    assert_eq!(mixed_case_percent("%G0%4"), "%G0%4");

    let s = "%E6%B5%8B%20x";
    let decode = |s: &str| pct_enc::decode(s, &DecodeOptions::new()).unwrap();
    assert_eq!(decode(&mixed_case_percent(s)), decode(s));
}
