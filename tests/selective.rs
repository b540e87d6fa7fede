use uri_transform::{
    selective::{
        encode_except_safe_set, encode_non_alnum, selective_encode, NonAlnumOptions,
        SafeSetOptions, SelectiveOptions,
    },
    table::UNRESERVED,
    Table,
};

fn selective(s: &str, chars: &str, keep_reserved: bool) -> String {
    let opts = SelectiveOptions::new()
        .chars_to_encode(chars)
        .keep_reserved(keep_reserved);
    selective_encode(s, &opts)
}

fn except(s: &str, safe: &str) -> String {
    encode_except_safe_set(s, &SafeSetOptions::new(Table::from_ascii(safe)))
}

#[test]
fn selective_only_given_chars() {
    assert_eq!(selective("hello world!", " ", false), "hello%20world!");
    assert_eq!(selective("a$b$c", "$", false), "a%24b%24c");
    assert_eq!(selective("hello world!", "!", false), "hello world%21");
    assert_eq!(selective("ağb", "ğ", false), "a%C4%9Fb");
    assert_eq!(selective("hello", "", false), "hello");
    assert_eq!(selective("", "abc", false), "");
    assert_eq!(selective("100%", "%", false), "100%25");
    assert_eq!(selective("%41", "", false), "%41");
}

#[test]
fn selective_keep_reserved() {
    assert_eq!(selective("a&b", "&", true), "a&b");
    assert_eq!(selective("a&b", "&", false), "a%26b");
    assert_eq!(selective("a&b c", "& ", true), "a&b%20c");
}

#[test]
fn non_alnum() {
    let opts = NonAlnumOptions::new();
    assert_eq!(encode_non_alnum("a1!", &opts), "a1%21");
    assert_eq!(encode_non_alnum("hello world", &opts), "hello%20world");
    assert_eq!(encode_non_alnum("a-b.c_d~e", &opts), "a%2Db%2Ec%5Fd%7Ee");
    assert_eq!(encode_non_alnum("ğ", &opts), "%C4%9F");

    let opts = opts.keep_reserved(true);
    assert_eq!(encode_non_alnum("a/b", &opts), "a/b");
    assert_eq!(encode_non_alnum("a/b~", &opts), "a/b%7E");
}

#[test]
fn except_safe_set() {
    assert_eq!(except("abc!@#", "abc"), "abc%21%40%23");
    assert_eq!(except("ab", ""), "%61%62");
    assert_eq!(except("abc", "abc"), "abc");
    assert_eq!(except("ağb", "ab"), "a%C4%9Fb");
    assert_eq!(except("ağb", "abğ"), "a%C4%9Fb");

    let opts = SafeSetOptions::new(UNRESERVED);
    assert_eq!(encode_except_safe_set("a~b c", &opts), "a~b%20c");
}
