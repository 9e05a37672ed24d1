//! Spelled-out Indonesian numeral rewriting.

/// Number and scale words with their digit replacements, in application order.
pub const NUMERAL_WORDS: &[(&str, &str)] = &[
    ("satu", "1"),
    ("dua", "2"),
    ("tiga", "3"),
    ("empat", "4"),
    ("lima", "5"),
    ("enam", "6"),
    ("tujuh", "7"),
    ("delapan", "8"),
    ("sembilan", "9"),
    ("nol", "0"),
    ("ribu", "000"),
    ("juta", "000000"),
    ("miliar", "000000000"),
    ("triliun", "000000000000"),
];

/// Replace every occurrence of a numeral word with its digits.
///
/// This is plain case-sensitive substring replacement with no word
/// boundaries, so fragments inside unrelated words are rewritten as well
/// (`"kedua"` becomes `"ke2"`). Downstream consumers rely on this exact output.
pub fn normalize_numerals(input: &str) -> String {
    let mut out = input.to_string();
    for (word, digits) in NUMERAL_WORDS {
        if out.contains(word) {
            out = out.replace(word, digits);
        }
    }
    out
}
