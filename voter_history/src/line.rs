//! Decoding of the quoted, comma-delimited lines of the state extracts.
//!
//! Every line has the shape `"f1","f2",...,"fn"`. Fields never contain a quote
//! or the `","` delimiter, so a plain split is enough.
//!
//! Known fragility: there is no validation of the shape. A line without the
//! wrapping quotes is still split on `","` and the outer characters are kept,
//! producing fields that are not what the publisher meant.

const FIELD_DELIMITER: &str = "\",\"";

/// Splits one line into its fields, with the surrounding quotes removed.
///
/// ```
/// use voter_history::line::split_quoted;
///
/// assert_eq!(split_quoted(r#""1001","11/06/2018","","AB""#), vec!["1001", "11/06/2018", "", "AB"]);
/// ```
pub fn split_quoted(line: &str) -> Vec<&str> {
    let inner = line.strip_prefix('"').unwrap_or(line);
    let inner = inner.strip_suffix('"').unwrap_or(inner);
    inner.split(FIELD_DELIMITER).collect()
}

/// Decodes a line of ISO-8859-1 text.
///
/// Each byte is the code point of the same value, so this never fails.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|b| *b as char).collect()
}
