use chrono::NaiveDate;

/// Format used by date questions when the author does not pick one.
pub const DEFAULT_DATE_FORMAT: &str = "MM-dd-yyyy";

/// Accept a user-supplied date pattern, or `None` if it is unusable.
///
/// A pattern must mention a month (`MM`), a day (`dd` or `DD`) and a
/// four-digit year (`yyyy` or `YYYY`).
pub fn normalize_date_format(input: &str) -> Option<String> {
    let format = input.trim();
    let has_month = format.contains("MM");
    let has_day = format.contains("dd") || format.contains("DD");
    let has_year = format.contains("yyyy") || format.contains("YYYY");
    (has_month && has_day && has_year).then(|| format.to_string())
}

/// Parse `value` as a date written in `format` (e.g. `MM-dd-yyyy`).
pub fn parse_date(value: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), &to_strftime(format)).ok()
}

/// Write `date` in `format`, zero-padded (e.g. `03-09-2024` for `MM-dd-yyyy`).
pub fn format_date(date: NaiveDate, format: &str) -> String {
    date.format(&to_strftime(format)).to_string()
}

/// Rewrite `value` into the canonical spelling of `format`.
///
/// `3-9-2024` and `03-09-2024` are the same date; both become `03-09-2024`.
pub fn canonical_date(value: &str, format: &str) -> Option<String> {
    parse_date(value, format).map(|date| format_date(date, format))
}

/// Translate a `MM`/`dd`/`yyyy` pattern into a strftime string.
fn to_strftime(format: &str) -> String {
    const TOKENS: [(&str, &str); 5] = [
        ("yyyy", "%Y"),
        ("YYYY", "%Y"),
        ("MM", "%m"),
        ("dd", "%d"),
        ("DD", "%d"),
    ];

    let mut out = String::with_capacity(format.len() + 4);
    let mut rest = format;
    'scan: while let Some(c) = rest.chars().next() {
        for (token, replacement) in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(replacement);
                rest = tail;
                continue 'scan;
            }
        }
        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
        rest = &rest[c.len_utf8()..];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_complete_patterns() {
        assert_eq!(
            normalize_date_format(" dd/MM/yyyy "),
            Some("dd/MM/yyyy".to_string())
        );
        assert_eq!(
            normalize_date_format("YYYY.MM.DD"),
            Some("YYYY.MM.DD".to_string())
        );
    }

    #[test]
    fn rejects_incomplete_patterns() {
        assert_eq!(normalize_date_format(""), None);
        assert_eq!(normalize_date_format("MM-yyyy"), None);
        assert_eq!(normalize_date_format("MM-dd-yy"), None);
    }

    #[test]
    fn translates_tokens() {
        assert_eq!(to_strftime("MM-dd-yyyy"), "%m-%d-%Y");
        assert_eq!(to_strftime("YYYY/DD/MM %"), "%Y/%d/%m %%");
    }

    #[test]
    fn parses_dates_in_custom_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(parse_date("03-09-2024", DEFAULT_DATE_FORMAT), Some(expected));
        assert_eq!(parse_date("2024.09.03", "yyyy.dd.MM"), Some(expected));
        assert_eq!(parse_date("13-40-2024", DEFAULT_DATE_FORMAT), None);
        assert_eq!(parse_date("yesterday", DEFAULT_DATE_FORMAT), None);
    }

    #[test]
    fn equal_dates_share_one_spelling() {
        assert_eq!(
            canonical_date("3-9-2024", DEFAULT_DATE_FORMAT),
            Some("03-09-2024".to_string())
        );
        assert_eq!(
            canonical_date(" 03-09-2024", DEFAULT_DATE_FORMAT),
            Some("03-09-2024".to_string())
        );
        assert_eq!(canonical_date("9/3/2024", "dd/MM/yyyy"), Some("09/03/2024".to_string()));
        assert_eq!(canonical_date("2024-13-01", DEFAULT_DATE_FORMAT), None);
    }
}
