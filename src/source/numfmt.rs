//! Spreadsheet number formats.
//!
//! Numeric cells store a plain number; the cell style's format code says how
//! it is displayed (dates, percentages, fixed decimals, ...).

/// Built-in format codes (ids 0-49 are predefined).
pub(crate) const fn builtin_format(id: u32) -> Option<&'static str> {
    match id {
        0 => Some("General"),
        1 => Some("0"),
        2 => Some("0.00"),
        3 => Some("#,##0"),
        4 => Some("#,##0.00"),
        5 => Some("$#,##0_);($#,##0)"),
        6 => Some("$#,##0_);[Red]($#,##0)"),
        7 => Some("$#,##0.00_);($#,##0.00)"),
        8 => Some("$#,##0.00_);[Red]($#,##0.00)"),
        9 => Some("0%"),
        10 => Some("0.00%"),
        11 => Some("0.00E+00"),
        12 => Some("# ?/?"),
        13 => Some("# ??/??"),
        14 => Some("mm-dd-yy"),
        15 => Some("d-mmm-yy"),
        16 => Some("d-mmm"),
        17 => Some("mmm-yy"),
        18 => Some("h:mm AM/PM"),
        19 => Some("h:mm:ss AM/PM"),
        20 => Some("h:mm"),
        21 => Some("h:mm:ss"),
        22 => Some("m/d/yy h:mm"),
        37 => Some("#,##0 ;(#,##0)"),
        38 => Some("#,##0 ;[Red](#,##0)"),
        39 => Some("#,##0.00;(#,##0.00)"),
        40 => Some("#,##0.00;[Red](#,##0.00)"),
        45 => Some("mm:ss"),
        46 => Some("[h]:mm:ss"),
        47 => Some("mm:ss.0"),
        48 => Some("##0.0E+0"),
        49 => Some("@"),
        _ => None,
    }
}

/// True for `General` (and text `@`), which display the stored value as is.
pub(crate) fn is_general(code: &str) -> bool {
    let code = code.trim();
    code.is_empty() || code.eq_ignore_ascii_case("General") || code == "@"
}

/// Drop quoted text and bracketed parts (`"..."`, `[Red]`), lowercased.
fn unquoted(code: &str) -> String {
    let mut in_quotes = false;
    let mut in_brackets = false;
    let mut cleaned = String::new();

    for c in code.to_lowercase().chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            '[' if !in_quotes => in_brackets = true,
            ']' if !in_quotes => in_brackets = false,
            _ if !in_quotes && !in_brackets => cleaned.push(c),
            _ => {}
        }
    }
    cleaned
}

/// Check if a format code is a date or time format.
pub(crate) fn is_date_format(code: &str) -> bool {
    let cleaned = unquoted(code);
    let elapsed = code.contains("[h]") || code.contains("[m]") || code.contains("[s]");

    elapsed
        || cleaned.contains('y')
        || cleaned.contains('m') && !cleaned.contains('#') && !cleaned.contains('0')
        || cleaned.contains('d')
        || cleaned.contains('h')
        || cleaned.contains('s') && cleaned.contains(':')
        || cleaned.contains('m') && cleaned.contains(':')
}

fn is_scientific_format(code: &str) -> bool {
    let cleaned = unquoted(code);
    cleaned.contains("e+") || cleaned.contains("e-")
}

fn is_fraction_format(code: &str) -> bool {
    let cleaned = unquoted(code);
    cleaned.contains('/') && cleaned.contains('?')
}

/// Split a format code into its `;`-separated sections.
fn sections(code: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut in_quotes = false;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in code.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                sections.push(&code[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    sections.push(&code[start..]);
    sections
}

/// Format `value` with a format code.
///
/// `date1904` selects the 1904 date system for date formats.
pub(crate) fn format_number(value: f64, code: &str, date1904: bool) -> String {
    let sections = sections(code);

    // Positive; negative; zero; text. A negative section carries its own sign.
    let (section, value, signed) = match sections.as_slice() {
        [_, negative, ..] if value < 0.0 => (*negative, -value, false),
        [_, _, zero, ..] if value == 0.0 => (*zero, value, true),
        [first, ..] => (*first, value, true),
        [] => (code, value, true),
    };

    if is_general(section) {
        let text = format_general(value);
        return if signed { text } else { format!("-{text}") };
    }
    if is_date_format(section) {
        return format_date(value, section, date1904);
    }

    let text = if is_scientific_format(section) {
        format_scientific(value.abs(), section)
    } else if is_fraction_format(section) {
        format_fraction(value.abs(), section)
    } else {
        format_numeric(value.abs(), section)
    };

    if signed && value < 0.0 && text.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{text}")
    } else {
        text
    }
}

/// Shortest plain rendering, no trailing zeros.
fn format_general(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        let text = format!("{value:.10}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Literal text of a section with placeholders removed, split around the
/// number part.
struct Pattern {
    prefix: String,
    suffix: String,
    /// Placeholder characters (`0 # ? , .`) of the number part.
    digits: String,
}

impl Pattern {
    fn parse(section: &str) -> Self {
        let mut pattern = Pattern {
            prefix: String::new(),
            suffix: String::new(),
            digits: String::new(),
        };
        let mut chars = section.chars();
        let mut in_digits = false;
        let mut seen_digits = false;

        while let Some(c) = chars.next() {
            let literal = match c {
                '0' | '#' | '?' | '.' | ',' if !seen_digits || in_digits => {
                    // A lone comma or dot before any digit is literal text.
                    if matches!(c, ',' | '.') && !in_digits {
                        Some(c.to_string())
                    } else {
                        in_digits = true;
                        seen_digits = true;
                        pattern.digits.push(c);
                        None
                    }
                }
                '"' => Some(chars.by_ref().take_while(|&q| q != '"').collect()),
                '\\' => chars.next().map(String::from),
                '_' => chars.next().map(|_| " ".to_string()),
                '*' => {
                    chars.next();
                    None
                }
                '[' => {
                    // `[$€-407]` is a currency symbol with a locale; `[Red]` is dropped.
                    let inner: String = chars.by_ref().take_while(|&b| b != ']').collect();
                    inner
                        .strip_prefix('$')
                        .map(|currency| currency.split('-').next().unwrap_or("").to_string())
                }
                _ => Some(c.to_string()),
            };

            if let Some(text) = literal {
                in_digits = false;
                if seen_digits {
                    pattern.suffix.push_str(&text);
                } else {
                    pattern.prefix.push_str(&text);
                }
            }
        }
        pattern
    }
}

/// Fixed-point formats: decimals, thousands separators, percent, padding.
fn format_numeric(value: f64, section: &str) -> String {
    let pattern = Pattern::parse(section);
    let percent = pattern.prefix.contains('%') || pattern.suffix.contains('%');
    let value = if percent { value * 100.0 } else { value };

    let (int_spec, frac_spec) = match pattern.digits.split_once('.') {
        Some((int_spec, frac_spec)) => (int_spec, frac_spec),
        None => (pattern.digits.as_str(), ""),
    };
    let decimals = frac_spec.chars().filter(|&c| matches!(c, '0' | '#' | '?')).count();
    let min_int_digits = int_spec.chars().filter(|&c| c == '0').count();
    let thousands = int_spec.contains(',');

    let rounded = format!("{value:.decimals$}");
    let (int_part, frac_part) = match rounded.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (rounded, String::new()),
    };

    let mut int_part = if int_part == "0" && min_int_digits == 0 {
        String::new()
    } else {
        int_part
    };
    while int_part.len() < min_int_digits {
        int_part.insert(0, '0');
    }
    if thousands {
        int_part = group_thousands(&int_part);
    }

    let mut number = int_part;
    if decimals > 0 {
        number.push('.');
        number.push_str(&frac_part);
    }
    format!("{}{number}{}", pattern.prefix, pattern.suffix)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Scientific notation, e.g. `0.00E+00` -> `1.23E+04`.
fn format_scientific(value: f64, section: &str) -> String {
    let upper = section.to_uppercase();
    let mantissa_spec = upper.split('E').next().unwrap_or("");
    let decimals = mantissa_spec
        .split_once('.')
        .map_or(0, |(_, frac)| frac.chars().filter(|&c| matches!(c, '0' | '#')).count());
    let exp_digits = upper
        .split_once("E+")
        .or_else(|| upper.split_once("E-"))
        .map_or(2, |(_, exp)| exp.chars().filter(|&c| c == '0').count().max(1));

    let text = format!("{value:.decimals$e}");
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}E{sign}{:0exp_digits$}", exponent.abs())
}

/// Fractions, e.g. `# ?/?` -> `1 1/2`.
fn format_fraction(value: f64, section: &str) -> String {
    let denominator_spec = section.rsplit('/').next().unwrap_or("?").trim();
    let fixed: Option<u32> = denominator_spec.parse().ok();
    let max_denominator = match denominator_spec.chars().filter(|&c| c == '?').count() {
        0 | 1 => 9,
        2 => 99,
        _ => 999,
    };
    let has_whole = section.split('/').next().is_some_and(|n| n.trim().contains(' '));

    let whole = if has_whole { value.trunc() } else { 0.0 };
    let frac = value - whole;

    let (numerator, denominator) = match fixed {
        Some(d) if d > 0 => ((frac * f64::from(d)).round(), f64::from(d)),
        _ => {
            let (n, d, _) = (1..=max_denominator)
                .map(|d| {
                    let d = f64::from(d);
                    let n = (frac * d).round();
                    (n, d, (frac - n / d).abs())
                })
                .fold((0.0, 1.0, f64::MAX), |best, cur| if cur.2 < best.2 { cur } else { best });
            (n, d)
        }
    };

    if numerator == 0.0 {
        return format!("{whole:.0}");
    }
    if has_whole && whole != 0.0 {
        format!("{whole:.0} {numerator:.0}/{denominator:.0}")
    } else {
        format!("{numerator:.0}/{denominator:.0}")
    }
}

#[derive(Debug, Clone, PartialEq)]
enum DateToken {
    Year2,
    Year4,
    Month1,
    Month2,
    MonthAbbrev,
    MonthFull,
    MonthLetter,
    Day1,
    Day2,
    DayAbbrev,
    DayFull,
    Hour1,
    Hour2,
    Minute1,
    Minute2,
    Second1,
    Second2,
    AmPm,
    AP,
    ElapsedHours,
    ElapsedMinutes,
    ElapsedSeconds,
    Literal(String),
}

impl DateToken {
    fn is_hour(&self) -> bool {
        matches!(self, DateToken::Hour1 | DateToken::Hour2 | DateToken::ElapsedHours)
    }
}

/// Whether the next date letter after `start` is a seconds token.
fn followed_by_seconds(chars: &[char], start: usize) -> bool {
    chars[start..]
        .iter()
        .find(|c| c.is_ascii_alphabetic())
        .is_some_and(|c| c.eq_ignore_ascii_case(&'s'))
}

fn parse_date_tokens(section: &str) -> Vec<DateToken> {
    let chars: Vec<char> = section.chars().collect();
    let mut tokens: Vec<DateToken> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let lower = c.to_ascii_lowercase();
        let run = chars[i..]
            .iter()
            .take_while(|x| x.to_ascii_lowercase() == lower)
            .count();

        let rest: String = chars[i..].iter().collect::<String>().to_lowercase();
        if rest.starts_with("am/pm") {
            tokens.push(DateToken::AmPm);
            i += 5;
            continue;
        }
        if rest.starts_with("a/p") {
            tokens.push(DateToken::AP);
            i += 3;
            continue;
        }

        let token = match lower {
            'y' => {
                if run <= 2 {
                    DateToken::Year2
                } else {
                    DateToken::Year4
                }
            }
            'm' => {
                let after_hour = tokens
                    .iter()
                    .rev()
                    .find(|t| !matches!(t, DateToken::Literal(_)))
                    .is_some_and(DateToken::is_hour);
                if run <= 2 && (after_hour || followed_by_seconds(&chars, i + run)) {
                    if run == 1 {
                        DateToken::Minute1
                    } else {
                        DateToken::Minute2
                    }
                } else {
                    match run {
                        1 => DateToken::Month1,
                        2 => DateToken::Month2,
                        3 => DateToken::MonthAbbrev,
                        4 => DateToken::MonthFull,
                        _ => DateToken::MonthLetter,
                    }
                }
            }
            'd' => match run {
                1 => DateToken::Day1,
                2 => DateToken::Day2,
                3 => DateToken::DayAbbrev,
                _ => DateToken::DayFull,
            },
            'h' => {
                if run == 1 {
                    DateToken::Hour1
                } else {
                    DateToken::Hour2
                }
            }
            's' => {
                if run == 1 {
                    DateToken::Second1
                } else {
                    DateToken::Second2
                }
            }
            '"' => {
                let text: String = chars[i + 1..].iter().take_while(|&&q| q != '"').collect();
                i += text.chars().count() + 2;
                tokens.push(DateToken::Literal(text));
                continue;
            }
            '\\' => {
                let text = chars.get(i + 1).map(char::to_string).unwrap_or_default();
                tokens.push(DateToken::Literal(text));
                i += 2;
                continue;
            }
            '_' => {
                tokens.push(DateToken::Literal(" ".to_string()));
                i += 2;
                continue;
            }
            '*' => {
                i += 2;
                continue;
            }
            '[' => {
                let inner: String = chars[i + 1..].iter().take_while(|&&b| b != ']').collect();
                i += inner.chars().count() + 2;
                match inner.to_lowercase().chars().next() {
                    Some('h') => tokens.push(DateToken::ElapsedHours),
                    Some('m') => tokens.push(DateToken::ElapsedMinutes),
                    Some('s') => tokens.push(DateToken::ElapsedSeconds),
                    _ => {}
                }
                continue;
            }
            _ => {
                tokens.push(DateToken::Literal(c.to_string()));
                i += 1;
                continue;
            }
        };

        tokens.push(token);
        i += run;
    }
    tokens
}

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Calendar fields of a serial date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DateTime {
    year: i64,
    month: usize,
    day: i64,
    weekday: usize,
    hour: i64,
    minute: i64,
    second: i64,
}

impl DateTime {
    fn from_serial(serial: f64, date1904: bool) -> Self {
        let total_seconds = (serial * 86_400.0).round() as i64;
        let days = total_seconds.div_euclid(86_400);
        let seconds = total_seconds.rem_euclid(86_400);

        // Serial 60 is the phantom 1900-02-29; later serials are one day ahead.
        let jdn = if date1904 {
            days + 2_416_481
        } else if days <= 60 {
            days + 2_415_020
        } else {
            days + 2_415_019
        };
        let (year, month, day) = jdn_to_ymd(jdn);

        Self {
            year,
            month,
            day,
            weekday: usize::try_from((jdn + 1).rem_euclid(7)).unwrap_or(0),
            hour: seconds / 3600,
            minute: seconds % 3600 / 60,
            second: seconds % 60,
        }
    }
}

/// Julian day number to proleptic Gregorian (year, month 1-12, day).
fn jdn_to_ymd(jdn: i64) -> (i64, usize, i64) {
    let f = jdn + 1401 + (((4 * jdn + 274_277) / 146_097) * 3) / 4 - 38;
    let e = 4 * f + 3;
    let g = e.rem_euclid(1461) / 4;
    let h = 5 * g + 2;
    let day = h.rem_euclid(153) / 5 + 1;
    let month = (h / 153 + 2).rem_euclid(12) + 1;
    let year = e.div_euclid(1461) - 4716 + (14 - month) / 12;
    (year, usize::try_from(month).unwrap_or(1), day)
}

fn format_date(value: f64, section: &str, date1904: bool) -> String {
    let dt = DateTime::from_serial(value, date1904);
    let tokens = parse_date_tokens(section);
    let twelve_hour = tokens
        .iter()
        .any(|t| matches!(t, DateToken::AmPm | DateToken::AP));
    let hour = if twelve_hour {
        match dt.hour % 12 {
            0 => 12,
            h => h,
        }
    } else {
        dt.hour
    };
    let month_name = MONTHS[dt.month.clamp(1, 12) - 1];

    let mut out = String::new();
    for token in tokens {
        match token {
            DateToken::Year2 => out.push_str(&format!("{:02}", dt.year.rem_euclid(100))),
            DateToken::Year4 => out.push_str(&format!("{:04}", dt.year)),
            DateToken::Month1 => out.push_str(&dt.month.to_string()),
            DateToken::Month2 => out.push_str(&format!("{:02}", dt.month)),
            DateToken::MonthAbbrev => out.push_str(&month_name[..3]),
            DateToken::MonthFull => out.push_str(month_name),
            DateToken::MonthLetter => out.push_str(&month_name[..1]),
            DateToken::Day1 => out.push_str(&dt.day.to_string()),
            DateToken::Day2 => out.push_str(&format!("{:02}", dt.day)),
            DateToken::DayAbbrev => out.push_str(&DAYS[dt.weekday][..3]),
            DateToken::DayFull => out.push_str(DAYS[dt.weekday]),
            DateToken::Hour1 => out.push_str(&hour.to_string()),
            DateToken::Hour2 => out.push_str(&format!("{hour:02}")),
            DateToken::Minute1 => out.push_str(&dt.minute.to_string()),
            DateToken::Minute2 => out.push_str(&format!("{:02}", dt.minute)),
            DateToken::Second1 => out.push_str(&dt.second.to_string()),
            DateToken::Second2 => out.push_str(&format!("{:02}", dt.second)),
            DateToken::AmPm => out.push_str(if dt.hour >= 12 { "PM" } else { "AM" }),
            DateToken::AP => out.push_str(if dt.hour >= 12 { "P" } else { "A" }),
            DateToken::ElapsedHours => out.push_str(&((value * 24.0).floor() as i64).to_string()),
            DateToken::ElapsedMinutes => {
                out.push_str(&((value * 1440.0).floor() as i64).to_string())
            }
            DateToken::ElapsedSeconds => {
                out.push_str(&((value * 86_400.0).round() as i64).to_string())
            }
            DateToken::Literal(text) => out.push_str(&text),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_date_formats() {
        // 45123 is 2023-07-16, a Sunday
        assert_eq!(format_number(45123.0, "mm-dd-yy", false), "07-16-23");
        assert_eq!(format_number(45123.0, "d-mmm-yy", false), "16-Jul-23");
        assert_eq!(format_number(45123.0, "yyyy-mm-dd", false), "2023-07-16");
        assert_eq!(format_number(45123.0, "dddd, mmmm d", false), "Sunday, July 16");
    }

    #[test]
    fn test_time_formats() {
        assert_eq!(format_number(45123.75, "h:mm AM/PM", false), "6:00 PM");
        assert_eq!(format_number(0.5, "hh:mm:ss", false), "12:00:00");
        assert_eq!(format_number(45123.25, "m/d/yy h:mm", false), "7/16/23 6:00");
        assert_eq!(format_number(1.5, "[h]:mm:ss", false), "36:00:00");
    }

    #[test]
    fn test_leap_year_quirk_and_1904_system() {
        assert_eq!(format_number(59.0, "yyyy-mm-dd", false), "1900-02-28");
        assert_eq!(format_number(61.0, "yyyy-mm-dd", false), "1900-03-01");
        assert_eq!(format_number(0.0, "yyyy-mm-dd", true), "1904-01-01");
    }

    #[test]
    fn test_fixed_decimals_thousands_and_percent() {
        assert_eq!(format_number(3.14159, "0.00", false), "3.14");
        assert_eq!(format_number(1234567.891, "#,##0.00", false), "1,234,567.89");
        assert_eq!(format_number(0.256, "0.0%", false), "25.6%");
        assert_eq!(format_number(0.1, "0%", false), "10%");
        assert_eq!(format_number(42.0, "00000", false), "00042");
    }

    #[test]
    fn test_sections_and_currency() {
        assert_eq!(format_number(1234.5, "$#,##0.00_);($#,##0.00)", false), "$1,234.50 ");
        assert_eq!(format_number(-1234.5, "$#,##0.00_);($#,##0.00)", false), "($1,234.50)");
        assert_eq!(format_number(-2.5, "0.0", false), "-2.5");
        assert_eq!(format_number(0.0, "0;-0;\"zero\"", false), "zero");
        assert_eq!(format_number(-3.0, "0;[Red]0", false), "3");
        assert_eq!(format_number(2.5, "[$€-407]#,##0.00", false), "€2.50");
    }

    #[test]
    fn test_scientific_and_fraction() {
        assert_eq!(format_number(12345.0, "0.00E+00", false), "1.23E+04");
        assert_eq!(format_number(0.00012, "0.00E+00", false), "1.20E-04");
        assert_eq!(format_number(1.5, "# ?/?", false), "1 1/2");
        assert_eq!(format_number(0.75, "?/4", false), "3/4");
    }

    #[test]
    fn test_date_detection() {
        assert!(is_date_format("mm-dd-yy"));
        assert!(is_date_format("h:mm"));
        assert!(is_date_format("[h]:mm:ss"));
        assert!(!is_date_format("0.00"));
        assert!(!is_date_format("#,##0"));
        assert!(!is_date_format("\"days\" 0"));
        assert!(is_general("General"));
        assert!(!is_general("0"));
    }

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(builtin_format(14), Some("mm-dd-yy"));
        assert_eq!(builtin_format(0), Some("General"));
        assert_eq!(builtin_format(30), None);
    }
}
