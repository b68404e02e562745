//! Currency and number formatting for cash amounts.

/// Separators used when rendering numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleConfig {
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }
}

impl LocaleConfig {
    /// Resolves separators from a language tag such as `en-US` or `de_DE`.
    pub fn from_tag(tag: &str) -> Self {
        let language = tag
            .split(|c| c == '-' || c == '_')
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        match language.as_str() {
            "de" | "es" | "it" | "nl" | "pt" | "id" => Self {
                decimal_separator: ',',
                grouping_separator: '.',
            },
            "fr" => Self {
                decimal_separator: ',',
                grouping_separator: ' ',
            },
            _ => Self::default(),
        }
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "KRW" => "₩".into(),
        "AUD" => "A$".into(),
        "CAD" => "CAD".into(),
        "CHF" => "CHF".into(),
        _ => code.into(),
    }
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let mut body = format!("{:.*}", precision as usize, value);
    if locale.decimal_separator != '.' {
        if let Some(pos) = body.find('.') {
            body.replace_range(pos..=pos, &locale.decimal_separator.to_string());
        }
    }
    let (sign, unsigned) = match body.strip_prefix('-') {
        Some(rest) => ("-", rest.to_string()),
        None => ("", body),
    };
    match unsigned.find(locale.decimal_separator) {
        Some(pos) if precision > 0 => format!(
            "{}{}{}",
            sign,
            group_digits(&unsigned[..pos], locale.grouping_separator),
            &unsigned[pos..]
        ),
        _ => format!(
            "{}{}",
            sign,
            group_digits(&unsigned, locale.grouping_separator)
        ),
    }
}

/// Parses an amount typed with `locale`'s separators, e.g. `1.500,25` for `de`.
///
/// Grouping separators must split the integer part into groups of three
/// digits and `_` is ignored. Anything else yields `None`, so `12,50` is
/// rejected rather than read as `1250` when `,` groups thousands.
pub fn parse_amount(raw: &str, locale: &LocaleConfig) -> Option<f64> {
    let text: String = raw.trim().chars().filter(|c| *c != '_').collect();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let mut parts = unsigned.splitn(2, locale.decimal_separator);
    let integer = parts.next()?;
    let fraction = parts.next();

    let groups: Vec<&str> = integer.split(locale.grouping_separator).collect();
    let grouped = match groups.split_first() {
        Some((only, [])) => !only.is_empty(),
        Some((head, tail)) => (1..=3).contains(&head.len()) && tail.iter().all(|g| g.len() == 3),
        None => false,
    };
    if !grouped || !groups.iter().all(|g| g.chars().all(|c| c.is_ascii_digit())) {
        return None;
    }

    let mut normalized = format!("{}{}", sign, groups.concat());
    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        normalized.push('.');
        normalized.push_str(fraction);
    }
    normalized.parse().ok()
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// Renders a whole-unit cash amount, e.g. `$5,500`.
pub fn format_cash(amount: f64, currency: &str, locale: &LocaleConfig) -> String {
    format_money(amount.round(), currency, locale, 0)
}

/// Renders an amount with its currency symbol and `precision` decimals.
pub fn format_money(amount: f64, currency: &str, locale: &LocaleConfig, precision: u8) -> String {
    let code = currency.trim().to_uppercase();
    let body = format_number(locale, amount.abs(), precision);
    let negative = amount < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };
    let symbol = symbol_for(&code);
    if symbol.chars().count() > 1 && symbol.chars().all(|c| c.is_ascii_uppercase()) {
        format!("{}{} {}", sign, symbol, body)
    } else {
        format!("{}{}{}", sign, symbol, body)
    }
}
