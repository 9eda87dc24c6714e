use pure_rust_locales::{locale_match, Locale};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::Month;

/// How verbose the weekday column labels are
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum WeekdayStyle {
    /// A single letter, e.g. "M"
    Narrow,
    /// The abbreviated name, e.g. "Mon"
    #[default]
    Short,
    /// The full name, e.g. "Monday"
    Long,
}

impl WeekdayStyle {
    /// Returns the next style in the cycle narrow → short → long → narrow
    pub fn next(self) -> WeekdayStyle {
        match self {
            WeekdayStyle::Narrow => WeekdayStyle::Short,
            WeekdayStyle::Short => WeekdayStyle::Long,
            WeekdayStyle::Long => WeekdayStyle::Narrow,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeekdayStyle::Narrow => "narrow",
            WeekdayStyle::Short => "short",
            WeekdayStyle::Long => "long",
        }
    }
}

impl fmt::Display for WeekdayStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeekdayStyle {
    type Err = ParseWeekdayStyleError;

    fn from_str(s: &str) -> Result<WeekdayStyle, ParseWeekdayStyleError> {
        match s {
            "narrow" => Ok(WeekdayStyle::Narrow),
            "short" => Ok(WeekdayStyle::Short),
            "long" => Ok(WeekdayStyle::Long),
            _ => Err(ParseWeekdayStyleError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid weekday style {0:?}; expected \"narrow\", \"short\", or \"long\"")]
pub struct ParseWeekdayStyleError(String);

/// Source of localized calendar names.
///
/// Implementations return `None` when they have nothing for the given locale;
/// callers degrade to empty labels in that case.
pub trait Localizer {
    /// Weekday names in the given style, Monday first
    fn weekday_names(&self, locale: &str, style: WeekdayStyle) -> Option<[String; 7]>;

    /// The full (standalone) name of `month` in `year`
    fn month_name(&self, locale: &str, year: i32, month: Month) -> Option<String>;
}

impl<L: Localizer + ?Sized> Localizer for &L {
    fn weekday_names(&self, locale: &str, style: WeekdayStyle) -> Option<[String; 7]> {
        (**self).weekday_names(locale, style)
    }

    fn month_name(&self, locale: &str, year: i32, month: Month) -> Option<String> {
        (**self).month_name(locale, year, month)
    }
}

/// A [`Localizer`] backed by the glibc `LC_TIME` tables shipped with
/// `pure-rust-locales`.
///
/// Locale identifiers may be given either POSIX-style (`hu_HU`) or BCP 47-style
/// (`hu-HU`, `hu`); a bare language is mapped to its most common territory.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PosixLocales;

impl Localizer for PosixLocales {
    fn weekday_names(&self, locale: &str, style: WeekdayStyle) -> Option<[String; 7]> {
        let locale = resolve_locale(locale)?;
        let names: &[&str] = match style {
            // Full names may all share a prefix (e.g. "星期" in Chinese), so
            // narrow labels are cut from the abbreviations
            WeekdayStyle::Narrow | WeekdayStyle::Short => locale_match!(locale => LC_TIME::ABDAY),
            WeekdayStyle::Long => locale_match!(locale => LC_TIME::DAY),
        };
        // glibc lists Sunday first
        Some(std::array::from_fn(|i| {
            names.get((i + 1) % 7).map_or_else(String::new, |&name| {
                if style == WeekdayStyle::Narrow {
                    name.chars()
                        .next()
                        .map_or_else(String::new, |c| c.to_uppercase().collect())
                } else {
                    name.to_owned()
                }
            })
        }))
    }

    fn month_name(&self, locale: &str, _year: i32, month: Month) -> Option<String> {
        let locale = resolve_locale(locale)?;
        let names: &[&str] = locale_match!(locale => LC_TIME::MON);
        names
            .get(usize::from(u8::from(month)) - 1)
            .map(|&s| s.to_owned())
    }
}

/// Languages whose primary territory is not simply the language code
/// upper-cased
static DEFAULT_TERRITORIES: &[(&str, &str)] = &[
    ("ar", "ar_EG"),
    ("ca", "ca_ES"),
    ("cs", "cs_CZ"),
    ("da", "da_DK"),
    ("el", "el_GR"),
    ("en", "en_US"),
    ("et", "et_EE"),
    ("he", "he_IL"),
    ("ja", "ja_JP"),
    ("ko", "ko_KR"),
    ("nb", "nb_NO"),
    ("sl", "sl_SI"),
    ("sv", "sv_SE"),
    ("uk", "uk_UA"),
    ("zh", "zh_CN"),
];

fn resolve_locale(tag: &str) -> Option<Locale> {
    let tag = tag.trim().replace('-', "_");
    if tag.is_empty() {
        return None;
    }
    if let Ok(locale) = Locale::try_from(tag.as_str()) {
        return Some(locale);
    }
    if tag.contains('_') {
        None
    } else if let Some(&(_, full)) = DEFAULT_TERRITORIES.iter().find(|&&(lang, _)| lang == tag) {
        Locale::try_from(full).ok()
    } else {
        Locale::try_from(format!("{tag}_{}", tag.to_uppercase()).as_str()).ok()
    }
}

/// Upper-cases the first character of `s`, leaving the rest untouched
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
