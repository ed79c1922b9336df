//! Fixed-width rating-list ingest.
//!
//! The national federation publishes the standard rating list as a plain-text
//! table: one record per line, fixed-width columns, a single header line. This
//! module turns that table into typed `RatingRecord`s and answers filtered
//! queries over them.
//!
//! Design goals:
//! - **Strict numeric parsing** (malformed fields raise, never default)
//! - **Line-level errors** carrying the 1-based line number
//! - **Lazy queries**: filters compose into one predicate over borrowed
//!   records, so a ~350k-record list is never copied per query
//! - **Separation of concerns**: no statistics here

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::domain::{RatingRecord, SexCode};
use crate::error::AppError;

/// Byte offsets of the fixed-width columns, per the published list layout.
///
/// The encoding is assumed ASCII-compatible so byte slicing is valid.
const COUNTRY_COLS: Range<usize> = 76..79;
const SEX_COL: usize = 80;
const RATING_COLS: Range<usize> = 113..117;
const BIRTH_YEAR_COLS: Range<usize> = 126..130;

/// Environment variable consulted when `--list` is not given.
pub const RATING_LIST_ENV: &str = "ELOGAP_RATING_LIST";

/// In-memory rating list: immutable after load, shared by reference.
#[derive(Debug, Clone)]
pub struct RatingStore {
    records: Vec<RatingRecord>,
}

impl RatingStore {
    /// Load and parse the fixed-width list. The first line is a header and is
    /// skipped; every other line must parse or the load fails.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path)
            .map_err(|e| AppError::io(format!("Failed to open rating list '{}': {e}", path.display())))?;
        let reader = BufReader::new(file);

        let mut records = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line
                .map_err(|e| AppError::io(format!("Failed to read rating list line {line_no}: {e}")))?;
            if line_no == 1 {
                continue; // header
            }
            records.push(parse_line(&line, line_no)?);
        }

        Ok(Self { records })
    }

    /// Build a store from already-typed records (synthetic datasets, tests).
    pub fn from_records(records: Vec<RatingRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[RatingRecord] {
        &self.records
    }

    /// Start a filtered query. Filters AND together; iteration is lazy.
    pub fn query(&self) -> RecordQuery<'_> {
        RecordQuery {
            records: &self.records,
            country: None,
            sex: None,
            max_birth_year: None,
        }
    }

    /// Sorted, de-duplicated country codes present in the list.
    pub fn distinct_countries(&self) -> Vec<String> {
        let set: std::collections::BTreeSet<&str> =
            self.records.iter().map(|r| r.country.as_str()).collect();
        set.into_iter().map(str::to_string).collect()
    }
}

/// A composable filter over the store's records.
///
/// Each setter narrows the predicate; `iter` walks the backing slice once and
/// yields matching records by reference.
#[derive(Debug, Clone)]
pub struct RecordQuery<'a> {
    records: &'a [RatingRecord],
    country: Option<String>,
    sex: Option<SexCode>,
    max_birth_year: Option<i32>,
}

impl<'a> RecordQuery<'a> {
    pub fn country(mut self, code: &str) -> Self {
        self.country = Some(code.to_string());
        self
    }

    pub fn sex(mut self, sex: SexCode) -> Self {
        self.sex = Some(sex);
        self
    }

    pub fn birth_year_at_most(mut self, year: i32) -> Self {
        self.max_birth_year = Some(year);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a RatingRecord> + '_ {
        self.records.iter().filter(move |r| self.matches(r))
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Collect matching ratings as floats (the shape the fitters consume).
    pub fn ratings(&self) -> Vec<f64> {
        self.iter().map(|r| f64::from(r.rating)).collect()
    }

    fn matches(&self, record: &RatingRecord) -> bool {
        if let Some(country) = &self.country {
            if record.country != *country {
                return false;
            }
        }
        if let Some(sex) = self.sex {
            if record.sex != sex {
                return false;
            }
        }
        if let Some(year) = self.max_birth_year {
            if record.birth_year > year {
                return false;
            }
        }
        true
    }
}

/// Resolve the rating-list path: explicit flag first, then the
/// `ELOGAP_RATING_LIST` environment variable (a `.env` file is honored).
pub fn resolve_list_path(flag: Option<PathBuf>) -> Result<PathBuf, AppError> {
    if let Some(path) = flag {
        return Ok(path);
    }

    // A missing .env file is fine; only the variable matters.
    dotenvy::dotenv().ok();

    match std::env::var(RATING_LIST_ENV) {
        Ok(value) if !value.trim().is_empty() => Ok(PathBuf::from(value)),
        _ => Err(AppError::config(format!(
            "No rating list given. Pass --list <path> or set {RATING_LIST_ENV} (optionally via .env).",
        ))),
    }
}

fn parse_line(line: &str, line_no: usize) -> Result<RatingRecord, AppError> {
    let bytes = line.as_bytes();
    if bytes.len() < BIRTH_YEAR_COLS.end {
        return Err(AppError::parse(format!(
            "Line {line_no}: record is {} bytes, expected at least {}.",
            bytes.len(),
            BIRTH_YEAR_COLS.end
        )));
    }

    let rating = parse_numeric_field(bytes, RATING_COLS, "rating", line_no)?;
    let birth_year = parse_numeric_field(bytes, BIRTH_YEAR_COLS, "birth year", line_no)?;

    let country = field_str(bytes, COUNTRY_COLS, "country", line_no)?.to_string();
    let sex = SexCode::from_flag(bytes[SEX_COL] as char);

    Ok(RatingRecord {
        rating,
        birth_year,
        country,
        sex,
    })
}

fn field_str<'a>(
    bytes: &'a [u8],
    cols: Range<usize>,
    name: &str,
    line_no: usize,
) -> Result<&'a str, AppError> {
    std::str::from_utf8(&bytes[cols])
        .map_err(|_| AppError::parse(format!("Line {line_no}: non-ASCII bytes in {name} field.")))
}

fn parse_numeric_field(
    bytes: &[u8],
    cols: Range<usize>,
    name: &str,
    line_no: usize,
) -> Result<i32, AppError> {
    let raw = field_str(bytes, cols.clone(), name, line_no)?;
    raw.trim().parse::<i32>().map_err(|_| {
        AppError::parse(format!(
            "Line {line_no}: invalid {name} field '{raw}' at columns {}..{}.",
            cols.start, cols.end
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    /// Build a synthetic fixed-width line with the given fields at the
    /// published offsets. Everything else is padding.
    fn make_line(country: &str, sex: char, rating: &str, birth_year: &str) -> String {
        let mut chars = vec![b' '; 132];
        chars[COUNTRY_COLS].copy_from_slice(country.as_bytes());
        chars[SEX_COL] = sex as u8;
        chars[RATING_COLS].copy_from_slice(format!("{rating:>4}").as_bytes());
        chars[BIRTH_YEAR_COLS].copy_from_slice(format!("{birth_year:>4}").as_bytes());
        String::from_utf8(chars).unwrap()
    }

    fn record(country: &str, sex: SexCode, rating: i32, birth_year: i32) -> RatingRecord {
        RatingRecord {
            rating,
            birth_year,
            country: country.to_string(),
            sex,
        }
    }

    #[test]
    fn parse_line_reads_fixed_offsets() {
        let line = make_line("RUS", 'F', "2500", "1990");
        let rec = parse_line(&line, 2).unwrap();
        assert_eq!(rec.country, "RUS");
        assert_eq!(rec.sex, SexCode::Female);
        assert_eq!(rec.rating, 2500);
        assert_eq!(rec.birth_year, 1990);
    }

    #[test]
    fn parse_line_trims_padded_numerics() {
        let line = make_line("ESP", 'M', " 850", "2001");
        let rec = parse_line(&line, 5).unwrap();
        assert_eq!(rec.rating, 850);
        assert_eq!(rec.birth_year, 2001);
    }

    #[test]
    fn malformed_rating_raises_parse_error_with_line_number() {
        let line = make_line("GER", 'M', "24x0", "1980");
        let err = parse_line(&line, 17).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("Line 17"));
        assert!(err.to_string().contains("rating"));
    }

    #[test]
    fn short_line_raises_parse_error() {
        let err = parse_line("too short", 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn load_skips_header_and_fails_on_missing_file() {
        let path = std::env::temp_dir().join(format!("elogap-ingest-{}.txt", std::process::id()));
        let body = format!(
            "ID Name Fed Sex Title ... Rating ... B-day\n{}\n{}\n",
            make_line("RUS", 'M', "2700", "1985"),
            make_line("RUS", 'F', "2500", "1992"),
        );
        std::fs::write(&path, body).unwrap();

        let store = RatingStore::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].rating, 2700);

        let err = RatingStore::load(Path::new("/nonexistent/rating_list.txt")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn queries_compose_with_logical_and() {
        let store = RatingStore::from_records(vec![
            record("RUS", SexCode::Male, 2700, 1985),
            record("RUS", SexCode::Female, 2500, 1992),
            record("RUS", SexCode::Female, 2100, 2005),
            record("ESP", SexCode::Female, 2300, 1990),
        ]);

        let q = store
            .query()
            .country("RUS")
            .sex(SexCode::Female)
            .birth_year_at_most(2000);
        assert_eq!(q.count(), 1);
        assert_eq!(q.ratings(), vec![2500.0]);
    }

    #[test]
    fn unknown_sex_codes_match_neither_side() {
        let store = RatingStore::from_records(vec![
            record("ITA", SexCode::Male, 2400, 1980),
            record("ITA", SexCode::Other, 2450, 1981),
            record("ITA", SexCode::Female, 2350, 1982),
        ]);

        assert_eq!(store.query().sex(SexCode::Male).count(), 1);
        assert_eq!(store.query().sex(SexCode::Female).count(), 1);
        assert_eq!(store.query().count(), 3);
    }

    #[test]
    fn sex_flag_mapping_is_exact() {
        assert_eq!(SexCode::from_flag('F'), SexCode::Female);
        assert_eq!(SexCode::from_flag('M'), SexCode::Male);
        assert_eq!(SexCode::from_flag('w'), SexCode::Other);
        assert_eq!(SexCode::from_flag(' '), SexCode::Other);
    }

    #[test]
    fn distinct_countries_sorted() {
        let store = RatingStore::from_records(vec![
            record("USA", SexCode::Male, 2000, 1990),
            record("ARG", SexCode::Male, 2000, 1990),
            record("USA", SexCode::Female, 2000, 1990),
            record("IND", SexCode::Male, 2000, 1990),
        ]);
        assert_eq!(store.distinct_countries(), vec!["ARG", "IND", "USA"]);
    }
}
