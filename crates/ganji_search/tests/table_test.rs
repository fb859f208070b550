//! Integration tests for building, persisting, and loading the
//! solar-term table.

use chrono::{FixedOffset, TimeZone};
use ganji_base::Jieqi;
use ganji_search::{
    DEFAULT_FIRST_YEAR, DEFAULT_LAST_YEAR, Precision, SearchError, SolarTermTable, TableConfig,
};

fn cst() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).unwrap()
}

#[test]
fn rebuild_is_identical() {
    let a = SolarTermTable::build(1989..=1991, &TableConfig::default()).unwrap();
    let b = SolarTermTable::build(1989..=1991, &TableConfig::strict()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn instants_strictly_increase_across_years() {
    let t = SolarTermTable::build(2000..=2004, &TableConfig::default()).unwrap();
    let mut prev = None;
    for year in t.year_range() {
        for ev in t.events_for_year(year).unwrap() {
            if let Some(p) = prev {
                assert!(ev.instant > p, "{} {year} not after previous", ev.term);
            }
            prev = Some(ev.instant);
        }
    }
}

#[test]
fn json_roundtrip_through_file() {
    let built = SolarTermTable::build(2023..=2024, &TableConfig::default()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("terms.json");
    built.save(&path).unwrap();

    let loaded = SolarTermTable::load(&path, cst()).unwrap();
    assert_eq!(loaded.year_range(), 2023..=2024);
    assert_eq!(loaded.len(), 24);
    assert!(loaded.incomplete_years().is_empty());
    for year in 2023..=2024 {
        for (a, b) in built
            .events_for_year(year)
            .unwrap()
            .into_iter()
            .zip(loaded.events_for_year(year).unwrap())
        {
            assert_eq!(a.instant, b.instant);
            assert_eq!(b.precision, Precision::Tabulated);
        }
    }
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SolarTermTable::load(dir.path().join("absent.json"), cst()).unwrap_err();
    assert!(matches!(err, SearchError::Io(_)));
}

const REFERENCE_1990: &str = r#"{
  "metadata": { "source": "almanac", "timezone": "Asia/Shanghai" },
  "solar_terms_data": {
    "1990": {
      "立春": { "chinese_name": "立春", "english_name": "Lichun", "month": "February", "day": 4, "hour": 10, "minute": 14, "second": 0 },
      "雨水": { "month": "February", "day": 19, "hour": 6, "minute": 14, "second": 0 },
      "驚蟄": { "month": "March", "day": 6, "hour": 4, "minute": 19, "second": 0 },
      "Qingming": { "month": "April", "day": 5, "hour": 9, "minute": 13, "second": 0 },
      "立夏": { "month": 5, "day": 6, "hour": 2, "minute": 35, "second": 0 },
      "芒種": { "month": 6, "day": 6, "hour": 6, "minute": 46, "second": 0 },
      "小暑": { "month": 7, "day": 7, "hour": 17, "minute": 0, "second": 0 },
      "立秋": { "month": 8, "day": 8, "hour": 2, "minute": 46, "second": 0 },
      "白露": { "month": 9, "day": 8, "hour": 5, "minute": 37, "second": 0 },
      "寒露": { "month": 10, "day": 8, "hour": 21, "minute": 14, "second": 0 },
      "立冬": { "month": 11, "day": 8, "hour": 0, "minute": 23, "second": 0 },
      "大雪": { "month": 12, "day": 7, "hour": 17, "minute": 14, "second": 0 },
      "小寒": { "month": "January", "day": 6, "hour": 4, "minute": 28, "second": 0 }
    }
  }
}"#;

#[test]
fn reads_reference_layout() {
    let t = SolarTermTable::from_json_str(REFERENCE_1990, cst()).unwrap();
    assert_eq!(t.year_range(), 1990..=1990);
    assert_eq!(t.len(), 12);
    assert!(t.incomplete_years().is_empty());
    let qm = t.lookup(1990, Jieqi::Qingming).unwrap();
    assert_eq!(qm.instant, cst().with_ymd_and_hms(1990, 4, 5, 9, 13, 0).unwrap());
    let xh = t.lookup(1990, Jieqi::Xiaohan).unwrap();
    assert_eq!(xh.instant, cst().with_ymd_and_hms(1991, 1, 6, 4, 28, 0).unwrap());
}

#[test]
fn reference_overrides_computed_rows() {
    let mut t = SolarTermTable::build(1989..=1991, &TableConfig::default()).unwrap();
    let reference = SolarTermTable::from_json_str(REFERENCE_1990, cst()).unwrap();
    assert_eq!(t.merge_overrides(&reference).unwrap(), 12);
    assert_eq!(
        t.lookup(1990, Jieqi::Lichun).unwrap().precision,
        Precision::Tabulated
    );
    assert_eq!(
        t.lookup(1991, Jieqi::Lichun).unwrap().precision,
        Precision::Converged
    );
    assert!(t.ensure_complete().is_ok());
}

#[test]
fn disordered_reference_year_is_flagged() {
    let json = REFERENCE_1990.replace(
        r#""day": 6, "hour": 4, "minute": 19"#,
        r#""day": 1, "hour": 4, "minute": 19"#,
    );
    let json = json.replace(r#""month": "March""#, r#""month": "January""#);
    let t = SolarTermTable::from_json_str(&json, cst()).unwrap();
    assert_eq!(t.incomplete_years(), vec![1990]);
    assert!(matches!(
        t.lookup(1990, Jieqi::Jingzhe),
        Err(SearchError::DataQuality { year: 1990, .. })
    ));
}

#[test]
fn incomplete_neighbour_blocks_only_its_own_edge() {
    let built = SolarTermTable::build(2023..=2025, &TableConfig::default()).unwrap();
    let mut doc: serde_json::Value = serde_json::from_str(&built.to_json_string().unwrap()).unwrap();
    doc["2023"].as_object_mut().unwrap().remove("立夏");
    let t = SolarTermTable::from_json_str(&doc.to_string(), cst()).unwrap();
    assert_eq!(t.incomplete_years(), vec![2023]);
    assert!(t.events_for_year(2024).is_ok());

    // answers inside 2024 are unaffected by the gap in 2023
    let july = cst().with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
    assert_eq!(t.term_at_or_before(&july).unwrap().term, Jieqi::Mangzhong);
    assert_eq!(t.previous_term_before(&july).unwrap().term, Jieqi::Mangzhong);
    assert_eq!(t.next_term_after(&july).unwrap().term, Jieqi::Xiaoshu);

    // before Lichun 2024 the month was opened by a 2023 term
    let january = cst().with_ymd_and_hms(2024, 1, 20, 0, 0, 0).unwrap();
    assert!(matches!(
        t.term_at_or_before(&january),
        Err(SearchError::DataQuality { year: 2023, .. })
    ));
    assert!(matches!(
        t.next_term_after(&january),
        Err(SearchError::DataQuality { year: 2023, .. })
    ));

    // 2025 scans reach 2024 only
    let autumn = cst().with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();
    assert_eq!(t.term_at_or_before(&autumn).unwrap().term, Jieqi::Liqiu);
}

#[test]
fn default_range_edges_build_strictly() {
    assert!(DEFAULT_FIRST_YEAR < DEFAULT_LAST_YEAR);
    let range = TableConfig::default_years();
    assert_eq!(range, DEFAULT_FIRST_YEAR..=DEFAULT_LAST_YEAR);
    for year in [*range.start(), *range.end()] {
        let t = SolarTermTable::build(year..=year, &TableConfig::strict()).unwrap();
        assert_eq!(t.len(), 12, "{year}");
        assert!(t.events_for_year(year).unwrap().iter().all(|ev| ev.precision == Precision::Converged));
    }
}
