use super::*;

#[derive(Clone, Debug, PartialEq)]
struct Row {
    id: &'static str,
    n: u32,
}

fn id_of(row: &Row) -> &str {
    row.id
}

#[test]
fn default_is_loading_with_no_items() {
    let records = Records::<Row>::default();
    assert!(records.is_loading());
    assert!(records.items().is_empty());
    assert_eq!(records.error(), None);
}

#[test]
fn from_result_maps_ok_and_err() {
    let ok: Records<Row> = Ok(vec![Row { id: "a", n: 1 }]).into();
    assert_eq!(ok.items().len(), 1);
    let failed: Records<Row> = Err("Employee request failed: 500".to_owned()).into();
    assert_eq!(failed.error(), Some("Employee request failed: 500"));
    assert!(failed.items().is_empty());
}

#[test]
fn upsert_replaces_matching_record_in_place() {
    let mut records = Records::Ready(vec![Row { id: "a", n: 1 }, Row { id: "b", n: 2 }]);
    records.upsert(Row { id: "b", n: 9 }, id_of);
    assert_eq!(records.items(), &[Row { id: "a", n: 1 }, Row { id: "b", n: 9 }]);
}

#[test]
fn upsert_prepends_new_record_and_recovers_from_failure() {
    let mut records = Records::Ready(vec![Row { id: "a", n: 1 }]);
    records.upsert(Row { id: "c", n: 3 }, id_of);
    assert_eq!(records.items()[0].id, "c");

    let mut failed = Records::Failed("x".to_owned());
    failed.upsert(Row { id: "a", n: 1 }, id_of);
    assert_eq!(failed.items().len(), 1);
}
