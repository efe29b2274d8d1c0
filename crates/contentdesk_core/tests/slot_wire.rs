use chrono::{TimeZone, Utc};
use contentdesk_core::{
    decode_collection, encode_collection, ContentInput, ContentRecord, ContentType,
};

#[test]
fn record_serializes_with_slot_field_names() {
    let created = Utc.with_ymd_and_hms(2026, 2, 13, 10, 0, 0).unwrap();
    let input = ContentInput::new("Title", Some(ContentType::Article), "Body").unwrap();
    let record = ContentRecord::new(input, created);

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["id"], record.id.as_str());
    assert_eq!(json["title"], "Title");
    assert_eq!(json["type"], "article");
    assert_eq!(json["body"], "Body");
    assert_eq!(json["createdAt"], "2026-02-13T10:00:00Z");
    assert_eq!(json["updatedAt"], "2026-02-13T10:00:00Z");
    assert_eq!(json.as_object().unwrap().len(), 6);
}

#[test]
fn decode_accepts_browser_style_slot_content() {
    let raw = r#"[
        {"id":"1760860800000","title":"B","type":"note","body":"b2",
         "createdAt":"2026-10-19T08:00:00.000Z","updatedAt":"2026-10-19T08:00:00.000Z"},
        {"id":"1760860700000","title":"A","type":"blog","body":"b1",
         "createdAt":"2026-10-19T07:58:20.000Z","updatedAt":"2026-10-19T08:05:00.500Z"}
    ]"#;

    let decoded = decode_collection(raw).unwrap();
    assert_eq!(decoded.dropped_invalid, 0);
    let records = decoded.records;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id.as_str(), "1760860800000");
    assert!(!records[0].is_edited());
    assert_eq!(records[1].kind, ContentType::Blog);
    assert!(records[1].is_edited());

    let reencoded = encode_collection(&records).unwrap();
    assert_eq!(decode_collection(&reencoded).unwrap().records, records);
}

#[test]
fn decode_rejects_non_array_payload() {
    assert!(decode_collection(r#"{"contents":[]}"#).is_err());
    assert!(decode_collection("").is_err());
}
