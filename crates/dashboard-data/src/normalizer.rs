//! Heuristic normalisation of summary payloads into chart series.
//!
//! The summary endpoint does not have a fixed schema: records arrive as a
//! bare array or wrapped in `data` / `result`, keys use arbitrary casing and
//! the numeric fields go by several names. [`normalize`] lower-cases every
//! record, picks a label per record and fills one series per semantic slot
//! by scanning ordered candidate key lists. It never fails; anything it does
//! not recognise degrades to zeros or an empty bundle.

use dashboard_core::formatting::title_case;
use dashboard_core::models::{ChartBundle, NormalizedSeries, SeriesSlot};
use serde_json::{Map, Value};

/// One payload row with lower-cased keys.
pub type RawRecord = Map<String, Value>;

/// Keys that may carry a record's x-axis label, in priority order.
pub const LABEL_CANDIDATES: &[&str] = &["day", "weekday", "date", "week", "label", "name", "period"];

/// Wrapper keys checked, in order, when the payload is an object.
const ENVELOPE_KEYS: &[&str] = &["data", "result"];

/// Candidate source keys for one semantic slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpec {
    pub slot: SeriesSlot,
    /// Lower-case keys, first match wins.
    pub candidates: &'static [&'static str],
}

pub const QUANTITY: SlotSpec = SlotSpec {
    slot: SeriesSlot::Quantity,
    candidates: &["sumqty", "qty", "quantity", "totalqty", "total_quantity"],
};

pub const AMOUNT: SlotSpec = SlotSpec {
    slot: SeriesSlot::Amount,
    candidates: &["sumamt", "amount", "totalamt", "totalamount", "sum", "total"],
};

pub const COUNT: SlotSpec = SlotSpec {
    slot: SeriesSlot::Count,
    candidates: &["ordercnt", "ordercount", "orders", "count"],
};

/// The table [`normalize`] runs with.
pub const DEFAULT_SLOTS: [SlotSpec; 3] = [QUANTITY, AMOUNT, COUNT];

/// Display names for well-known source keys.
const SERIES_LABELS: &[(&str, &str)] = &[
    ("sumqty", "Sum Qty"),
    ("qty", "Quantity"),
    ("quantity", "Quantity"),
    ("totalqty", "Total Qty"),
    ("sumamt", "Sum Amount"),
    ("amount", "Amount"),
    ("totalamt", "Total Amount"),
    ("totalamount", "Total Amount"),
    ("sum", "Sum"),
    ("ordercnt", "Order Count"),
    ("ordercount", "Order Count"),
    ("orders", "Orders"),
    ("count", "Count"),
];

// ── SlotExtraction ────────────────────────────────────────────────────────────

/// Raw result of scanning all records for one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotExtraction {
    /// Source key of the first record that matched, if any did.
    pub key: Option<String>,
    /// One value per record, `0.0` where the record had no candidate key.
    pub values: Vec<f64>,
}

impl SlotExtraction {
    pub fn has_match(&self) -> bool {
        self.key.is_some()
    }

    /// Convert into a bundle series; `None` when nothing matched.
    pub fn into_series(self, slot: SeriesSlot) -> Option<NormalizedSeries> {
        let key = self.key?;
        Some(NormalizedSeries {
            label: format_series_label(Some(&key), slot.fallback_label()),
            key,
            values: self.values,
            slot,
        })
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Normalize `payload` with the default slot table.
pub fn normalize(payload: &Value) -> ChartBundle {
    normalize_with(payload, &DEFAULT_SLOTS)
}

/// Normalize `payload`, extracting one series per entry of `slots`.
///
/// Unmatched slots are left out of the bundle; the fallback chaining between
/// slots is applied by the [`ChartBundle`] accessors.
pub fn normalize_with(payload: &Value, slots: &[SlotSpec]) -> ChartBundle {
    let Some(entries) = extract_entries(payload) else {
        return ChartBundle::default();
    };

    let records: Vec<RawRecord> = entries.iter().map(lowercase_keys).collect();

    let labels = records
        .iter()
        .enumerate()
        .map(|(index, record)| extract_label(record, index))
        .collect();

    let series = slots
        .iter()
        .filter_map(|spec| extract_slot(&records, spec).into_series(spec.slot))
        .collect();

    ChartBundle { labels, series }
}

/// Locate the record list: the payload itself, or its `data` / `result`
/// array. Any other shape yields `None`.
pub fn extract_entries(payload: &Value) -> Option<&Vec<Value>> {
    match payload {
        Value::Array(items) => Some(items),
        Value::Object(map) => ENVELOPE_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array)),
        _ => None,
    }
}

/// Copy a record with every key lower-cased. Non-object rows become empty
/// records.
///
/// Keys are visited in document order, so when two keys collapse to the same
/// lower-case form the later one in the payload wins.
pub fn lowercase_keys(entry: &Value) -> RawRecord {
    match entry {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| (key.to_lowercase(), value.clone()))
            .collect(),
        _ => RawRecord::new(),
    }
}

/// First non-blank label candidate, or `#<index + 1>`.
pub fn extract_label(record: &RawRecord, index: usize) -> String {
    LABEL_CANDIDATES
        .iter()
        .filter_map(|key| record.get(*key))
        .find_map(label_text)
        .unwrap_or_else(|| format!("#{}", index + 1))
}

/// Scan `records` for `spec`'s candidate keys.
pub fn extract_slot(records: &[RawRecord], spec: &SlotSpec) -> SlotExtraction {
    let mut detected: Option<&str> = None;

    let values = records
        .iter()
        .map(|record| match first_present(record, spec.candidates) {
            Some((key, value)) => {
                detected.get_or_insert(key);
                coerce_number(value)
            }
            None => 0.0,
        })
        .collect();

    SlotExtraction {
        key: detected.map(str::to_string),
        values,
    }
}

/// Coerce a JSON value to a chart number. Anything unparsable is `0.0`.
pub fn coerce_number(value: &Value) -> f64 {
    let number = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_numeric(s),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    if number.is_nan() {
        0.0
    } else {
        number
    }
}

/// Display name for a detected source key.
///
/// Known keys use a fixed name, others are title-cased with underscores
/// turned into spaces. Without a key the slot's fallback label is used.
pub fn format_series_label(key: Option<&str>, fallback: &str) -> String {
    let Some(key) = key.filter(|k| !k.is_empty()) else {
        return fallback.to_string();
    };

    SERIES_LABELS
        .iter()
        .find(|(known, _)| *known == key)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| title_case(&key.replace('_', " ")))
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn first_present<'r>(
    record: &'r RawRecord,
    candidates: &'static [&'static str],
) -> Option<(&'static str, &'r Value)> {
    candidates.iter().find_map(|key| {
        record
            .get(*key)
            .filter(|value| !value.is_null())
            .map(|value| (*key, value))
    })
}

fn label_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn parse_numeric(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        return parse_radix(hex, 16);
    }

    match trimmed {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        // Rust also accepts "inf" / "nan" spellings; treat those as garbage.
        _ => trimmed
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .unwrap_or(0.0),
    }
}

/// Unsigned digits in `radix`, accumulated as `f64` so oversized values stay
/// large instead of overflowing. Any sign or stray character yields `0.0`.
fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return 0.0;
    }
    digits
        .chars()
        .try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        })
        .unwrap_or(0.0)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_lengths_consistent(bundle: &ChartBundle) {
        for series in &bundle.series {
            assert_eq!(
                series.values.len(),
                bundle.labels.len(),
                "series {} has wrong length",
                series.key
            );
        }
    }

    // ── payload shapes ────────────────────────────────────────────────────

    #[test]
    fn test_plain_array_payload() {
        let payload = json!([{ "day": "Mon", "qty": 1 }, { "day": "Tue", "qty": 2 }]);
        let bundle = normalize(&payload);
        assert_eq!(bundle.labels, vec!["Mon", "Tue"]);
        assert_lengths_consistent(&bundle);
    }

    #[test]
    fn test_data_envelope() {
        let payload = json!({ "data": [{ "day": "Mon", "qty": 4 }] });
        let bundle = normalize(&payload);
        assert_eq!(bundle.labels, vec!["Mon"]);
        assert_eq!(bundle.series(SeriesSlot::Quantity).unwrap().values, vec![4.0]);
    }

    #[test]
    fn test_result_envelope() {
        let payload = json!({ "result": [{ "week": 12, "amount": "9.5" }] });
        let bundle = normalize(&payload);
        assert_eq!(bundle.labels, vec!["12"]);
        assert_eq!(bundle.series(SeriesSlot::Amount).unwrap().values, vec![9.5]);
    }

    #[test]
    fn test_data_that_is_not_an_array_falls_through_to_result() {
        let payload = json!({ "data": { "rows": 1 }, "result": [{ "qty": 1 }] });
        let bundle = normalize(&payload);
        assert_eq!(bundle.labels, vec!["#1"]);
    }

    #[test]
    fn test_unrecognised_shapes_yield_empty_bundle() {
        for payload in [
            json!({}),
            json!({ "rows": [] }),
            json!("text"),
            json!(42),
            json!(null),
        ] {
            let bundle = normalize(&payload);
            assert!(bundle.labels.is_empty(), "payload {payload}");
            assert!(bundle.series.is_empty(), "payload {payload}");
        }
    }

    #[test]
    fn test_empty_array_yields_empty_bundle() {
        let bundle = normalize(&json!([]));
        assert_eq!(bundle, ChartBundle::default());
    }

    // ── labels ────────────────────────────────────────────────────────────

    #[test]
    fn test_label_count_matches_record_count() {
        let payload = json!([{ "a": 1 }, "not an object", null, { "Day": "Sun" }]);
        let bundle = normalize(&payload);
        assert_eq!(bundle.labels, vec!["#1", "#2", "#3", "Sun"]);
    }

    #[test]
    fn test_label_candidate_priority() {
        let payload = json!([{ "name": "Widget", "date": "2024-03-04", "period": "W10" }]);
        assert_eq!(normalize(&payload).labels, vec!["2024-03-04"]);
    }

    #[test]
    fn test_blank_and_null_labels_are_skipped() {
        let payload = json!([{ "day": "   ", "weekday": null, "label": "Fri" }]);
        assert_eq!(normalize(&payload).labels, vec!["Fri"]);
    }

    #[test]
    fn test_non_string_label_uses_json_text() {
        let payload = json!([{ "week": 7 }, { "week": 2.5 }, { "label": true }]);
        assert_eq!(normalize(&payload).labels, vec!["7", "2.5", "true"]);
    }

    #[test]
    fn test_label_keeps_original_text() {
        let payload = json!([{ "DAY": " Mon " }]);
        assert_eq!(normalize(&payload).labels, vec![" Mon "]);
    }

    // ── series detection ──────────────────────────────────────────────────

    #[test]
    fn test_mixed_case_quantity_example() {
        let payload = json!([{ "Qty": "5", "Day": "Mon" }, { "qty": 3, "day": "Tue" }]);
        let bundle = normalize(&payload);

        assert_eq!(bundle.labels, vec!["Mon", "Tue"]);
        let qty = bundle.series(SeriesSlot::Quantity).expect("quantity series");
        assert_eq!(qty.key, "qty");
        assert_eq!(qty.label, "Quantity");
        assert_eq!(qty.values, vec![5.0, 3.0]);
    }

    #[test]
    fn test_no_recognised_keys() {
        let bundle = normalize(&json!([{ "foo": 1 }]));
        assert_eq!(bundle.labels, vec!["#1"]);
        for slot in SeriesSlot::ALL {
            assert!(!bundle.has_match(slot), "{slot} should not match");
        }
        assert!(bundle.series.is_empty());
    }

    #[test]
    fn test_case_colliding_keys_last_in_document_wins() {
        let bundle = normalize(&json!([{ "qty": 1, "Qty": 2 }, { "Qty": 3, "qty": 4 }]));
        let qty = bundle.series(SeriesSlot::Quantity).cloned().unwrap();
        assert_eq!(qty.values, vec![2.0, 4.0]);
    }

    #[test]
    fn test_first_matching_record_fixes_key() {
        let payload = json!([
            { "day": "Mon" },
            { "day": "Tue", "quantity": 2 },
            { "day": "Wed", "sumqty": 7 }
        ]);
        let qty = normalize(&payload)
            .series(SeriesSlot::Quantity)
            .cloned()
            .unwrap();
        assert_eq!(qty.key, "quantity");
        assert_eq!(qty.label, "Quantity");
        assert_eq!(qty.values, vec![0.0, 2.0, 7.0]);
    }

    #[test]
    fn test_candidate_order_within_record() {
        let payload = json!([{ "qty": 1, "sumqty": 10 }]);
        let qty = normalize(&payload)
            .series(SeriesSlot::Quantity)
            .cloned()
            .unwrap();
        assert_eq!(qty.key, "sumqty");
        assert_eq!(qty.values, vec![10.0]);
    }

    #[test]
    fn test_null_value_is_not_a_match() {
        let payload = json!([{ "sumqty": null, "qty": 6 }, { "sumqty": null }]);
        let bundle = normalize(&payload);
        let qty = bundle.series(SeriesSlot::Quantity).unwrap();
        assert_eq!(qty.key, "qty");
        assert_eq!(qty.values, vec![6.0, 0.0]);
    }

    #[test]
    fn test_all_slots_detected_in_order() {
        let payload = json!([
            { "Day": "Mon", "SumQty": 3, "SumAmt": 120.5, "OrderCnt": 2 },
            { "Day": "Tue", "SumQty": 1, "SumAmt": 40, "OrderCnt": 1 }
        ]);
        let bundle = normalize(&payload);
        let slots: Vec<SeriesSlot> = bundle.series.iter().map(|s| s.slot).collect();
        assert_eq!(
            slots,
            vec![SeriesSlot::Quantity, SeriesSlot::Amount, SeriesSlot::Count]
        );
        let labels: Vec<&str> = bundle.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Sum Qty", "Sum Amount", "Order Count"]);
        assert_lengths_consistent(&bundle);
    }

    #[test]
    fn test_unmapped_key_is_title_cased() {
        let payload = json!([{ "total_quantity": 4 }]);
        let qty = normalize(&payload)
            .series(SeriesSlot::Quantity)
            .cloned()
            .unwrap();
        assert_eq!(qty.label, "Total Quantity");
    }

    // ── fallback chaining ─────────────────────────────────────────────────

    #[test]
    fn test_sales_falls_back_to_quantity() {
        let payload = json!([{ "day": "Mon", "qty": 2 }, { "day": "Tue", "qty": "8" }]);
        let bundle = normalize(&payload);
        assert!(!bundle.has_match(SeriesSlot::Amount));

        let qty = bundle.series(SeriesSlot::Quantity).unwrap();
        assert_eq!(&bundle.sales(), qty);
        assert_eq!(&bundle.tasks(), qty);
    }

    #[test]
    fn test_primary_uses_amount_without_quantity() {
        let payload = json!([{ "total": "12.25" }]);
        let bundle = normalize(&payload);
        let primary = bundle.primary().unwrap();
        assert_eq!(primary.key, "total");
        assert_eq!(primary.label, "Total");
        assert_eq!(primary.values, vec![12.25]);
    }

    // ── numeric coercion ──────────────────────────────────────────────────

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(&json!(3)), 3.0);
        assert_eq!(coerce_number(&json!(-1.5)), -1.5);
        assert_eq!(coerce_number(&json!("42")), 42.0);
        assert_eq!(coerce_number(&json!(" 2.5 ")), 2.5);
        assert_eq!(coerce_number(&json!("1e3")), 1000.0);
        assert_eq!(coerce_number(&json!("0x10")), 16.0);
        assert_eq!(coerce_number(&json!("")), 0.0);
        assert_eq!(coerce_number(&json!("n/a")), 0.0);
        assert_eq!(coerce_number(&json!("NaN")), 0.0);
        assert_eq!(coerce_number(&json!("inf")), 0.0);
        assert_eq!(coerce_number(&json!("Infinity")), f64::INFINITY);
        assert_eq!(coerce_number(&json!(true)), 1.0);
        assert_eq!(coerce_number(&json!(false)), 0.0);
        assert_eq!(coerce_number(&json!([1])), 0.0);
        assert_eq!(coerce_number(&json!({ "v": 1 })), 0.0);
    }

    #[test]
    fn test_hex_strings() {
        assert_eq!(coerce_number(&json!("0XfF")), 255.0);
        assert_eq!(coerce_number(&json!(" 0x1a ")), 26.0);
        assert_eq!(coerce_number(&json!("0x+10")), 0.0);
        assert_eq!(coerce_number(&json!("0x-10")), 0.0);
        assert_eq!(coerce_number(&json!("0x")), 0.0);
        assert_eq!(coerce_number(&json!("0x1g")), 0.0);
        assert_eq!(
            coerce_number(&json!("0x10000000000000000")),
            18_446_744_073_709_551_616.0
        );
    }

    #[test]
    fn test_unparsable_values_zero_filled() {
        let payload = json!([{ "qty": "lots" }, { "qty": 4 }]);
        let qty = normalize(&payload)
            .series(SeriesSlot::Quantity)
            .cloned()
            .unwrap();
        assert_eq!(qty.values, vec![0.0, 4.0]);
    }

    // ── label formatting ──────────────────────────────────────────────────

    #[test]
    fn test_format_series_label() {
        assert_eq!(format_series_label(Some("sumqty"), "x"), "Sum Qty");
        assert_eq!(format_series_label(Some("ordercount"), "x"), "Order Count");
        assert_eq!(format_series_label(Some("net_sales_amt"), "x"), "Net Sales Amt");
        assert_eq!(format_series_label(None, "Sum Amount"), "Sum Amount");
        assert_eq!(format_series_label(Some(""), "Sum Qty"), "Sum Qty");
    }

    // ── custom slot tables ────────────────────────────────────────────────

    #[test]
    fn test_normalize_with_custom_table() {
        const WEIGHT: SlotSpec = SlotSpec {
            slot: SeriesSlot::Quantity,
            candidates: &["kg", "weight"],
        };
        let payload = json!([{ "Weight": 3 }, { "KG": 5, "qty": 100 }]);
        let bundle = normalize_with(&payload, &[WEIGHT]);
        assert_eq!(bundle.series.len(), 1);
        assert_eq!(bundle.series[0].key, "weight");
        assert_eq!(bundle.series[0].values, vec![3.0, 5.0]);
    }

    #[test]
    fn test_extract_slot_reports_match() {
        let records = vec![lowercase_keys(&json!({ "Orders": 9 }))];
        let extraction = extract_slot(&records, &COUNT);
        assert!(extraction.has_match());
        assert_eq!(extraction.key.as_deref(), Some("orders"));

        let none = extract_slot(&records, &AMOUNT);
        assert!(!none.has_match());
        assert_eq!(none.values, vec![0.0]);
        assert!(none.into_series(SeriesSlot::Amount).is_none());
    }

    // ── purity ────────────────────────────────────────────────────────────

    #[test]
    fn test_normalize_is_idempotent() {
        let payload = json!({ "data": [
            { "Date": "2024-01-01", "Qty": "3", "Amount": 10 },
            { "Date": "2024-01-02", "Qty": null, "Count": "x" }
        ]});
        assert_eq!(normalize(&payload), normalize(&payload));
    }
}
