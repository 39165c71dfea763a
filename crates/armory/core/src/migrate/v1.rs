//! Version 0 → 1 transform.
//!
//! Version 0 persisted an ordered list of items with inline nesting and
//! legacy field names. Version 1 is a map from uid to entry. Uids are
//! reassigned positionally from list order; the legacy `uid` field is
//! discarded.

use serde_json::{Map, Value, json};

/// Legacy fixed sticker-array length; a zero id means the slot is empty.
const LEGACY_STICKER_SLOTS: usize = 4;

pub(super) fn migrate_v0_to_v1(value: Value) -> Result<Value, String> {
    let Value::Array(list) = value else {
        return Err("version 0 snapshot must be a list".into());
    };
    let mut items = Map::new();
    for (index, item) in list.into_iter().enumerate() {
        items.insert(index.to_string(), transform_item(item)?);
    }
    Ok(json!({ "version": 1, "items": items }))
}

fn transform_item(item: Value) -> Result<Value, String> {
    let Value::Object(src) = item else {
        return Err("item must be an object".into());
    };
    let mut out = Map::new();

    let id = src
        .get("id")
        .and_then(Value::as_u64)
        .ok_or("item missing numeric id")?;
    out.insert("id".into(), id.into());

    // Unchanged field names.
    for field in ["equipped", "equippedCT", "equippedT", "wear", "seed"] {
        if let Some(v) = src.get(field) {
            out.insert(field.into(), v.clone());
        }
    }
    // Renamed field names.
    for (old, new) in [
        ("stattrak", "statTrak"),
        ("nametag", "nameTag"),
        ("caseid", "containerId"),
        ("updatedat", "updatedAt"),
    ] {
        if let Some(v) = src.get(old) {
            out.insert(new.into(), v.clone());
        }
    }

    if let Some(stickers) = transform_stickers(&src)? {
        out.insert("stickers".into(), stickers);
    }

    if let Some(storage) = src.get("storage") {
        let Value::Array(nested) = storage else {
            return Err("storage must be a list".into());
        };
        let mut inner = Map::new();
        for (index, item) in nested.iter().enumerate() {
            inner.insert(index.to_string(), transform_item(item.clone())?);
        }
        out.insert("storage".into(), Value::Object(inner));
    }

    Ok(Value::Object(out))
}

/// Flattens the parallel `stickers` / `stickerswear` arrays into the
/// version-1 slot map, dropping empty slots and zero wear.
fn transform_stickers(src: &Map<String, Value>) -> Result<Option<Value>, String> {
    let Some(raw) = src.get("stickers") else {
        return Ok(None);
    };
    let Value::Array(ids) = raw else {
        return Err("stickers must be a list".into());
    };
    let wears = match src.get("stickerswear") {
        Some(Value::Array(wears)) => wears.as_slice(),
        Some(_) => return Err("stickerswear must be a list".into()),
        None => &[],
    };

    let mut slots = Map::new();
    for slot in 0..LEGACY_STICKER_SLOTS.min(ids.len()) {
        let id = ids[slot].as_u64().ok_or("sticker id must be a number")?;
        if id == 0 {
            continue;
        }
        let mut sticker = Map::new();
        sticker.insert("id".into(), id.into());
        if let Some(wear) = wears.get(slot).and_then(Value::as_f64) {
            if wear > 0.0 {
                sticker.insert("wear".into(), wears[slot].clone());
            }
        }
        slots.insert(slot.to_string(), Value::Object(sticker));
    }
    if slots.is_empty() {
        Ok(None)
    } else {
        Ok(Some(Value::Object(slots)))
    }
}
