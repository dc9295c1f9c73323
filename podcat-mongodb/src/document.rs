//! Document conversion and API rendering.

use bson::{Bson, Document, oid::ObjectId};
use podcat_model::ModelInfo;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::error::MongoResult;

/// Convert a record to a BSON document.
pub fn to_document<T: Serialize>(value: &T) -> MongoResult<Document> {
    Ok(bson::to_document(value)?)
}

/// Convert a BSON document to a record.
pub fn from_document<T: DeserializeOwned>(doc: Document) -> MongoResult<T> {
    Ok(bson::from_document(doc)?)
}

/// Generate a fresh identifier.
pub fn new_id() -> ObjectId {
    ObjectId::new()
}

/// Render a stored document for API output.
///
/// Keys are renamed from storage to external names in declaration order.
/// Fields the model doesn't map are dropped, as are empty values of fields
/// marked `omitempty` in their external annotation. Embedded records with a
/// nested descriptor are rendered the same way, as are lists of them.
pub fn api_document(info: &ModelInfo, doc: &Document) -> Map<String, Value> {
    let mut out = Map::new();
    for (pos, field) in info.fields().iter().enumerate() {
        let Some(value) = doc.get(&field.bson_name) else {
            continue;
        };
        if field.json_omit_empty && is_empty(value) {
            continue;
        }
        let rendered = match info.nested(pos) {
            Some(nested) => nested_to_json(nested, value),
            None => bson_to_json(value),
        };
        out.insert(field.json_name.clone(), rendered);
    }
    out
}

fn nested_to_json(info: &ModelInfo, value: &Bson) -> Value {
    match value {
        Bson::Document(doc) => Value::Object(api_document(info, doc)),
        Bson::Array(items) => {
            Value::Array(items.iter().map(|v| nested_to_json(info, v)).collect())
        }
        other => bson_to_json(other),
    }
}

/// Serialize a record and render it for API output.
pub fn to_api_json<T: Serialize>(info: &ModelInfo, record: &T) -> MongoResult<Value> {
    let doc = to_document(record)?;
    Ok(Value::Object(api_document(info, &doc)))
}

/// Convert a BSON value to JSON with ObjectIds as hex and datetimes as RFC 3339.
pub fn bson_to_json(value: &Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .map(Value::String)
            .unwrap_or(Value::Null),
        Bson::Array(items) => Value::Array(items.iter().map(bson_to_json).collect()),
        Bson::Document(doc) => Value::Object(
            doc.iter()
                .map(|(k, v)| (k.clone(), bson_to_json(v)))
                .collect(),
        ),
        other => other.clone().into_relaxed_extjson(),
    }
}

/// Zero values in the `omitempty` sense.
pub fn is_empty(value: &Bson) -> bool {
    match value {
        Bson::Null | Bson::Undefined => true,
        Bson::String(s) => s.is_empty(),
        Bson::Boolean(b) => !b,
        Bson::Int32(n) => *n == 0,
        Bson::Int64(n) => *n == 0,
        Bson::Double(n) => *n == 0.0,
        Bson::Array(items) => items.is_empty(),
        Bson::Document(doc) => doc.is_empty(),
        _ => false,
    }
}
