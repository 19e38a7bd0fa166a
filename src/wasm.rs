//! WebAssembly bindings for the search engine.
//!
//! `SifterIndex` owns one collection and one engine, so repeated searches from
//! JavaScript hit the same per-collection cache.

use crate::engine::SearchEngine;
use crate::flatten::flatten;
use crate::query::SearchRequest;
use crate::types::{Collection, Record};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::prelude::*;

/// Serialize as plain JS objects rather than `Map`s.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(|e| e.to_string().into())
}

/// A searchable collection of JSON records.
#[wasm_bindgen]
pub struct SifterIndex {
    engine: SearchEngine,
    collection: Collection,
}

#[wasm_bindgen]
impl SifterIndex {
    /// Build an index from an array of records.
    #[wasm_bindgen(constructor)]
    pub fn new(records: JsValue) -> Result<SifterIndex, JsValue> {
        let value: Record = from_value(records).map_err(|e| e.to_string())?;
        let collection = Collection::from_json(value).map_err(|e| e.to_string())?;
        Ok(SifterIndex {
            engine: SearchEngine::new(),
            collection,
        })
    }

    /// Run a request (`{query, fields?, sort?, lax?}`) and return the
    /// matching records.
    #[wasm_bindgen]
    pub fn search(&self, request: JsValue) -> Result<JsValue, JsValue> {
        let request: SearchRequest = from_value(request).map_err(|e| e.to_string())?;
        let results = self.engine.search(&self.collection, &request);
        to_js(&results.iter().collect::<Vec<_>>())
    }

    /// Flattened `{path, value}` leaves of the record at `index`.
    #[wasm_bindgen]
    pub fn flatten(&self, index: usize) -> Result<JsValue, JsValue> {
        let record = self
            .collection
            .get(index)
            .ok_or_else(|| JsValue::from_str(&format!("no record at {}", index)))?;
        to_js(&flatten(record))
    }

    #[wasm_bindgen]
    pub fn len(&self) -> usize {
        self.collection.len()
    }

    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }
}
