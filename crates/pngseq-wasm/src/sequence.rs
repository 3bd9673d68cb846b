//! JavaScript arrays as host sequences.
//!
//! Host positions are 1-based; position `p` lives at array index `p - 1`.

use js_sys::Array;
use pngseq_core::{HostSequence, HostSequenceBuilder};
use wasm_bindgen::JsValue;

/// Read-only view of a JS array of numbers.
pub(crate) struct JsSequence<'a> {
    array: &'a Array,
}

impl<'a> JsSequence<'a> {
    pub(crate) fn new(array: &'a Array) -> Self {
        Self { array }
    }
}

impl HostSequence for JsSequence<'_> {
    fn len(&self) -> usize {
        self.array.length() as usize
    }

    fn get(&self, position: usize) -> Option<i64> {
        let index = u32::try_from(position.checked_sub(1)?).ok()?;
        // Fractions truncate toward zero; non-numbers are missing
        self.array.get(index).as_f64().map(|v| v as i64)
    }
}

/// JS array filled position by position.
pub(crate) struct ArrayBuilder(Array);

impl ArrayBuilder {
    pub(crate) fn into_array(self) -> Array {
        self.0
    }
}

impl HostSequenceBuilder for ArrayBuilder {
    fn with_len(len: usize) -> Self {
        ArrayBuilder(Array::new_with_length(len as u32))
    }

    fn set(&mut self, position: usize, value: i64) {
        if let Some(index) = position
            .checked_sub(1)
            .and_then(|i| u32::try_from(i).ok())
        {
            self.0.set(index, JsValue::from_f64(value as f64));
        }
    }
}
