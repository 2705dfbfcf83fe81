//! Extension for more concise parsing of jsons

use serde_json::{Map, Value};

pub trait MapExt {
	fn get_float(&self, key: &str) -> Option<f64>;
}

impl MapExt for Map<String, Value> {
	fn get_float(&self, key: &str) -> Option<f64> {
		self.get(key).and_then(Value::as_f64)
	}
}
