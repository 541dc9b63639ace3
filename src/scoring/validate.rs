//! Input completeness validation and row projection

use std::collections::HashMap;

/// Project the input map onto the schema columns, in schema order.
///
/// Any schema key absent from the input fails the build with the full list of
/// missing names, in schema order. Keys outside the schema are ignored.
pub fn build_row(schema: &[String], data: &HashMap<String, f64>) -> Result<Vec<f32>, Vec<String>> {
    let mut row = Vec::with_capacity(schema.len());
    let mut missing = Vec::new();

    for name in schema {
        match data.get(name) {
            Some(value) => row.push(*value as f32),
            None => missing.push(name.clone()),
        }
    }

    if missing.is_empty() {
        Ok(row)
    } else {
        Err(missing)
    }
}
