//! Canonical bridge id assignment.

use std::collections::HashMap;

use bridge_model::{BridgeKey, VariableRecord, bridge_id};

use crate::key::KeyedRecord;

/// Representative `(year, variable_name)` for every key: earliest year, then
/// the lexicographically smallest variable name.
pub fn representatives(records: &[KeyedRecord]) -> HashMap<&BridgeKey, (i32, &str)> {
    let mut reps: HashMap<&BridgeKey, (i32, &str)> = HashMap::new();
    for record in records {
        let candidate = (record.source.year, record.source.variable_name.as_str());
        reps.entry(&record.key)
            .and_modify(|current| {
                if candidate < *current {
                    *current = candidate;
                }
            })
            .or_insert(candidate);
    }
    reps
}

/// Assign `cross_year_narrow` to every record from its group representative.
///
/// The id depends only on group membership, never on row order.
pub fn assign_bridges(records: Vec<KeyedRecord>) -> Vec<VariableRecord> {
    let ids: HashMap<BridgeKey, String> = representatives(&records)
        .into_iter()
        .map(|(key, (year, name))| (key.clone(), bridge_id(name, year)))
        .collect();

    records
        .into_iter()
        .map(|record| {
            let id = ids.get(&record.key).cloned().unwrap_or_else(|| {
                bridge_id(&record.source.variable_name, record.source.year)
            });
            VariableRecord::from_parts(record.source, record.clean_label, record.features, id)
        })
        .collect()
}
