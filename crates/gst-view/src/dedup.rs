//! Collapse filing-period rows to one row per GSTIN

use gst_types::CompanyRecord;
use std::collections::HashMap;

/// Keep one record per GSTIN.
///
/// Keys keep the position of their first occurrence while the value kept is
/// the last record seen for that key. Records without a GSTIN share a single
/// key of their own.
pub fn dedupe_by_gstin<'a, I>(records: I) -> Vec<&'a CompanyRecord>
where
    I: IntoIterator<Item = &'a CompanyRecord>,
{
    let mut slots: HashMap<Option<&'a str>, usize> = HashMap::new();
    let mut unique: Vec<&'a CompanyRecord> = Vec::new();

    for record in records {
        let key = record.gstin.as_deref();
        match slots.get(&key) {
            Some(&index) => unique[index] = record,
            None => {
                slots.insert(key, unique.len());
                unique.push(record);
            }
        }
    }

    unique
}
