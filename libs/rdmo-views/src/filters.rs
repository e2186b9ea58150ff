//! List filters over resolved values.

use rdmo_api::ValueView;

pub fn is_true(values: &[ValueView]) -> Vec<&ValueView> {
    values.iter().filter(|v| v.is_true).collect()
}

pub fn is_false(values: &[ValueView]) -> Vec<&ValueView> {
    values.iter().filter(|v| v.is_false).collect()
}

pub fn is_empty(values: &[ValueView]) -> Vec<&ValueView> {
    values.iter().filter(|v| v.is_empty).collect()
}

pub fn is_not_empty(values: &[ValueView]) -> Vec<&ValueView> {
    values.iter().filter(|v| !v.is_empty).collect()
}
