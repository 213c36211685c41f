use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationContext {
    pub limit_value: u64,
}

/// One field-level constraint violation, addressed by its path into the
/// document. Validation reports one entry per violated field rather than a
/// single aggregate message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub ctx: Option<ViolationContext>,
}

impl FieldViolation {
    pub fn max_length(loc: Vec<String>, limit: u64) -> Self {
        Self {
            loc,
            msg: format!("ensure this value has at most {limit} characters"),
            kind: "value_error.any_str.max_length".to_string(),
            ctx: Some(ViolationContext { limit_value: limit }),
        }
    }

    pub fn number_not_le(loc: Vec<String>, limit: u64) -> Self {
        Self {
            loc,
            msg: format!("ensure this value is less than or equal to {limit}"),
            kind: "value_error.number.not_le".to_string(),
            ctx: Some(ViolationContext { limit_value: limit }),
        }
    }

    pub fn missing(loc: Vec<String>) -> Self {
        Self {
            loc,
            msg: "field required".to_string(),
            kind: "value_error.missing".to_string(),
            ctx: None,
        }
    }
}

/// Check an optional string field against its maximum width.
pub fn check_str_max(
    out: &mut Vec<FieldViolation>,
    loc: Vec<String>,
    value: Option<&str>,
    limit: u64,
) {
    if let Some(value) = value {
        if value.chars().count() as u64 > limit {
            out.push(FieldViolation::max_length(loc, limit));
        }
    }
}

/// Check an optional integer field against its upper bound.
pub fn check_int_le(
    out: &mut Vec<FieldViolation>,
    loc: Vec<String>,
    value: Option<i64>,
    limit: u64,
) {
    if let Some(value) = value {
        if value < 0 || value as u64 > limit {
            out.push(FieldViolation::number_not_le(loc, limit));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_length_violation_carries_limit() {
        let v = FieldViolation::max_length(vec!["rcountry".into()], 3);
        assert_eq!(v.kind, "value_error.any_str.max_length");
        assert_eq!(v.ctx.as_ref().unwrap().limit_value, 3);
        assert_eq!(v.msg, "ensure this value has at most 3 characters");
    }

    #[test]
    fn check_str_max_ignores_values_within_limit() {
        let mut out = Vec::new();
        check_str_max(&mut out, vec!["name".into()], Some("short"), 40);
        check_str_max(&mut out, vec!["none".into()], None, 40);
        assert!(out.is_empty());
    }

    #[test]
    fn check_int_le_flags_out_of_bounds() {
        let mut out = Vec::new();
        check_int_le(&mut out, vec!["unit_number".into()], Some(1000), 999);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, "value_error.number.not_le");
    }
}
