use serde_json::Value;

const REQUIRED_FIELDS: [&str; 3] = ["name", "email_address", "position"];

/// Shape check for inbound employee payloads. Passes only for a JSON
/// object where `name`, `email_address` and `position` are all present
/// and strings. Pure predicate, no side effects.
pub fn is_valid_employee_input(data: &Value) -> bool {
    match data.as_object() {
        Some(map) => REQUIRED_FIELDS
            .iter()
            .all(|field| map.get(*field).is_some_and(Value::is_string)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_payload() -> Value {
        json!({
            "name": "John Doe",
            "email_address": "john@example.com",
            "position": "Engineer",
        })
    }

    #[test]
    fn accepts_full_string_payload() {
        assert!(is_valid_employee_input(&full_payload()));
    }

    #[test]
    fn accepts_extra_fields() {
        let mut payload = full_payload();
        payload["id"] = json!(7);
        payload["department"] = json!("Platform");
        assert!(is_valid_employee_input(&payload));
    }

    #[test]
    fn rejects_missing_fields() {
        for field in REQUIRED_FIELDS {
            let mut payload = full_payload();
            payload.as_object_mut().unwrap().remove(field);
            assert!(!is_valid_employee_input(&payload), "missing {field}");
        }
    }

    #[test]
    fn rejects_non_string_fields() {
        for field in REQUIRED_FIELDS {
            let mut payload = full_payload();
            payload[field] = json!(123);
            assert!(!is_valid_employee_input(&payload), "numeric {field}");

            let mut payload = full_payload();
            payload[field] = Value::Null;
            assert!(!is_valid_employee_input(&payload), "null {field}");
        }
    }

    #[test]
    fn rejects_non_objects() {
        assert!(!is_valid_employee_input(&Value::Null));
        assert!(!is_valid_employee_input(&json!([])));
        assert!(!is_valid_employee_input(&json!("employee")));
        assert!(!is_valid_employee_input(&json!(42)));
    }

    #[test]
    fn rejects_empty_object() {
        assert!(!is_valid_employee_input(&json!({})));
    }
}
