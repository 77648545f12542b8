use super::*;

fn raw(json: serde_json::Value) -> RawRoles {
    serde_json::from_value(json).unwrap()
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_owned()).collect()
}

#[test]
fn roles_array_of_strings_is_kept_in_order() {
    let roles = canonical_roles(&raw(serde_json::json!({ "roles": ["MEMBER", "ADMIN"] })));
    assert_eq!(roles, names(&["MEMBER", "ADMIN"]));
}

#[test]
fn roles_array_of_named_objects_is_flattened() {
    let roles = canonical_roles(&raw(serde_json::json!({
        "roles": [{ "id": 1, "name": "ROLE_MEMBER" }, { "id": 2, "name": "ROLE_ADMIN" }]
    })));
    assert_eq!(roles, names(&["ROLE_MEMBER", "ROLE_ADMIN"]));
}

#[test]
fn single_role_string_becomes_one_entry() {
    let roles = canonical_roles(&raw(serde_json::json!({ "role": "ADMIN" })));
    assert_eq!(roles, names(&["ADMIN"]));
}

#[test]
fn authorities_list_is_used_when_no_other_shape_present() {
    let roles = canonical_roles(&raw(serde_json::json!({
        "authorities": [{ "authority": "ROLE_ADMIN" }, { "authority": "ROLE_MEMBER" }]
    })));
    assert_eq!(roles, names(&["ROLE_ADMIN", "ROLE_MEMBER"]));
}

#[test]
fn empty_roles_array_falls_through_to_role_field() {
    let roles = canonical_roles(&raw(serde_json::json!({ "roles": [], "role": "ROLE_ADMIN" })));
    assert_eq!(roles, names(&["ROLE_ADMIN"]));
}

#[test]
fn no_claims_defaults_to_member() {
    assert_eq!(canonical_roles(&RawRoles::default()), names(&[DEFAULT_ROLE]));
    assert_eq!(canonical_roles(&raw(serde_json::json!({ "role": "  " }))), names(&[DEFAULT_ROLE]));
}

#[test]
fn is_admin_accepts_both_spellings() {
    assert!(is_admin(&names(&["MEMBER", "ADMIN"])));
    assert!(is_admin(&names(&["ROLE_ADMIN"])));
    assert!(!is_admin(&names(&["MEMBER", "ROLE_MEMBER"])));
    assert!(!is_admin(&[]));
}

#[test]
fn has_role_matches_prefixed_form() {
    let roles = names(&["ROLE_MEMBER"]);
    assert!(has_role(&roles, "MEMBER"));
    assert!(has_role(&roles, "ROLE_MEMBER"));
    assert!(!has_role(&roles, "ADMIN"));
}

#[test]
fn has_any_role_checks_each_candidate() {
    let roles = names(&["TELLER"]);
    assert!(has_any_role(&roles, &["ADMIN", "TELLER"]));
    assert!(!has_any_role(&roles, &["ADMIN"]));
    assert!(!has_any_role(&roles, &[]));
}
