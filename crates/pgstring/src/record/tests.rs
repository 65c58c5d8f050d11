use super::*;
use crate::config::ConstraintMatch;
use crate::value::ToValue;

struct Account {
    id: i32,
    name: String,
    email: String,
    nickname: Option<String>,
    secret: String,
    tags: Vec<String>,
    scratch: i64,
}

static ACCOUNT_FIELDS: [FieldDef; 7] = [
    FieldDef::new("id", ValueType::Int32).db("id,primarykey"),
    FieldDef::new("name", ValueType::Text).db("name,notnull,unique"),
    FieldDef::new("email", ValueType::Text).json("email_address,omitempty"),
    FieldDef::new("nickname", ValueType::Text).db(",notnull").json("nick"),
    FieldDef::new("secret", ValueType::Text).db("-"),
    FieldDef::new("tags", ValueType::Array(&ValueType::Text)),
    FieldDef::new("scratch", ValueType::Int64).private(),
];
static ACCOUNT: RecordDef = RecordDef::new("Account", &ACCOUNT_FIELDS);

impl Record for Account {
    fn record_def() -> &'static RecordDef {
        &ACCOUNT
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.id.to_value(),
            self.name.to_value(),
            self.email.to_value(),
            self.nickname.to_value(),
            self.secret.to_value(),
            self.tags.to_value(),
            self.scratch.to_value(),
        ]
    }
}

fn account() -> Account {
    Account {
        id: 1,
        name: "alice".to_string(),
        email: "a@example.com".to_string(),
        nickname: None,
        secret: "hunter2".to_string(),
        tags: vec!["admin".to_string()],
        scratch: 99,
    }
}

#[test]
fn test_columns_in_declaration_order() {
    let names = column_names(&Account::columns());
    assert_eq!(names, ["id", "name", "email_address", "nick", "tags"]);
}

#[test]
fn test_excluded_and_private_fields_left_out() {
    let cols = Account::columns();
    assert!(cols.iter().all(|c| c.name != "secret"));
    assert!(cols.iter().all(|c| c.name != "scratch"));

    let secret = describe_field(4, &ACCOUNT_FIELDS[4], ConstraintMatch::Substring).unwrap();
    assert!(secret.excluded);
    assert!(describe_field(6, &ACCOUNT_FIELDS[6], ConstraintMatch::Substring).is_none());
}

#[test]
fn test_blank_primary_name_falls_through() {
    let nick = describe_field(3, &ACCOUNT_FIELDS[3], ConstraintMatch::Substring).unwrap();
    assert_eq!(nick.column, "nick");
    // Constraints still come from the primary annotation.
    assert!(nick.constraints.not_null);
}

#[test]
fn test_secondary_annotation_never_sets_constraints() {
    static FIELD: FieldDef = FieldDef::new("code", ValueType::Text).json("code,unique");
    let d = describe_field(0, &FIELD, ConstraintMatch::Substring).unwrap();
    assert_eq!(d.column, "code");
    assert!(d.constraints.is_empty());
}

#[test]
fn test_secondary_exclusion() {
    static FIELD: FieldDef = FieldDef::new("cache", ValueType::Text).json("-");
    let d = describe_field(0, &FIELD, ConstraintMatch::Substring).unwrap();
    assert!(d.excluded);
}

#[test]
fn test_primary_name_beats_secondary_exclusion() {
    static FIELD: FieldDef = FieldDef::new("cache", ValueType::Text)
        .db("cache_col")
        .json("-");
    let d = describe_field(0, &FIELD, ConstraintMatch::Substring).unwrap();
    assert!(!d.excluded);
    assert_eq!(d.column, "cache_col");
}

#[test]
fn test_constraint_matching_modes() {
    static FIELD: FieldDef = FieldDef::new("code", ValueType::Text).db("unique_code,notnull");

    let loose = describe_field(0, &FIELD, ConstraintMatch::Substring).unwrap();
    assert!(loose.constraints.unique);
    assert!(loose.constraints.not_null);

    let strict = describe_field(0, &FIELD, ConstraintMatch::Segment).unwrap();
    assert!(!strict.constraints.unique);
    assert!(strict.constraints.not_null);
}

#[test]
fn test_binding_keys_match_columns() {
    let record = account();
    let bindings = record.bindings();

    let mut columns = column_names(&Account::columns());
    columns.sort_unstable();
    let keys: Vec<&str> = bindings.keys().collect();
    assert_eq!(keys, columns);

    assert_eq!(bindings.get("id"), Some(&Value::Int32(1)));
    assert_eq!(bindings.get("nick"), Some(&Value::Null));
    assert_eq!(
        bindings.get("tags"),
        Some(&Value::Array(vec![Value::Text("admin".to_string())]))
    );
    assert!(!bindings.contains_key("secret"));
}

#[test]
fn test_bindings_are_copies() {
    let mut record = account();
    let bindings = record.bindings();
    record.name = "mallory".to_string();
    assert_eq!(bindings.get("name"), Some(&Value::from("alice")));
}

#[test]
fn test_record_value_snapshot() {
    let mut record = account();
    let snapshot = record.to_record_value();
    record.id = 2;

    assert_eq!(snapshot.def().name, "Account");
    assert_eq!(snapshot.value_at(0), Some(&Value::Int32(1)));
    assert_eq!(snapshot.bindings(), bind(&account()));
}

#[test]
fn test_bind_value_rejects_non_records() {
    let err = bind_value(&Value::Int64(5)).unwrap_err();
    assert!(err.is_unsupported_input());

    let ok = bind_value(&Value::Record(account().to_record_value())).unwrap();
    assert_eq!(ok.len(), 5);
}

#[test]
fn test_resolve_columns_rejects_non_records() {
    let err = resolve_columns(&ValueType::Int32).unwrap_err();
    assert!(err.is_unsupported_input());
    assert!(err.to_string().contains("resolve_columns"));

    let cols = resolve_columns(&Account::value_type()).unwrap();
    assert_eq!(cols.len(), 5);
}

#[test]
fn test_serialize_as_map() {
    let json = serde_json::to_value(account().to_record_value()).unwrap();
    assert_eq!(json["email_address"], "a@example.com");
    assert_eq!(json["id"], 1);
    assert!(json["nick"].is_null());
    assert!(json.get("secret").is_none());
}

#[test]
fn test_empty_record() {
    static EMPTY: RecordDef = RecordDef::new("Empty", &[]);
    assert!(resolve_record(&EMPTY, ConstraintMatch::Substring).is_empty());
    let value = RecordValue::new(&EMPTY, Vec::new());
    assert!(value.bindings().is_empty());
}
