#![allow(dead_code)]

use pgstring::{
    Args, ConstraintMatch, Record, Statement, Value, ValueType, bind, column_names, create_table,
    insert_into, map_type, registry, resolve_columns, update,
};

#[derive(Debug, Clone, Record, serde::Serialize)]
struct Product {
    #[db = "id,primarykey"]
    id: i32,
    #[db = "sku,notnull,unique"]
    sku: String,
    #[json = "display_name,omitempty"]
    name: String,
    price: f64,
    tags: Vec<String>,
    discontinued: Option<bool>,
    created_at: chrono::NaiveDateTime,
    #[db = "-"]
    #[serde(skip)]
    warehouse: std::sync::Arc<std::sync::Mutex<u32>>,
    #[serde(skip)]
    cache: Option<String>,
}

fn product() -> Product {
    Product {
        id: 10,
        sku: "SKU-10".to_string(),
        name: "Lamp".to_string(),
        price: 19.5,
        tags: vec!["home".to_string(), "light".to_string()],
        discontinued: None,
        created_at: chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
        warehouse: Default::default(),
        cache: Some("warm".to_string()),
    }
}

#[test]
fn descriptor_table_follows_declaration() {
    let def = Product::record_def();
    assert_eq!(def.name, "Product");
    assert_eq!(def.fields.len(), 9);
    assert_eq!(def.fields[0].db, Some("id,primarykey"));
    assert_eq!(def.fields[2].json, Some("display_name,omitempty"));
    assert_eq!(def.fields[4].value_type, ValueType::Array(&ValueType::Text));
    assert_eq!(def.fields[5].value_type, ValueType::Bool);
    assert_eq!(def.fields[6].value_type, ValueType::Timestamp);
    assert_eq!(def.fields[8].json, Some("-"));
}

#[test]
fn columns_skip_excluded_fields() {
    let cols = Product::columns();
    assert_eq!(
        column_names(&cols),
        [
            "id",
            "sku",
            "display_name",
            "price",
            "tags",
            "discontinued",
            "created_at"
        ]
    );
    assert!(cols[0].constraints.primary_key);
    assert!(cols[1].constraints.not_null && cols[1].constraints.unique);
    assert!(cols[2].constraints.is_empty());
}

#[test]
fn bindings_match_columns() {
    let bindings = bind(&product());
    let mut cols = column_names(&Product::columns());
    cols.sort_unstable();
    assert_eq!(bindings.keys().collect::<Vec<_>>(), cols);

    assert_eq!(bindings.get("discontinued"), Some(&Value::Null));
    assert_eq!(bindings.get("price"), Some(&Value::Float64(19.5)));
    assert!(!bindings.contains_key("cache"));
}

#[test]
fn create_table_for_derived_record() {
    let sql = create_table::<Product>("products", None).to_string();
    assert_eq!(
        sql,
        "CREATE TABLE products (\n    id INTEGER,\n    sku TEXT NOT NULL UNIQUE,\n    \
         display_name TEXT,\n    price DOUBLE PRECISION,\n    tags TEXT[],\n    \
         discontinued BOOLEAN,\n    created_at TIMESTAMP,\n    PRIMARY KEY (id)\n)"
    );
}

#[test]
fn insert_and_update_from_derived_record() {
    let p = product();
    let (sql, args) = insert_into("products")
        .columns(&p)
        .values(&p)
        .returning_columns(["id"])
        .build()
        .unwrap();
    assert_eq!(
        sql,
        "INSERT INTO products (id, sku, display_name, price, tags, discontinued, created_at) \
         VALUES (@id, @sku, @display_name, @price, @tags, @discontinued, @created_at) RETURNING id"
    );
    assert_eq!(args.len(), 7);

    let query = update("products")
        .set(p.clone())
        .where_("id = @id")
        .to_positional()
        .unwrap();
    assert_eq!(
        query.sql(),
        "UPDATE products SET created_at = $1, discontinued = $2, display_name = $3, \
         id = $4, price = $5, sku = $6, tags = $7 WHERE id = $4"
    );
    assert_eq!(query.params_ref().len(), 7);
}

#[test]
fn where_args_accepts_records() {
    let p = product();
    let stmt = Statement::new("SELECT * FROM products").where_args("sku = @sku", &p);
    assert_eq!(stmt.args().get("sku"), Some(&Value::from("SKU-10")));

    let args: Args = p.into();
    assert!(matches!(args, Args::Value(Value::Record(_))));
}

#[derive(Record)]
struct Order {
    #[db = "id,primarykey"]
    id: i64,
    customer: Customer,
    lines: Vec<i32>,
}

#[derive(Record)]
struct Customer {
    #[db = "name,notnull"]
    name: String,
}

#[test]
fn nested_records_bind_as_record_values() {
    let order = Order {
        id: 1,
        customer: Customer {
            name: "ada".to_string(),
        },
        lines: vec![1, 2],
    };
    let bindings = order.bindings();
    let customer = bindings.get("customer").and_then(Value::as_record).unwrap();
    assert_eq!(customer.def().name, "Customer");
    assert_eq!(customer.bindings().get("name"), Some(&Value::from("ada")));

    // Nested records have no dedicated column type.
    let cols = Order::columns();
    assert_eq!(map_type(&cols[1].value_type), "TEXT");
    assert_eq!(map_type(&cols[2].value_type), "INTEGER[]");
}

#[derive(Record)]
struct Tagged<T> {
    #[db = "id,primarykey"]
    id: i32,
    payload: T,
}

#[test]
fn generic_records() {
    let tagged = Tagged {
        id: 3,
        payload: "x".to_string(),
    };
    assert_eq!(tagged.bindings().get("payload"), Some(&Value::from("x")));
    assert!(registry::find("Tagged").is_none());
}

#[test]
fn registry_lists_derived_records() {
    assert!(registry::find("Product").is_some());
    assert!(registry::find("Customer").is_some());
    assert!(registry::find("Missing").is_none());

    let def = registry::find("Order").unwrap();
    let cols = resolve_columns(&ValueType::Record(def)).unwrap();
    assert_eq!(column_names(&cols), ["id", "customer", "lines"]);
}

#[test]
fn segment_matching_on_derived_record() {
    #[derive(Record)]
    struct Code {
        #[db = "unique_code,notnull"]
        code: String,
    }

    let loose = pgstring::Config::new().create_table::<Code>("codes", None);
    assert!(loose.sql().contains("UNIQUE"));

    let strict = pgstring::Config::new()
        .constraint_match(ConstraintMatch::Segment)
        .create_table::<Code>("codes", None);
    assert!(!strict.sql().contains("UNIQUE"));
}
