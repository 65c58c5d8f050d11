//! Building statements from a derived record.
//!
//! Run with: `cargo run --example basic -p pgstring`

use pgstring::prelude::*;
use pgstring::registry;

#[derive(Debug, Record)]
struct User {
    #[db = "id,primarykey"]
    id: i64,
    #[db = "email,notnull,unique"]
    email: String,
    #[json = "display_name"]
    name: Option<String>,
    roles: Vec<String>,
    #[db = "-"]
    password_hash: String,
}

fn main() -> PgResult<()> {
    let user = User {
        id: 1,
        email: "alice@example.com".to_string(),
        name: Some("Alice".to_string()),
        roles: vec!["admin".to_string()],
        password_hash: "argon2:...".to_string(),
    };

    let (ddl, _) = create_table::<User>("users", Some(TableOption::IfNotExists)).build()?;
    println!("{ddl}\n");

    let (sql, args) = insert_into("users")
        .columns(&user)
        .values(&user)
        .on_conflict("(id)")
        .do_nothing()
        .build()?;
    println!("{sql}");
    for (name, value) in args.iter() {
        println!("  @{name} = {value:?}");
    }

    let query = update("users")
        .set(&user)
        .where_("id = @id")
        .returning_columns(["id", "email"])
        .to_positional()?;
    println!("\n{}", query.sql());
    println!("  {} parameters", query.params().len());

    let base = select_columns(["id", "email"]).from("users");
    let admins = base
        .clone()
        .where_("'admin' = ANY(roles)")
        .order_by("id");
    let some = base.in_list("id", [1i64, 2, 3]);
    println!("\n{admins}\n{some}");

    if let Err(err) = update("users").set(42i64).build() {
        println!("\nrejected: {err}");
    }

    for def in registry::records() {
        println!("\nregistered: {} ({} fields)", def.name, def.fields.len());
    }

    Ok(())
}
