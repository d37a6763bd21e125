use tests::*;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tether::{record, ModelDef, Options, Timestamps, Touch, Value};

async fn schema_is_fetched_once(test: &mut DbTest) {
    let db = test.setup_db(models!(fixtures::users()), fixtures::USERS).await;
    let users = db.model("users");

    let columns = users.schema().await.unwrap();
    assert_eq!(columns["email"].ty, "VARCHAR(255)");
    assert_eq!(columns["email"].max_length, Some(255));
    assert!(columns["email"].nullable);
    assert!(columns.contains_key("createdAt"));

    users.schema().await.unwrap();
    users.create(record!("name" => "Ann")).await.unwrap();

    assert_eq!(test.log().count(|op| op.is_column_info()), 1);
}

async fn defaults_apply_on_insert_only(test: &mut DbTest) {
    let users = ModelDef::new("users")
        .default_value("admin", false)
        .default_with("email", |user| {
            let name = user.get("name").and_then(Value::as_str).unwrap_or("anon");
            Value::from(format!("{name}@example.com"))
        });
    let db = test.setup_db(models!(users), fixtures::USERS).await;
    let users = db.model("users");

    let user = users.create(record!("name" => "ann")).await.unwrap();
    assert_eq!(user.get("admin"), Some(&Value::Bool(false)));
    assert_eq!(user.get("email"), Some(&Value::from("ann@example.com")));

    // Explicit values win
    let user = users
        .create(record!("name" => "bea", "admin" => true))
        .await
        .unwrap();
    assert_eq!(user.get("admin"), Some(&Value::Bool(true)));

    // Updates leave omitted fields alone
    let user = users
        .save(record!("id" => user.id().clone(), "name" => "bea2"))
        .await
        .unwrap();
    assert_eq!(user.get("email"), Some(&Value::from("bea@example.com")));
}

async fn custom_id_generator(test: &mut DbTest) {
    let next = Arc::new(AtomicI64::new(0));
    let users = ModelDef::new("users").id_generator(move |_| {
        Value::from(format!("user-{}", next.fetch_add(1, Ordering::SeqCst)))
    });
    let db = test.setup_db(models!(users), fixtures::USERS).await;

    let a = db.model("users").create(record!("name" => "a")).await.unwrap();
    let b = db.model("users").create(record!("name" => "b")).await.unwrap();

    assert_eq!(a.id(), &Value::from("user-0"));
    assert_eq!(b.id(), &Value::from("user-1"));
}

async fn created_at_kept_on_update(test: &mut DbTest) {
    let db = test.setup_db(models!(fixtures::users()), fixtures::USERS).await;
    let users = db.model("users");

    let first = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let later = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

    let user = users
        .save_with(record!("name" => "Ann"), &Options::new().touch(Touch::At(first)))
        .await
        .unwrap();
    assert_eq!(user.get("createdAt"), Some(&Value::Timestamp(first)));

    let user = users
        .save_with(user.remove("createdAt"), &Options::new().touch(Touch::At(later)))
        .await
        .unwrap();
    assert_eq!(user.get("createdAt"), Some(&Value::Timestamp(first)));
    assert_eq!(user.get("updatedAt"), Some(&Value::Timestamp(later)));

    let user = users
        .save_with(user.set("name", "Bea"), &Options::new().touch(Touch::Skip))
        .await
        .unwrap();
    assert_eq!(user.get("updatedAt"), Some(&Value::Timestamp(later)));
}

async fn timestamp_columns_are_configurable(test: &mut DbTest) {
    let ddl = "CREATE TABLE notes (id TEXT PRIMARY KEY, body TEXT, created TIMESTAMP, modified TIMESTAMP);";

    let mut builder = tether::Db::builder();
    builder.timestamps(Timestamps::new("created", "modified"));
    let db = test.setup_db(builder, ddl).await;

    let note = db.model("notes").create(record!("body" => "hi")).await.unwrap();
    assert!(matches!(note.get("created"), Some(Value::Timestamp(_))));
    assert!(matches!(note.get("modified"), Some(Value::Timestamp(_))));
    assert!(!note.contains("createdAt"));
}

async fn timestamps_can_be_disabled(test: &mut DbTest) {
    let users = ModelDef::new("users").timestamps(Timestamps::disabled());
    let db = test.setup_db(models!(users), fixtures::USERS).await;

    let user = db.model("users").create(record!("name" => "Ann")).await.unwrap();
    assert_eq!(user.get("createdAt"), Some(&Value::Null));
    assert_eq!(user.get("updatedAt"), Some(&Value::Null));
}

tests!(
    schema_is_fetched_once,
    defaults_apply_on_insert_only,
    custom_id_generator,
    created_at_kept_on_update,
    timestamp_columns_are_configurable,
    timestamps_can_be_disabled,
);
