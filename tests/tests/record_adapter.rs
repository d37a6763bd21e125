use tests::*;

use pretty_assertions::assert_eq;
use tether::{record, ModelDef, Record, RecordAdapter, Value};

/// Tags records with their type name, the way a typed model wrapper would.
struct Tagged(&'static str);

impl RecordAdapter for Tagged {
    fn factory(&self, plain: Record) -> Record {
        plain.with("__typeName", self.0)
    }

    fn serialize(&self, instance: &Record) -> Value {
        Value::Record(instance.remove("__typeName"))
    }

    fn is_instance(&self, value: &Value) -> bool {
        value
            .as_record()
            .and_then(|r| r.get("__typeName"))
            .and_then(Value::as_str)
            == Some(self.0)
    }
}

/// Claims every record and serializes it to a scalar.
struct Broken;

impl RecordAdapter for Broken {
    fn serialize(&self, _: &Record) -> Value {
        Value::from(42)
    }
}

async fn setup(test: &mut DbTest) -> tether::Db {
    test.setup_db(
        models!(
            fixtures::users().adapter(Tagged("User")),
            fixtures::projects().adapter(Tagged("Project"))
        ),
        &fixtures::schema(),
    )
    .await
}

async fn records_come_back_wrapped(test: &mut DbTest) {
    let db = setup(test).await;
    let users = db.model("users");

    let user = users.create(record!("name" => "Ann")).await.unwrap();
    assert_eq!(user.get("__typeName"), Some(&Value::from("User")));

    let found = users.find(user.id().clone()).await.unwrap().unwrap();
    assert_eq!(found, user);
}

async fn instances_save_through_serializer(test: &mut DbTest) {
    let db = setup(test).await;
    let users = db.model("users");

    let user = users.create(record!("name" => "Ann")).await.unwrap();
    let user = users.save(user.set("name", "Bea")).await.unwrap();

    assert_eq!(user.get("name"), Some(&Value::from("Bea")));
    assert_eq!(users.all().await.unwrap().len(), 1);
}

async fn nested_records_use_target_adapter(test: &mut DbTest) {
    let db = setup(test).await;
    let users = db.model("users");

    let user = users
        .save(record!("name" => "Ann", "projects" => vec![record!("name" => "web")]))
        .await
        .unwrap();
    let project = &user.get("projects").and_then(Value::as_list).unwrap()[0];
    assert!(Tagged("Project").is_instance(project));

    let loaded = users.include(["projects"]).first().await.unwrap().unwrap();
    assert!(Tagged("User").is_instance(&Value::Record(loaded.clone())));
    let project = &loaded.get("projects").and_then(Value::as_list).unwrap()[0];
    assert!(Tagged("Project").is_instance(project));

    // Wrapped nested records are accepted as payloads
    users.save(loaded).await.unwrap();
    assert_eq!(db.model("projects_users").all().await.unwrap().len(), 1);
}

async fn serializer_must_return_record(test: &mut DbTest) {
    let db = test
        .setup_db(models!(ModelDef::new("users").adapter(Broken)), fixtures::USERS)
        .await;

    let err = db
        .model("users")
        .save(record!("name" => "Ann"))
        .await
        .unwrap_err();
    assert!(err.is_serialize_contract());
    assert_eq!(test.log().inserts("users"), 0);
}

tests!(
    records_come_back_wrapped,
    instances_save_through_serializer,
    nested_records_use_target_adapter,
    serializer_must_return_record,
);
