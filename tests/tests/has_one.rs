use tests::*;

use pretty_assertions::assert_eq;
use tether::{record, Value};

async fn setup(test: &mut DbTest) -> tether::Db {
    test.setup_db(
        models!(fixtures::users(), fixtures::profiles()),
        &fixtures::schema(),
    )
    .await
}

async fn nested_profile_points_at_owner(test: &mut DbTest) {
    let db = setup(test).await;

    let user = db
        .model("users")
        .save(record!("name" => "Ann", "profile" => record!("bio" => "hi")))
        .await
        .unwrap();

    let profile = user.get("profile").and_then(Value::as_record).unwrap();
    assert_eq!(profile.get("userId"), Some(user.id()));
    assert_eq!(profile.get("bio"), Some(&Value::from("hi")));
}

async fn null_payload_detaches_without_deleting(test: &mut DbTest) {
    let db = setup(test).await;
    let (users, profiles) = (db.model("users"), db.model("profiles"));

    let user = users
        .save(record!("name" => "Ann", "profile" => record!("bio" => "hi")))
        .await
        .unwrap();

    let user = users.save(user.set("profile", Value::Null)).await.unwrap();
    assert_eq!(user.get("profile"), Some(&Value::Null));

    let rows = profiles.all().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("userId"), Some(&Value::Null));
    assert_eq!(rows[0].get("bio"), Some(&Value::from("hi")));
}

async fn replacing_profile_detaches_previous(test: &mut DbTest) {
    let db = setup(test).await;
    let (users, profiles) = (db.model("users"), db.model("profiles"));

    let user = users
        .save(record!("name" => "Ann", "profile" => record!("bio" => "first")))
        .await
        .unwrap();
    let first = user.get("profile").and_then(Value::as_record).unwrap().clone();

    let user = users
        .save(user.set("profile", record!("bio" => "second")))
        .await
        .unwrap();
    let second = user.get("profile").and_then(Value::as_record).unwrap();

    let first = profiles.reload(&first).await.unwrap().unwrap();
    assert_eq!(first.get("userId"), Some(&Value::Null));
    assert_eq!(second.get("userId"), Some(user.id()));
    assert_eq!(profiles.where_eq("userId", user.id().clone()).all().await.unwrap().len(), 1);
}

async fn resaving_same_profile_keeps_link(test: &mut DbTest) {
    let db = setup(test).await;
    let users = db.model("users");

    let user = users
        .save(record!("name" => "Ann", "profile" => record!("bio" => "hi")))
        .await
        .unwrap();
    let profile = user.get("profile").and_then(Value::as_record).unwrap().clone();

    let user = users
        .save(user.set("profile", profile.set("bio", "updated")))
        .await
        .unwrap();

    let rows = db.model("profiles").all().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id(), profile.id());
    assert_eq!(rows[0].get("userId"), Some(user.id()));
    assert_eq!(rows[0].get("bio"), Some(&Value::from("updated")));
}

tests!(
    nested_profile_points_at_owner,
    null_payload_detaches_without_deleting,
    replacing_profile_detaches_previous,
    resaving_same_profile_keeps_link,
);
