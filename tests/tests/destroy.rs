use tests::*;

use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};
use tether::{record, Declaration, ModelDef, Value};

async fn dependent_children_are_deleted(test: &mut DbTest) {
    let teams = ModelDef::new("teams").relation("users", Declaration::has_many("users").dependent(true));
    let db = test
        .setup_db(models!(teams), &fixtures::schema())
        .await;

    let team = db
        .model("teams")
        .save(record!(
            "name" => "Core",
            "users" => vec![record!("name" => "Ann"), record!("name" => "Bea")],
        ))
        .await
        .unwrap();
    db.model("users").create(record!("name" => "Cat")).await.unwrap();

    db.model("teams").destroy(team).await.unwrap();

    let left = db.model("users").all().await.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].get("name"), Some(&Value::from("Cat")));
}

async fn destroying_an_unsaved_record_fails(test: &mut DbTest) {
    let teams = ModelDef::new("teams").relation("users", Declaration::has_many("users").dependent(true));
    let db = test
        .setup_db(models!(teams), &fixtures::schema())
        .await;

    // A user with no team: its `teamId` is null
    db.model("users").create(record!("name" => "Cat")).await.unwrap();
    test.log().clear();

    let err = assert_err!(
        db.model("teams").destroy(record!("name" => "never saved")).await,
        is_adhoc
    );
    assert_eq!(err.to_string(), "cannot destroy a `teams` record without an id");
    assert!(test.log().is_empty());

    assert_eq!(db.model("users").all().await.unwrap().len(), 1);
}

async fn non_dependent_children_survive(test: &mut DbTest) {
    let db = test
        .setup_db(models!(fixtures::teams()), &fixtures::schema())
        .await;

    let team = db
        .model("teams")
        .save(record!("name" => "Core", "users" => vec![record!("name" => "Ann")]))
        .await
        .unwrap();
    db.model("teams").destroy(team.clone()).await.unwrap();

    assert_none!(db.model("teams").reload(&team).await.unwrap());
    let users = db.model("users").all().await.unwrap();
    assert_eq!(users.len(), 1);
    // The foreign key is left dangling
    assert_eq!(users[0].get("teamId"), Some(team.id()));
}

async fn dependent_has_one(test: &mut DbTest) {
    let users = ModelDef::new("users").relation("profile", Declaration::has_one("profile").dependent(true));
    let db = test.setup_db(models!(users), &fixtures::schema()).await;

    let user = db
        .model("users")
        .save(record!("name" => "Ann", "profile" => record!("bio" => "hi")))
        .await
        .unwrap();
    db.model("users").destroy(user).await.unwrap();

    assert_empty!(db.model("profiles").all().await.unwrap());
}

async fn join_rows_removed_targets_kept(test: &mut DbTest) {
    let db = test
        .setup_db(
            models!(fixtures::users(), fixtures::projects()),
            &fixtures::schema(),
        )
        .await;

    let user = db
        .model("users")
        .save(record!("name" => "Ann", "projects" => vec![record!("name" => "web")]))
        .await
        .unwrap();
    db.model("users").destroy(user).await.unwrap();

    assert_empty!(db.model("projects_users").all().await.unwrap());
    assert_eq!(db.model("projects").all().await.unwrap().len(), 1);
}

async fn before_destroy_can_veto(test: &mut DbTest) {
    let users = ModelDef::new("users")
        .before_destroy(|user| Ok(user.get("admin") != Some(&Value::Bool(true))));
    let db = test.setup_db(models!(users), fixtures::USERS).await;
    let users = db.model("users");

    let admin = users.create(record!("name" => "root", "admin" => true)).await.unwrap();

    test.log().clear();
    let returned = users.destroy(admin.clone()).await.unwrap();
    assert_eq!(returned, admin);
    assert_eq!(test.log().deletes("users"), 0);
    assert!(users.reload(&admin).await.unwrap().is_some());
}

async fn destroy_hooks_run_in_order(test: &mut DbTest) {
    let order = Arc::new(Mutex::new(vec![]));
    let (before, after) = (order.clone(), order.clone());

    let users = ModelDef::new("users")
        .before_destroy(move |_| {
            before.lock().unwrap().push("before_destroy");
            Ok(true)
        })
        .after_destroy(move |_| {
            after.lock().unwrap().push("after_destroy");
            Ok(())
        });
    let db = test.setup_db(models!(users), fixtures::USERS).await;

    let user = db.model("users").create(record!("name" => "Ann")).await.unwrap();
    db.model("users").destroy(user).await.unwrap();

    assert_eq!(*order.lock().unwrap(), ["before_destroy", "after_destroy"]);
}

tests!(
    dependent_children_are_deleted,
    destroying_an_unsaved_record_fails,
    non_dependent_children_survive,
    dependent_has_one,
    join_rows_removed_targets_kept,
    before_destroy_can_veto,
    destroy_hooks_run_in_order,
);
