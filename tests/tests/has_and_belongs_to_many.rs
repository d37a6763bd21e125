use tests::*;

use pretty_assertions::assert_eq;
use tether::{record, Declaration, ModelDef, Value};

async fn setup(test: &mut DbTest) -> tether::Db {
    test.setup_db(
        models!(fixtures::users(), fixtures::projects()),
        &fixtures::schema(),
    )
    .await
}

async fn nested_targets_are_linked(test: &mut DbTest) {
    let db = setup(test).await;

    let user = db
        .model("users")
        .save(record!(
            "name" => "Ann",
            "projects" => vec![record!("name" => "web"), record!("name" => "api")],
        ))
        .await
        .unwrap();

    let projects = user.get("projects").and_then(Value::as_list).unwrap();
    let names = projects
        .iter()
        .map(|p| p.as_record().unwrap().get("name").and_then(Value::as_str).unwrap())
        .collect::<Vec<_>>();
    assert_eq_unordered!(names, ["web", "api"]);

    let joins = db.model("projects_users").all().await.unwrap();
    assert_eq!(joins.len(), 2);
    for join in &joins {
        assert_eq!(join.get("userId"), Some(user.id()));
        assert!(matches!(join.get("createdAt"), Some(Value::Timestamp(_))));
    }
}

async fn resave_is_idempotent(test: &mut DbTest) {
    let db = setup(test).await;
    let users = db.model("users");

    let user = users
        .save(record!(
            "name" => "Ann",
            "projects" => vec![record!("name" => "web"), record!("name" => "api")],
        ))
        .await
        .unwrap();

    test.log().clear();
    let user = users.save(user).await.unwrap();
    let user = users.save(user).await.unwrap();

    assert_eq!(test.log().inserts("projects_users"), 0);
    assert_eq!(db.model("projects_users").all().await.unwrap().len(), 2);
    assert_eq!(db.model("projects").all().await.unwrap().len(), 2);
    assert_eq!(
        user.get("projects").and_then(Value::as_list).unwrap().len(),
        2
    );
}

async fn repeated_target_is_linked_once(test: &mut DbTest) {
    let db = setup(test).await;

    let user = db
        .model("users")
        .save(record!(
            "name" => "Ann",
            "projects" => vec![
                record!("id" => "p1", "name" => "web"),
                record!("id" => "p1", "name" => "web"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(test.log().inserts("projects_users"), 1);
    assert_eq!(db.model("projects_users").all().await.unwrap().len(), 1);
    assert_eq!(db.model("projects").all().await.unwrap().len(), 1);
    assert_eq!(
        user.get("projects").and_then(Value::as_list).unwrap().len(),
        1
    );
}

async fn omitted_targets_lose_link_only(test: &mut DbTest) {
    let db = setup(test).await;
    let users = db.model("users");

    let user = users
        .save(record!(
            "name" => "Ann",
            "projects" => vec![record!("id" => "p1", "name" => "web"), record!("id" => "p2", "name" => "api")],
        ))
        .await
        .unwrap();

    let web = db.model("projects").find("p1").await.unwrap().unwrap();
    users.save(user.set("projects", vec![web])).await.unwrap();

    let joins = db.model("projects_users").all().await.unwrap();
    assert_eq!(joins.len(), 1);
    assert_eq!(joins[0].get("projectId"), Some(&Value::from("p1")));

    // Both projects survive
    assert_eq!(db.model("projects").all().await.unwrap().len(), 2);
}

async fn linking_existing_target(test: &mut DbTest) {
    let db = setup(test).await;
    let project = db
        .model("projects")
        .create(record!("name" => "web"))
        .await
        .unwrap();

    db.model("users")
        .save(record!("name" => "Ann", "projects" => vec![project.clone()]))
        .await
        .unwrap();
    db.model("users")
        .save(record!("name" => "Bea", "projects" => vec![project.clone()]))
        .await
        .unwrap();

    assert_eq!(db.model("projects").all().await.unwrap().len(), 1);
    let joins = db
        .model("projects_users")
        .where_eq("projectId", project.id().clone())
        .all()
        .await
        .unwrap();
    assert_eq!(joins.len(), 2);
}

async fn join_row_without_timestamp_columns(test: &mut DbTest) {
    let ddl = "
        CREATE TABLE students (id TEXT PRIMARY KEY, name TEXT);
        CREATE TABLE courses (id TEXT PRIMARY KEY, title TEXT);
        CREATE TABLE enrollments (id TEXT PRIMARY KEY, studentId TEXT, courseId TEXT);
    ";
    let students = ModelDef::new("students")
        .timestamps(tether::Timestamps::disabled())
        .relation(
            "courses",
            Declaration::has_and_belongs_to_many("courses").through("enrollments"),
        );
    let db = test
        .setup_db(models!(students), ddl)
        .await;

    db.model("students")
        .save(record!("name" => "Ann", "courses" => vec![record!("title" => "Rust")]))
        .await
        .unwrap();

    let joins = db.model("enrollments").all().await.unwrap();
    assert_eq!(joins.len(), 1);
    assert_eq!(joins[0].len(), 3);
}

tests!(
    nested_targets_are_linked,
    resave_is_idempotent,
    repeated_target_is_linked_once,
    omitted_targets_lose_link_only,
    linking_existing_target,
    join_row_without_timestamp_columns,
);
