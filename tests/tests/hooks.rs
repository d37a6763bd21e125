use tests::*;

use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};
use tether::{record, ModelDef, Value};

type Log = Arc<Mutex<Vec<String>>>;

fn logged(order: &Log, name: &'static str) -> impl Fn() + Send + Sync + 'static {
    let order = order.clone();
    move || order.lock().unwrap().push(name.to_string())
}

async fn save_hooks_run_in_order(test: &mut DbTest) {
    let order = Log::default();
    let (a, b, c, d) = (
        logged(&order, "before_create"),
        logged(&order, "before_save"),
        logged(&order, "after_save"),
        logged(&order, "after_create"),
    );

    let users = ModelDef::new("users")
        .before_create(move |user| {
            a();
            Ok(user.into())
        })
        .before_save(move |user| {
            b();
            Ok(user.into())
        })
        .after_save(move |_| {
            c();
            Ok(())
        })
        .after_create(move |_| {
            d();
            Ok(())
        });
    let db = test.setup_db(models!(users), fixtures::USERS).await;

    let user = db.model("users").save(record!("name" => "Ann")).await.unwrap();
    assert_eq!(
        *order.lock().unwrap(),
        ["before_create", "before_save", "after_save", "after_create"]
    );

    // Updates skip the create hooks
    order.lock().unwrap().clear();
    db.model("users").save(user).await.unwrap();
    assert_eq!(*order.lock().unwrap(), ["before_save", "after_save"]);
}

async fn before_save_changes_are_persisted(test: &mut DbTest) {
    let users = ModelDef::new("users").before_save(|user| {
        let count = user.get("saveCount").and_then(Value::as_i64).unwrap_or(0);
        Ok(user.set("saveCount", count + 1).into())
    });
    let db = test.setup_db(models!(users), fixtures::USERS).await;
    let users = db.model("users");

    let user = users.save(record!("name" => "Ann")).await.unwrap();
    assert_eq!(user.get("saveCount"), Some(&Value::from(1)));

    let user = users.save(user).await.unwrap();
    assert_eq!(user.get("saveCount"), Some(&Value::from(2)));

    let stored = users.reload(&user).await.unwrap().unwrap();
    assert_eq!(stored.get("saveCount"), Some(&Value::from(2)));
}

async fn before_save_must_return_record(test: &mut DbTest) {
    let users = ModelDef::new("users").before_save(|_| Ok(Value::from("oops")));
    let db = test.setup_db(models!(users), fixtures::USERS).await;

    let err = db
        .model("users")
        .save(record!("name" => "Ann"))
        .await
        .unwrap_err();

    assert!(err.is_hook_contract());
    assert_eq!(
        err.to_string(),
        "hook contract violated: `before_save` on `users` must return a model"
    );
    assert_eq!(test.log().inserts("users"), 0);
}

async fn hook_errors_abort_the_save(test: &mut DbTest) {
    let users = ModelDef::new("users").before_create(|user| {
        if user.get("name") == Some(&Value::from("")) {
            tether::bail!("name must not be empty");
        }
        Ok(user.into())
    });
    let db = test.setup_db(models!(users), fixtures::USERS).await;

    let err = db
        .model("users")
        .save(record!("name" => ""))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "name must not be empty");
    assert_empty!(db.model("users").all().await.unwrap());
}

async fn after_save_sees_persisted_record(test: &mut DbTest) {
    let seen = Arc::new(Mutex::new(None));
    let slot = seen.clone();

    let users = ModelDef::new("users").after_save(move |user| {
        *slot.lock().unwrap() = Some(user.clone());
        Ok(())
    });
    let db = test.setup_db(models!(users), fixtures::USERS).await;

    let user = db.model("users").save(record!("name" => "Ann")).await.unwrap();
    assert_eq!(seen.lock().unwrap().as_ref(), Some(&user));
}

async fn nested_saves_run_target_hooks(test: &mut DbTest) {
    let order = Log::default();
    let created = logged(&order, "team created");

    let teams = ModelDef::new("teams").after_create(move |_| {
        created();
        Ok(())
    });
    let db = test
        .setup_db(models!(fixtures::users(), teams), &fixtures::schema())
        .await;

    db.model("users")
        .save(record!("name" => "Ann", "team" => record!("name" => "Core")))
        .await
        .unwrap();

    assert_eq!(*order.lock().unwrap(), ["team created"]);
}

tests!(
    save_hooks_run_in_order,
    before_save_changes_are_persisted,
    before_save_must_return_record,
    hook_errors_abort_the_save,
    after_save_sees_persisted_record,
    nested_saves_run_target_hooks,
);
