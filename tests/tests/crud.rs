use joinery::{Inserted, Op, Params, Set, Value, Where};
use pretty_assertions::assert_eq;
use tests::{customer, models, models::*, seed_address, setup};

#[tokio::test]
async fn insert_then_get_round_trips() {
    let (mut db, _) = setup(models()).await;
    let shipping = seed_address(&mut db, "Rua A, 10", "13010-000").await;

    let mut ann = Customer {
        email: Some("ann@example.com".to_string()),
        characteristics: Some(Characteristics {
            height: 1.7,
            tags: vec!["vip".to_string()],
        }),
        ..customer("Ann", 10.5, &shipping)
    };

    let inserted = db.insert(&mut ann).await.unwrap();
    assert!(ann.id > 0);
    assert_eq!(inserted, Inserted::Key(Value::I64(ann.id)));

    let loaded = db.get::<Customer>(ann.id).await.unwrap().unwrap();
    assert_eq!(loaded, ann);
}

#[tokio::test]
async fn generated_keys_are_assigned_back() {
    let (mut db, _) = setup(models()).await;
    let first = seed_address(&mut db, "Rua A, 10", "13010-000").await;
    let second = seed_address(&mut db, "Rua B, 20", "13020-000").await;

    assert!(first.id > 0);
    assert!(second.id > first.id);
    assert!(second.city.state.id > first.city.state.id);
}

#[tokio::test]
async fn get_missing_key_is_none() {
    let (mut db, _) = setup(models()).await;

    assert_eq!(db.get::<Customer>(42).await.unwrap(), None);
}

#[tokio::test]
async fn columns_that_are_not_identifiers() {
    let (mut db, log) = setup(models()).await;

    let mut tag = Tag {
        label: "on sale".to_string(),
        ..Tag::default()
    };
    db.insert(&mut tag).await.unwrap();

    let loaded = db.get::<Tag>(tag.id).await.unwrap();
    assert_eq!(loaded, Some(tag));
    assert!(
        log.last().sql.contains("t1.[tag label] AS t1_tag_label"),
        "{}",
        log.last().sql
    );
}

#[tokio::test]
async fn composite_keys() {
    let (mut db, log) = setup(models()).await;

    let mut enrollment = Enrollment {
        student: 7,
        course: "rust".to_string(),
        grade: Some(9.5),
    };

    let inserted = db.insert(&mut enrollment).await.unwrap();
    assert_eq!(inserted, Inserted::Rows(1));

    let loaded = db
        .get_by_keys::<Enrollment>(vec![Value::from("rust"), Value::from(7)])
        .await
        .unwrap();
    assert_eq!(loaded, Some(enrollment));

    let sql = log.last().sql;
    let course = sql.find("t1.[course] =").unwrap();
    let student = sql.find("t1.[student] =").unwrap();
    assert!(course < student, "{sql}");

    let err = db
        .get_by_keys::<Enrollment>(vec![Value::from("rust")])
        .await
        .unwrap_err();
    assert!(err.is_invalid_filter(), "{err}");
}

#[tokio::test]
async fn update_writes_every_non_key_column() {
    let (mut db, _) = setup(models()).await;
    let shipping = seed_address(&mut db, "Rua A, 10", "13010-000").await;
    let billing = seed_address(&mut db, "Rua B, 20", "13020-000").await;

    let mut ann = customer("Ann", 10.0, &shipping);
    db.insert(&mut ann).await.unwrap();

    ann.balance = 20.0;
    ann.email = Some("ann@example.com".to_string());
    ann.billing = Some(billing);

    assert_eq!(db.update(&ann).await.unwrap(), 1);

    let loaded = db.get::<Customer>(ann.id).await.unwrap().unwrap();
    assert_eq!(loaded, ann);
}

#[tokio::test]
async fn update_where_applies_assignments() {
    let (mut db, _) = setup(models()).await;
    let shipping = seed_address(&mut db, "Rua A, 10", "13010-000").await;

    for (name, balance) in [("Ann", 1.0), ("Bob", 2.0), ("Bob", 3.0)] {
        db.insert(&mut customer(name, balance, &shipping)).await.unwrap();
    }

    let count = db
        .update_where::<Customer>(
            Set::new().set("balance", 0.0).set("email", "bob@example.com"),
            Where::new().and("name", Op::Eq, "Bob"),
            Some(2),
        )
        .await
        .unwrap();
    assert_eq!(count, 2);

    let bobs = db
        .select::<Customer>(Where::new().and("email", Op::Eq, "bob@example.com"))
        .await
        .unwrap();
    assert_eq!(bobs.len(), 2);
    assert!(bobs.iter().all(|bob| bob.balance == 0.0));
}

#[tokio::test]
async fn filters_on_joined_tables_are_rejected_for_mutations() {
    let (mut db, _) = setup(models()).await;

    let err = db
        .update_where::<Customer>(
            Set::new().set("balance", 0.0),
            Where::new().and("shipping.zip_code", Op::Eq, "13010-000"),
            None,
        )
        .await
        .unwrap_err();
    assert!(err.is_unsupported_operation(), "{err}");

    let err = db
        .delete_where::<Customer>(Where::new().and("Shipping.ZipCode", Op::Eq, "x"), None)
        .await
        .unwrap_err();
    assert!(err.is_unsupported_operation(), "{err}");
}

#[tokio::test]
async fn delete_by_entity() {
    let (mut db, _) = setup(models()).await;
    let shipping = seed_address(&mut db, "Rua A, 10", "13010-000").await;

    let mut ann = customer("Ann", 1.0, &shipping);
    db.insert(&mut ann).await.unwrap();

    assert_eq!(db.delete(&ann, Some(1)).await.unwrap(), 1);
    assert_eq!(db.get::<Customer>(ann.id).await.unwrap(), None);
}

#[tokio::test]
async fn delete_with_wrong_expected_count_still_deletes() {
    let (mut db, _) = setup(models()).await;
    let shipping = seed_address(&mut db, "Rua A, 10", "13010-000").await;

    for name in ["Bob", "Bob", "Bob", "Ann"] {
        db.insert(&mut customer(name, 1.0, &shipping)).await.unwrap();
    }

    let err = db
        .delete_where::<Customer>(Where::new().and("name", Op::Eq, "Bob"), Some(2))
        .await
        .unwrap_err();
    assert!(err.is_unexpected_row_count(), "{err}");

    let left = db.select::<Customer>(Where::new()).await.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].name, "Ann");
}

#[tokio::test]
async fn raw_statements() {
    let (mut db, _) = setup(models()).await;
    let shipping = seed_address(&mut db, "Rua A, 10", "13010-000").await;

    for (name, balance) in [("Ann", 1.0), ("Bob", 2.0), ("Cid", 3.0)] {
        db.insert(&mut customer(name, balance, &shipping)).await.unwrap();
    }

    let rows = db
        .execute_query(
            "SELECT [name], [balance] FROM [customer] WHERE [balance] >= @min ORDER BY [name];",
            Params::new().add("@min", 2.0),
        )
        .await
        .unwrap();

    let names: Vec<_> = rows.iter().map(|row| row.get("name").cloned()).collect();
    assert_eq!(names, [Some(Value::from("Bob")), Some(Value::from("Cid"))]);
    assert_eq!(rows[0].get("balance"), Some(&Value::F64(2.0)));

    let count = db
        .execute_non_query(
            "UPDATE [customer] SET [email] = @email;",
            Params::new().add("email", "all@example.com"),
            Some(3),
        )
        .await
        .unwrap();
    assert_eq!(count, 3);

    let err = db
        .execute_non_query("DELETE FROM [customer];", Params::new(), Some(1))
        .await
        .unwrap_err();
    assert!(err.is_unexpected_row_count(), "{err}");
}
