use joinery::{Op, Params, Where};
use pretty_assertions::assert_eq;
use tests::{customer, models, models::*, seed_address, setup};

#[tokio::test]
async fn left_joins_propagate_to_descendants() {
    let (mut db, log) = setup(models()).await;
    let shipping = seed_address(&mut db, "Rua A, 10", "13010-000").await;

    let mut ann = customer("Ann", 1.0, &shipping);
    db.insert(&mut ann).await.unwrap();

    let loaded = db.select::<Customer>(Where::new()).await.unwrap();
    assert_eq!(loaded, [ann]);
    assert_eq!(loaded[0].billing, None);

    let sql = log.last().sql;
    for join in [
        "LEFT JOIN [address] AS t2 ON t1.[id_billing_address] = t2.[id_address]",
        "LEFT JOIN [city] AS t3 ON t2.[id_city] = t3.[id_city]",
        "LEFT JOIN [state] AS t4 ON t3.[id_state] = t4.[id_state]",
        "INNER JOIN [address] AS t5 ON t1.[id_shipping_address] = t5.[id_address]",
        "INNER JOIN [city] AS t6 ON t5.[id_city] = t6.[id_city]",
    ] {
        assert!(sql.contains(join), "missing `{join}` in {sql}");
    }
}

#[tokio::test]
async fn rows_without_an_inner_joined_branch_are_dropped() {
    let (mut db, _) = setup(models()).await;
    let shipping = seed_address(&mut db, "Rua A, 10", "13010-000").await;

    db.insert(&mut customer("Ann", 1.0, &shipping)).await.unwrap();
    db.execute_non_query(
        "INSERT INTO [customer] ([name], [balance], [id_shipping_address]) \
         VALUES (@name, @balance, @shipping);",
        Params::new()
            .add("@name", "Ghost")
            .add("@balance", 1.0)
            .add("@shipping", 999),
        Some(1),
    )
    .await
    .unwrap();

    let loaded = db.select::<Customer>(Where::new()).await.unwrap();
    let names: Vec<_> = loaded.iter().map(|c| &c.name[..]).collect();
    assert_eq!(names, ["Ann"]);
}

#[tokio::test]
async fn missing_required_branch_under_a_left_join_fails() {
    let (mut db, _) = setup(models()).await;
    let shipping = seed_address(&mut db, "Rua A, 10", "13010-000").await;

    db.execute_non_query(
        "INSERT INTO [address] ([street], [zip_code], [id_city]) VALUES ('Nowhere', '0', 999);",
        Params::new(),
        Some(1),
    )
    .await
    .unwrap();

    let orphan = db
        .execute_query("SELECT MAX([id_address]) AS [id] FROM [address];", Params::new())
        .await
        .unwrap();
    let orphan = orphan[0].get("id").cloned().unwrap();

    let mut ann = customer("Ann", 1.0, &shipping);
    db.insert(&mut ann).await.unwrap();
    db.update_where::<Customer>(
        joinery::Set::new().set("billing", orphan),
        Where::new().and("id", Op::Eq, ann.id),
        Some(1),
    )
    .await
    .unwrap();

    let err = db.get::<Customer>(ann.id).await.unwrap_err();
    assert!(err.is_type_conversion(), "{err}");
    assert!(err.to_string().contains("`Address.city`"), "{err}");
}

#[tokio::test]
async fn nested_references_are_materialized() {
    let (mut db, _) = setup(models()).await;
    let shipping = seed_address(&mut db, "Rua A, 10", "13010-000").await;
    let billing = seed_address(&mut db, "Rua B, 20", "13020-000").await;

    let mut ann = customer("Ann", 1.0, &shipping);
    ann.billing = Some(billing.clone());
    db.insert(&mut ann).await.unwrap();

    let loaded = db.get::<Customer>(ann.id).await.unwrap().unwrap();
    assert_eq!(loaded.billing, Some(billing));
    assert_eq!(loaded.shipping.city.state.abbreviation, "SP");
    assert_eq!(loaded.shipping.street, "Rua A, 10");
}
