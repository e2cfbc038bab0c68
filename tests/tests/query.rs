use joinery::{Db, Op, OrderBy, Query, Value, Where};
use pretty_assertions::assert_eq;
use tests::{customer, models, models::*, seed_address, setup};

async fn names(db: &mut Db, query: impl Into<Query>) -> Vec<String> {
    let mut names: Vec<_> = db
        .select::<Customer>(query)
        .await
        .unwrap()
        .into_iter()
        .map(|customer| customer.name)
        .collect();
    names.sort();
    names
}

async fn seed(db: &mut Db, customers: &[(&str, f64)]) {
    let shipping = seed_address(db, "Rua A, 10", "13010-000").await;

    for &(name, balance) in customers {
        db.insert(&mut customer(name, balance, &shipping)).await.unwrap();
    }
}

#[tokio::test]
async fn like_and_not_like_are_complements() {
    let (mut db, _) = setup(models()).await;
    seed(&mut db, &[("ABX", 1.0), ("AXC", 1.0), ("XBC", 1.0), ("ABC", 1.0)]).await;

    assert_eq!(
        names(&mut db, Where::new().and("name", Op::Like, "%X%")).await,
        ["ABX", "AXC", "XBC"]
    );
    assert_eq!(
        names(&mut db, Where::new().and("name", Op::NotLike, "%X%")).await,
        ["ABC"]
    );
    assert_eq!(
        names(&mut db, Where::new().and("name", Op::Like, "X%")).await,
        ["XBC"]
    );
    assert_eq!(
        names(&mut db, Where::new().and("name", Op::Like, "%X")).await,
        ["ABX"]
    );
}

#[tokio::test]
async fn between_is_inclusive() {
    let (mut db, _) = setup(models()).await;
    seed(&mut db, &[("a", 0.5), ("b", 1.0), ("c", 1.5), ("d", 2.0), ("e", 2.5)]).await;

    assert_eq!(
        names(&mut db, Where::new().and("balance", Op::Between, [1.0, 2.0])).await,
        ["b", "c", "d"]
    );
}

#[tokio::test]
async fn or_closes_the_preceding_group() {
    let (mut db, log) = setup(models()).await;
    seed(&mut db, &[("a", 1.0), ("b", 2.0), ("c", 3.0), ("d", 4.0)]).await;

    let filter = Where::new()
        .and("balance", Op::Gt, 1.0)
        .and("balance", Op::Lt, 3.0)
        .or("name", Op::Eq, "d");

    assert_eq!(names(&mut db, filter).await, ["b", "d"]);
    assert!(
        log.last().sql.contains(
            "WHERE (t1.[balance] > @t1_balance_1 AND t1.[balance] < @t1_balance_2) \
             OR (t1.[name] = @t1_name_3)"
        ),
        "{}",
        log.last().sql
    );
}

#[tokio::test]
async fn in_lists() {
    let (mut db, _) = setup(models()).await;
    seed(&mut db, &[("a", 1.0), ("b", 2.0), ("c", 3.0)]).await;

    assert_eq!(
        names(&mut db, Where::new().and("name", Op::In, ["a", "c"])).await,
        ["a", "c"]
    );
    assert_eq!(
        names(&mut db, Where::new().and("name", Op::NotIn, ["a", "c"])).await,
        ["b"]
    );

    let err = db
        .select::<Customer>(Where::new().and("name", Op::In, Value::List(vec![])))
        .await
        .unwrap_err();
    assert!(err.is_invalid_filter(), "{err}");
}

#[tokio::test]
async fn empty_in_lists_become_constants_when_enabled() {
    let mut builder = models();
    builder.handle_empty_in_args(true);

    let (mut db, _) = setup(builder).await;
    seed(&mut db, &[("a", 1.0), ("b", 2.0)]).await;

    let empty = || Value::List(vec![]);

    assert!(names(&mut db, Where::new().and("name", Op::In, empty()))
        .await
        .is_empty());
    assert_eq!(
        names(&mut db, Where::new().and("name", Op::NotIn, empty())).await,
        ["a", "b"]
    );
}

#[tokio::test]
async fn null_comparisons_use_is_null() {
    let (mut db, log) = setup(models()).await;
    seed(&mut db, &[("a", 1.0), ("b", 2.0)]).await;

    db.execute_non_query(
        "UPDATE [customer] SET [email] = 'b@example.com' WHERE [name] = 'b';",
        Default::default(),
        Some(1),
    )
    .await
    .unwrap();

    assert_eq!(
        names(&mut db, Where::new().and("email", Op::Eq, Value::Null)).await,
        ["a"]
    );
    assert!(log.last().sql.contains("t1.[email] IS NULL"), "{}", log.last().sql);

    assert_eq!(
        names(&mut db, Where::new().and("email", Op::IsNot, Value::Null)).await,
        ["b"]
    );
}

#[tokio::test]
async fn order_by_and_limit() {
    let (mut db, log) = setup(models()).await;
    seed(&mut db, &[("a", 3.0), ("b", 1.0), ("c", 2.0)]).await;

    let customers = db
        .select::<Customer>(Query::new().order_by(OrderBy::new().desc("balance")).limit(2))
        .await
        .unwrap();

    let names: Vec<_> = customers.iter().map(|c| &c.name[..]).collect();
    assert_eq!(names, ["a", "c"]);
    assert!(log.last().sql.ends_with("ORDER BY t1.[balance] DESC LIMIT 2;"));
}

#[tokio::test]
async fn dotted_names_tell_repeated_joins_apart() {
    let (mut db, _) = setup(models()).await;
    let downtown = seed_address(&mut db, "Rua A, 10", "13010-000").await;
    let uptown = seed_address(&mut db, "Rua B, 20", "13020-000").await;

    let mut ann = customer("Ann", 1.0, &downtown);
    ann.billing = Some(uptown.clone());
    db.insert(&mut ann).await.unwrap();

    let mut bob = customer("Bob", 1.0, &uptown);
    bob.billing = Some(downtown.clone());
    db.insert(&mut bob).await.unwrap();

    assert_eq!(
        names(&mut db, Where::new().and("Billing.ZipCode", Op::Eq, "13020-000")).await,
        ["Ann"]
    );
    assert_eq!(
        names(&mut db, Where::new().and("Shipping.ZipCode", Op::Eq, "13020-000")).await,
        ["Bob"]
    );
    assert_eq!(
        names(&mut db, Where::new().and("shipping.city.state.abbreviation", Op::Eq, "SP")).await,
        ["Ann", "Bob"]
    );
}

#[tokio::test]
async fn ambiguous_and_unknown_names() {
    let (mut db, _) = setup(models()).await;

    let err = db
        .select::<Customer>(Where::new().and("zip_code", Op::Eq, "x"))
        .await
        .unwrap_err();
    assert!(err.is_ambiguous_name(), "{err}");

    let err = db
        .select::<Customer>(Where::new().and("Address.street", Op::Eq, "x"))
        .await
        .unwrap_err();
    assert!(err.is_ambiguous_name(), "{err}");

    let err = db
        .select::<Customer>(Where::new().and("nickname", Op::Eq, "x"))
        .await
        .unwrap_err();
    assert!(err.is_unresolved_name(), "{err}");
}

#[tokio::test]
async fn unique_names_on_joined_tables_resolve() {
    let (mut db, _) = setup(models()).await;
    seed_address(&mut db, "Rua A, 10", "13010-000").await;

    let by_bare = db
        .select::<City>(Where::new().and("abbreviation", Op::Eq, "SP"))
        .await
        .unwrap();
    let by_type = db
        .select::<City>(Where::new().and("State.abbreviation", Op::Eq, "SP"))
        .await
        .unwrap();

    assert_eq!(by_bare.len(), 1);
    assert_eq!(by_bare, by_type);
    assert_eq!(by_bare[0].state.name, "São Paulo");
}
