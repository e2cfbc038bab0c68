use joinery::{Aggregate, Db, Op, Value, Where};
use pretty_assertions::assert_eq;
use tests::{customer, models, models::*, seed_address, setup};

/// Balances 1, 3, 5 and 7; only the last customer has characteristics.
async fn seed(db: &mut Db) {
    let shipping = seed_address(db, "Rua A, 10", "13010-000").await;

    for balance in [1.0, 3.0, 5.0, 7.0] {
        let mut customer = customer(&format!("c{balance}"), balance, &shipping);
        if balance == 7.0 {
            customer.characteristics = Some(Characteristics {
                height: 1.8,
                tags: vec![],
            });
        }
        db.insert(&mut customer).await.unwrap();
    }
}

fn without_characteristics() -> Where {
    Where::new().and("characteristics", Op::Eq, Value::Null)
}

#[tokio::test]
async fn aggregates_over_a_filtered_subset() {
    let (mut db, log) = setup(models()).await;
    seed(&mut db).await;

    let sum: f64 = db
        .aggregate::<Customer, _>(Aggregate::sum("Balance"), without_characteristics())
        .await
        .unwrap();
    assert_eq!(sum, 9.0);
    assert_eq!(
        log.last().sql,
        "SELECT SUM([balance]) FROM [customer] WHERE ([characteristics] IS NULL);"
    );

    let avg: f64 = db
        .aggregate::<Customer, _>(Aggregate::avg("Balance"), without_characteristics())
        .await
        .unwrap();
    assert_eq!(avg, 3.0);

    let max: f64 = db
        .aggregate::<Customer, _>(Aggregate::max("Balance"), without_characteristics())
        .await
        .unwrap();
    assert_eq!(max, 5.0);

    let min: f64 = db
        .aggregate::<Customer, _>(Aggregate::min("Balance"), without_characteristics())
        .await
        .unwrap();
    assert_eq!(min, 1.0);

    let count: i64 = db
        .aggregate::<Customer, _>(Aggregate::count("Id"), Where::new())
        .await
        .unwrap();
    assert_eq!(count, 4);
}

#[tokio::test]
async fn aggregates_over_no_rows() {
    let (mut db, _) = setup(models()).await;
    seed(&mut db).await;

    let nobody = || Where::new().and("name", Op::Eq, "nobody");

    let count: i64 = db
        .aggregate::<Customer, _>(Aggregate::count("Id"), nobody())
        .await
        .unwrap();
    assert_eq!(count, 0);

    let sum: f64 = db
        .aggregate::<Customer, _>(Aggregate::sum("balance"), nobody())
        .await
        .unwrap();
    assert_eq!(sum, 0.0);

    let max: Option<f64> = db
        .aggregate::<Customer, _>(Aggregate::max("balance"), nobody())
        .await
        .unwrap();
    assert_eq!(max, None);
}

#[tokio::test]
async fn aggregates_join_only_when_needed() {
    let (mut db, log) = setup(models()).await;
    seed(&mut db).await;

    let sum: f64 = db
        .aggregate::<Customer, _>(
            Aggregate::sum("balance"),
            Where::new().and("shipping.city.name", Op::Eq, "Campinas"),
        )
        .await
        .unwrap();
    assert_eq!(sum, 16.0);

    let sql = log.last().sql;
    assert!(sql.starts_with("SELECT SUM(t1.[balance]) FROM [customer] AS t1 "), "{sql}");
    assert!(sql.contains("WHERE (t6.[name] = @t6_name_1)"), "{sql}");
}
