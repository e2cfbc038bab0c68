
mod canned_driver;
pub use canned_driver::CannedDriver;

mod logging_driver;
pub use logging_driver::{ExecLog, LoggingDriver};

use joinery::{db::Builder, Db, Params};
use joinery_driver_sqlite::Sqlite;
use models::*;

/// A builder with every test model registered.
pub fn models() -> Builder {
    let mut builder = Db::builder();
    builder
        .register::<Customer>()
        .register::<User>()
        .register::<Profile>()
        .register::<Enrollment>()
        .register::<Tag>();
    builder
}

/// Connects `builder` to a fresh in-memory database with the test tables
/// created.
pub async fn setup(mut builder: Builder) -> (Db, ExecLog) {
    init_tracing();

    let driver = LoggingDriver::new(Sqlite::in_memory());
    let log = driver.log();
    let mut db = builder.build(driver).await.unwrap();

    for ddl in SCHEMA {
        db.execute_non_query(ddl, Params::new(), None).await.unwrap();
    }

    log.clear();
    (db, log)
}

/// Installs a subscriber honoring `RUST_LOG`. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Inserts `São Paulo / SP` and one address in it, returning the address.
pub async fn seed_address(db: &mut Db, street: &str, zip_code: &str) -> Address {
    let mut state = State {
        name: "São Paulo".to_string(),
        abbreviation: "SP".to_string(),
        ..State::default()
    };
    db.insert(&mut state).await.unwrap();

    let mut city = City {
        name: "Campinas".to_string(),
        state,
        ..City::default()
    };
    db.insert(&mut city).await.unwrap();

    let mut address = Address {
        street: street.to_string(),
        zip_code: zip_code.to_string(),
        city,
        ..Address::default()
    };
    db.insert(&mut address).await.unwrap();

    address
}

/// A customer shipping to `shipping`, with no billing address.
pub fn customer(name: &str, balance: f64, shipping: &Address) -> Customer {
    Customer {
        name: name.to_string(),
        balance,
        shipping: shipping.clone(),
        ..Customer::default()
    }
}
