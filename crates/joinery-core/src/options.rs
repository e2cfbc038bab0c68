use crate::driver::IsolationLevel;

use heck::{ToSnakeCase, ToTitleCase, ToUpperCamelCase};
use serde::Deserialize;

/// Settings that drive naming conventions, value handling and transaction
/// behavior for one database handle.
///
/// Every field has a default, so a partial configuration file deserializes
/// into a complete set of options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Schema used to qualify table names when an entity does not declare one.
    pub schema: String,

    /// Convention used to derive table and column names.
    pub naming_style: NamingStyle,

    /// Name an implicit `id` key column `id_<table>`.
    pub use_composed_id: bool,

    /// Name foreign key columns `id_<referenced table>` when no explicit
    /// column name is given.
    pub infer_composed_id_in_foreign_keys: bool,

    /// Treat an implicit `id` key as generated by the database on insert.
    pub implicit_key_auto_generated: bool,

    /// Trim leading and trailing whitespace from strings read back.
    pub auto_trim_strings: bool,

    /// Rewrite `IN ()` / `NOT IN ()` with no arguments into constant
    /// predicates instead of failing.
    pub handle_empty_in_args: bool,

    /// Roll back the open transaction when an operation fails.
    pub rollback_on_error: bool,

    /// Isolation level used by `Db::begin`.
    pub isolation_level: IsolationLevel,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            schema: "dbo".to_string(),
            naming_style: NamingStyle::LowerCaseUnderscored,
            use_composed_id: true,
            infer_composed_id_in_foreign_keys: true,
            implicit_key_auto_generated: false,
            auto_trim_strings: false,
            handle_empty_in_args: false,
            rollback_on_error: false,
            isolation_level: IsolationLevel::ReadCommitted,
        }
    }
}

/// How type and field names become table and column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStyle {
    /// `ApplicationUser` -> `application_user`
    #[default]
    LowerCaseUnderscored,

    /// `ApplicationUser` -> `applicationuser`
    LowerCase,

    /// `ApplicationUser` -> `Application_User`
    PascalCaseUnderscored,

    /// `ApplicationUser` -> `ApplicationUser`
    PascalCase,
}

impl NamingStyle {
    pub fn apply(self, name: &str) -> String {
        match self {
            NamingStyle::LowerCaseUnderscored => name.to_snake_case(),
            NamingStyle::LowerCase => name.to_snake_case().replace('_', ""),
            NamingStyle::PascalCaseUnderscored => name.to_title_case().replace(' ', "_"),
            NamingStyle::PascalCase => name.to_upper_camel_case(),
        }
    }
}
