use super::{ColumnRef, Comma, Formatter, Placeholder, Serializer, ToSql};

use joinery_core::{
    mapping::MappingId,
    stmt::{Condition, Conjunction, Op, Value, Where},
    Error, MappingContext, Result,
};

/// A compiled filter: groups of `AND`ed clauses joined by `OR`.
///
/// Each `OR` closes the group accumulated so far, so the clauses of
/// `a AND b OR c` render as `(a AND b) OR (c)`.
#[derive(Debug)]
pub(super) struct Predicate<'a> {
    groups: Vec<Vec<Clause<'a>>>,
}

#[derive(Debug)]
enum Clause<'a> {
    Compare {
        column: ColumnRef<'a>,
        op: Op,
        operand: Placeholder,
    },
    Null {
        column: ColumnRef<'a>,
        negated: bool,
    },
    Like {
        column: ColumnRef<'a>,
        negated: bool,
        leading: bool,
        trailing: bool,
        operand: Placeholder,
    },
    In {
        column: ColumnRef<'a>,
        negated: bool,
        operands: Vec<Placeholder>,
    },
    Between {
        column: ColumnRef<'a>,
        low: Placeholder,
        high: Placeholder,
    },

    /// Stand-in for an `IN` with no arguments.
    Constant(bool),
}

impl<'a> Serializer<'a> {
    /// Compiles a filter against `cx`. When `qualify` is set, columns are
    /// prefixed with their table alias.
    pub(super) fn predicate<'c>(
        &self,
        cx: &MappingContext<'c>,
        filter: &Where,
        qualify: bool,
    ) -> Result<Predicate<'c>> {
        let mut groups: Vec<Vec<Clause<'c>>> = vec![];

        for condition in filter {
            let id = cx.resolve(&condition.name)?;
            let clause = self.clause(cx, id, condition, qualify)?;

            match (condition.conjunction, groups.last_mut()) {
                (Conjunction::And, Some(group)) => group.push(clause),
                _ => groups.push(vec![clause]),
            }
        }

        Ok(Predicate { groups })
    }

    pub(super) fn column_ref<'c>(
        &self,
        cx: &MappingContext<'c>,
        id: MappingId,
        qualify: bool,
    ) -> ColumnRef<'c> {
        ColumnRef {
            table: qualify.then(|| cx.alias(cx.mapping(id).node)),
            column: &cx.column(id).column,
        }
    }

    fn clause<'c>(
        &self,
        cx: &MappingContext<'c>,
        id: MappingId,
        condition: &Condition,
        qualify: bool,
    ) -> Result<Clause<'c>> {
        let descriptor = cx.column(id);
        let column = self.column_ref(cx, id, qualify);
        let name = format!("{}_{}", column.param_name(), condition.index);
        let op = condition.op;

        match (&condition.value, op) {
            (Value::Null, Op::Is | Op::Eq) => Ok(Clause::Null {
                column,
                negated: false,
            }),
            (Value::Null, Op::IsNot | Op::Ne) => Ok(Clause::Null {
                column,
                negated: true,
            }),
            (Value::Null, op) => Err(Error::invalid_filter(format!(
                "`{}` cannot be compared to NULL with {}",
                condition.name,
                op.as_sql()
            ))),
            (_, Op::Is | Op::IsNot) => Err(Error::invalid_filter(format!(
                "`{}`: {} only accepts NULL",
                condition.name,
                op.as_sql()
            ))),
            (Value::List(items), Op::In | Op::NotIn) => {
                let negated = op == Op::NotIn;

                if items.is_empty() {
                    return self.empty_in(condition, negated);
                }

                let operands = items
                    .iter()
                    .enumerate()
                    .map(|(k, item)| {
                        Ok(Placeholder::new(
                            format!("{name}_{}", k + 1),
                            descriptor.encode(item.clone())?,
                        ))
                    })
                    .collect::<Result<_>>()?;

                Ok(Clause::In {
                    column,
                    negated,
                    operands,
                })
            }
            (_, Op::In | Op::NotIn) => Err(Error::invalid_filter(format!(
                "`{}`: {} requires a list of arguments",
                condition.name,
                op.as_sql()
            ))),
            (Value::List(items), Op::Between) => {
                let [low, high] = &items[..] else {
                    return Err(Error::invalid_filter(format!(
                        "`{}`: BETWEEN requires exactly two arguments, got {}",
                        condition.name,
                        items.len()
                    )));
                };

                Ok(Clause::Between {
                    column,
                    low: Placeholder::new(format!("{name}_1"), descriptor.encode(low.clone())?),
                    high: Placeholder::new(format!("{name}_2"), descriptor.encode(high.clone())?),
                })
            }
            (_, Op::Between) => Err(Error::invalid_filter(format!(
                "`{}`: BETWEEN requires a list of two arguments",
                condition.name
            ))),
            (Value::List(_), op) => Err(Error::invalid_filter(format!(
                "`{}`: {} does not accept a list",
                condition.name,
                op.as_sql()
            ))),
            (Value::String(pattern), Op::Like | Op::NotLike) => {
                let leading = pattern.starts_with('%');
                let trailing = pattern.len() > 1 && pattern.ends_with('%');
                let bare = pattern.trim_matches('%').to_string();

                Ok(Clause::Like {
                    column,
                    negated: op == Op::NotLike,
                    leading,
                    trailing,
                    operand: Placeholder::new(name, Value::String(bare)),
                })
            }
            (_, Op::Like | Op::NotLike) => Err(Error::invalid_filter(format!(
                "`{}`: {} requires a text pattern",
                condition.name,
                op.as_sql()
            ))),
            (value, op) => Ok(Clause::Compare {
                column,
                op,
                operand: Placeholder::new(name, descriptor.encode(value.clone())?),
            }),
        }
    }

    fn empty_in<'c>(&self, condition: &Condition, negated: bool) -> Result<Clause<'c>> {
        if !self.options.handle_empty_in_args {
            return Err(Error::invalid_filter(format!(
                "`{}`: {} requires at least one argument",
                condition.name,
                condition.op.as_sql()
            )));
        }

        tracing::warn!(
            target: "joinery::sql",
            name = %condition.name,
            op = condition.op.as_sql(),
            "empty argument list rewritten to a constant predicate",
        );

        Ok(Clause::Constant(negated))
    }
}

impl ToSql for Predicate<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        if self.groups.is_empty() {
            fmt!(f, "(1 = 1)");
            return;
        }

        fmt!(f, "(");
        let mut s = "";
        for group in self.groups {
            fmt!(f, s);
            let mut and = "";
            for clause in group {
                fmt!(f, and clause);
                and = " AND ";
            }
            s = ") OR (";
        }
        fmt!(f, ")");
    }
}

impl ToSql for Clause<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            Clause::Compare {
                column,
                op,
                operand,
            } => fmt!(f, &column " " op.as_sql() " " operand),
            Clause::Null { column, negated } => {
                let test = if negated { " IS NOT NULL" } else { " IS NULL" };
                fmt!(f, &column test);
            }
            Clause::Like {
                column,
                negated,
                leading,
                trailing,
                operand,
            } => {
                let op = if negated { " NOT LIKE " } else { " LIKE " };
                let concat = f.serializer.flavor.concat();
                fmt!(f, &column op);
                if leading {
                    fmt!(f, "'%'" concat);
                }
                fmt!(f, operand);
                if trailing {
                    fmt!(f, concat "'%'");
                }
            }
            Clause::In {
                column,
                negated,
                operands,
            } => {
                let op = if negated { " NOT IN " } else { " IN " };
                fmt!(f, &column op "(" Comma(operands) ")");
            }
            Clause::Between { column, low, high } => {
                fmt!(f, &column " BETWEEN " low " AND " high);
            }
            Clause::Constant(true) => fmt!(f, "1 = 1"),
            Clause::Constant(false) => fmt!(f, "1 = 0"),
        }
    }
}
