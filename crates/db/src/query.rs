//! Translation of parsed filters into SQL clauses.
//!
//! Clauses are appended to a [`QueryBuilder`]. Column names come from the
//! static [`FilterField`] registries and every value is a bound parameter.

use ems_core::filter::{Condition, Filter, FilterField, Scalar, Where};
use sqlx::{Postgres, QueryBuilder};

/// Append ` WHERE ...` for a non-empty predicate.
pub fn push_where<'args, F: FilterField>(
    qb: &mut QueryBuilder<'args, Postgres>,
    where_clause: &Where<F>,
) {
    if where_clause.is_empty() {
        return;
    }
    qb.push(" WHERE ");
    push_joined(qb, where_clause.conditions(), " AND ", "TRUE");
}

/// Append ` ORDER BY ...` and, when present, ` LIMIT` / ` OFFSET`.
pub fn push_order_and_page<'args, F: FilterField>(
    qb: &mut QueryBuilder<'args, Postgres>,
    filter: &Filter<F>,
) {
    qb.push(" ORDER BY ");
    for (i, order) in filter.order_or_default().iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        qb.push(order.field.column())
            .push(" ")
            .push(order.direction.as_sql());
    }
    if let Some(limit) = filter.limit {
        qb.push(" LIMIT ").push_bind(limit);
    }
    if let Some(offset) = filter.offset {
        qb.push(" OFFSET ").push_bind(offset);
    }
}

fn push_joined<'args, F: FilterField>(
    qb: &mut QueryBuilder<'args, Postgres>,
    conditions: &[Condition<F>],
    separator: &str,
    empty: &str,
) {
    if conditions.is_empty() {
        qb.push(empty);
        return;
    }
    qb.push("(");
    for (i, condition) in conditions.iter().enumerate() {
        if i > 0 {
            qb.push(separator);
        }
        push_condition(qb, condition);
    }
    qb.push(")");
}

fn push_condition<'args, F: FilterField>(
    qb: &mut QueryBuilder<'args, Postgres>,
    condition: &Condition<F>,
) {
    match condition {
        Condition::Compare { field, op, value } => {
            qb.push(field.column()).push(" ").push(op.as_sql()).push(" ");
            push_scalar(qb, value);
        }
        Condition::Null { field, negated } => {
            qb.push(field.column())
                .push(if *negated { " IS NOT NULL" } else { " IS NULL" });
        }
        Condition::In {
            field,
            values,
            negated,
        } => {
            if values.is_empty() {
                // `x IN ()` is not valid SQL.
                qb.push(if *negated { "TRUE" } else { "FALSE" });
                return;
            }
            qb.push(field.column())
                .push(if *negated { " NOT IN (" } else { " IN (" });
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    qb.push(", ");
                }
                push_scalar(qb, value);
            }
            qb.push(")");
        }
        Condition::Between { field, low, high } => {
            qb.push(field.column()).push(" BETWEEN ");
            push_scalar(qb, low);
            qb.push(" AND ");
            push_scalar(qb, high);
        }
        Condition::All(children) => push_joined(qb, children, " AND ", "TRUE"),
        Condition::Any(children) => push_joined(qb, children, " OR ", "FALSE"),
    }
}

fn push_scalar<'args>(qb: &mut QueryBuilder<'args, Postgres>, value: &Scalar) {
    match value {
        Scalar::Integer(n) => qb.push_bind(*n),
        Scalar::Text(s) => qb.push_bind(s.clone()),
        Scalar::Timestamp(ts) => qb.push_bind(*ts),
    };
}
