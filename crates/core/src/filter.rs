//! The `where` / `filter` query grammar accepted by list, count and bulk
//! mutation endpoints.
//!
//! Both arrive as URL-encoded JSON query parameters:
//!
//! ```text
//! ?where={"name":{"like":"North%"}}
//! ?filter={"where":{"city":"Oslo"},"order":"name DESC","limit":10,"skip":20}
//! ```
//!
//! Parsing resolves every property name against a static field registry
//! ([`FilterField`]) so the SQL layer never interpolates caller-supplied
//! identifiers. Values are converted to typed [`Scalar`]s up front, which
//! keeps type errors at the request boundary.

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::types::Timestamp;

/// Upper bound for `limit`. Larger values are clamped.
pub const MAX_LIMIT: i64 = 1_000;

// ---------------------------------------------------------------------------
// Field registry
// ---------------------------------------------------------------------------

/// The value type of a filterable column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Text,
    Timestamp,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Integer => write!(f, "integer"),
            FieldKind::Text => write!(f, "text"),
            FieldKind::Timestamp => write!(f, "timestamp"),
        }
    }
}

/// A property of an entity that may appear in a `where`, `order` or
/// `fields` clause.
pub trait FilterField: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Every filterable field of the entity.
    const FIELDS: &'static [Self];

    /// The primary key, used for the default ordering.
    const ID: Self;

    /// Relation names accepted by `include`.
    const RELATIONS: &'static [&'static str] = &[];

    /// JSON property name.
    fn name(&self) -> &'static str;

    /// SQL column name.
    fn column(&self) -> &'static str;

    fn kind(&self) -> FieldKind;

    fn from_name(name: &str) -> Option<Self> {
        Self::FIELDS.iter().copied().find(|f| f.name() == name)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    #[error("Malformed JSON in '{param}' parameter: {message}")]
    MalformedJson { param: &'static str, message: String },

    #[error("Invalid filter: {0}")]
    InvalidShape(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Type mismatch for field {field}: expected {expected}, got {got}")]
    TypeMismatch {
        field: &'static str,
        expected: FieldKind,
        got: &'static str,
    },

    #[error("Operator {op} is not supported for {kind} field {field}")]
    UnsupportedOperator {
        op: &'static str,
        field: &'static str,
        kind: FieldKind,
    },

    #[error("Unknown relation: {0}")]
    UnknownRelation(String),
}

// ---------------------------------------------------------------------------
// Predicate tree
// ---------------------------------------------------------------------------

/// A typed comparison operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Integer(i64),
    Text(String),
    Timestamp(Timestamp),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    NotLike,
    ILike,
    NotILike,
}

impl Comparison {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Neq => "<>",
            Comparison::Gt => ">",
            Comparison::Gte => ">=",
            Comparison::Lt => "<",
            Comparison::Lte => "<=",
            Comparison::Like => "LIKE",
            Comparison::NotLike => "NOT LIKE",
            Comparison::ILike => "ILIKE",
            Comparison::NotILike => "NOT ILIKE",
        }
    }

    fn is_pattern(&self) -> bool {
        matches!(
            self,
            Comparison::Like | Comparison::NotLike | Comparison::ILike | Comparison::NotILike
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition<F: FilterField> {
    Compare {
        field: F,
        op: Comparison,
        value: Scalar,
    },
    Null {
        field: F,
        negated: bool,
    },
    In {
        field: F,
        values: Vec<Scalar>,
        negated: bool,
    },
    Between {
        field: F,
        low: Scalar,
        high: Scalar,
    },
    /// Conjunction. Empty matches every row.
    All(Vec<Condition<F>>),
    /// Disjunction. Empty matches no row.
    Any(Vec<Condition<F>>),
}

/// A parsed `where` predicate: the conjunction of its conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct Where<F: FilterField> {
    conditions: Vec<Condition<F>>,
}

impl<F: FilterField> Default for Where<F> {
    fn default() -> Self {
        Self {
            conditions: Vec::new(),
        }
    }
}

impl<F: FilterField> Where<F> {
    /// Parse a `where` object.
    pub fn parse(value: &Value) -> Result<Self, FilterError> {
        Ok(Self {
            conditions: parse_conditions(value)?,
        })
    }

    /// Parse the raw `where` query parameter. Absent or blank means "match all".
    pub fn from_query(raw: Option<&str>) -> Result<Self, FilterError> {
        match parse_query_json("where", raw)? {
            Some(value) => Self::parse(&value),
            None => Ok(Self::default()),
        }
    }

    /// Add an equality condition, narrowing the predicate.
    pub fn and_eq(mut self, field: F, value: Scalar) -> Self {
        self.conditions.push(Condition::Compare {
            field,
            op: Comparison::Eq,
            value,
        });
        self
    }

    pub fn conditions(&self) -> &[Condition<F>] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

fn parse_conditions<F: FilterField>(value: &Value) -> Result<Vec<Condition<F>>, FilterError> {
    let object = value
        .as_object()
        .ok_or_else(|| FilterError::InvalidShape("where must be a JSON object".into()))?;

    let mut conditions = Vec::with_capacity(object.len());
    for (key, operand) in object {
        match key.as_str() {
            "and" => conditions.push(Condition::All(parse_group(key, operand)?)),
            "or" => conditions.push(Condition::Any(parse_group(key, operand)?)),
            name => {
                let field =
                    F::from_name(name).ok_or_else(|| FilterError::UnknownField(name.into()))?;
                parse_field(field, operand, &mut conditions)?;
            }
        }
    }
    Ok(conditions)
}

fn parse_group<F: FilterField>(key: &str, value: &Value) -> Result<Vec<Condition<F>>, FilterError> {
    let items = value
        .as_array()
        .ok_or_else(|| FilterError::InvalidShape(format!("'{key}' must be an array")))?;
    items
        .iter()
        .map(|item| parse_conditions(item).map(Condition::All))
        .collect()
}

fn parse_field<F: FilterField>(
    field: F,
    operand: &Value,
    out: &mut Vec<Condition<F>>,
) -> Result<(), FilterError> {
    let ops = match operand {
        Value::Null => {
            out.push(Condition::Null {
                field,
                negated: false,
            });
            return Ok(());
        }
        Value::Object(ops) => ops,
        scalar => {
            out.push(Condition::Compare {
                field,
                op: Comparison::Eq,
                value: to_scalar(field, scalar)?,
            });
            return Ok(());
        }
    };

    if ops.is_empty() {
        return Err(FilterError::InvalidShape(format!(
            "condition on '{}' has no operator",
            field.name()
        )));
    }

    for (op, value) in ops {
        let condition = match op.as_str() {
            "eq" | "neq" if value.is_null() => Condition::Null {
                field,
                negated: op == "neq",
            },
            "eq" => compare(field, Comparison::Eq, value)?,
            "neq" => compare(field, Comparison::Neq, value)?,
            "gt" => compare(field, Comparison::Gt, value)?,
            "gte" => compare(field, Comparison::Gte, value)?,
            "lt" => compare(field, Comparison::Lt, value)?,
            "lte" => compare(field, Comparison::Lte, value)?,
            "like" => compare(field, Comparison::Like, value)?,
            "nlike" => compare(field, Comparison::NotLike, value)?,
            "ilike" => compare(field, Comparison::ILike, value)?,
            "nilike" => compare(field, Comparison::NotILike, value)?,
            "inq" | "nin" => Condition::In {
                field,
                values: array_operand(op, value)?
                    .iter()
                    .map(|v| to_scalar(field, v))
                    .collect::<Result<_, _>>()?,
                negated: op == "nin",
            },
            "between" => match array_operand(op, value)? {
                [low, high] => Condition::Between {
                    field,
                    low: to_scalar(field, low)?,
                    high: to_scalar(field, high)?,
                },
                _ => {
                    return Err(FilterError::InvalidShape(
                        "'between' takes exactly two values".into(),
                    ))
                }
            },
            other => return Err(FilterError::UnknownOperator(other.into())),
        };
        out.push(condition);
    }
    Ok(())
}

fn compare<F: FilterField>(
    field: F,
    op: Comparison,
    value: &Value,
) -> Result<Condition<F>, FilterError> {
    if op.is_pattern() && field.kind() != FieldKind::Text {
        return Err(FilterError::UnsupportedOperator {
            op: op.as_sql(),
            field: field.name(),
            kind: field.kind(),
        });
    }
    Ok(Condition::Compare {
        field,
        op,
        value: to_scalar(field, value)?,
    })
}

fn array_operand<'v>(op: &str, value: &'v Value) -> Result<&'v [Value], FilterError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| FilterError::InvalidShape(format!("'{op}' takes an array")))
}

fn to_scalar<F: FilterField>(field: F, value: &Value) -> Result<Scalar, FilterError> {
    let mismatch = || FilterError::TypeMismatch {
        field: field.name(),
        expected: field.kind(),
        got: json_type(value),
    };

    match (field.kind(), value) {
        (FieldKind::Integer, Value::Number(n)) => {
            n.as_i64().map(Scalar::Integer).ok_or_else(mismatch)
        }
        (FieldKind::Integer, Value::String(s)) => {
            s.trim().parse().map(Scalar::Integer).map_err(|_| mismatch())
        }
        (FieldKind::Text, Value::String(s)) => Ok(Scalar::Text(s.clone())),
        (FieldKind::Timestamp, Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|ts| Scalar::Timestamp(ts.with_timezone(&Utc)))
            .map_err(|_| mismatch()),
        _ => Err(mismatch()),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn parse_query_json(param: &'static str, raw: Option<&str>) -> Result<Option<Value>, FilterError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => serde_json::from_str(text)
            .map(Some)
            .map_err(|e| FilterError::MalformedJson {
                param,
                message: e.to_string(),
            }),
    }
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy<F: FilterField> {
    pub field: F,
    pub direction: SortDirection,
}

/// A parsed `filter` object.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter<F: FilterField> {
    pub where_clause: Where<F>,
    pub order: Vec<OrderBy<F>>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Projection applied to serialized output. `None` keeps every field.
    pub fields: Option<Vec<F>>,
    /// Validated relation names. Not consulted when loading: locations
    /// always carry their departments and departments have no relations.
    pub include: Vec<&'static str>,
}

impl<F: FilterField> Default for Filter<F> {
    fn default() -> Self {
        Self {
            where_clause: Where::default(),
            order: Vec::new(),
            limit: None,
            offset: None,
            fields: None,
            include: Vec::new(),
        }
    }
}

impl<F: FilterField> Filter<F> {
    /// Parse a `filter` object.
    pub fn parse(value: &Value) -> Result<Self, FilterError> {
        let object = value
            .as_object()
            .ok_or_else(|| FilterError::InvalidShape("filter must be a JSON object".into()))?;

        let mut filter = Self::default();
        for (key, value) in object {
            match key.as_str() {
                "where" => filter.where_clause = Where::parse(value)?,
                "order" => filter.order = parse_order(value)?,
                "limit" => filter.limit = Some(non_negative(key, value)?.min(MAX_LIMIT)),
                "skip" | "offset" => filter.offset = Some(non_negative(key, value)?),
                "fields" => filter.fields = Some(parse_fields(value)?),
                "include" => filter.include = parse_include::<F>(value)?,
                other => {
                    return Err(FilterError::InvalidShape(format!(
                        "unknown filter key '{other}'"
                    )))
                }
            }
        }
        Ok(filter)
    }

    /// Parse the raw `filter` query parameter. Absent or blank yields the
    /// default (unconstrained) filter.
    pub fn from_query(raw: Option<&str>) -> Result<Self, FilterError> {
        match parse_query_json("filter", raw)? {
            Some(value) => Self::parse(&value),
            None => Ok(Self::default()),
        }
    }

    /// Parse a filter that must not carry a `where` clause (single-entity
    /// lookups).
    pub fn from_query_excluding_where(raw: Option<&str>) -> Result<Self, FilterError> {
        let Some(value) = parse_query_json("filter", raw)? else {
            return Ok(Self::default());
        };
        if value.get("where").is_some() {
            return Err(FilterError::InvalidShape(
                "'where' is not allowed in this filter".into(),
            ));
        }
        Self::parse(&value)
    }

    /// Ordering to apply, falling back to primary key ascending.
    pub fn order_or_default(&self) -> Vec<OrderBy<F>> {
        if self.order.is_empty() {
            vec![OrderBy {
                field: F::ID,
                direction: SortDirection::Asc,
            }]
        } else {
            self.order.clone()
        }
    }

    /// Apply the `fields` projection to a serialized entity or array of them.
    ///
    /// Keys that are not registered fields (e.g. included relations) are kept.
    pub fn project(&self, value: Value) -> Value {
        let Some(fields) = &self.fields else {
            return value;
        };
        match value {
            Value::Array(items) => {
                Value::Array(items.into_iter().map(|v| self.project(v)).collect())
            }
            Value::Object(mut map) => {
                map.retain(|key, _| F::from_name(key).map_or(true, |f| fields.contains(&f)));
                Value::Object(map)
            }
            other => other,
        }
    }
}

fn non_negative(key: &str, value: &Value) -> Result<i64, FilterError> {
    value
        .as_i64()
        .filter(|n| *n >= 0)
        .ok_or_else(|| FilterError::InvalidShape(format!("'{key}' must be a non-negative integer")))
}

fn parse_order<F: FilterField>(value: &Value) -> Result<Vec<OrderBy<F>>, FilterError> {
    match value {
        Value::String(clause) => Ok(vec![parse_order_clause(clause)?]),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(clause) => parse_order_clause(clause),
                _ => Err(FilterError::InvalidShape(
                    "'order' entries must be strings".into(),
                )),
            })
            .collect(),
        _ => Err(FilterError::InvalidShape(
            "'order' must be a string or an array of strings".into(),
        )),
    }
}

fn parse_order_clause<F: FilterField>(clause: &str) -> Result<OrderBy<F>, FilterError> {
    let mut parts = clause.split_whitespace();
    let name = parts
        .next()
        .ok_or_else(|| FilterError::InvalidShape("empty 'order' clause".into()))?;
    let field = F::from_name(name).ok_or_else(|| FilterError::UnknownField(name.into()))?;

    let direction = match parts.next() {
        None => SortDirection::Asc,
        Some(dir) if dir.eq_ignore_ascii_case("asc") => SortDirection::Asc,
        Some(dir) if dir.eq_ignore_ascii_case("desc") => SortDirection::Desc,
        Some(dir) => {
            return Err(FilterError::InvalidShape(format!(
                "invalid sort direction '{dir}'"
            )))
        }
    };
    if parts.next().is_some() {
        return Err(FilterError::InvalidShape(format!(
            "invalid 'order' clause '{clause}'"
        )));
    }
    Ok(OrderBy { field, direction })
}

fn parse_fields<F: FilterField>(value: &Value) -> Result<Vec<F>, FilterError> {
    let lookup =
        |name: &str| F::from_name(name).ok_or_else(|| FilterError::UnknownField(name.into()));

    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .ok_or_else(|| {
                        FilterError::InvalidShape("'fields' entries must be strings".into())
                    })
                    .and_then(lookup)
            })
            .collect(),
        Value::Object(map) => {
            let flags = field_flags(map, lookup)?;
            if flags.iter().any(|(_, on)| *on) {
                Ok(flags.into_iter().filter(|(_, on)| *on).map(|(f, _)| f).collect())
            } else {
                Ok(F::FIELDS
                    .iter()
                    .copied()
                    .filter(|f| !flags.iter().any(|(excluded, _)| excluded == f))
                    .collect())
            }
        }
        _ => Err(FilterError::InvalidShape(
            "'fields' must be an array or an object".into(),
        )),
    }
}

fn field_flags<F: FilterField>(
    map: &Map<String, Value>,
    lookup: impl Fn(&str) -> Result<F, FilterError>,
) -> Result<Vec<(F, bool)>, FilterError> {
    map.iter()
        .map(|(name, flag)| {
            let on = flag.as_bool().ok_or_else(|| {
                FilterError::InvalidShape(format!("'fields.{name}' must be a boolean"))
            })?;
            Ok((lookup(name)?, on))
        })
        .collect()
}

fn parse_include<F: FilterField>(value: &Value) -> Result<Vec<&'static str>, FilterError> {
    let items: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        single => vec![single],
    };

    items
        .into_iter()
        .map(|item| {
            let name = match item {
                Value::String(name) => name.as_str(),
                Value::Object(obj) => obj.get("relation").and_then(Value::as_str).ok_or_else(|| {
                    FilterError::InvalidShape("'include' objects need a 'relation' string".into())
                })?,
                _ => {
                    return Err(FilterError::InvalidShape(
                        "'include' entries must be strings or objects".into(),
                    ))
                }
            };
            F::RELATIONS
                .iter()
                .copied()
                .find(|r| *r == name)
                .ok_or_else(|| FilterError::UnknownRelation(name.into()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Field {
        Id,
        Name,
        CreatedAt,
    }

    impl FilterField for Field {
        const FIELDS: &'static [Self] = &[Field::Id, Field::Name, Field::CreatedAt];
        const ID: Self = Field::Id;
        const RELATIONS: &'static [&'static str] = &["children"];

        fn name(&self) -> &'static str {
            match self {
                Field::Id => "id",
                Field::Name => "name",
                Field::CreatedAt => "created_at",
            }
        }

        fn column(&self) -> &'static str {
            self.name()
        }

        fn kind(&self) -> FieldKind {
            match self {
                Field::Id => FieldKind::Integer,
                Field::Name => FieldKind::Text,
                Field::CreatedAt => FieldKind::Timestamp,
            }
        }
    }

    fn parse_where(value: Value) -> Result<Where<Field>, FilterError> {
        Where::parse(&value)
    }

    // -- Where ----------------------------------------------------------------

    #[test]
    fn bare_value_is_equality() {
        let w = parse_where(json!({"name": "Oslo"})).unwrap();
        assert_eq!(
            w.conditions(),
            &[Condition::Compare {
                field: Field::Name,
                op: Comparison::Eq,
                value: Scalar::Text("Oslo".into()),
            }]
        );
    }

    #[test]
    fn null_value_is_null_check() {
        let w = parse_where(json!({"name": null, "id": {"neq": null}})).unwrap();
        assert_eq!(
            w.conditions(),
            &[
                Condition::Null {
                    field: Field::Id,
                    negated: true
                },
                Condition::Null {
                    field: Field::Name,
                    negated: false
                },
            ]
        );
    }

    #[test]
    fn integer_field_accepts_numeric_string() {
        let w = parse_where(json!({"id": {"gte": "7"}})).unwrap();
        assert_matches!(
            w.conditions(),
            [Condition::Compare {
                op: Comparison::Gte,
                value: Scalar::Integer(7),
                ..
            }]
        );
    }

    #[test]
    fn timestamp_field_parses_rfc3339() {
        let w = parse_where(json!({"created_at": {"lt": "2026-01-01T00:00:00Z"}})).unwrap();
        assert_matches!(
            w.conditions(),
            [Condition::Compare {
                value: Scalar::Timestamp(_),
                ..
            }]
        );
    }

    #[test]
    fn and_or_nest() {
        let w = parse_where(json!({
            "or": [{"name": "A"}, {"and": [{"id": {"gt": 1}}, {"id": {"lt": 5}}]}]
        }))
        .unwrap();
        assert_matches!(w.conditions(), [Condition::Any(branches)] if branches.len() == 2);
    }

    #[test]
    fn inq_and_between() {
        let w = parse_where(json!({"id": {"inq": [1, 2, 3]}, "name": {"between": ["a", "m"]}}))
            .unwrap();
        assert_matches!(
            w.conditions(),
            [
                Condition::In { values, negated: false, .. },
                Condition::Between { .. },
            ] if values.len() == 3
        );
    }

    #[test]
    fn between_requires_two_values() {
        let err = parse_where(json!({"id": {"between": [1]}})).unwrap_err();
        assert_matches!(err, FilterError::InvalidShape(_));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = parse_where(json!({"salary": 1})).unwrap_err();
        assert_eq!(err, FilterError::UnknownField("salary".into()));
    }

    #[test]
    fn unknown_operator_is_rejected() {
        let err = parse_where(json!({"name": {"regexp": "^a"}})).unwrap_err();
        assert_eq!(err, FilterError::UnknownOperator("regexp".into()));
    }

    #[test]
    fn type_mismatch_is_rejected() {
        let err = parse_where(json!({"id": "seven"})).unwrap_err();
        assert_matches!(
            err,
            FilterError::TypeMismatch {
                field: "id",
                expected: FieldKind::Integer,
                got: "string"
            }
        );
    }

    #[test]
    fn like_on_integer_is_rejected() {
        let err = parse_where(json!({"id": {"like": "1%"}})).unwrap_err();
        assert_matches!(err, FilterError::UnsupportedOperator { field: "id", .. });
    }

    #[test]
    fn where_must_be_object() {
        let err = parse_where(json!([1, 2])).unwrap_err();
        assert_matches!(err, FilterError::InvalidShape(_));
    }

    #[test]
    fn where_from_query_handles_absent_and_malformed() {
        assert!(Where::<Field>::from_query(None).unwrap().is_empty());
        assert!(Where::<Field>::from_query(Some("  ")).unwrap().is_empty());
        let err = Where::<Field>::from_query(Some("{name:")).unwrap_err();
        assert_matches!(err, FilterError::MalformedJson { param: "where", .. });
    }

    #[test]
    fn and_eq_appends_condition() {
        let w = Where::<Field>::default().and_eq(Field::Id, Scalar::Integer(3));
        assert_eq!(w.conditions().len(), 1);
    }

    // -- Filter ---------------------------------------------------------------

    #[test]
    fn filter_parses_all_keys() {
        let filter = Filter::<Field>::parse(&json!({
            "where": {"name": {"ilike": "%north%"}},
            "order": ["name DESC", "id"],
            "limit": 5,
            "skip": 10,
            "fields": ["id", "name"],
            "include": [{"relation": "children"}],
        }))
        .unwrap();

        assert_eq!(filter.where_clause.conditions().len(), 1);
        assert_eq!(
            filter.order,
            vec![
                OrderBy {
                    field: Field::Name,
                    direction: SortDirection::Desc
                },
                OrderBy {
                    field: Field::Id,
                    direction: SortDirection::Asc
                },
            ]
        );
        assert_eq!(filter.limit, Some(5));
        assert_eq!(filter.offset, Some(10));
        assert_eq!(filter.fields, Some(vec![Field::Id, Field::Name]));
        assert_eq!(filter.include, vec!["children"]);
    }

    #[test]
    fn limit_is_clamped() {
        let filter = Filter::<Field>::parse(&json!({"limit": 50_000})).unwrap();
        assert_eq!(filter.limit, Some(MAX_LIMIT));
    }

    #[test]
    fn negative_offset_is_rejected() {
        let err = Filter::<Field>::parse(&json!({"offset": -1})).unwrap_err();
        assert_matches!(err, FilterError::InvalidShape(_));
    }

    #[test]
    fn unknown_filter_key_is_rejected() {
        let err = Filter::<Field>::parse(&json!({"page": 2})).unwrap_err();
        assert_matches!(err, FilterError::InvalidShape(_));
    }

    #[test]
    fn unknown_relation_is_rejected() {
        let err = Filter::<Field>::parse(&json!({"include": "parents"})).unwrap_err();
        assert_eq!(err, FilterError::UnknownRelation("parents".into()));
    }

    #[test]
    fn bad_sort_direction_is_rejected() {
        let err = Filter::<Field>::parse(&json!({"order": "name SIDEWAYS"})).unwrap_err();
        assert_matches!(err, FilterError::InvalidShape(_));
    }

    #[test]
    fn default_order_is_id_ascending() {
        let filter = Filter::<Field>::default();
        assert_eq!(
            filter.order_or_default(),
            vec![OrderBy {
                field: Field::Id,
                direction: SortDirection::Asc
            }]
        );
    }

    #[test]
    fn excluding_where_rejects_where() {
        let err =
            Filter::<Field>::from_query_excluding_where(Some(r#"{"where":{"id":1}}"#)).unwrap_err();
        assert_matches!(err, FilterError::InvalidShape(_));
        let raw = r#"{"include":"children"}"#;
        assert!(Filter::<Field>::from_query_excluding_where(Some(raw)).is_ok());
    }

    #[test]
    fn fields_object_with_exclusions() {
        let filter = Filter::<Field>::parse(&json!({"fields": {"created_at": false}})).unwrap();
        assert_eq!(filter.fields, Some(vec![Field::Id, Field::Name]));
    }

    #[test]
    fn project_keeps_selected_fields_and_relations() {
        let filter = Filter::<Field>::parse(&json!({"fields": ["name"]})).unwrap();
        let projected = filter.project(json!([
            {"id": 1, "name": "A", "created_at": "x", "children": []}
        ]));
        assert_eq!(projected, json!([{"name": "A", "children": []}]));
    }

    #[test]
    fn project_without_fields_is_identity() {
        let value = json!({"id": 1, "name": "A"});
        assert_eq!(Filter::<Field>::default().project(value.clone()), value);
    }
}
