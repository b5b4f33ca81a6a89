//! Lowering: `EndpointConfig` to the query AST.
//!
//! This is the only place configuration text becomes AST nodes, so it is
//! where the identifier gate sits. Incomplete entries are skipped silently;
//! entries with unsafe identifiers are skipped and reported; entries with
//! recoverable problems are kept in best-effort form and reported.

use crate::ast::*;
use crate::endpoint::{non_empty, Aggregation, EndpointConfig, FieldSpec, FilterSpec, LogicalOp, ValueType};
use crate::error::ValidationError;
use crate::parser::{parse_function, parse_list, parse_param_ref};
use tracing::{debug, warn};

/// Result of lowering: the AST plus every problem found on the way.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Lowered {
    pub endpoint: Endpoint,
    pub errors: Vec<ValidationError>,
}

/// Lower a configuration snapshot.
pub fn lower(config: &EndpointConfig) -> Lowered {
    let mut lowerer = Lowerer {
        config,
        errors: Vec::new(),
    };

    let from = lowerer.from_clause();
    let projection = lowerer.projection();
    let joins = lowerer.joins(from.as_ref());
    let filter = lowerer.filters();
    let group_by = group_by(&projection);
    let order_by = lowerer.order_by();
    let limit = lowerer.limit();
    let params = lowerer.params();

    let query = Query {
        distinct: config.enable_distinct,
        projection,
        from,
        joins,
        filter,
        group_by,
        order_by,
        limit,
    };

    debug!(
        table = %config.primary_table,
        projections = query.projection.len(),
        joins = query.joins.len(),
        filters = query.filter.comparisons().len(),
        sorts = query.order_by.len(),
        errors = lowerer.errors.len(),
        "Lowered endpoint configuration"
    );

    Lowered {
        endpoint: Endpoint {
            method: config.method,
            path: config.path.trim().to_string(),
            query,
            params,
            pagination: config.pagination.clone(),
            allow_custom_sorting: config.allow_custom_sorting,
            allow_field_selection: config.allow_field_selection,
        },
        errors: lowerer.errors,
    }
}

struct Lowerer<'a> {
    config: &'a EndpointConfig,
    errors: Vec<ValidationError>,
}

impl Lowerer<'_> {
    fn report(&mut self, error: ValidationError) {
        warn!(field = %error.field, "{}", error.message);
        self.errors.push(error);
    }

    /// Keep the value, or record the error and drop it.
    fn check<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                self.report(e);
                None
            }
        }
    }

    fn from_clause(&mut self) -> Option<TableRef> {
        let table = self.config.primary_table.trim();
        if table.is_empty() {
            return None;
        }
        let name = self.check(Ident::parse("primaryTable", table))?;
        // A bad alias drops the alias, not the table.
        let alias = match non_empty(&self.config.primary_table_alias) {
            Some(a) => self.check(Ident::parse("primaryTableAlias", a)),
            None => None,
        };
        Some(TableRef { name, alias })
    }

    /// Output names must be unique: a response row cannot hold two `id` keys.
    fn projection(&mut self) -> Vec<Projection> {
        let config = self.config;
        let mut projection: Vec<Projection> = Vec::new();
        for (i, spec) in config.selected_fields.iter().enumerate() {
            if !spec.enabled {
                continue;
            }
            let Some(field) = self.field(i, spec) else {
                continue;
            };
            let name = field.output_name();
            if projection.iter().any(|p| p.output_name() == name) {
                self.report(ValidationError::new(
                    format!("selectedFields[{i}].alias"),
                    format!("output name '{}' is already used by another field; add an alias", name),
                ));
                continue;
            }
            projection.push(field);
        }
        projection
    }

    fn field(&mut self, i: usize, field: &FieldSpec) -> Option<Projection> {
        let alias = match non_empty(&field.alias) {
            Some(a) => Some(self.check(Ident::parse(&format!("selectedFields[{i}].alias"), a))?),
            None => None,
        };

        if let Some(raw) = non_empty(&field.expression) {
            return Some(Projection {
                expr: Expression::Raw(raw.to_string()),
                alias,
            });
        }

        let column = field.column.trim();
        let path = format!("selectedFields[{i}].column");
        let structured = match (field.aggregation, column.is_empty()) {
            (Aggregation::Count, true) => Structured::Aggregate {
                func: Aggregation::Count,
                column: None,
            },
            (_, true) => return None,
            (Aggregation::None, false) => Structured::Column(self.check(ColumnRef::parse(&path, column))?),
            (func, false) => Structured::Aggregate {
                func,
                column: Some(self.check(ColumnRef::parse(&path, column))?),
            },
        };

        Some(Projection {
            expr: Expression::Structured(structured),
            alias,
        })
    }

    fn joins(&mut self, from: Option<&TableRef>) -> Vec<Join> {
        let config = self.config;
        let mut joins = Vec::new();
        for (i, spec) in config.joins.iter().enumerate() {
            if !spec.enabled || !spec.is_complete() {
                continue;
            }
            let table = self.check(Ident::parse(&format!("joins[{i}].table"), &spec.table));
            let alias = match non_empty(&spec.alias) {
                Some(a) => self.check(Ident::parse(&format!("joins[{i}].alias"), a)).map(Some),
                None => Some(None),
            };
            let left = self.check(Ident::parse(&format!("joins[{i}].leftColumn"), &spec.left_column));
            let right = self.check(Ident::parse(&format!("joins[{i}].rightColumn"), &spec.right_column));

            let (Some(name), Some(alias), Some(left), Some(right), Some(primary)) =
                (table, alias, left, right, from)
            else {
                continue;
            };

            let table = TableRef { name, alias };
            joins.push(Join {
                kind: spec.kind,
                left: ColumnRef::qualified(primary.reference(), &left),
                right: ColumnRef::qualified(table.reference(), &right),
                table,
                raw_condition: non_empty(&spec.custom_condition).map(str::to_string),
            });
        }
        joins
    }

    fn filters(&mut self) -> Chain {
        let config = self.config;
        let mut root = Chain::default();
        // Open group: (group id, combinator joining it to the root, members).
        let mut open: Option<(&str, LogicalOp, Chain)> = None;

        for (i, spec) in config.filters.iter().enumerate() {
            if !spec.enabled || spec.column.trim().is_empty() || spec.operator.is_none() {
                continue;
            }
            let Some(cmp) = self.comparison(i, spec) else {
                continue;
            };
            let leaf = Predicate::Compare(cmp);
            let group = non_empty(&spec.group_id);

            let continues = !spec.is_group_start
                && matches!(&open, Some((id, _, _)) if Some(*id) == group);
            if continues {
                if let Some((_, _, members)) = open.as_mut() {
                    members.push(spec.logical_operator, leaf);
                }
                continue;
            }

            close_group(&mut root, open.take());
            match group {
                Some(g) => {
                    let mut members = Chain::default();
                    members.push(LogicalOp::And, leaf);
                    open = Some((g, spec.logical_operator, members));
                }
                None => root.push(spec.logical_operator, leaf),
            }
        }
        close_group(&mut root, open);
        root
    }

    fn comparison(&mut self, i: usize, spec: &FilterSpec) -> Option<Comparison> {
        let op = spec.operator?;
        let column = self.check(ColumnRef::parse(&format!("filters[{i}].column"), &spec.column))?;
        let value_field = format!("filters[{i}].value");

        let operand = if op.is_unary() {
            Operand::None
        } else if op.is_range() {
            let low = self.value(&value_field, spec.value_type, &spec.value)?;
            let high = match non_empty(&spec.second_value) {
                Some(text) => Some(self.value(&format!("filters[{i}].secondValue"), spec.value_type, text)?),
                None => {
                    self.report(ValidationError::required(
                        format!("filters[{i}].secondValue"),
                        &format!("second value for '{}'", op.name()),
                    ));
                    None
                }
            };
            Operand::Range(low, high)
        } else if op.is_list() && spec.value_type == ValueType::Static {
            let items = parse_list(&spec.value);
            if items.is_empty() {
                self.report(ValidationError::required(value_field, "value"));
            }
            Operand::List(items.into_iter().map(Value::Literal).collect())
        } else if op.is_list() {
            Operand::List(vec![self.value(&value_field, spec.value_type, &spec.value)?])
        } else {
            Operand::Single(self.value(&value_field, spec.value_type, &spec.value)?)
        };

        Some(Comparison { column, op, operand })
    }

    fn value(&mut self, field: &str, value_type: ValueType, text: &str) -> Option<Value> {
        let text = text.trim();
        if text.is_empty() {
            self.report(ValidationError::required(field, "value"));
            return Some(Value::Missing);
        }
        match value_type {
            ValueType::Static => Some(Value::Literal(text.to_string())),
            ValueType::Parameter => {
                let Some(name) = parse_param_ref(text) else {
                    self.report(ValidationError::new(
                        field,
                        format!("'{}' is not a valid parameter reference", text),
                    ));
                    return None;
                };
                let declared = self
                    .config
                    .query_params
                    .iter()
                    .any(|p| p.enabled && p.name.trim() == name);
                if !declared {
                    self.report(ValidationError::new(
                        field,
                        format!("parameter '{}' is not declared in queryParams", name),
                    ));
                }
                Some(Value::Param(name.to_string()))
            }
            ValueType::Function => match parse_function(text) {
                Some(func) => Some(Value::Function(func)),
                None => {
                    self.report(ValidationError::new(
                        field,
                        format!(
                            "unknown function '{}' (expected one of NOW(), TODAY(), CURRENT_USER())",
                            text
                        ),
                    ));
                    None
                }
            },
        }
    }

    fn order_by(&mut self) -> Vec<OrderBy> {
        let config = self.config;
        config
            .sorting
            .iter()
            .enumerate()
            .filter(|(_, s)| s.enabled && !s.column.trim().is_empty())
            .filter_map(|(i, s)| {
                let column = self.check(ColumnRef::parse(&format!("sorting[{i}].column"), &s.column))?;
                Some(OrderBy {
                    column,
                    order: s.direction,
                })
            })
            .collect()
    }

    fn limit(&mut self) -> Option<Limit> {
        let pagination = &self.config.pagination;
        let hard_limit = self.config.hard_limit;
        if pagination.enabled {
            let mut count = pagination.default_limit;
            if pagination.max_limit > 0 && count > pagination.max_limit {
                self.report(ValidationError::new(
                    "pagination.defaultLimit",
                    format!(
                        "default limit {} exceeds max limit {}",
                        count, pagination.max_limit
                    ),
                ));
                count = pagination.max_limit;
            }
            if let Some(hard) = hard_limit {
                count = count.min(hard);
            }
            Some(Limit { count, paged: true })
        } else {
            hard_limit.map(|count| Limit { count, paged: false })
        }
    }

    fn params(&mut self) -> Vec<crate::endpoint::QueryParam> {
        let config = self.config;
        config
            .query_params
            .iter()
            .enumerate()
            .filter(|(_, p)| p.enabled && !p.name.trim().is_empty())
            .filter_map(|(i, p)| {
                let name = self.check(Ident::parse(&format!("queryParams[{i}].name"), &p.name))?;
                let mut param = p.clone();
                param.name = name.to_string();
                Some(param)
            })
            .collect()
    }
}

/// Attach a finished group to the root chain. One-member groups need no parentheses.
fn close_group(root: &mut Chain, group: Option<(&str, LogicalOp, Chain)>) {
    let Some((_, op, mut members)) = group else {
        return;
    };
    if members.links.len() == 1 {
        let only = members.links.remove(0);
        root.push(op, only.predicate);
    } else {
        root.push(op, Predicate::Group(members));
    }
}

/// Plain columns to group by when they are mixed with aggregates.
fn group_by(projection: &[Projection]) -> Vec<ColumnRef> {
    if !projection.iter().any(|p| p.expr.is_aggregate()) {
        return Vec::new();
    }
    let mut columns: Vec<ColumnRef> = Vec::new();
    for p in projection {
        if let Expression::Structured(Structured::Column(col)) = &p.expr
            && !columns.contains(col)
        {
            columns.push(col.clone());
        }
    }
    columns
}
