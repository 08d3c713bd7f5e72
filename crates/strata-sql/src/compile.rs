use strata_query::{Filter, FilterEntry, LogicalOp, Operator, Query, QueryValue, Sort};
use strata_schema::{FieldCatalog, FieldId};
use tracing::debug;

use crate::clause::{Clause, Mode, WhereBuilder, WhereClause};
use crate::params::Params;
use crate::path::column_expr;

impl From<LogicalOp> for Mode {
    fn from(op: LogicalOp) -> Mode {
        match op {
            LogicalOp::And => Mode::And,
            LogicalOp::Or => Mode::Or,
        }
    }
}

/// Compile a filter against the declared fields of `table` into a clause
/// tree plus bound parameters.
///
/// Compilation never fails: field names not declared at their nesting
/// level, comparisons outside any field, and empty groups all degrade to
/// "no predicate emitted", so a partially nonsensical filter constrains
/// less instead of erroring. Each drop is reported as a `debug` event.
pub fn compile_where(table: &str, catalog: &FieldCatalog, filter: &Filter) -> WhereClause {
    let mut params = Params::new();
    let mut scope = Vec::new();
    let children = compile_filter(table, catalog, filter, &mut scope, &mut params, true);
    WhereClause {
        children,
        params: params.into_values(),
    }
}

/// Compile `filter` straight into a caller-supplied builder. All effects go
/// through the builder; an empty result leaves it untouched.
pub fn compile_into(
    table: &str,
    catalog: &FieldCatalog,
    sink: &mut dyn WhereBuilder,
    filter: &Filter,
) {
    compile_where(table, catalog, filter).apply(sink);
}

/// Walk one filter map. `scope` is the field-id path from the document root
/// to the current nesting level; `nav` is false when the scope tail is a
/// non-structured field, which closes the level to further field keys.
fn compile_filter(
    table: &str,
    catalog: &FieldCatalog,
    filter: &Filter,
    scope: &mut Vec<FieldId>,
    params: &mut Params,
    nav: bool,
) -> Vec<Clause> {
    let mut out = Vec::new();
    for entry in &filter.entries {
        match entry {
            FilterEntry::Group(op, branches) => {
                let mut children = Vec::new();
                for branch in branches {
                    children.extend(compile_filter(table, catalog, branch, scope, params, nav));
                }
                if !children.is_empty() {
                    out.push(Clause::Group {
                        mode: Mode::from(*op),
                        children,
                    });
                }
            }
            FilterEntry::Comparison(op, value) => {
                if let Some(clause) = compile_comparison(table, *op, value, scope, params) {
                    out.push(clause);
                }
            }
            FilterEntry::Field(name, inner) => {
                if !nav {
                    debug!(field = %name, "nested key under a non-structured field, entry dropped");
                    continue;
                }
                let Some(field) = catalog.resolve(scope.last(), name) else {
                    debug!(field = %name, "field not declared at this level, entry dropped");
                    continue;
                };
                let id = field.id.clone();
                let structured = field.structured;
                scope.push(id);
                let compiled = compile_filter(table, catalog, inner, scope, params, structured);
                scope.pop();
                out.extend(compiled);
            }
        }
    }
    out
}

fn compile_comparison(
    table: &str,
    op: Operator,
    value: &QueryValue,
    scope: &[FieldId],
    params: &mut Params,
) -> Option<Clause> {
    let Some(column) = column_expr(table, scope) else {
        debug!(operator = op.key(), "comparison outside any field, entry dropped");
        return None;
    };

    let bound = match op {
        Operator::Contains => QueryValue::String(format!("%{}%", value.encode())),
        // Matches one element of a comma-delimited identifier list.
        Operator::Id => QueryValue::String(format!("%(,{}(\"|\\Z))%", value.encode())),
        _ => value.clone(),
    };

    let token = params.bind(bound.clone());
    let placeholder = Params::placeholder(&token, matches!(op, Operator::In));

    Some(Clause::Predicate {
        sql: format!("{column} {} {placeholder}", op.symbol()),
        param: (token, bound),
    })
}

/// A query envelope compiled down to the pieces a query builder consumes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompiledQuery {
    pub where_clause: WhereClause,
    pub order_by: Vec<String>,
    pub skip: Option<usize>,
    pub take: Option<usize>,
}

/// Compile a full query envelope: filter, sort, and paging window.
pub fn compile_query(table: &str, catalog: &FieldCatalog, query: &Query) -> CompiledQuery {
    let where_clause = match &query.filter {
        Some(filter) => compile_where(table, catalog, filter),
        None => WhereClause::default(),
    };
    CompiledQuery {
        where_clause,
        order_by: compile_order_by(table, catalog, &query.sort),
        skip: query.skip,
        take: query.take,
    }
}

/// Compile sort paths into ORDER BY terms over the same arrow-chain
/// expressions the filter compiler emits. Unresolvable paths are dropped.
pub fn compile_order_by(table: &str, catalog: &FieldCatalog, sorts: &[Sort]) -> Vec<String> {
    sorts
        .iter()
        .filter_map(|sort| order_term(table, catalog, sort))
        .collect()
}

fn order_term(table: &str, catalog: &FieldCatalog, sort: &Sort) -> Option<String> {
    let mut scope: Vec<FieldId> = Vec::new();
    let mut nav = true;
    for name in &sort.path {
        if !nav {
            debug!(field = %name, "sort path crosses a non-structured field, term dropped");
            return None;
        }
        let Some(field) = catalog.resolve(scope.last(), name) else {
            debug!(field = %name, "sort field not declared at this level, term dropped");
            return None;
        };
        nav = field.structured;
        scope.push(field.id.clone());
    }
    let expr = column_expr(table, &scope)?;
    Some(format!("{expr} {}", sort.direction.keyword()))
}
