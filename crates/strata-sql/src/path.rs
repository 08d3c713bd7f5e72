use strata_schema::FieldId;

/// Build the arrow-chain expression addressing a nested document value,
/// extracting the terminal segment as text:
/// `"<table>"."data"->'<id>'->…->>'<id>'`.
///
/// Returns `None` for an empty scope: at the document root there is no
/// terminal segment to extract.
pub fn column_expr(table: &str, scope: &[FieldId]) -> Option<String> {
    let (last, hops) = scope.split_last()?;
    let mut expr = format!("\"{table}\".\"data\"");
    for hop in hops {
        expr.push_str("->'");
        expr.push_str(hop.as_str());
        expr.push('\'');
    }
    expr.push_str("->>'");
    expr.push_str(last.as_str());
    expr.push('\'');
    Some(expr)
}
