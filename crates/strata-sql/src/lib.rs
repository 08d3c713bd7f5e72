mod clause;
mod compile;
mod params;
mod path;

pub use clause::{Clause, Mode, SqlWhere, WhereBuilder, WhereClause};
pub use compile::{CompiledQuery, compile_into, compile_order_by, compile_query, compile_where};
pub use params::Params;
pub use path::column_expr;
