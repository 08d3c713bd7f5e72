use strata_query::QueryValue;

/// How a fragment combines with its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    And,
    Or,
}

impl Mode {
    pub fn keyword(&self) -> &'static str {
        match self {
            Mode::And => "AND",
            Mode::Or => "OR",
        }
    }
}

/// A compiled clause fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// `<path> <symbol> <placeholder>` plus its bound parameter.
    Predicate {
        sql: String,
        param: (String, QueryValue),
    },
    /// A bracketed sub-clause whose children combine under `mode`.
    Group { mode: Mode, children: Vec<Clause> },
}

impl Clause {
    pub fn to_sql(&self) -> String {
        match self {
            Clause::Predicate { sql, .. } => sql.clone(),
            Clause::Group { mode, children } => {
                let sep = format!(" {} ", mode.keyword());
                let joined = children
                    .iter()
                    .map(Clause::to_sql)
                    .collect::<Vec<_>>()
                    .join(sep.as_str());
                format!("({joined})")
            }
        }
    }
}

/// The clause accumulator a compilation writes into. Query builders adapt
/// themselves by implementing these two operations.
pub trait WhereBuilder {
    /// Append a fragment, combined with the existing clause under `mode`.
    fn push(&mut self, mode: Mode, sql: &str, params: &[(String, QueryValue)]);

    /// Open a bracketed sub-clause attached under `mode`; `build` receives a
    /// fresh builder for the sub-clause. An empty sub-clause must not alter
    /// the outer clause.
    fn group(&mut self, mode: Mode, build: &mut dyn FnMut(&mut dyn WhereBuilder));
}

/// The result of a compilation: fragments combined conjunctively at the top
/// level, plus the deduplicated bound parameters in first-bind order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WhereClause {
    pub children: Vec<Clause>,
    pub params: Vec<(String, QueryValue)>,
}

impl WhereClause {
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Render the whole clause as one SQL expression.
    pub fn to_sql(&self) -> String {
        self.children
            .iter()
            .map(Clause::to_sql)
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    /// Replay the clause into a builder, fragment by fragment.
    pub fn apply(&self, sink: &mut dyn WhereBuilder) {
        apply_children(&self.children, Mode::And, sink);
    }
}

fn apply_children(children: &[Clause], mode: Mode, sink: &mut dyn WhereBuilder) {
    for clause in children {
        match clause {
            Clause::Predicate { sql, param } => {
                sink.push(mode, sql, std::slice::from_ref(param));
            }
            Clause::Group {
                mode: inner,
                children,
            } => {
                let inner = *inner;
                sink.group(mode, &mut |builder| apply_children(children, inner, builder));
            }
        }
    }
}

/// Reference `WhereBuilder` producing plain SQL text plus a parameter list.
/// Also serves as the sub-clause builder inside `group`.
#[derive(Debug, Clone, Default)]
pub struct SqlWhere {
    sql: String,
    params: Vec<(String, QueryValue)>,
}

impl SqlWhere {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[(String, QueryValue)] {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    pub fn into_parts(self) -> (String, Vec<(String, QueryValue)>) {
        (self.sql, self.params)
    }

    fn merge_params(&mut self, params: &[(String, QueryValue)]) {
        for (token, value) in params {
            if !self.params.iter().any(|(t, _)| t == token) {
                self.params.push((token.clone(), value.clone()));
            }
        }
    }
}

impl WhereBuilder for SqlWhere {
    fn push(&mut self, mode: Mode, sql: &str, params: &[(String, QueryValue)]) {
        if !self.sql.is_empty() {
            self.sql.push(' ');
            self.sql.push_str(mode.keyword());
            self.sql.push(' ');
        }
        self.sql.push_str(sql);
        self.merge_params(params);
    }

    fn group(&mut self, mode: Mode, build: &mut dyn FnMut(&mut dyn WhereBuilder)) {
        let mut inner = SqlWhere::new();
        build(&mut inner);
        if inner.sql.is_empty() {
            return;
        }
        let sql = format!("({})", inner.sql);
        let params = std::mem::take(&mut inner.params);
        self.push(mode, &sql, &params);
    }
}
