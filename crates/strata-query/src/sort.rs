#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Sort by the value at a nested field path, named level by level from the
/// document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub path: Vec<String>,
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(path: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(path: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            direction: SortDirection::Desc,
        }
    }
}
