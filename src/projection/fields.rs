use serde::Deserialize;

/// One argument in a field list as a spreadsheet hands it over: a single name or a range.
///
/// Ranges arrive as nested groups (rows of columns) and are flattened depth-first, so
/// `[["price", "sector"], ["beta"]]` asks for the same fields as `price, sector, beta`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FieldArg {
    /// A single field name.
    Name(String),
    /// A nested group of arguments (e.g. a 2D range).
    Group(Vec<FieldArg>),
}

impl From<&str> for FieldArg {
    fn from(s: &str) -> Self {
        Self::Name(s.to_string())
    }
}

impl From<String> for FieldArg {
    fn from(s: String) -> Self {
        Self::Name(s)
    }
}

impl<T: Into<FieldArg>> From<Vec<T>> for FieldArg {
    fn from(v: Vec<T>) -> Self {
        Self::Group(v.into_iter().map(Into::into).collect())
    }
}

/// The ordered, flattened field names of one request.
///
/// Names are taken as given: duplicates and empty strings are kept, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRequest {
    names: Vec<String>,
}

impl FieldRequest {
    /// Flattens `args` depth-first.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FieldArg>,
    {
        let mut names = Vec::new();
        for arg in args {
            push_flat(arg.into(), &mut names);
        }
        Self { names }
    }

    /// The field names in request order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of requested fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no field was requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The `fields` query value: names joined with `,`. Empty when nothing was requested.
    #[must_use]
    pub fn joined(&self) -> String {
        self.names.join(",")
    }
}

impl<S: Into<String>> FromIterator<S> for FieldRequest {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

fn push_flat(arg: FieldArg, out: &mut Vec<String>) {
    match arg {
        FieldArg::Name(n) => out.push(n),
        FieldArg::Group(items) => {
            for item in items {
                push_flat(item, out);
            }
        }
    }
}
