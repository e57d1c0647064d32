use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Column names of the fixed passenger schema
// ---------------------------------------------------------------------------

pub const SEX: &str = "Sex";
pub const PCLASS: &str = "Pclass";
pub const AGE: &str = "Age";
pub const FARE: &str = "Fare";
pub const EMBARKED: &str = "Embarked";
pub const SURVIVED: &str = "Survived";

/// Columns every input file must provide, in the order they are reported.
pub const REQUIRED_COLUMNS: [&str; 6] = [SEX, PCLASS, AGE, FARE, EMBARKED, SURVIVED];

// ---------------------------------------------------------------------------
// Cell – a single value in a column
// ---------------------------------------------------------------------------

/// A loosely-typed cell as read from the source file.
///
/// Cells only exist at the loader boundary and for the additional columns a
/// file may carry; the fixed passenger attributes are stored as typed fields
/// on [`PassengerRecord`].
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Integer(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v:.4}"),
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Missing => write!(f, "NaN"),
        }
    }
}

impl Cell {
    /// Numeric interpretation of the cell, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Float(v) if !v.is_nan() => Some(*v),
            Cell::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Missing => true,
            Cell::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Guess the type of a raw text cell. Empty text is a missing value.
    pub fn parse(s: &str) -> Cell {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("nan") {
            return Cell::Missing;
        }
        if let Ok(i) = s.parse::<i64>() {
            return Cell::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return Cell::Float(f);
        }
        Cell::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Schema – column name → semantic type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
}

impl ColumnKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }

    /// Narrowest kind that can hold every non-missing cell.
    /// A column with no values at all is treated as `Float` (all-NaN).
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> ColumnKind {
        let mut kind = None;
        for cell in cells {
            kind = match (kind, cell) {
                (_, Cell::Missing) => kind,
                (_, Cell::Float(v)) if v.is_nan() => kind,
                (_, Cell::Text(_)) => return ColumnKind::Text,
                (None | Some(ColumnKind::Integer), Cell::Integer(_)) => Some(ColumnKind::Integer),
                (_, Cell::Integer(_) | Cell::Float(_)) => Some(ColumnKind::Float),
            };
        }
        kind.unwrap_or(ColumnKind::Float)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

/// Ordered column list of a loaded dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    pub fn new(columns: Vec<Column>) -> Self {
        Schema { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Names of numeric columns, in file order.
    pub fn numeric_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(|c| c.kind.is_numeric())
            .map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// ---------------------------------------------------------------------------
// PassengerRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single passenger (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct PassengerRecord {
    /// Zero-based position of the row in the source file.
    pub index: usize,
    pub sex: String,
    pub pclass: i64,
    pub age: Option<f64>,
    pub fare: f64,
    pub embarked: Option<String>,
    pub survived: bool,
    /// Any further columns of the file, keyed by column name.
    pub extra: BTreeMap<String, Cell>,
}

impl PassengerRecord {
    pub fn new(index: usize, sex: impl Into<String>, pclass: i64, fare: f64, survived: bool) -> Self {
        PassengerRecord {
            index,
            sex: sex.into(),
            pclass,
            age: None,
            fare,
            embarked: None,
            survived,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_age(mut self, age: f64) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_embarked(mut self, port: impl Into<String>) -> Self {
        self.embarked = Some(port.into());
        self
    }

    pub fn with_extra(mut self, column: impl Into<String>, cell: Cell) -> Self {
        self.extra.insert(column.into(), cell);
        self
    }

    /// Value of any column by name, typed fields included.
    pub fn cell(&self, column: &str) -> Cell {
        match column {
            SEX => Cell::Text(self.sex.clone()),
            PCLASS => Cell::Integer(self.pclass),
            AGE => self.age.map_or(Cell::Missing, Cell::Float),
            FARE => Cell::Float(self.fare),
            EMBARKED => self.embarked.clone().map_or(Cell::Missing, Cell::Text),
            SURVIVED => Cell::Integer(i64::from(self.survived)),
            other => self.extra.get(other).cloned().unwrap_or(Cell::Missing),
        }
    }

    /// Numeric value of a column, `None` when missing or non-numeric.
    pub fn numeric(&self, column: &str) -> Option<f64> {
        match column {
            PCLASS => Some(self.pclass as f64),
            AGE => self.age,
            FARE => Some(self.fare),
            SURVIVED => Some(if self.survived { 1.0 } else { 0.0 }),
            SEX => Cell::parse(&self.sex).as_f64(),
            EMBARKED => self.embarked.as_deref().map(Cell::parse)?.as_f64(),
            other => self.extra.get(other).and_then(Cell::as_f64),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Dataset {
    schema: Schema,
    records: Vec<PassengerRecord>,
}

impl Dataset {
    pub fn new(schema: Schema, records: Vec<PassengerRecord>) -> Self {
        Dataset { schema, records }
    }

    /// Build a dataset from records alone, deriving the schema: the fixed
    /// passenger columns followed by every extra column in name order.
    pub fn from_records(records: Vec<PassengerRecord>) -> Self {
        let mut columns = vec![
            Column { name: SEX.into(), kind: ColumnKind::Text },
            Column { name: PCLASS.into(), kind: ColumnKind::Integer },
            Column { name: AGE.into(), kind: ColumnKind::Float },
            Column { name: FARE.into(), kind: ColumnKind::Float },
            Column { name: EMBARKED.into(), kind: ColumnKind::Text },
            Column { name: SURVIVED.into(), kind: ColumnKind::Integer },
        ];

        let mut extras: BTreeMap<&str, Vec<&Cell>> = BTreeMap::new();
        for rec in &records {
            for (name, cell) in &rec.extra {
                extras.entry(name.as_str()).or_default().push(cell);
            }
        }
        columns.extend(extras.into_iter().map(|(name, cells)| Column {
            name: name.to_string(),
            kind: ColumnKind::infer(cells),
        }));

        Dataset::new(Schema::new(columns), records)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[PassengerRecord] {
        &self.records
    }

    /// Number of passengers.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
