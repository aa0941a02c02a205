//! RSQL-style filter and sort expressions for Pro API listings.
//!
//! ```
//! use device_cloud_sdk::pro_api::expressions::{filter_group, FilterField, SortField};
//!
//! let filter = filter_group(FilterField::new("general.barcode1").eq("Sample")
//!     | FilterField::new("general.barcode2").eq("Sample"))
//!     & FilterField::new("general.assetTag").gt(20);
//! assert_eq!(
//!     filter.to_string(),
//!     "(general.barcode1==Sample,general.barcode2==Sample);general.assetTag>20"
//! );
//!
//! let sort = SortField::new("date").desc() & SortField::new("name").asc();
//! assert_eq!(sort.to_string(), "date:desc,name:asc");
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::ops::{BitAnd, BitOr};

use crate::error::{Result, SdkError};

/// One `field op value` term of a filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEntry {
    pub name: String,
    pub op: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterExpression {
    expression: String,
    entries: Vec<FilterEntry>,
}

impl FilterExpression {
    fn compose(self, other: FilterExpression, sep: char) -> FilterExpression {
        let mut entries = self.entries;
        entries.extend(other.entries);
        FilterExpression {
            expression: format!("{}{}{}", self.expression, sep, other.expression),
            entries,
        }
    }

    pub fn entries(&self) -> &[FilterEntry] {
        &self.entries
    }

    /// Names of every field the expression references.
    pub fn fields(&self) -> BTreeSet<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Fail if any referenced field is outside `allowed_fields`.
    pub fn validate(&self, allowed_fields: &[&str]) -> Result<()> {
        match self.entries.iter().find(|e| !allowed_fields.contains(&e.name.as_str())) {
            Some(entry) => Err(SdkError::validation(format!(
                "filter field '{}' is not in allowed filter fields: {}",
                entry.name,
                allowed_fields.join(", ")
            ))),
            None => Ok(()),
        }
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

/// Conjunction, serialized with `;`.
impl BitAnd for FilterExpression {
    type Output = FilterExpression;

    fn bitand(self, rhs: FilterExpression) -> FilterExpression {
        self.compose(rhs, ';')
    }
}

/// Disjunction, serialized with `,`.
impl BitOr for FilterExpression {
    type Output = FilterExpression;

    fn bitor(self, rhs: FilterExpression) -> FilterExpression {
        self.compose(rhs, ',')
    }
}

/// Wrap an expression in parentheses, keeping its field set.
pub fn filter_group(expression: FilterExpression) -> FilterExpression {
    FilterExpression {
        expression: format!("({})", expression.expression),
        entries: expression.entries,
    }
}

#[derive(Debug, Clone)]
pub struct FilterField {
    name: String,
}

impl FilterField {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn expression(&self, op: &str, value: String) -> FilterExpression {
        FilterExpression {
            expression: format!("{}{}{}", self.name, op, value),
            entries: vec![FilterEntry { name: self.name.clone(), op: op.to_owned(), value }],
        }
    }

    pub fn eq(&self, value: impl fmt::Display) -> FilterExpression {
        self.expression("==", value.to_string())
    }

    pub fn ne(&self, value: impl fmt::Display) -> FilterExpression {
        self.expression("!=", value.to_string())
    }

    pub fn lt(&self, value: impl fmt::Display) -> FilterExpression {
        self.expression("<", value.to_string())
    }

    pub fn lte(&self, value: impl fmt::Display) -> FilterExpression {
        self.expression("<=", value.to_string())
    }

    pub fn gt(&self, value: impl fmt::Display) -> FilterExpression {
        self.expression(">", value.to_string())
    }

    pub fn gte(&self, value: impl fmt::Display) -> FilterExpression {
        self.expression(">=", value.to_string())
    }

    pub fn is_in<I, V>(&self, values: I) -> FilterExpression
    where
        I: IntoIterator<Item = V>,
        V: fmt::Display,
    {
        self.expression("=in=", format!("({})", join(values)))
    }

    pub fn not_in<I, V>(&self, values: I) -> FilterExpression
    where
        I: IntoIterator<Item = V>,
        V: fmt::Display,
    {
        self.expression("=out=", format!("({})", join(values)))
    }
}

fn join<I, V>(values: I) -> String
where
    I: IntoIterator<Item = V>,
    V: fmt::Display,
{
    values.into_iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortExpression {
    expression: String,
    fields: Vec<String>,
}

impl SortExpression {
    pub fn fields(&self) -> BTreeSet<&str> {
        self.fields.iter().map(String::as_str).collect()
    }

    pub fn validate(&self, allowed_fields: &[&str]) -> Result<()> {
        match self.fields.iter().find(|f| !allowed_fields.contains(&f.as_str())) {
            Some(field) => Err(SdkError::validation(format!(
                "sort field '{}' is not in allowed sort fields: {}",
                field,
                allowed_fields.join(", ")
            ))),
            None => Ok(()),
        }
    }
}

impl fmt::Display for SortExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

/// Concatenate sort keys, highest priority first.
impl BitAnd for SortExpression {
    type Output = SortExpression;

    fn bitand(self, rhs: SortExpression) -> SortExpression {
        let mut fields = self.fields;
        fields.extend(rhs.fields);
        SortExpression {
            expression: format!("{},{}", self.expression, rhs.expression),
            fields,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SortField {
    field: String,
}

impl SortField {
    pub fn new(field: impl Into<String>) -> Self {
        Self { field: field.into() }
    }

    fn expression(&self, order: &str) -> SortExpression {
        SortExpression {
            expression: format!("{}:{}", self.field, order),
            fields: vec![self.field.clone()],
        }
    }

    pub fn asc(&self) -> SortExpression {
        self.expression("asc")
    }

    pub fn desc(&self) -> SortExpression {
        self.expression("desc")
    }
}
