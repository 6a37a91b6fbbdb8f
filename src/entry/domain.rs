//! Core finance entry domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

/// Database identifier for a finance entry.
pub type EntryId = i64;

/// Dates are read and written as `YYYY-MM-DD`.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Trim `text`, returning `None` if nothing is left.
fn trimmed(text: &str) -> Option<String> {
    let text = text.trim();

    if text.is_empty() {
        None
    } else {
        Some(text.to_owned())
    }
}

/// Implements the conversions shared by the non-empty text value objects.
macro_rules! text_value_object {
    ($name:ident, $empty_error:expr, $field:literal) => {
        impl $name {
            /// Create a value from `text` with surrounding whitespace removed.
            ///
            /// # Errors
            ///
            /// Returns an error if `text` is empty or only whitespace.
            pub fn new(text: &str) -> Result<Self, Error> {
                trimmed(text).map(Self).ok_or($empty_error)
            }

            /// Create a value without validation.
            ///
            /// The caller should ensure that the string is trimmed and not empty.
            pub fn new_unchecked(text: &str) -> Self {
                Self(text.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(&value)
            }
        }

        impl TryFrom<&Value> for $name {
            type Error = Error;

            fn try_from(value: &Value) -> Result<Self, Self::Error> {
                match value {
                    Value::String(text) => Self::new(text),
                    _ => Err(Error::NotText($field)),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

/// A validated, non-empty description of what an entry was for, e.g. "Coffee".
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

text_value_object!(Description, Error::EmptyDescription, "Description");

/// A validated, non-empty category name, e.g. "Food".
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category(String);

text_value_object!(Category, Error::EmptyCategory, "Category");

/// An amount of money. Negative amounts are allowed.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl Amount {
    /// Create an amount.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidAmount] if `value` is NaN or infinite.
    pub fn new(value: f64) -> Result<Self, Error> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(Error::InvalidAmount(value.to_string()))
        }
    }

    /// Create an amount without validation.
    ///
    /// The caller should ensure that `value` is finite.
    pub fn new_unchecked(value: f64) -> Self {
        Self(value)
    }

    /// The amount as a plain number.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl FromStr for Amount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<f64>()
            .map_err(|_| Error::InvalidAmount(s.to_owned()))
            .and_then(Self::new)
    }
}

impl TryFrom<f64> for Amount {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&Value> for Amount {
    type Error = Error;

    /// Accepts a JSON number or a string holding a number, e.g. `4.5` or `"4.5"`.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(number) => number
                .as_f64()
                .ok_or_else(|| Error::InvalidAmount(number.to_string()))
                .and_then(Self::new),
            Value::String(text) => text.parse(),
            other => Err(Error::InvalidAmount(other.to_string())),
        }
    }
}

impl From<Amount> for f64 {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The calendar day an entry happened on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryDate(Date);

impl EntryDate {
    /// Wrap an already parsed date.
    pub fn new(date: Date) -> Self {
        Self(date)
    }

    /// The underlying calendar date.
    pub fn date(self) -> Date {
        self.0
    }
}

impl FromStr for EntryDate {
    type Err = Error;

    /// Parse a date in the format `YYYY-MM-DD`.
    ///
    /// Signed years such as `+2024` or `-0001` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(Error::InvalidDate(s.to_owned()));
        }

        Date::parse(s, DATE_FORMAT)
            .map(Self)
            .map_err(|_| Error::InvalidDate(s.to_owned()))
    }
}

impl TryFrom<String> for EntryDate {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<&Value> for EntryDate {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => text.parse(),
            other => Err(Error::InvalidDate(other.to_string())),
        }
    }
}

impl From<Date> for EntryDate {
    fn from(value: Date) -> Self {
        Self(value)
    }
}

impl From<EntryDate> for String {
    fn from(value: EntryDate) -> Self {
        value.to_string()
    }
}

impl Display for EntryDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = self.0.format(DATE_FORMAT).map_err(|_| std::fmt::Error)?;

        f.write_str(&text)
    }
}

/// Raw, unvalidated values for the fields of a finance entry.
///
/// `None` means the field was not supplied. A field sent as JSON `null` is
/// kept as `Some(Value::Null)` so that it fails validation instead of being
/// skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryFields {
    /// The raw description.
    pub description: Option<Value>,
    /// The raw amount.
    pub amount: Option<Value>,
    /// The raw category.
    pub category: Option<Value>,
    /// The raw date.
    pub date: Option<Value>,
}

impl EntryFields {
    /// Supply all four fields.
    pub fn new(
        description: impl Into<Value>,
        amount: impl Into<Value>,
        category: impl Into<Value>,
        date: impl Into<Value>,
    ) -> Self {
        Self {
            description: Some(description.into()),
            amount: Some(amount.into()),
            category: Some(category.into()),
            date: Some(date.into()),
        }
    }

    /// Parse the fields from a JSON object.
    ///
    /// Keys other than the four entry fields are ignored.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidJson] if `bytes` is not a JSON object.
    pub fn from_json(bytes: &[u8]) -> Result<Self, Error> {
        let mut object: Map<String, Value> =
            serde_json::from_slice(bytes).map_err(|error| Error::InvalidJson(error.to_string()))?;

        Ok(Self {
            description: object.remove("description"),
            amount: object.remove("amount"),
            category: object.remove("category"),
            date: object.remove("date"),
        })
    }

    /// Whether no field was supplied.
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.date.is_none()
    }
}

/// A single financial record, the aggregate root of the domain.
///
/// Use [FinanceEntry::from_fields] to build an entry from raw input, or
/// [FinanceEntry::new] if the fields are already validated. The ID is only
/// set once a store has saved the entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceEntry {
    id: Option<EntryId>,
    description: Description,
    amount: Amount,
    category: Category,
    date: EntryDate,
}

impl FinanceEntry {
    /// Create an entry that has not been saved yet.
    pub fn new(
        description: Description,
        amount: Amount,
        category: Category,
        date: EntryDate,
    ) -> Self {
        Self {
            id: None,
            description,
            amount,
            category,
            date,
        }
    }

    /// Validate raw fields and create an entry that has not been saved yet.
    ///
    /// # Errors
    ///
    /// Returns an [Error::MissingFields] naming every field that was not
    /// supplied, otherwise the validation error of the first invalid field.
    pub fn from_fields(fields: EntryFields) -> Result<Self, Error> {
        match fields {
            EntryFields {
                description: Some(description),
                amount: Some(amount),
                category: Some(category),
                date: Some(date),
            } => Ok(Self::new(
                Description::try_from(&description)?,
                Amount::try_from(&amount)?,
                Category::try_from(&category)?,
                EntryDate::try_from(&date)?,
            )),
            EntryFields {
                description,
                amount,
                category,
                date,
            } => {
                let missing: Vec<&str> = [
                    ("description", description.is_none()),
                    ("amount", amount.is_none()),
                    ("category", category.is_none()),
                    ("date", date.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, is_missing)| is_missing.then_some(name))
                .collect();

                Err(Error::MissingFields(missing.join(", ")))
            }
        }
    }

    /// Overwrite the supplied fields, leaving the others untouched.
    ///
    /// Only the supplied fields are validated. If any of them is invalid the
    /// entry is left unchanged.
    pub fn apply(&mut self, fields: EntryFields) -> Result<(), Error> {
        let EntryFields {
            description,
            amount,
            category,
            date,
        } = fields;

        let description = description.as_ref().map(Description::try_from).transpose()?;
        let amount = amount.as_ref().map(Amount::try_from).transpose()?;
        let category = category.as_ref().map(Category::try_from).transpose()?;
        let date = date.as_ref().map(EntryDate::try_from).transpose()?;

        if let Some(description) = description {
            self.description = description;
        }
        if let Some(amount) = amount {
            self.amount = amount;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(date) = date {
            self.date = date;
        }

        Ok(())
    }

    /// Attach the ID assigned by a store.
    pub(crate) fn with_id(mut self, id: EntryId) -> Self {
        self.id = Some(id);
        self
    }

    /// The ID of the entry, `None` if it has not been saved.
    pub fn id(&self) -> Option<EntryId> {
        self.id
    }

    /// What the money was spent on or earned from.
    pub fn description(&self) -> &Description {
        &self.description
    }

    /// How much money was spent or earned.
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// The category the entry belongs to.
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// When the entry happened.
    pub fn date(&self) -> EntryDate {
        self.date
    }

    /// Replace the description.
    pub fn set_description(&mut self, description: Description) {
        self.description = description;
    }

    /// Replace the amount.
    pub fn set_amount(&mut self, amount: Amount) {
        self.amount = amount;
    }

    /// Replace the category.
    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    /// Replace the date.
    pub fn set_date(&mut self, date: EntryDate) {
        self.date = date;
    }
}


#[cfg(test)]
mod finance_entry_tests {
    use serde_json::json;
    use time::macros::date;

    use crate::{
        Error,
        entry::{Amount, Category, Description, EntryDate, EntryFields, FinanceEntry},
    };

    fn coffee() -> FinanceEntry {
        FinanceEntry::new(
            Description::new_unchecked("Coffee"),
            Amount::new_unchecked(4.5),
            Category::new_unchecked("Food"),
            EntryDate::new(date!(2024 - 01 - 10)),
        )
    }

    #[test]
    fn from_fields_validates_every_field() {
        let entry =
            FinanceEntry::from_fields(EntryFields::new(" Coffee ", 4.5, "Food", "2024-01-10"))
                .unwrap();

        assert_eq!(entry, coffee());
        assert_eq!(entry.id(), None);
    }

    #[test]
    fn from_fields_lists_missing_fields() {
        let fields = EntryFields {
            description: Some(json!("Coffee")),
            category: Some(json!("Food")),
            ..Default::default()
        };

        let result = FinanceEntry::from_fields(fields);

        assert_eq!(
            result,
            Err(Error::MissingFields("amount, date".to_owned()))
        );
    }

    #[test]
    fn from_fields_fails_on_empty_description() {
        let result = FinanceEntry::from_fields(EntryFields::new("", 4.5, "Food", "2024-01-10"));

        assert_eq!(result, Err(Error::EmptyDescription));
    }

    #[test]
    fn apply_only_overwrites_supplied_fields() {
        let mut entry = coffee();

        entry
            .apply(EntryFields {
                amount: Some(json!(20)),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(entry.amount(), Amount::new_unchecked(20.0));
        assert_eq!(entry.description().as_ref(), "Coffee");
        assert_eq!(entry.category().as_ref(), "Food");
        assert_eq!(entry.date(), EntryDate::new(date!(2024 - 01 - 10)));
    }

    #[test]
    fn apply_leaves_entry_unchanged_when_a_field_is_invalid() {
        let mut entry = coffee();

        let result = entry.apply(EntryFields {
            description: Some(json!("Tea")),
            date: Some(json!("not a date")),
            ..Default::default()
        });

        assert!(matches!(result, Err(Error::InvalidDate(_))));
        assert_eq!(entry, coffee());
    }

    #[test]
    fn null_fields_are_supplied_and_rejected() {
        let fields = EntryFields::from_json(br#"{"description": null}"#).unwrap();

        assert_eq!(fields.description, Some(json!(null)));
        assert_eq!(
            coffee().apply(fields),
            Err(Error::NotText("Description"))
        );
    }

    #[test]
    fn from_json_rejects_non_objects() {
        assert!(matches!(
            EntryFields::from_json(b"[1, 2, 3]"),
            Err(Error::InvalidJson(_))
        ));
        assert!(matches!(
            EntryFields::from_json(br#"["Coffee", 4.5, "Food", "2024-01-10"]"#),
            Err(Error::InvalidJson(_))
        ));
        assert!(matches!(
            EntryFields::from_json(b"{not json"),
            Err(Error::InvalidJson(_))
        ));
    }

    #[test]
    fn serializes_with_iso_date() {
        let entry = coffee().with_id(7);

        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(
            value,
            json!({
                "id": 7,
                "description": "Coffee",
                "amount": 4.5,
                "category": "Food",
                "date": "2024-01-10",
            })
        );
    }

    #[test]
    fn unsaved_entry_serializes_null_id() {
        let value = serde_json::to_value(coffee()).unwrap();

        assert_eq!(value["id"], json!(null));
    }
}
