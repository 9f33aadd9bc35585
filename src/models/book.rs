//! Book model and the request / query types built around it.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: i32,
    /// Book name
    #[schema(example = "War and Peace")]
    pub name: String,
    /// Author name
    #[schema(example = "Leo Tolstoy")]
    pub author: String,
    /// Publishing year
    pub year: Option<i32>,
    /// Number of pages
    pub pages: Option<i32>,
    /// Genres, in the order they were given
    pub genre: Option<Vec<String>>,
    /// Goodreads.com rating
    pub rating: Option<f64>,
}

impl Book {
    /// Build a new record from a creation request
    pub fn from_create(id: i32, data: &CreateBook) -> Self {
        Self {
            id,
            name: data.name.clone(),
            author: data.author.clone(),
            year: data.year,
            pages: data.pages,
            genre: data.genre.clone(),
            rating: data.rating,
        }
    }

    /// Case-insensitive membership test against the genre list
    pub fn has_genre(&self, genre: &str) -> bool {
        let genre = genre.to_lowercase();
        self.genre
            .as_ref()
            .is_some_and(|genres| genres.iter().any(|g| g.to_lowercase() == genre))
    }
}

/// Create book request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "author is required"))]
    pub author: String,
    pub year: Option<i32>,
    pub pages: Option<i32>,
    pub genre: Option<Vec<String>>,
    pub rating: Option<f64>,
}

/// Partial update request. Only fields present in the body are written.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "author must not be empty"))]
    pub author: Option<String>,
    pub year: Option<i32>,
    pub pages: Option<i32>,
    pub genre: Option<Vec<String>>,
    pub rating: Option<f64>,
}

impl UpdateBook {
    /// Overwrite every supplied field on `book`
    pub fn apply_to(&self, book: &mut Book) {
        let update = self;

        macro_rules! set_field {
            (optional $field:ident) => {
                if update.$field.is_some() {
                    book.$field = update.$field.clone();
                }
            };
            ($field:ident) => {
                if let Some(ref val) = update.$field {
                    book.$field = val.clone();
                }
            };
        }

        set_field!(name);
        set_field!(author);
        set_field!(optional year);
        set_field!(optional pages);
        set_field!(optional genre);
        set_field!(optional rating);
    }
}

/// Numeric book attribute usable in range filters and statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NumericField {
    Year,
    Pages,
    Rating,
}

impl NumericField {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumericField::Year => "year",
            NumericField::Pages => "pages",
            NumericField::Rating => "rating",
        }
    }

    /// Whether values (and range bounds) of this field are whole numbers
    pub fn is_integral(&self) -> bool {
        !matches!(self, NumericField::Rating)
    }

    /// Value of this field on `book`, if present
    pub fn value_of(&self, book: &Book) -> Option<f64> {
        match self {
            NumericField::Year => book.year.map(f64::from),
            NumericField::Pages => book.pages.map(f64::from),
            NumericField::Rating => book.rating,
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NumericField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "year" => Ok(NumericField::Year),
            "pages" => Ok(NumericField::Pages),
            "rating" => Ok(NumericField::Rating),
            other => Err(AppError::BadRequest(format!(
                "Unknown field '{}' (expected year, pages or rating)",
                other
            ))),
        }
    }
}

/// Inclusive numeric range `[low, high]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub low: f64,
    pub high: f64,
}

impl NumericRange {
    /// Parse a `"low-high"` string. Bounds must be integers unless `field` is
    /// fractional, in which case decimals are accepted too.
    pub fn parse(raw: &str, field: NumericField) -> AppResult<Self> {
        let invalid = || {
            AppError::BadRequest(format!(
                "Invalid {} range '{}': expected <low>-<high>",
                field, raw
            ))
        };

        let (low, high) = raw.split_once('-').ok_or_else(invalid)?;
        let parse_bound = |s: &str| -> AppResult<f64> {
            let s = s.trim();
            if field.is_integral() {
                s.parse::<i64>().map(|v| v as f64).map_err(|_| invalid())
            } else {
                s.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(invalid)
            }
        };

        Ok(Self {
            low: parse_bound(low)?,
            high: parse_bound(high)?,
        })
    }

    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
}

/// Mean of a field, whole for years and fractional otherwise
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Average {
    Whole(i64),
    Fractional(f64),
}

/// Min / max / average of a numeric field across the catalogue
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldStats {
    /// Field the statistics were computed over
    pub field: NumericField,
    /// Number of books contributing a value
    pub count: usize,
    /// Book holding the smallest value
    pub min: Option<Book>,
    /// Book holding the largest value
    pub max: Option<Book>,
    /// Arithmetic mean, rounded for years
    #[schema(value_type = Option<f64>)]
    pub average: Option<Average>,
}
