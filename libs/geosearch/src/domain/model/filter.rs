use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::Error;

/// A position given in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub longitude: f64,
    pub latitude: f64,
}

impl Point {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Point {
            longitude,
            latitude,
        }
    }

    /// Builds a point out of two optional coordinates.
    ///
    /// Both coordinates absent means there is no point at all, which is
    /// valid. Only one of them present is an invalid point specification.
    pub fn from_coordinates(
        longitude: Option<f64>,
        latitude: Option<f64>,
    ) -> Result<Option<Self>, Error> {
        match (longitude, latitude) {
            (Some(longitude), Some(latitude)) => Ok(Some(Point::new(longitude, latitude))),
            (None, None) => Ok(None),
            _ => Err(Error::InvalidPointSpecification {}),
        }
    }
}

/// A span of dates, either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateSpan {
    pub first_year: Option<NaiveDate>,
    pub last_year: Option<NaiveDate>,
}

impl DateSpan {
    pub fn new(first_year: Option<NaiveDate>, last_year: Option<NaiveDate>) -> Self {
        DateSpan {
            first_year,
            last_year,
        }
    }

    /// Each given year is turned into January 1st of that year.
    pub fn from_years(first_year: Option<i32>, last_year: Option<i32>) -> Result<Self, Error> {
        Ok(DateSpan {
            first_year: first_year.map(first_of_january).transpose()?,
            last_year: last_year.map(first_of_january).transpose()?,
        })
    }

    pub fn is_unbounded(&self) -> bool {
        self.first_year.is_none() && self.last_year.is_none()
    }
}

/// Years the backend can parse as a four digit date.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

fn first_of_january(year: i32) -> Result<NaiveDate, Error> {
    YEAR_RANGE
        .contains(&year)
        .then(|| NaiveDate::from_ymd_opt(year, 1, 1))
        .flatten()
        .ok_or_else(|| Error::InvalidDateSpan {
            details: format!("the year {} is out of range", year),
        })
}

/// Everything that narrows down a search, without taking part in the
/// relevance of the hits.
///
/// Unset fields are resolved to configured defaults only when the filter is
/// turned into backend parameters, so a value given here always wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    pub cursor: Option<String>,
    pub date_span: Option<DateSpan>,
    pub hits_per_page: Option<u32>,
    pub radius: Option<f64>,
    pub return_fields: Vec<String>,
    pub spatial_center: Option<Point>,
}

impl SearchFilter {
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    pub fn with_date_span(mut self, date_span: DateSpan) -> Self {
        self.date_span = Some(date_span);
        self
    }

    pub fn with_hits_per_page(mut self, hits_per_page: u32) -> Self {
        self.hits_per_page = Some(hits_per_page);
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_return_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.return_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_spatial_center(mut self, center: Point) -> Self {
        self.spatial_center = Some(center);
        self
    }
}
