use super::extract::RequestParameters;
use crate::domain::model::{
    error::Error,
    filter::{DateSpan, Point, SearchFilter},
    query::Query,
};

pub const URL_PARAMETER_NAME_FORMAT: &str = "format";
pub const URL_PARAMETER_NAME_HITS_PER_PAGE: &str = "hitsPerPage";
pub const URL_PARAMETER_NAME_LATITUDE: &str = "lat";
pub const URL_PARAMETER_NAME_LONGITUDE: &str = "lon";
pub const URL_PARAMETER_NAME_RADIUS: &str = "radius";
pub const URL_PARAMETER_NAME_RESUME_TOKEN: &str = "resumeToken";
pub const URL_PARAMETER_NAME_TERM: &str = "term";
pub const URL_PARAMETER_NAME_YEAR_END: &str = "yearEnd";
pub const URL_PARAMETER_NAME_YEAR_START: &str = "yearStart";

pub const DEFAULT_FORMAT: &str = "json";

pub fn create_query_from_parameters(parameters: &RequestParameters) -> Result<Query, Error> {
    let terms = parameters.get_list::<String>(URL_PARAMETER_NAME_TERM)?;
    Ok(Query::new(terms))
}

pub fn create_search_filter_from_parameters(
    parameters: &RequestParameters,
) -> Result<SearchFilter, Error> {
    let cursor = parameters.get::<String>(URL_PARAMETER_NAME_RESUME_TOKEN)?;
    let hits_per_page = parameters.get::<u32>(URL_PARAMETER_NAME_HITS_PER_PAGE)?;
    let radius = parameters.get::<f64>(URL_PARAMETER_NAME_RADIUS)?;
    let spatial_center = create_point_from_parameters(parameters)?;
    let date_span = create_date_span_from_parameters(parameters)?;

    Ok(SearchFilter {
        cursor,
        date_span: Some(date_span),
        hits_per_page,
        radius,
        spatial_center,
        ..SearchFilter::default()
    })
}

pub fn create_point_from_parameters(parameters: &RequestParameters) -> Result<Option<Point>, Error> {
    let longitude = parameters.get::<f64>(URL_PARAMETER_NAME_LONGITUDE)?;
    let latitude = parameters.get::<f64>(URL_PARAMETER_NAME_LATITUDE)?;
    Point::from_coordinates(longitude, latitude)
}

pub fn create_date_span_from_parameters(parameters: &RequestParameters) -> Result<DateSpan, Error> {
    let first_year = parameters.get::<i32>(URL_PARAMETER_NAME_YEAR_START)?;
    let last_year = parameters.get::<i32>(URL_PARAMETER_NAME_YEAR_END)?;
    DateSpan::from_years(first_year, last_year)
}

/// The requested response format. Only JSON gets rendered.
pub fn requested_format(parameters: &RequestParameters) -> Result<String, Error> {
    parameters.get_or(URL_PARAMETER_NAME_FORMAT, String::from(DEFAULT_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parameters(query_string: &str) -> RequestParameters {
        RequestParameters::from_query_string(query_string)
    }

    #[test]
    fn should_keep_term_order() {
        let query = create_query_from_parameters(&parameters("term=B&term=A&term=C")).unwrap();
        assert_eq!(
            query.terms(),
            &[String::from("B"), String::from("A"), String::from("C")]
        );

        let query = create_query_from_parameters(&parameters("")).unwrap();
        assert!(query.is_empty());
    }

    #[test]
    fn should_leave_filter_open_without_parameters() {
        let filter = create_search_filter_from_parameters(&parameters("")).unwrap();
        assert_eq!(filter.cursor, None);
        assert_eq!(filter.hits_per_page, None);
        assert_eq!(filter.radius, None);
        assert_eq!(filter.spatial_center, None);
        assert!(filter.date_span.map(|span| span.is_unbounded()).unwrap_or(true));
        assert!(filter.return_fields.is_empty());
    }

    #[test]
    fn should_fill_filter_from_parameters() {
        let filter = create_search_filter_from_parameters(&parameters(
            "resumeToken=AoE%3D&hitsPerPage=20&radius=10&lon=8.6&lat=50.1&yearStart=1923&yearEnd=1945",
        ))
        .unwrap();

        assert_eq!(filter.cursor.as_deref(), Some("AoE="));
        assert_eq!(filter.hits_per_page, Some(20));
        assert_eq!(filter.radius, Some(10.0));
        assert_eq!(filter.spatial_center, Some(Point::new(8.6, 50.1)));
        assert_eq!(
            filter.date_span,
            Some(DateSpan::new(
                NaiveDate::from_ymd_opt(1923, 1, 1),
                NaiveDate::from_ymd_opt(1945, 1, 1)
            ))
        );
    }

    #[test]
    fn should_reject_single_coordinate() {
        let res = create_search_filter_from_parameters(&parameters("lon=8.6"));
        assert!(matches!(res, Err(Error::InvalidPointSpecification {})));

        let res = create_point_from_parameters(&parameters("lat=50.1"));
        assert!(matches!(res, Err(Error::InvalidPointSpecification {})));
    }

    #[test]
    fn should_reject_malformed_numbers() {
        let res = create_search_filter_from_parameters(&parameters("radius=foo"));
        assert!(matches!(
            res,
            Err(Error::InvalidParameterFormat { expected_type: "float", .. })
        ));

        let res = create_date_span_from_parameters(&parameters("yearEnd=1989.5"));
        assert!(matches!(
            res,
            Err(Error::InvalidParameterFormat { expected_type: "int", .. })
        ));
    }

    #[test]
    fn should_default_format_to_json() {
        assert_eq!(requested_format(&parameters("")).unwrap(), "json");
        assert_eq!(requested_format(&parameters("format=api")).unwrap(), "api");
    }
}
