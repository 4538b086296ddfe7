use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("The parameter '{}' is missing in the request!", name))]
    MissingParameter { name: String },

    #[snafu(display(
        "The parameter \"{}\" is expected to be of type {}!",
        name,
        expected_type
    ))]
    InvalidParameterFormat {
        name: String,
        expected_type: &'static str,
    },

    #[snafu(display("Either both value have to be set or neither."))]
    InvalidPointSpecification {},

    #[snafu(display("Invalid date span: {}", details))]
    InvalidDateSpan { details: String },

    #[snafu(display("Malformed search result at position {}: {}", index, details))]
    MalformedSearchResult { index: usize, details: String },

    #[snafu(display("Configuration Error: {}", details))]
    Configuration { details: String },

    #[snafu(display("Search Backend Error: {}", source))]
    Backend {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Errors caused by the content of the request, as opposed to faults of
    /// the service or of the search backend.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Error::MissingParameter { .. }
                | Error::InvalidParameterFormat { .. }
                | Error::InvalidPointSpecification { .. }
                | Error::InvalidDateSpan { .. }
        )
    }
}
