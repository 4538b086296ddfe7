use async_trait::async_trait;
use snafu::Snafu;

use crate::domain::model::parameters::SearchParameters;

/// Everything needed for a single round trip to the search backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub query: String,
    pub filters: SearchParameters,
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Document Retrieval Error: {}", source))]
    DocumentRetrievalError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Raw search against the backend: the documents come back untouched.
#[async_trait]
pub trait Search {
    async fn search_documents(
        &self,
        parameters: Parameters,
    ) -> Result<Vec<serde_json::Value>, Error>;
}

#[cfg(test)]
mockall::mock! {
    pub Search {
        pub fn search_documents_(&self, parameters: Parameters) -> Result<Vec<serde_json::Value>, Error>;
    }
}

#[cfg(test)]
#[async_trait]
impl Search for MockSearch {
    async fn search_documents(
        &self,
        parameters: Parameters,
    ) -> Result<Vec<serde_json::Value>, Error> {
        self.search_documents_(parameters)
    }
}

#[async_trait]
impl<T: ?Sized> Search for Box<T>
where
    T: Search + Send + Sync,
{
    async fn search_documents(
        &self,
        parameters: Parameters,
    ) -> Result<Vec<serde_json::Value>, Error> {
        (**self).search_documents(parameters).await
    }
}
