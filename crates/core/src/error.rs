use thiserror::Error;

use crate::model::catalog::CatalogError;
use crate::model::progress::ProgressError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
}
