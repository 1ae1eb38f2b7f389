pub mod repository;
pub mod service;
pub mod types;

pub use repository::{
    ExternalCharityBoxRepository, MosqueCharityBoxRepository, SqliteExternalCharityBoxRepository,
    SqliteMosqueCharityBoxRepository,
};
pub use service::{CharityBoxService, CharityBoxServiceImpl};
pub use types::{
    ExternalCharityBox, ExternalCharityBoxRow, MosqueCharityBox, MosqueCharityBoxRow,
    NewExternalCharityBox, NewMosqueCharityBox, UpdateExternalCharityBox, UpdateMosqueCharityBox,
};
